use std::collections::HashSet;

use formats::{MapValues, SubcatchmentCollection};
use foundation::{RegionId, RegionKey};
use log::warn;

use crate::legend::escape_html;
use crate::symbology::{ColorScale, RegionStyle};

/// One subcatchment polygon and its current map style.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub key: RegionKey,
    pub id: Option<RegionId>,
    /// GeoJSON `Feature` handed to the map widget.
    pub feature: serde_json::Value,
    pub style: RegionStyle,
}

impl Region {
    /// Popup markup shown when the region is clicked.
    pub fn popup_html(&self) -> Option<String> {
        let id = self.id.as_ref()?;
        Some(format!(
            "<div class=\"popup-content\"><b>Subcuenca:</b> {} </div>",
            escape_html(id.as_str())
        ))
    }
}

/// Every region loaded for the session, in feature order.
///
/// Built once from the `/subcatchments` payload; only styles change afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    pub fn from_collection(collection: &SubcatchmentCollection) -> Self {
        let mut set = RegionSet::default();
        let mut seen: HashSet<&RegionId> = HashSet::new();
        for (index, feature) in collection.features.iter().enumerate() {
            let key = RegionKey(index as u32);
            match &feature.id {
                Some(id) => {
                    if !seen.insert(id) {
                        warn!("duplicate region id {id} at feature {index}");
                    }
                }
                None => warn!("feature {index} has no region id"),
            }
            set.regions.push(Region {
                key,
                id: feature.id.clone(),
                feature: feature.to_geojson_value(),
                style: RegionStyle::neutral(),
            });
        }
        set
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, key: RegionKey) -> Option<&Region> {
        self.regions.get(key.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> + '_ {
        self.regions.iter()
    }

    /// Restyles every region in one pass.
    ///
    /// Regions absent from `values` (or without an id) are colored as zero.
    pub fn apply_colors(&mut self, values: &MapValues, scale: &ColorScale) {
        for region in &mut self.regions {
            let value = region
                .id
                .as_ref()
                .and_then(|id| values.get(id))
                .unwrap_or(0.0);
            region.style = region.style.with_fill(scale.color_for(value));
        }
    }
}
