use foundation::RegionId;
use log::warn;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// Outer ring first, holes after it.
pub type Polygon = Vec<Vec<GeoPoint>>;

#[derive(Debug, Clone, PartialEq)]
pub enum AreaGeometry {
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubcatchmentFeature {
    /// `None` when the feature lacks the configured identifier property.
    pub id: Option<RegionId>,
    pub properties: Map<String, Value>,
    pub geometry: AreaGeometry,
}

/// Decoded `/subcatchments` payload.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubcatchmentCollection {
    pub features: Vec<SubcatchmentFeature>,
}

#[derive(Debug)]
pub enum GeometryError {
    Json(String),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::Json(e) => write!(f, "JSON parse error: {e}"),
            GeometryError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeometryError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

impl SubcatchmentCollection {
    pub fn from_geojson_str(payload: &str, id_property: &str) -> Result<Self, GeometryError> {
        let value: Value =
            serde_json::from_str(payload).map_err(|e| GeometryError::Json(e.to_string()))?;
        Self::from_geojson_value(&value, id_property)
    }

    pub fn from_geojson_value(value: &Value, id_property: &str) -> Result<Self, GeometryError> {
        let obj = value
            .as_object()
            .ok_or(GeometryError::NotAFeatureCollection)?;
        let ty = obj
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(GeometryError::NotAFeatureCollection)?;
        if ty != "FeatureCollection" {
            return Err(GeometryError::NotAFeatureCollection);
        }

        let features_val = obj
            .get("features")
            .and_then(|v| v.as_array())
            .ok_or(GeometryError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            let feat_obj = feat_val
                .as_object()
                .ok_or_else(|| GeometryError::InvalidFeature {
                    index,
                    reason: "feature must be an object".to_string(),
                })?;

            let properties = feat_obj
                .get("properties")
                .and_then(|v| v.as_object())
                .cloned()
                .unwrap_or_default();

            let id = properties.get(id_property).and_then(region_id_from_value);

            let geometry_val = feat_obj.get("geometry").unwrap_or(&Value::Null);
            let Some(geometry) = parse_geometry(geometry_val)
                .map_err(|reason| GeometryError::InvalidFeature { index, reason })?
            else {
                warn!("skipping feature {index}: no polygon geometry");
                continue;
            };

            features.push(SubcatchmentFeature {
                id,
                properties,
                geometry,
            });
        }

        Ok(Self { features })
    }
}

impl SubcatchmentFeature {
    /// Re-emits this feature as a standalone GeoJSON `Feature` for the map widget.
    /// Property order may differ from the decoded payload.
    pub fn to_geojson_value(&self) -> Value {
        let mut fobj = Map::new();
        fobj.insert("type".to_string(), Value::String("Feature".to_string()));
        fobj.insert(
            "properties".to_string(),
            Value::Object(self.properties.clone()),
        );
        fobj.insert(
            "geometry".to_string(),
            geometry_to_geojson_value(&self.geometry),
        );
        Value::Object(fobj)
    }
}

/// Strings are taken verbatim, numbers in `serde_json`'s canonical form.
fn region_id_from_value(value: &Value) -> Option<RegionId> {
    match value {
        Value::String(s) if !s.is_empty() => Some(RegionId::new(s.clone())),
        Value::Number(n) => Some(RegionId::new(n.to_string())),
        _ => None,
    }
}

fn geometry_to_geojson_value(geom: &AreaGeometry) -> Value {
    let mut obj = Map::new();
    match geom {
        AreaGeometry::Polygon(rings) => {
            obj.insert("type".to_string(), Value::String("Polygon".to_string()));
            obj.insert("coordinates".to_string(), polygon_coords(rings));
        }
        AreaGeometry::MultiPolygon(polys) => {
            obj.insert(
                "type".to_string(),
                Value::String("MultiPolygon".to_string()),
            );
            let coords = polys.iter().map(polygon_coords).collect();
            obj.insert("coordinates".to_string(), Value::Array(coords));
        }
    }
    Value::Object(obj)
}

fn polygon_coords(rings: &Polygon) -> Value {
    Value::Array(
        rings
            .iter()
            .map(|ring| Value::Array(ring.iter().map(point_coords).collect()))
            .collect(),
    )
}

fn point_coords(p: &GeoPoint) -> Value {
    Value::Array(vec![Value::from(p.lon_deg), Value::from(p.lat_deg)])
}

/// `Ok(None)` for a null geometry or one that is not an area.
fn parse_geometry(value: &Value) -> Result<Option<AreaGeometry>, String> {
    if value.is_null() {
        return Ok(None);
    }
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or("geometry missing type".to_string())?;

    if ty != "Polygon" && ty != "MultiPolygon" {
        return Ok(None);
    }
    let coords = obj
        .get("coordinates")
        .ok_or("geometry missing coordinates".to_string())?;

    if ty == "Polygon" {
        Ok(Some(AreaGeometry::Polygon(parse_polygon(coords)?)))
    } else {
        Ok(Some(AreaGeometry::MultiPolygon(parse_multi_polygon(coords)?)))
    }
}

fn parse_point(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(GeoPoint::new(lon, lat))
}

fn parse_ring(coords: &Value) -> Result<Vec<GeoPoint>, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array".to_string())?;
    let mut out = Vec::with_capacity(arr.len());
    for item in arr {
        out.push(parse_point(item)?);
    }
    Ok(out)
}

fn parse_polygon(coords: &Value) -> Result<Polygon, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        out.push(parse_ring(ring)?);
    }
    Ok(out)
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Polygon>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    let mut out = Vec::with_capacity(polys.len());
    for poly in polys {
        out.push(parse_polygon(poly)?);
    }
    Ok(out)
}
