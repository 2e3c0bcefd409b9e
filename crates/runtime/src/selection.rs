use foundation::RegionId;

use crate::view::Selector;

/// Map request key: the triple a choropleth refresh depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MapQuery {
    pub scenario: String,
    pub variable: String,
    pub year: String,
}

/// Time-series request key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesQuery {
    pub region: RegionId,
    pub scenario: String,
    pub variable: String,
}

/// Current user choices, read by every component.
///
/// Writers: the dropdown loaders (defaults) and the matching user-change
/// handler for each field. Callers must only store option values from the
/// most recent load of the matching selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    year: Option<String>,
    scenario: Option<String>,
    variable: Option<String>,
    region: Option<RegionId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn scenario(&self) -> Option<&str> {
        self.scenario.as_deref()
    }

    pub fn variable(&self) -> Option<&str> {
        self.variable.as_deref()
    }

    pub fn region(&self) -> Option<&RegionId> {
        self.region.as_ref()
    }

    pub fn set_year(&mut self, year: Option<String>) {
        self.year = year;
    }

    pub fn set_scenario(&mut self, scenario: Option<String>) {
        self.scenario = scenario;
    }

    pub fn set_variable(&mut self, variable: Option<String>) {
        self.variable = variable;
    }

    pub fn set_region(&mut self, region: Option<RegionId>) {
        self.region = region;
    }

    pub fn get(&self, selector: Selector) -> Option<&str> {
        match selector {
            Selector::Year => self.year(),
            Selector::Scenario => self.scenario(),
            Selector::Variable => self.variable(),
        }
    }

    pub fn set(&mut self, selector: Selector, value: Option<String>) {
        match selector {
            Selector::Year => self.set_year(value),
            Selector::Scenario => self.set_scenario(value),
            Selector::Variable => self.set_variable(value),
        }
    }

    /// `None` until year, scenario and variable are all chosen.
    pub fn map_query(&self) -> Option<MapQuery> {
        Some(MapQuery {
            scenario: self.scenario.clone()?,
            variable: self.variable.clone()?,
            year: self.year.clone()?,
        })
    }

    /// `None` until a region, scenario and variable are all chosen.
    pub fn series_query(&self) -> Option<SeriesQuery> {
        Some(SeriesQuery {
            region: self.region.clone()?,
            scenario: self.scenario.clone()?,
            variable: self.variable.clone()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{MapQuery, SelectionState};
    use crate::view::Selector;
    use foundation::RegionId;

    #[test]
    fn writes_are_visible_to_next_read() {
        let mut s = SelectionState::new();
        s.set(Selector::Year, Some("2030".into()));
        assert_eq!(s.year(), Some("2030"));
        assert_eq!(s.get(Selector::Year), Some("2030"));
        s.set_year(None);
        assert_eq!(s.get(Selector::Year), None);
    }

    #[test]
    fn map_query_needs_all_three_fields() {
        let mut s = SelectionState::new();
        s.set_year(Some("2025".into()));
        s.set_scenario(Some("ssp585".into()));
        assert_eq!(s.map_query(), None);
        s.set_variable(Some("pr".into()));
        assert_eq!(
            s.map_query(),
            Some(MapQuery {
                scenario: "ssp585".into(),
                variable: "pr".into(),
                year: "2025".into(),
            })
        );
    }

    #[test]
    fn series_query_ignores_year() {
        let mut s = SelectionState::new();
        s.set_scenario(Some("ssp126".into()));
        s.set_variable(Some("et".into()));
        assert!(s.series_query().is_none());
        s.set_region(Some(RegionId::new("7")));
        let q = s.series_query().expect("query");
        assert_eq!(q.region, RegionId::new("7"));
        assert_eq!(q.scenario, "ssp126");
    }
}
