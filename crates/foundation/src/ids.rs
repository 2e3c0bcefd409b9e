use std::fmt;

/// Identifier of a subcatchment as published by the backend (`SC_ID`).
///
/// Kept as text: the geometry may carry it as a JSON number while map-data
/// payloads key it as a string, and both must compare equal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        RegionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        RegionId(s.to_string())
    }
}

/// Position of a region inside the loaded region set.
///
/// Stable for the whole session since geometry is loaded exactly once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionKey(pub u32);

impl RegionKey {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
