pub mod geometry;
pub mod map_values;
pub mod options;
pub mod timeseries;

pub use geometry::*;
pub use map_values::*;
pub use options::*;
pub use timeseries::*;
