pub mod choropleth;
pub mod legend;
pub mod symbology;

pub use choropleth::*;
pub use legend::*;
pub use symbology::*;
