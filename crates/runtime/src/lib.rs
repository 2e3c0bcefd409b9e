pub mod chart_panel;
pub mod config;
pub mod dropdown;
pub mod map_colors;
pub mod selection;
pub mod timeseries;
pub mod view;
pub mod viewer;

#[cfg(test)]
mod testing;

pub use chart_panel::*;
pub use config::*;
pub use dropdown::*;
pub use map_colors::*;
pub use selection::*;
pub use timeseries::*;
pub use view::*;
pub use viewer::*;
