//! Scatter chart configuration, frame building and the mounted chart handle.

mod chart_config;
mod frame_builder;
mod handle;
pub mod layout;
mod scatter_chart;

pub use chart_config::{DEFAULT_NO_DATA_TEXT, Margins, ScatterChartConfig};
pub use frame_builder::{build_scatter_frame, series_color};
pub use handle::ChartHandle;
pub use layout::{ChartLayout, LegendItem, PlotArea, compute_layout};
pub use scatter_chart::ScatterChart;
