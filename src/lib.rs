//! scatter-rs: load a JSON x/y dataset and render it as a responsive scatter
//! chart onto a named display surface.
//!
//! The page chain is `load_json` → graph readiness → bind → resize listener,
//! all driven by a single-threaded [`PageSession`] task queue. Rendering goes
//! through the backend-agnostic [`render::RenderFrame`] so the same chart can
//! target SVG, Cairo or the headless [`render::NullRenderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod format;
pub mod loader;
pub mod render;
pub mod runtime;
pub mod telemetry;

pub use api::{ChartHandle, ScatterChart, ScatterChartConfig};
pub use crate::core::{DataPoint, Dataset, DatasetValidation, Series, Viewport};
pub use error::{ChartError, ChartResult, LoadFailure};
pub use format::TickFormat;
pub use loader::{FileLoader, ResourceLoader, StaticLoader, load_dataset};
pub use runtime::{PageConfig, PageSession, initialize, load_page, render_graph};
