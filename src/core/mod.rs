pub mod dataset;
pub mod distribution;
pub mod palette;
pub mod scale;
pub mod scatter;
pub mod ticks;
pub mod types;

pub use dataset::{DEFAULT_SERIES_KEY, Dataset, DatasetValidation, Series};
pub use distribution::{DistributionAxis, DistributionTick, distribution_ticks};
pub use palette::Palette;
pub use scale::LinearScale;
pub use scatter::{Accessor, ProjectedPoint, project_points, x_accessor, y_accessor};
pub use ticks::{Ticks, nice_ticks, tick_count_for_span};
pub use types::{DataPoint, Viewport};
