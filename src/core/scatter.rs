use std::sync::Arc;

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{DataPoint, Dataset, LinearScale};

/// Extracts one plotted coordinate from a data point.
pub type Accessor = Arc<dyn Fn(&DataPoint) -> f64 + Send + Sync>;

#[must_use]
pub fn x_accessor() -> Accessor {
    Arc::new(|point: &DataPoint| point.x)
}

#[must_use]
pub fn y_accessor() -> Accessor {
    Arc::new(|point: &DataPoint| point.y)
}

/// One scatter marker in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    pub series_index: usize,
    pub x: f64,
    pub y: f64,
}

/// Projects every point whose accessed coordinates are finite.
///
/// Output keeps series order and point order within a series. Points the
/// accessors map to non-finite values are dropped rather than reported.
pub fn project_points(
    dataset: &Dataset,
    x_value: &Accessor,
    y_value: &Accessor,
    x_scale: LinearScale,
    y_scale: LinearScale,
) -> Vec<ProjectedPoint> {
    let mut out = Vec::with_capacity(dataset.len());
    for (series_index, series) in dataset.series().iter().enumerate() {
        let project = |point: &DataPoint| {
            Some(ProjectedPoint {
                series_index,
                x: x_scale.project(x_value(point))?,
                y: y_scale.project(y_value(point))?,
            })
        };

        #[cfg(feature = "parallel-projection")]
        {
            let projected: Vec<ProjectedPoint> =
                series.values.par_iter().filter_map(project).collect();
            out.extend(projected);
        }

        #[cfg(not(feature = "parallel-projection"))]
        {
            out.extend(series.values.iter().filter_map(project));
        }
    }
    out
}
