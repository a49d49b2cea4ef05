use std::collections::BTreeSet;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::scatter::ProjectedPoint;

/// Which axis a distribution rug is drawn along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionAxis {
    X,
    Y,
}

/// One rug mark: a point's pixel position along an axis, colored by series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionTick {
    pub series_index: usize,
    pub position: f64,
}

/// Collapses projected points into distinct rug marks for one axis.
///
/// Positions are snapped to half pixels and deduplicated per series, so
/// overlapping samples do not stack identical strokes. Output is ordered by
/// series, then by position.
#[must_use]
pub fn distribution_ticks(
    points: &[ProjectedPoint],
    axis: DistributionAxis,
) -> Vec<DistributionTick> {
    let distinct: BTreeSet<(usize, OrderedFloat<f64>)> = points
        .iter()
        .map(|point| {
            let raw = match axis {
                DistributionAxis::X => point.x,
                DistributionAxis::Y => point.y,
            };
            (point.series_index, OrderedFloat(snap_half_pixel(raw)))
        })
        .collect();

    distinct
        .into_iter()
        .map(|(series_index, position)| DistributionTick {
            series_index,
            position: position.into_inner(),
        })
        .collect()
}

fn snap_half_pixel(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}
