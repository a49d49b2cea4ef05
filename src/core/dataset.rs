use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::render::Color;

/// Key given to the single series built from a flat point array.
pub const DEFAULT_SERIES_KEY: &str = "Data";

/// Named, ordered run of points drawn in one color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub key: String,
    pub values: Vec<DataPoint>,
    #[serde(default)]
    pub color: Option<Color>,
}

impl Series {
    #[must_use]
    pub fn new(key: impl Into<String>, values: Vec<DataPoint>) -> Self {
        Self {
            key: key.into(),
            values,
            color: None,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// The loaded chart datum: an ordered list of series.
///
/// Series order decides palette assignment, so it is preserved exactly as
/// decoded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    series: Vec<Series>,
}

impl Dataset {
    #[must_use]
    pub fn new(series: Vec<Series>) -> Self {
        Self { series }
    }

    #[must_use]
    pub fn from_points(points: Vec<DataPoint>) -> Self {
        Self::new(vec![Series::new(DEFAULT_SERIES_KEY, points)])
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Total number of points across all series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.iter().map(|series| series.values.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn points(&self) -> impl Iterator<Item = &DataPoint> {
        self.series.iter().flat_map(|series| series.values.iter())
    }

    #[must_use]
    pub fn finite_len(&self) -> usize {
        self.points().filter(|point| point.is_finite()).count()
    }
}

/// How much the loader checks a decoded dataset before handing it on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetValidation {
    /// Accept whatever decoded. Non-finite points are skipped when drawing.
    #[default]
    Passthrough,
    /// Require at least one point.
    RejectEmpty,
    /// Require at least one point and finite coordinates everywhere.
    Strict,
}

impl DatasetValidation {
    /// Returns a human-readable reason when `dataset` violates the policy.
    pub fn check(self, dataset: &Dataset) -> Result<(), String> {
        match self {
            Self::Passthrough => Ok(()),
            Self::RejectEmpty => reject_empty(dataset),
            Self::Strict => {
                reject_empty(dataset)?;
                for series in dataset.series() {
                    if let Some(index) = series.values.iter().position(|point| !point.is_finite())
                    {
                        return Err(format!(
                            "series `{}` point {index} has a non-numeric coordinate",
                            series.key
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

fn reject_empty(dataset: &Dataset) -> Result<(), String> {
    if dataset.is_empty() {
        return Err("dataset contains no points".to_owned());
    }
    Ok(())
}
