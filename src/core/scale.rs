use crate::error::{ChartError, ChartResult};

/// Linear mapping from a data domain onto a pixel range.
///
/// The range may be decreasing (a Y axis grows upward on screen).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite()
            || !domain_end.is_finite()
            || half_span(domain_start, domain_end) == 0.0
        {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start: 0.0,
            range_end: 1.0,
        })
    }

    /// Builds a scale whose domain covers `values`, or `None` when no value is finite.
    ///
    /// A single distinct value `v` is widened to `v ± |v| * 0.01`, or `[-1, 1]`
    /// when `v` is zero. When that pad is too small to separate the bounds
    /// (subnormal values) the pad becomes `1.0`.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<ChartResult<Self>> {
        let (min, max) = finite_extent(values)?;
        let (start, end) = widen_degenerate(min, max);
        Some(Self::new(start, end))
    }

    pub fn with_range(mut self, range_start: f64, range_end: f64) -> ChartResult<Self> {
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }
        self.range_start = range_start;
        self.range_end = range_end;
        Ok(self)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to a pixel. Non-finite input yields `None`.
    #[must_use]
    pub fn project(self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        // Halved operands keep spans near f64::MAX finite.
        let normalized = (value / 2.0 - self.domain_start / 2.0)
            / half_span(self.domain_start, self.domain_end);
        Some(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn invert(self, pixel: f64) -> ChartResult<f64> {
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return Err(ChartError::InvalidData(
                "cannot invert a zero-width range".to_owned(),
            ));
        }
        let normalized = (pixel - self.range_start) / span;
        let half_span = half_span(self.domain_start, self.domain_end);
        let half = self.domain_start / 2.0 + normalized * half_span;
        Ok(half * 2.0)
    }
}

fn finite_extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |extent, value| match extent {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

fn half_span(start: f64, end: f64) -> f64 {
    end / 2.0 - start / 2.0
}

fn widen_degenerate(min: f64, max: f64) -> (f64, f64) {
    if half_span(min, max) != 0.0 {
        return (min, max);
    }
    if min == 0.0 && max == 0.0 {
        return (-1.0, 1.0);
    }
    let pad = min.abs() * 0.01;
    let (start, end) = padded(min, max, pad);
    if half_span(start, end) != 0.0 {
        return (start, end);
    }
    padded(min, max, pad.max(1.0))
}

fn padded(min: f64, max: f64, pad: f64) -> (f64, f64) {
    (
        (min - pad).clamp(f64::MIN, f64::MAX),
        (max + pad).clamp(f64::MIN, f64::MAX),
    )
}
