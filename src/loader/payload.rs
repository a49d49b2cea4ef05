//! JSON payload decoding for the accepted dataset shapes.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::core::{DEFAULT_SERIES_KEY, DataPoint, Dataset, Series};
use crate::error::LoadFailure;
use crate::render::Color;

/// Variants are tried in declaration order: a series record requires
/// `values`, so a flat point array never matches the first arm.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    SeriesList(Vec<RawSeries>),
    Points(Vec<RawPoint>),
    Single(RawSeries),
}

#[derive(Debug, Deserialize)]
struct RawSeries {
    #[serde(default)]
    key: Option<String>,
    values: Vec<RawPoint>,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    #[serde(default)]
    x: Value,
    #[serde(default)]
    y: Value,
}

impl RawPoint {
    fn into_point(self) -> DataPoint {
        DataPoint::new(coordinate(&self.x), coordinate(&self.y))
    }
}

/// Decodes `bytes` into a dataset. `path` is only used for error context.
pub fn decode_dataset(path: &str, bytes: &[u8]) -> Result<Dataset, LoadFailure> {
    let decode_error = |source| LoadFailure::Decode {
        path: path.to_owned(),
        source,
    };
    let document: Value = serde_json::from_slice(bytes).map_err(decode_error)?;
    let payload = Payload::deserialize(document).map_err(decode_error)?;

    let dataset = match payload {
        Payload::Points(points) => Dataset::from_points(
            points.into_iter().map(RawPoint::into_point).collect(),
        ),
        Payload::Single(series) => Dataset::new(vec![series.into_series(path, DEFAULT_SERIES_KEY)]),
        Payload::SeriesList(series) => Dataset::new(
            series
                .into_iter()
                .enumerate()
                .map(|(index, raw)| raw.into_series(path, &format!("Series {}", index + 1)))
                .collect(),
        ),
    };

    debug!(
        path,
        series = dataset.series().len(),
        points = dataset.len(),
        "decoded dataset payload"
    );
    Ok(dataset)
}

impl RawSeries {
    fn into_series(self, path: &str, fallback_key: &str) -> Series {
        let key = self.key.unwrap_or_else(|| fallback_key.to_owned());
        let color = self.color.and_then(|hex| match Color::from_hex(&hex) {
            Ok(color) => Some(color),
            Err(err) => {
                debug!(path, series = %key, error = %err, "ignoring series color");
                None
            }
        });
        Series {
            key,
            values: self.values.into_iter().map(RawPoint::into_point).collect(),
            color,
        }
    }
}

/// Numbers pass through, strings follow JavaScript numeric conversion,
/// booleans map to 1/0, everything else is NaN.
fn coordinate(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => numeric_text(text),
        Value::Bool(flag) => f64::from(u8::from(*flag)),
        Value::Null | Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Blank text is 0; `0x`/`0o`/`0b` prefixes select a radix; otherwise a
/// decimal literal or `[+-]Infinity`.
fn numeric_text(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let prefixed = text.get(..2).map(str::to_ascii_lowercase);
    let radix = match prefixed.as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return radix_digits(&text[2..], radix);
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let decimal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn radix_digits(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0, |acc, c| {
            c.to_digit(radix)
                .map(|digit| acc * f64::from(radix) + f64::from(digit))
        })
        .unwrap_or(f64::NAN)
}
