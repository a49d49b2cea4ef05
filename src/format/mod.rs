//! Numeric tick-label formatting driven by compact specifiers such as `".02f"`.
//!
//! Supported grammar: `[,][.precision](f|e|d|%)`. Fixed-point output rounds
//! half away from zero on the exact binary value of the input, matching the
//! behavior of `Number.prototype.toFixed` rather than Rust's `{:.N}`.

use std::fmt;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const MAX_PRECISION: u8 = 20;
const DEFAULT_PRECISION: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormatKind {
    /// `f`: fixed-point.
    Fixed,
    /// `e`: exponent notation.
    Exponent,
    /// `d`: rounded integer.
    Integer,
    /// `%`: multiply by 100, fixed-point, percent sign.
    Percent,
}

impl FormatKind {
    fn symbol(self) -> char {
        match self {
            Self::Fixed => 'f',
            Self::Exponent => 'e',
            Self::Integer => 'd',
            Self::Percent => '%',
        }
    }
}

/// Parsed tick format. Serializes as its specifier string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TickFormat {
    pub kind: FormatKind,
    pub precision: Option<u8>,
    pub grouping: bool,
}

impl TickFormat {
    /// Fixed-point with `precision` decimals.
    #[must_use]
    pub fn fixed(precision: u8) -> Self {
        Self {
            kind: FormatKind::Fixed,
            precision: Some(precision.min(MAX_PRECISION)),
            grouping: false,
        }
    }

    pub fn parse(specifier: &str) -> ChartResult<Self> {
        let invalid = |reason: &str| {
            ChartError::InvalidData(format!("invalid tick format `{specifier}`: {reason}"))
        };

        let mut rest = specifier;
        let grouping = if let Some(stripped) = rest.strip_prefix(',') {
            rest = stripped;
            true
        } else {
            false
        };

        let precision = if let Some(stripped) = rest.strip_prefix('.') {
            let digits_len = stripped
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(stripped.len());
            if digits_len == 0 {
                return Err(invalid("precision requires at least one digit"));
            }
            let (digits, tail) = stripped.split_at(digits_len);
            rest = tail;
            let value: u32 = digits
                .parse()
                .map_err(|_| invalid("precision is not a number"))?;
            Some(value.min(u32::from(MAX_PRECISION)) as u8)
        } else {
            None
        };

        let mut chars = rest.chars();
        let kind = match chars.next() {
            Some('f') => FormatKind::Fixed,
            Some('e') => FormatKind::Exponent,
            Some('d') => FormatKind::Integer,
            Some('%') => FormatKind::Percent,
            Some(other) => return Err(invalid(&format!("unsupported type `{other}`"))),
            None => return Err(invalid("missing type")),
        };
        if chars.next().is_some() {
            return Err(invalid("unexpected trailing characters"));
        }

        Ok(Self {
            kind,
            precision,
            grouping,
        })
    }

    #[must_use]
    pub fn format(self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_owned();
        }
        if value.is_infinite() {
            return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
        }

        let sign = if value < 0.0 { "-" } else { "" };
        let magnitude = value.abs();
        let precision = self.precision.unwrap_or(DEFAULT_PRECISION);

        let body = match self.kind {
            FormatKind::Fixed => fixed_digits(magnitude, precision),
            FormatKind::Percent => fixed_digits(magnitude * 100.0, precision),
            FormatKind::Integer => fixed_digits(magnitude, 0),
            FormatKind::Exponent => exponent_digits(magnitude, precision),
        };
        let body = if self.grouping && self.kind != FormatKind::Exponent {
            group_thousands(&body)
        } else {
            body
        };
        let suffix = if self.kind == FormatKind::Percent {
            "%"
        } else {
            ""
        };

        format!("{sign}{body}{suffix}")
    }
}

impl Default for TickFormat {
    fn default() -> Self {
        Self::fixed(2)
    }
}

impl fmt::Display for TickFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.grouping {
            f.write_str(",")?;
        }
        if let Some(precision) = self.precision {
            write!(f, ".{precision}")?;
        }
        write!(f, "{}", self.kind.symbol())
    }
}

impl TryFrom<String> for TickFormat {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TickFormat> for String {
    fn from(value: TickFormat) -> Self {
        value.to_string()
    }
}

fn fixed_digits(magnitude: f64, precision: u8) -> String {
    let scale = u32::from(precision);
    match Decimal::from_f64_retain(magnitude).or_else(|| Decimal::from_f64(magnitude)) {
        Some(exact) => {
            let mut rounded =
                exact.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(scale);
            rounded.to_string()
        }
        // Beyond the 96-bit decimal range.
        None => format!("{magnitude:.prec$}", prec = usize::from(precision)),
    }
}

fn exponent_digits(magnitude: f64, precision: u8) -> String {
    let raw = format!("{magnitude:.prec$e}", prec = usize::from(precision));
    match raw.split_once('e') {
        Some((mantissa, exponent)) if exponent.starts_with('-') => {
            format!("{mantissa}e{exponent}")
        }
        Some((mantissa, exponent)) => format!("{mantissa}e+{exponent}"),
        None => raw,
    }
}

fn group_thousands(body: &str) -> String {
    let (integer, fraction) = match body.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (body, None),
    };

    let mut grouped = String::with_capacity(body.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
