use serde::{Deserialize, Serialize};

use crate::core::Palette;
use crate::core::ticks::{X_TICK_SPACING_PX, Y_TICK_SPACING_PX};
use crate::error::{ChartError, ChartResult};
use crate::format::TickFormat;

pub const DEFAULT_NO_DATA_TEXT: &str = "No Data Available.";

/// Space reserved around the plot area for axes and the legend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 30.0,
            right: 20.0,
            bottom: 50.0,
            left: 75.0,
        }
    }
}

impl Margins {
    pub fn validate(self) -> ChartResult<()> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Serializable scatter chart configuration.
///
/// `Default` mirrors the stock scatter chart: no distribution lines and
/// two-decimal labels. [`ScatterChartConfig::scatter_page`] is the
/// configuration the scatter page applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterChartConfig {
    pub margins: Margins,
    pub show_dist_x: bool,
    pub show_dist_y: bool,
    pub palette: Palette,
    pub x_tick_format: TickFormat,
    pub y_tick_format: TickFormat,
    pub point_radius: f64,
    pub dist_size_px: f64,
    pub show_legend: bool,
    pub x_axis_label: Option<String>,
    pub y_axis_label: Option<String>,
    pub force_x: Vec<f64>,
    pub force_y: Vec<f64>,
    pub no_data_text: String,
    pub x_tick_spacing_px: f64,
    pub y_tick_spacing_px: f64,
    pub font_size_px: f64,
}

impl Default for ScatterChartConfig {
    fn default() -> Self {
        Self {
            margins: Margins::default(),
            show_dist_x: false,
            show_dist_y: false,
            palette: Palette::category10(),
            x_tick_format: TickFormat::default(),
            y_tick_format: TickFormat::default(),
            point_radius: 4.0,
            dist_size_px: 8.0,
            show_legend: true,
            x_axis_label: None,
            y_axis_label: None,
            force_x: Vec::new(),
            force_y: Vec::new(),
            no_data_text: DEFAULT_NO_DATA_TEXT.to_owned(),
            x_tick_spacing_px: X_TICK_SPACING_PX,
            y_tick_spacing_px: Y_TICK_SPACING_PX,
            font_size_px: 12.0,
        }
    }
}

impl ScatterChartConfig {
    /// Distribution lines on both axes, Category10, `.02f` labels.
    #[must_use]
    pub fn scatter_page() -> Self {
        Self {
            show_dist_x: true,
            show_dist_y: true,
            palette: Palette::category10(),
            x_tick_format: TickFormat::fixed(2),
            y_tick_format: TickFormat::fixed(2),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.margins.validate()?;
        self.palette.validate()?;
        for (name, value) in [
            ("point_radius", self.point_radius),
            ("dist_size_px", self.dist_size_px),
            ("x_tick_spacing_px", self.x_tick_spacing_px),
            ("y_tick_spacing_px", self.y_tick_spacing_px),
            ("font_size_px", self.font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if self
            .force_x
            .iter()
            .chain(self.force_y.iter())
            .any(|value| !value.is_finite())
        {
            return Err(ChartError::InvalidData(
                "forced domain values must be finite".to_owned(),
            ));
        }
        if self.no_data_text.is_empty() {
            return Err(ChartError::InvalidData(
                "no-data text must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{Margins, ScatterChartConfig};
    use crate::format::TickFormat;

    #[test]
    fn scatter_page_enables_distribution_lines_and_two_decimals() {
        let config = ScatterChartConfig::scatter_page();
        assert!(config.show_dist_x && config.show_dist_y);
        assert_eq!(config.x_tick_format, TickFormat::fixed(2));
        assert_eq!(config.y_tick_format, TickFormat::fixed(2));
        assert_eq!(config.palette.colors().len(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_round_trip_and_partial_documents() {
        let config = ScatterChartConfig::scatter_page();
        let json = config.to_json_pretty().expect("serialize");
        assert!(json.contains("\".2f\""));
        let parsed = ScatterChartConfig::from_json_str(&json).expect("parse");
        assert_eq!(parsed, config);

        let partial = ScatterChartConfig::from_json_str(r#"{"show_dist_x": true, "y_tick_format": ",.1%"}"#)
            .expect("partial");
        assert!(partial.show_dist_x);
        assert!(!partial.show_dist_y);
        assert_eq!(partial.y_tick_format.to_string(), ",.1%");
        assert_eq!(partial.margins, Margins::default());
    }

    #[test]
    fn rejects_non_positive_sizes() {
        let config = ScatterChartConfig {
            point_radius: 0.0,
            ..ScatterChartConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ScatterChartConfig {
            force_y: vec![f64::NAN],
            ..ScatterChartConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
