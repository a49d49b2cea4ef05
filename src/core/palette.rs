use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

const CATEGORY10_HEX: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Ordered categorical colors assigned to series by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> ChartResult<Self> {
        if colors.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        for color in &colors {
            color.validate()?;
        }
        Ok(Self { colors })
    }

    /// The ten-color categorical scheme used by default.
    #[must_use]
    pub fn category10() -> Self {
        let colors = CATEGORY10_HEX
            .iter()
            .filter_map(|hex| Color::from_hex(hex).ok())
            .collect();
        Self { colors }
    }

    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color for the series at `index`, cycling through the palette.
    #[must_use]
    pub fn color_at(&self, index: usize) -> Color {
        if self.colors.is_empty() {
            return Color::rgb(0.0, 0.0, 0.0);
        }
        self.colors[index % self.colors.len()]
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.colors.is_empty() {
            return Err(ChartError::InvalidData(
                "palette must contain at least one color".to_owned(),
            ));
        }
        for color in &self.colors {
            color.validate()?;
        }
        Ok(())
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::category10()
    }
}

#[cfg(test)]
mod tests {
    use super::Palette;
    use crate::render::Color;

    #[test]
    fn category10_has_ten_distinct_colors() {
        let palette = Palette::category10();
        assert_eq!(palette.colors().len(), 10);
        assert_eq!(palette.color_at(0), Color::from_hex("#1f77b4").expect("hex"));
        assert_eq!(palette.color_at(3), Color::from_hex("#d62728").expect("hex"));
    }

    #[test]
    fn color_at_cycles() {
        let palette = Palette::category10();
        assert_eq!(palette.color_at(10), palette.color_at(0));
        assert_eq!(palette.color_at(23), palette.color_at(3));
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(Palette::new(Vec::new()).is_err());
    }
}
