use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use crate::api::frame_builder::build_scatter_frame;
use crate::api::{ChartHandle, Margins, ScatterChartConfig};
use crate::core::{Accessor, DataPoint, Dataset, Palette, Viewport, x_accessor, y_accessor};
use crate::error::ChartResult;
use crate::format::TickFormat;
use crate::render::{RenderFrame, Renderer};
use crate::runtime::PageSession;

/// Configurable scatter chart, ready to be bound to a surface.
///
/// Builder methods consume and return the chart so configuration reads as a
/// single chain.
#[derive(Clone)]
pub struct ScatterChart {
    config: ScatterChartConfig,
    x_value: Accessor,
    y_value: Accessor,
}

impl ScatterChart {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ScatterChartConfig::default(),
            x_value: x_accessor(),
            y_value: y_accessor(),
        }
    }

    pub fn from_config(config: ScatterChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    #[must_use]
    pub fn config(&self) -> &ScatterChartConfig {
        &self.config
    }

    #[must_use]
    pub fn x_value(&self) -> &Accessor {
        &self.x_value
    }

    #[must_use]
    pub fn y_value(&self) -> &Accessor {
        &self.y_value
    }

    #[must_use]
    pub fn x<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&DataPoint) -> f64 + Send + Sync + 'static,
    {
        self.x_value = Arc::new(accessor);
        self
    }

    #[must_use]
    pub fn y<F>(mut self, accessor: F) -> Self
    where
        F: Fn(&DataPoint) -> f64 + Send + Sync + 'static,
    {
        self.y_value = Arc::new(accessor);
        self
    }

    #[must_use]
    pub fn show_dist_x(mut self, show: bool) -> Self {
        self.config.show_dist_x = show;
        self
    }

    #[must_use]
    pub fn show_dist_y(mut self, show: bool) -> Self {
        self.config.show_dist_y = show;
        self
    }

    #[must_use]
    pub fn color(mut self, palette: Palette) -> Self {
        self.config.palette = palette;
        self
    }

    #[must_use]
    pub fn x_tick_format(mut self, format: TickFormat) -> Self {
        self.config.x_tick_format = format;
        self
    }

    #[must_use]
    pub fn y_tick_format(mut self, format: TickFormat) -> Self {
        self.config.y_tick_format = format;
        self
    }

    #[must_use]
    pub fn margins(mut self, margins: Margins) -> Self {
        self.config.margins = margins;
        self
    }

    #[must_use]
    pub fn show_legend(mut self, show: bool) -> Self {
        self.config.show_legend = show;
        self
    }

    #[must_use]
    pub fn x_axis_label(mut self, label: impl Into<String>) -> Self {
        self.config.x_axis_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn y_axis_label(mut self, label: impl Into<String>) -> Self {
        self.config.y_axis_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn force_x(mut self, values: Vec<f64>) -> Self {
        self.config.force_x = values;
        self
    }

    #[must_use]
    pub fn force_y(mut self, values: Vec<f64>) -> Self {
        self.config.force_y = values;
        self
    }

    #[must_use]
    pub fn no_data_text(mut self, text: impl Into<String>) -> Self {
        self.config.no_data_text = text.into();
        self
    }

    pub fn build_frame(&self, dataset: &Dataset, viewport: Viewport) -> ChartResult<RenderFrame> {
        build_scatter_frame(self, dataset, viewport)
    }

    /// Mounts the chart on the surface named `selector` with `datum` bound,
    /// rendering once.
    pub fn bind<R: Renderer + 'static>(
        self,
        session: &mut PageSession<R>,
        selector: &str,
        datum: Rc<Dataset>,
    ) -> ChartResult<Rc<ChartHandle<R>>> {
        self.config.validate()?;
        let surface = session.surface(selector)?;
        debug!(selector, points = datum.len(), "binding scatter chart");
        let handle = ChartHandle::mount(self, datum, selector, surface)?;
        Ok(Rc::new(handle))
    }
}

impl Default for ScatterChart {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScatterChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScatterChart")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::ScatterChart;
    use crate::core::{DataPoint, Dataset, Palette, Viewport};
    use crate::format::TickFormat;
    use crate::render::Color;

    #[test]
    fn builder_chain_matches_page_configuration() {
        let chart = ScatterChart::new()
            .x(|point: &DataPoint| point.x)
            .y(|point: &DataPoint| point.y)
            .show_dist_x(true)
            .show_dist_y(true)
            .color(Palette::category10())
            .x_tick_format(TickFormat::parse(".02f").expect("format"))
            .y_tick_format(TickFormat::parse(".02f").expect("format"));
        assert_eq!(
            chart.config(),
            &crate::api::ScatterChartConfig::scatter_page()
        );
    }

    #[test]
    fn accessors_drive_projection() {
        let dataset = Dataset::from_points(vec![
            DataPoint::new(1.0, 10.0),
            DataPoint::new(2.0, 20.0),
        ]);
        let chart = ScatterChart::new()
            .show_legend(false)
            .x(|point: &DataPoint| point.y)
            .y(|point: &DataPoint| point.x);
        let frame = chart
            .build_frame(&dataset, Viewport::new(400, 300))
            .expect("frame");
        assert!(frame.texts_matching("10.00").next().is_some());
        assert!(frame.texts_matching("20.00").next().is_some());
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config = crate::api::ScatterChartConfig {
            dist_size_px: -1.0,
            ..crate::api::ScatterChartConfig::default()
        };
        assert!(ScatterChart::from_config(config).is_err());

        let palette = Palette::new(vec![Color::rgba(0.0, 0.0, 0.0, 2.0)]);
        assert!(palette.is_err());
    }
}
