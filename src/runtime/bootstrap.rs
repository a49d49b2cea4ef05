use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{ChartHandle, ScatterChart, ScatterChartConfig};
use crate::core::{Dataset, DatasetValidation};
use crate::error::{ChartError, ChartResult};
use crate::loader::{DEFAULT_RESOURCE_PATH, ResourceLoader};
use crate::render::Renderer;
use crate::runtime::PageSession;

pub const DEFAULT_SURFACE_SELECTOR: &str = "#scatterchart svg";

/// Everything the scatter page needs to go from resource path to chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub resource_path: String,
    pub surface_selector: String,
    pub validation: DatasetValidation,
    pub chart: ScatterChartConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            resource_path: DEFAULT_RESOURCE_PATH.to_owned(),
            surface_selector: DEFAULT_SURFACE_SELECTOR.to_owned(),
            validation: DatasetValidation::default(),
            chart: ScatterChartConfig::scatter_page(),
        }
    }
}

impl PageConfig {
    #[must_use]
    pub fn with_resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = path.into();
        self
    }

    #[must_use]
    pub fn with_surface_selector(mut self, selector: impl Into<String>) -> Self {
        self.surface_selector = selector.into();
        self
    }

    #[must_use]
    pub fn with_validation(mut self, validation: DatasetValidation) -> Self {
        self.validation = validation;
        self
    }

    #[must_use]
    pub fn with_chart(mut self, chart: ScatterChartConfig) -> Self {
        self.chart = chart;
        self
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

/// Queues the graph for `dataset`: once ready, the chart is configured,
/// bound to the configured surface and subscribed to window resizes.
pub fn render_graph<R: Renderer + 'static>(
    session: &mut PageSession<R>,
    dataset: Dataset,
    config: &PageConfig,
) {
    render_graph_then(session, dataset, config, |_, _| {});
}

fn render_graph_then<R, C>(
    session: &mut PageSession<R>,
    dataset: Dataset,
    config: &PageConfig,
    on_ready: C,
) where
    R: Renderer + 'static,
    C: FnOnce(&mut PageSession<R>, ChartResult<Rc<ChartHandle<R>>>) + 'static,
{
    let chart_config = config.chart.clone();
    let selector = config.surface_selector.clone();
    session.add_graph_then(
        move |session| {
            let chart = ScatterChart::from_config(chart_config)?;
            let handle = chart.bind(session, &selector, Rc::new(dataset))?;
            let listener = Rc::clone(&handle);
            session.on_window_resize(move || listener.update());
            Ok(handle)
        },
        on_ready,
    );
}

/// Queues the whole page chain: load the dataset, then render it.
///
/// A load failure is logged once and nothing is rendered.
pub fn load_page<R: Renderer + 'static>(
    session: &mut PageSession<R>,
    loader: Rc<dyn ResourceLoader>,
    config: &PageConfig,
) {
    load_page_then(session, loader, config, |_, _| {});
}

fn load_page_then<R, C>(
    session: &mut PageSession<R>,
    loader: Rc<dyn ResourceLoader>,
    config: &PageConfig,
    on_ready: C,
) where
    R: Renderer + 'static,
    C: FnOnce(&mut PageSession<R>, ChartResult<Rc<ChartHandle<R>>>) + 'static,
{
    let page = config.clone();
    session.load_json(
        loader,
        config.resource_path.clone(),
        config.validation,
        move |session, outcome| match outcome {
            Ok(dataset) => render_graph_then(session, dataset, &page, on_ready),
            Err(failure) => {
                warn!(
                    path = failure.path(),
                    error = %failure,
                    "failed to load scatter dataset"
                );
                on_ready(session, Err(ChartError::Load(failure)));
            }
        },
    );
}

/// Runs the page chain to completion and returns the mounted chart.
///
/// Drains `session`, so any tasks queued before the call run first.
pub fn initialize<R: Renderer + 'static>(
    session: &mut PageSession<R>,
    loader: Rc<dyn ResourceLoader>,
    config: &PageConfig,
) -> ChartResult<Rc<ChartHandle<R>>> {
    let slot: Rc<RefCell<Option<ChartResult<Rc<ChartHandle<R>>>>>> = Rc::new(RefCell::new(None));
    let writer = Rc::clone(&slot);
    load_page_then(session, loader, config, move |_, outcome| {
        *writer.borrow_mut() = Some(outcome);
    });
    session.run_until_idle();

    let outcome = slot.borrow_mut().take();
    outcome.unwrap_or_else(|| {
        Err(ChartError::InvalidData(
            "page chain did not complete".to_owned(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::{PageConfig, initialize, render_graph};
    use crate::core::{DataPoint, Dataset, DatasetValidation, Viewport};
    use crate::error::ChartError;
    use crate::loader::StaticLoader;
    use crate::render::NullRenderer;
    use crate::runtime::PageSession;

    fn session() -> PageSession<NullRenderer> {
        let mut session = PageSession::new(Viewport::new(960, 500));
        session
            .add_surface("#scatterchart svg", NullRenderer::default())
            .expect("surface");
        session
    }

    #[test]
    fn default_page_config_points_at_the_scatter_page() {
        let config = PageConfig::default();
        assert_eq!(config.resource_path, "data/data.json");
        assert_eq!(config.surface_selector, "#scatterchart svg");
        assert_eq!(config.validation, DatasetValidation::Passthrough);
        assert!(config.chart.show_dist_x && config.chart.show_dist_y);

        let json = config.to_json_pretty().expect("serialize");
        assert_eq!(PageConfig::from_json_str(&json).expect("parse"), config);
        assert_eq!(
            PageConfig::from_json_str("{}").expect("empty document"),
            config
        );
    }

    #[test]
    fn render_graph_defers_until_drained() {
        let mut session = session();
        let dataset = Dataset::from_points(vec![DataPoint::new(1.0, 1.0), DataPoint::new(2.0, 3.0)]);
        render_graph(&mut session, dataset, &PageConfig::default());

        let surface = session.surface("#scatterchart svg").expect("surface");
        assert_eq!(surface.borrow().render_count(), 0);
        assert!(session.graphs().is_empty());

        session.run_until_idle();
        assert_eq!(surface.borrow().render_count(), 1);
        assert_eq!(session.graphs().len(), 1);
        assert_eq!(session.resize_listener_count(), 1);
    }

    #[test]
    fn initialize_reports_missing_surface() {
        let mut session: PageSession<NullRenderer> = PageSession::new(Viewport::new(960, 500));
        let loader = Rc::new(StaticLoader::new().with_resource("data/data.json", "[]"));
        let err = initialize(&mut session, loader, &PageConfig::default()).expect_err("no surface");
        assert!(matches!(err, ChartError::SurfaceNotFound { .. }));
        assert_eq!(session.resize_listener_count(), 0);
    }

    #[test]
    fn initialize_surfaces_load_failures() {
        let mut session = session();
        let loader = Rc::new(StaticLoader::new());
        let err = initialize(&mut session, loader, &PageConfig::default()).expect_err("missing");
        assert!(matches!(err, ChartError::Load(_)));
    }
}
