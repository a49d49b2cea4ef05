use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::api::ScatterChart;
use crate::core::Dataset;
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};
use crate::runtime::SharedSurface;

/// A chart mounted on a surface with its datum bound.
///
/// The handle is created once per successful load and re-used for every
/// resize; `update` re-renders the same datum at the surface's current size.
pub struct ChartHandle<R: Renderer> {
    chart: ScatterChart,
    datum: Rc<Dataset>,
    selector: String,
    surface: SharedSurface<R>,
    update_count: Cell<usize>,
    last_frame: RefCell<Option<RenderFrame>>,
}

impl<R: Renderer> ChartHandle<R> {
    pub(crate) fn mount(
        chart: ScatterChart,
        datum: Rc<Dataset>,
        selector: &str,
        surface: SharedSurface<R>,
    ) -> ChartResult<Self> {
        let handle = Self {
            chart,
            datum,
            selector: selector.to_owned(),
            surface,
            update_count: Cell::new(0),
            last_frame: RefCell::new(None),
        };
        handle.draw()?;
        debug!(selector, "scatter chart mounted");
        Ok(handle)
    }

    /// Re-renders the bound datum at the surface's current size.
    pub fn update(&self) -> ChartResult<()> {
        self.draw()?;
        self.update_count.set(self.update_count.get() + 1);
        trace!(
            selector = %self.selector,
            updates = self.update_count.get(),
            "scatter chart updated"
        );
        Ok(())
    }

    #[must_use]
    pub fn chart(&self) -> &ScatterChart {
        &self.chart
    }

    #[must_use]
    pub fn datum(&self) -> &Rc<Dataset> {
        &self.datum
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    #[must_use]
    pub fn surface(&self) -> &SharedSurface<R> {
        &self.surface
    }

    /// Completed `update` calls; the initial mount is not counted.
    #[must_use]
    pub fn update_count(&self) -> usize {
        self.update_count.get()
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<RenderFrame> {
        self.last_frame.borrow().clone()
    }

    /// Markers drawn by the most recent render.
    #[must_use]
    pub fn rendered_point_count(&self) -> usize {
        self.last_frame
            .borrow()
            .as_ref()
            .map_or(0, |frame| frame.circles.len())
    }

    fn draw(&self) -> ChartResult<()> {
        let mut surface = self.surface.borrow_mut();
        let frame = self.chart.build_frame(&self.datum, surface.viewport())?;
        surface.render(&frame)?;
        *self.last_frame.borrow_mut() = Some(frame);
        Ok(())
    }
}

impl<R: Renderer> std::fmt::Debug for ChartHandle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartHandle")
            .field("selector", &self.selector)
            .field("points", &self.datum.len())
            .field("update_count", &self.update_count.get())
            .finish_non_exhaustive()
    }
}
