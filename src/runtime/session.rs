use std::collections::VecDeque;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::api::ChartHandle;
use crate::core::{Dataset, DatasetValidation, Viewport};
use crate::error::{ChartError, ChartResult, LoadFailure};
use crate::loader::{ResourceLoader, load_dataset};
use crate::render::Renderer;
use crate::runtime::{SharedSurface, Surface, SurfaceRegistry, SurfaceSizing};

type Task<R> = Box<dyn FnOnce(&mut PageSession<R>)>;
type ResizeListener = Box<dyn Fn() -> ChartResult<()>>;

/// Single-threaded host for one page: surfaces, a FIFO task queue, mounted
/// graphs and window-resize listeners.
///
/// Nothing runs until [`PageSession::run_until_idle`] drains the queue, so a
/// caller always observes load and render steps in queue order.
pub struct PageSession<R: Renderer> {
    window: Viewport,
    surfaces: SurfaceRegistry<R>,
    tasks: VecDeque<Task<R>>,
    graphs: Vec<Rc<ChartHandle<R>>>,
    resize_listeners: Vec<ResizeListener>,
    tasks_run: usize,
}

impl<R: Renderer + 'static> PageSession<R> {
    #[must_use]
    pub fn new(window: Viewport) -> Self {
        Self {
            window,
            surfaces: SurfaceRegistry::default(),
            tasks: VecDeque::new(),
            graphs: Vec::new(),
            resize_listeners: Vec::new(),
            tasks_run: 0,
        }
    }

    #[must_use]
    pub fn window(&self) -> Viewport {
        self.window
    }

    /// Registers a surface that tracks the window size.
    pub fn add_surface(
        &mut self,
        selector: impl Into<String>,
        renderer: R,
    ) -> ChartResult<SharedSurface<R>> {
        let surface = Surface::new(selector, self.window, SurfaceSizing::FillWindow, renderer)?;
        Ok(self.surfaces.insert(surface))
    }

    /// Registers a surface with its own fixed size.
    pub fn add_fixed_surface(
        &mut self,
        selector: impl Into<String>,
        viewport: Viewport,
        renderer: R,
    ) -> ChartResult<SharedSurface<R>> {
        let surface = Surface::new(selector, viewport, SurfaceSizing::Fixed, renderer)?;
        Ok(self.surfaces.insert(surface))
    }

    pub fn surface(&self, selector: &str) -> ChartResult<SharedSurface<R>> {
        self.surfaces.get(selector)
    }

    #[must_use]
    pub fn surfaces(&self) -> &SurfaceRegistry<R> {
        &self.surfaces
    }

    pub fn queue<T>(&mut self, task: T)
    where
        T: FnOnce(&mut Self) + 'static,
    {
        self.tasks.push_back(Box::new(task));
    }

    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Total tasks executed over the session's lifetime.
    #[must_use]
    pub fn tasks_run(&self) -> usize {
        self.tasks_run
    }

    /// Runs queued tasks, including ones queued while draining, until the
    /// queue is empty. Returns how many ran.
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.tasks.pop_front() {
            task(self);
            ran += 1;
        }
        self.tasks_run += ran;
        trace!(ran, "page session idle");
        ran
    }

    /// Queues a fetch of `path`; `continuation` receives the outcome exactly
    /// once, inside the queued task.
    pub fn load_json<C>(
        &mut self,
        loader: Rc<dyn ResourceLoader>,
        path: impl Into<String>,
        validation: DatasetValidation,
        continuation: C,
    ) where
        C: FnOnce(&mut Self, Result<Dataset, LoadFailure>) + 'static,
    {
        let path = path.into();
        self.queue(move |session| {
            debug!(path = %path, "loading dataset");
            let outcome = load_dataset(&*loader, &path, validation);
            continuation(session, outcome);
        });
    }

    /// Queues `generator` as the graph readiness step. A mounted handle is
    /// retained by the session.
    pub fn add_graph<G>(&mut self, generator: G)
    where
        G: FnOnce(&mut Self) -> ChartResult<Rc<ChartHandle<R>>> + 'static,
    {
        self.add_graph_then(generator, |_, _| {});
    }

    /// Like [`PageSession::add_graph`], then hands the outcome to `on_ready`.
    pub fn add_graph_then<G, C>(&mut self, generator: G, on_ready: C)
    where
        G: FnOnce(&mut Self) -> ChartResult<Rc<ChartHandle<R>>> + 'static,
        C: FnOnce(&mut Self, ChartResult<Rc<ChartHandle<R>>>) + 'static,
    {
        self.queue(move |session| {
            let outcome = generator(session);
            match &outcome {
                Ok(handle) => {
                    debug!(selector = handle.selector(), "graph ready");
                    session.graphs.push(Rc::clone(handle));
                }
                Err(err) => warn!(error = %err, "graph generator failed"),
            }
            on_ready(session, outcome);
        });
    }

    #[must_use]
    pub fn graphs(&self) -> &[Rc<ChartHandle<R>>] {
        &self.graphs
    }

    pub fn on_window_resize<F>(&mut self, listener: F)
    where
        F: Fn() -> ChartResult<()> + 'static,
    {
        self.resize_listeners.push(Box::new(listener));
    }

    #[must_use]
    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.len()
    }

    /// Applies a new window size to window-filling surfaces, then notifies
    /// every listener in registration order.
    ///
    /// All listeners run even if one fails; the first failure is returned.
    pub fn resize_window(&mut self, window: Viewport) -> ChartResult<()> {
        if !window.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: window.width,
                height: window.height,
            });
        }
        self.window = window;
        for surface in self.surfaces.iter() {
            let mut surface = surface.borrow_mut();
            if surface.sizing() == SurfaceSizing::FillWindow {
                surface.set_viewport(window)?;
            }
        }

        let mut first_error = None;
        for (index, listener) in self.resize_listeners.iter().enumerate() {
            if let Err(err) = listener() {
                warn!(listener = index, error = %err, "resize listener failed");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<R: Renderer> std::fmt::Debug for PageSession<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSession")
            .field("window", &self.window)
            .field("surfaces", &self.surfaces.len())
            .field("pending_tasks", &self.tasks.len())
            .field("graphs", &self.graphs.len())
            .field("resize_listeners", &self.resize_listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::PageSession;
    use crate::api::ScatterChart;
    use crate::core::{DataPoint, Dataset, DatasetValidation, Viewport};
    use crate::error::ChartError;
    use crate::loader::StaticLoader;
    use crate::render::NullRenderer;

    #[test]
    fn tasks_run_in_fifo_order_including_nested_ones() {
        let mut session: PageSession<NullRenderer> = PageSession::new(Viewport::new(100, 100));
        let log = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&log);
        session.queue(move |session| {
            first.borrow_mut().push("first");
            let nested = Rc::clone(&first);
            session.queue(move |_| nested.borrow_mut().push("nested"));
        });
        let second = Rc::clone(&log);
        session.queue(move |_| second.borrow_mut().push("second"));

        assert!(log.borrow().is_empty());
        assert_eq!(session.run_until_idle(), 3);
        assert_eq!(*log.borrow(), vec!["first", "second", "nested"]);
        assert_eq!(session.pending_tasks(), 0);
    }

    #[test]
    fn load_json_invokes_continuation_once_when_drained() {
        let loader = Rc::new(StaticLoader::new().with_resource("d.json", r#"[{"x":1,"y":1}]"#));
        let mut session: PageSession<NullRenderer> = PageSession::new(Viewport::new(100, 100));
        let calls = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&calls);
        session.load_json(loader.clone(), "d.json", DatasetValidation::Passthrough, move |_, outcome| {
            assert_eq!(outcome.expect("dataset").len(), 1);
            *counter.borrow_mut() += 1;
        });
        assert_eq!(loader.fetch_count(), 0);

        session.run_until_idle();
        assert_eq!(*calls.borrow(), 1);
        assert_eq!(loader.fetch_count(), 1);
    }

    #[test]
    fn add_graph_mounts_when_drained_and_keeps_only_successful_handles() {
        let mut session = PageSession::new(Viewport::new(320, 240));
        let surface = session
            .add_surface("#chart", NullRenderer::default())
            .expect("surface");
        let datum = Rc::new(Dataset::from_points(vec![DataPoint::new(1.0, 2.0)]));

        let bound = Rc::clone(&datum);
        session.add_graph(move |session| ScatterChart::new().bind(session, "#chart", bound));
        session.add_graph(move |session| ScatterChart::new().bind(session, "#missing", datum));
        assert!(session.graphs().is_empty());
        assert_eq!(surface.borrow().render_count(), 0);

        assert_eq!(session.run_until_idle(), 2);
        assert_eq!(session.graphs().len(), 1);
        assert_eq!(session.graphs()[0].selector(), "#chart");
        assert_eq!(surface.borrow().render_count(), 1);
    }

    #[test]
    fn resize_updates_fill_window_surfaces_only() {
        let mut session = PageSession::new(Viewport::new(300, 200));
        let filling = session
            .add_surface("#fill", NullRenderer::default())
            .expect("surface");
        let fixed = session
            .add_fixed_surface("#fixed", Viewport::new(50, 50), NullRenderer::default())
            .expect("surface");

        session.resize_window(Viewport::new(640, 480)).expect("resize");
        assert_eq!(filling.borrow().viewport(), Viewport::new(640, 480));
        assert_eq!(fixed.borrow().viewport(), Viewport::new(50, 50));
        assert!(session.resize_window(Viewport::new(0, 10)).is_err());
    }

    #[test]
    fn failing_listener_does_not_stop_the_others() {
        let mut session: PageSession<NullRenderer> = PageSession::new(Viewport::new(100, 100));
        let hits = Rc::new(RefCell::new(0));
        session.on_window_resize(|| Err(ChartError::InvalidData("boom".to_owned())));
        let counter = Rc::clone(&hits);
        session.on_window_resize(move || {
            *counter.borrow_mut() += 1;
            Ok(())
        });

        let err = session
            .resize_window(Viewport::new(120, 120))
            .expect_err("first listener fails");
        assert!(matches!(err, ChartError::InvalidData(_)));
        assert_eq!(*hits.borrow(), 1);
    }
}
