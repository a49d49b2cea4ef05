use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{RenderFrame, Renderer};

/// How a surface reacts to window resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceSizing {
    /// Tracks the window size.
    #[default]
    FillWindow,
    /// Keeps its own size regardless of the window.
    Fixed,
}

/// A named drawable owned by the page host.
#[derive(Debug)]
pub struct Surface<R: Renderer> {
    selector: String,
    viewport: Viewport,
    sizing: SurfaceSizing,
    renderer: R,
    render_count: usize,
}

pub type SharedSurface<R> = Rc<RefCell<Surface<R>>>;

impl<R: Renderer> Surface<R> {
    pub fn new(
        selector: impl Into<String>,
        viewport: Viewport,
        sizing: SurfaceSizing,
        renderer: R,
    ) -> ChartResult<Self> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        Ok(Self {
            selector: selector.into(),
            viewport,
            sizing,
            renderer,
            render_count: 0,
        })
    }

    #[must_use]
    pub fn selector(&self) -> &str {
        &self.selector
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn sizing(&self) -> SurfaceSizing {
        self.sizing
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Successful renders onto this surface.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = viewport;
        Ok(())
    }

    pub fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        self.renderer.render(frame)?;
        self.render_count += 1;
        Ok(())
    }
}

/// Surfaces in registration order, addressed by selector.
#[derive(Debug)]
pub struct SurfaceRegistry<R: Renderer> {
    surfaces: IndexMap<String, SharedSurface<R>>,
}

impl<R: Renderer> Default for SurfaceRegistry<R> {
    fn default() -> Self {
        Self {
            surfaces: IndexMap::new(),
        }
    }
}

impl<R: Renderer> SurfaceRegistry<R> {
    /// Registers `surface`, replacing any surface with the same selector.
    pub fn insert(&mut self, surface: Surface<R>) -> SharedSurface<R> {
        let shared = Rc::new(RefCell::new(surface));
        let selector = shared.borrow().selector().to_owned();
        self.surfaces.insert(selector, Rc::clone(&shared));
        shared
    }

    pub fn get(&self, selector: &str) -> ChartResult<SharedSurface<R>> {
        self.surfaces
            .get(selector)
            .cloned()
            .ok_or_else(|| ChartError::SurfaceNotFound {
                selector: selector.to_owned(),
            })
    }

    #[must_use]
    pub fn contains(&self, selector: &str) -> bool {
        self.surfaces.contains_key(selector)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedSurface<R>> {
        self.surfaces.values()
    }
}
