//! Single-threaded page host: surfaces, deferred tasks and the page chain.

mod bootstrap;
mod session;
mod surface;

pub use bootstrap::{DEFAULT_SURFACE_SELECTOR, PageConfig, initialize, load_page, render_graph};
pub use session::PageSession;
pub use surface::{SharedSurface, Surface, SurfaceRegistry, SurfaceSizing};
