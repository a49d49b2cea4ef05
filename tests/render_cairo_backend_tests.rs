#![cfg(feature = "cairo-backend")]

use std::rc::Rc;

use cairo::{Context, Format, ImageSurface};
use scatter_rs::core::{DataPoint, Dataset, Series, Viewport};
use scatter_rs::render::{CairoContextRenderer, CairoRenderer};
use scatter_rs::{ChartError, PageSession, ScatterChart};

fn fixture() -> Dataset {
    Dataset::new(vec![Series::new(
        "Data",
        vec![
            DataPoint::new(1.0, 4.0),
            DataPoint::new(2.0, 2.5),
            DataPoint::new(3.0, 1.0),
        ],
    )])
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(Viewport::new(0, 480)).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn cairo_renderer_draws_scatter_markers_on_bound_surface() {
    let mut session = PageSession::new(Viewport::new(900, 500));
    let renderer = CairoRenderer::new(Viewport::new(1, 1)).expect("renderer");
    session
        .add_surface("#scatterchart svg", renderer)
        .expect("surface");

    let handle = ScatterChart::new()
        .bind(&mut session, "#scatterchart svg", Rc::new(fixture()))
        .expect("bind");

    let surface = handle.surface();
    let surface = surface.borrow();
    let renderer = surface.renderer();
    assert_eq!(renderer.surface().width(), 900);
    assert_eq!(renderer.surface().height(), 500);
    assert_eq!(renderer.last_stats().circles_drawn, 3);
    assert!(renderer.last_stats().lines_drawn >= 4);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let chart = ScatterChart::new();
    let frame = chart
        .build_frame(&fixture(), Viewport::new(600, 320))
        .expect("frame");
    let mut renderer = CairoRenderer::new(Viewport::new(600, 320)).expect("renderer");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");

    assert_eq!(renderer.last_stats().circles_drawn, 3);
    assert_eq!(renderer.last_stats().texts_drawn, frame.texts.len());
}
