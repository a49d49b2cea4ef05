use std::path::PathBuf;
use std::rc::Rc;

use scatter_rs::api::DEFAULT_NO_DATA_TEXT;
use scatter_rs::core::{DataPoint, Dataset, Viewport};
use scatter_rs::loader::{FileLoader, StaticLoader};
use scatter_rs::render::NullRenderer;
use scatter_rs::runtime::{PageConfig, PageSession, initialize, load_page};

const FIXTURE: &str = r#"[{"x":1,"y":2},{"x":2,"y":4},{"x":3,"y":1}]"#;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn page_session(window: Viewport) -> PageSession<NullRenderer> {
    let mut session = PageSession::new(window);
    session
        .add_surface("#scatterchart svg", NullRenderer::default())
        .expect("surface");
    session
}

fn is_two_decimal(label: &str) -> bool {
    let digits = label.strip_prefix('-').unwrap_or(label);
    digits
        .split_once('.')
        .is_some_and(|(int, frac)| {
            !int.is_empty()
                && int.chars().all(|c| c.is_ascii_digit())
                && frac.len() == 2
                && frac.chars().all(|c| c.is_ascii_digit())
        })
}

#[test]
fn renderer_runs_once_with_loaded_dataset_after_load_completes() {
    let loader = Rc::new(StaticLoader::new().with_resource("data/data.json", FIXTURE));
    let mut session = page_session(Viewport::new(960, 500));
    load_page(&mut session, loader.clone(), &PageConfig::default());

    let surface = session.surface("#scatterchart svg").expect("surface");
    assert_eq!(loader.fetch_count(), 0, "nothing runs before the queue drains");
    assert_eq!(surface.borrow().render_count(), 0);

    session.run_until_idle();

    assert_eq!(loader.fetch_count(), 1);
    assert_eq!(surface.borrow().render_count(), 1);
    assert_eq!(session.graphs().len(), 1);

    let handle = &session.graphs()[0];
    let expected = Dataset::from_points(vec![
        DataPoint::new(1.0, 2.0),
        DataPoint::new(2.0, 4.0),
        DataPoint::new(3.0, 1.0),
    ]);
    assert_eq!(handle.datum().as_ref(), &expected);
    assert_eq!(handle.rendered_point_count(), 3);
}

#[test]
fn resizes_reuse_the_same_handle_without_refetching() {
    let loader = Rc::new(StaticLoader::new().with_resource("data/data.json", FIXTURE));
    let mut session = page_session(Viewport::new(960, 500));
    let handle = initialize(&mut session, loader.clone(), &PageConfig::default()).expect("mounted");

    let sizes = [
        Viewport::new(800, 600),
        Viewport::new(1024, 768),
        Viewport::new(320, 240),
        Viewport::new(1024, 768),
    ];
    for (index, size) in sizes.iter().enumerate() {
        session.resize_window(*size).expect("resize");
        assert_eq!(handle.update_count(), index + 1);
        let frame = handle.last_frame().expect("frame");
        assert_eq!(frame.viewport, *size);
        assert_eq!(frame.circles.len(), 3);
    }

    assert_eq!(loader.fetch_count(), 1);
    assert_eq!(session.graphs().len(), 1);
    assert!(Rc::ptr_eq(&session.graphs()[0], &handle));
    assert_eq!(session.resize_listener_count(), 1);
    let surface = session.surface("#scatterchart svg").expect("surface");
    assert_eq!(surface.borrow().render_count(), 1 + sizes.len());
}

#[test]
fn same_size_resize_renders_identical_frames() {
    let loader = Rc::new(StaticLoader::new().with_resource("data/data.json", FIXTURE));
    let mut session = page_session(Viewport::new(960, 500));
    let handle = initialize(&mut session, loader, &PageConfig::default()).expect("mounted");
    let mounted = handle.last_frame().expect("frame");

    session
        .resize_window(Viewport::new(960, 500))
        .expect("resize");
    assert_eq!(handle.last_frame().expect("frame"), mounted);
}

#[test]
fn fixture_file_mounts_with_two_decimal_labels() {
    let loader = Rc::new(FileLoader::new(fixtures_root()));
    let mut session = page_session(Viewport::new(960, 500));
    let handle = initialize(&mut session, loader, &PageConfig::default()).expect("mounted");

    let surface = session.surface("#scatterchart svg").expect("surface");
    assert_eq!(surface.borrow().render_count(), 1);
    assert_eq!(surface.borrow().renderer().last_circle_count, 3);

    let frame = handle.last_frame().expect("frame");
    let labels: Vec<&str> = frame
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .filter(|text| *text != "Data")
        .collect();
    assert!(labels.iter().all(|label| is_two_decimal(label)), "{labels:?}");
    assert!(labels.contains(&"2.00"));

    session
        .resize_window(Viewport::new(700, 400))
        .expect("resize");
    assert_eq!(handle.update_count(), 1);
    assert_eq!(surface.borrow().render_count(), 2);
}

#[test]
fn empty_dataset_binds_and_shows_no_data_text() {
    let loader = Rc::new(StaticLoader::new().with_resource("data/data.json", "[]"));
    let mut session = page_session(Viewport::new(640, 480));
    let handle = initialize(&mut session, loader, &PageConfig::default()).expect("mounted");

    assert_eq!(handle.rendered_point_count(), 0);
    let frame = handle.last_frame().expect("frame");
    assert_eq!(frame.texts.len(), 1);
    assert_eq!(frame.texts[0].text, DEFAULT_NO_DATA_TEXT);

    session
        .resize_window(Viewport::new(300, 200))
        .expect("resize");
    assert_eq!(handle.update_count(), 1);
}

#[test]
fn fixed_surface_keeps_its_size_across_window_resizes() {
    let loader = Rc::new(StaticLoader::new().with_resource("data/data.json", FIXTURE));
    let mut session = PageSession::new(Viewport::new(960, 500));
    session
        .add_fixed_surface(
            "#scatterchart svg",
            Viewport::new(400, 300),
            NullRenderer::default(),
        )
        .expect("surface");
    let handle = initialize(&mut session, loader, &PageConfig::default()).expect("mounted");

    session
        .resize_window(Viewport::new(1200, 900))
        .expect("resize");
    assert_eq!(handle.update_count(), 1);
    assert_eq!(
        handle.last_frame().expect("frame").viewport,
        Viewport::new(400, 300)
    );
}

#[test]
fn configured_selector_and_path_are_honored() {
    let raw = std::fs::read_to_string(fixtures_root().join("pages/strict_page.json"))
        .expect("page config");
    let config = PageConfig::from_json_str(&raw).expect("parse");
    assert_eq!(config.surface_selector, "#chart");

    let mut session = PageSession::new(Viewport::new(960, 500));
    session
        .add_surface("#chart", NullRenderer::default())
        .expect("surface");
    let loader = Rc::new(FileLoader::new(fixtures_root()));

    // series.json carries a null coordinate, which strict validation rejects
    let err = initialize(&mut session, loader.clone(), &config).expect_err("strict rejects");
    assert!(matches!(err, scatter_rs::ChartError::Load(_)));

    let relaxed = config.with_validation(scatter_rs::DatasetValidation::Passthrough);
    let handle = initialize(&mut session, loader, &relaxed).expect("mounted");
    assert_eq!(handle.datum().series().len(), 2);
    assert_eq!(handle.rendered_point_count(), 4);
}

#[test]
fn extreme_but_finite_coordinates_still_mount() {
    for payload in [
        r#"[{"x":-1e308,"y":0},{"x":1e308,"y":1}]"#,
        r#"[{"x":5e-324,"y":1}]"#,
    ] {
        let loader = Rc::new(StaticLoader::new().with_resource("data/data.json", payload));
        let mut session = page_session(Viewport::new(960, 500));
        let handle = initialize(&mut session, loader, &PageConfig::default())
            .unwrap_or_else(|err| panic!("`{payload}` should mount: {err}"));

        let frame = handle.last_frame().expect("rendered frame");
        assert_eq!(frame.circles.len(), handle.datum().len());
        assert!(frame.validate().is_ok());
    }
}
