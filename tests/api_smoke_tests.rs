use scatter_rs::api::{ClickOutcome, RenderOutcome, ScatterChartConfig, ScatterView};
use scatter_rs::core::{Product, ProductId, Viewport};
use scatter_rs::interaction::{SelectionChoice, SelectionEffect, SelectionState};
use scatter_rs::render::NullRenderer;

#[test]
fn single_product_render_click_and_confirm_flow() {
    let config = ScatterChartConfig::new(Viewport::new(800, 600));
    let mut view = ScatterView::new(NullRenderer::default(), config).expect("view init");

    let outcome = view
        .observe_collection(vec![Product::new("1", "p1", 2.0, 3.0)])
        .expect("render");
    assert!(matches!(outcome, RenderOutcome::Rendered { marks: 1, .. }));

    let snapshot = view.snapshot();
    assert_eq!(snapshot.labels(), ["p1".to_owned()]);
    assert_eq!(snapshot.xs(), [2.0]);
    assert_eq!(snapshot.ys(), [3.0]);

    let id = ProductId::new("1");
    let (x, y) = view.mark_center(&id).expect("mark drawn");
    assert_eq!(view.click_at(x, y), ClickOutcome::Selected(id.clone()));
    assert_eq!(view.selection(), &SelectionState::Confirming(id.clone()));
    assert!(view.selection().confirmation_visible());

    assert_eq!(
        view.choose(SelectionChoice::Update),
        Some(SelectionEffect::OpenEditor(id))
    );
    assert_eq!(view.selection(), &SelectionState::Idle);

    view.teardown();
    assert!(!view.lifecycle().is_live());
    assert_eq!(view.surface().live_handle_count(), 0);
}

#[test]
fn click_far_from_marks_keeps_idle() {
    let mut view =
        ScatterView::new(NullRenderer::default(), ScatterChartConfig::default()).expect("view");
    view.observe_collection(vec![Product::new("1", "p1", 2.0, 3.0)])
        .expect("render");

    let (x, y) = view.mark_center(&ProductId::new("1")).expect("mark drawn");
    assert_eq!(view.click_at(x + 40.0, y + 40.0), ClickOutcome::Miss);
    assert_eq!(view.selection(), &SelectionState::Idle);
}

#[test]
fn rendered_frame_reaches_renderer() {
    let mut view =
        ScatterView::new(NullRenderer::default(), ScatterChartConfig::default()).expect("view");
    view.observe_collection(vec![
        Product::new("1", "p1", 2.0, 3.0),
        Product::new("2", "p2", 5.0, 1.0),
        Product::new("3", "p3", -1.0, 4.0),
    ])
    .expect("render");

    let renderer = view.surface().renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_circle_count, 3);
    assert!(renderer.last_line_count >= 2, "expected at least both axis lines");
}
