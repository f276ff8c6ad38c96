#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use scatter_rs::ChartError;
use scatter_rs::api::{ScatterChartConfig, ScatterView};
use scatter_rs::core::{Product, Viewport};
use scatter_rs::render::{CairoContextRenderer, CairoRenderer};

fn products() -> Vec<Product> {
    vec![
        Product::new("1", "p1", 2.0, 3.0),
        Product::new("2", "p2", 6.0, 9.0),
        Product::new("3", "p3", 10.0, 1.0),
    ]
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_marks_axes_and_legend() {
    let renderer = CairoRenderer::new(900, 500).expect("renderer");
    let config = ScatterChartConfig::new(Viewport::new(900, 500));
    let mut view = ScatterView::new(renderer, config).expect("view");

    view.observe_collection(products()).expect("render");
    let stats = view.surface().renderer().last_stats();

    assert_eq!(stats.circles_drawn, 3);
    assert_eq!(stats.rects_drawn, 1);
    assert!(stats.lines_drawn >= 2);
    assert!(stats.texts_drawn >= 3, "axis titles and legend");
}

#[test]
fn cairo_renderer_can_draw_presented_frame_on_external_context() {
    let renderer = CairoRenderer::new(600, 320).expect("renderer");
    let config = ScatterChartConfig::new(Viewport::new(600, 320));
    let mut view = ScatterView::new(renderer, config).expect("view");
    view.observe_collection(products()).expect("render");
    let frame = view
        .surface()
        .presented_frame()
        .cloned()
        .expect("presented");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut external = CairoRenderer::new(600, 320).expect("renderer");
    external
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");

    assert_eq!(external.last_stats().circles_drawn, 3);
}
