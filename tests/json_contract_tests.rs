use scatter_rs::api::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ScatterChartConfig, ScatterView, ScatterViewDiagnostics,
};
use scatter_rs::core::{ChartSnapshot, Product, ProductId};
use scatter_rs::interaction::SelectionState;
use scatter_rs::render::NullRenderer;

fn snapshot() -> ChartSnapshot {
    ChartSnapshot::from_products(&[
        Product::new("1", "p1", 2.0, 3.0),
        Product::new("2", "p2", 5.0, 1.0),
    ])
}

#[test]
fn snapshot_contract_round_trips_with_lookup_index() {
    let json = snapshot().to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));

    let parsed = ChartSnapshot::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed, snapshot());
    assert_eq!(parsed.position_of(&ProductId::new("2")), Some(1));
}

#[test]
fn bare_snapshot_payload_is_accepted() {
    let json = r#"{"labels":["p1"],"xs":[2.0],"ys":[3.0],"ids":["1"]}"#;
    let parsed = ChartSnapshot::from_json_compat_str(json).expect("bare snapshot");
    assert_eq!(parsed.entity_at(0), Some(&ProductId::new("1")));
}

#[test]
fn misaligned_or_unknown_payloads_are_rejected() {
    let misaligned = r#"{"labels":["p1","p2"],"xs":[2.0],"ys":[3.0],"ids":["1"]}"#;
    assert!(ChartSnapshot::from_json_compat_str(misaligned).is_err());

    let future = r#"{"schema_version":2,"snapshot":{"labels":[],"xs":[],"ys":[],"ids":[]}}"#;
    assert!(ChartSnapshot::from_json_compat_str(future).is_err());
}

#[test]
fn diagnostics_report_selection_and_presented_marks() {
    let mut view =
        ScatterView::new(NullRenderer::default(), ScatterChartConfig::default()).expect("view");
    view.observe_collection(vec![
        Product::new("1", "p1", 2.0, 3.0),
        Product::new("2", "p2", 5.0, 1.0),
    ])
    .expect("render");
    let (x, y) = view.mark_center(&ProductId::new("2")).expect("mark");
    view.click_at(x, y);

    let diagnostics = view.diagnostics();
    assert_eq!(diagnostics.schema_version, CHART_SNAPSHOT_JSON_SCHEMA_V1);
    assert!(diagnostics.chart_live);
    assert_eq!(diagnostics.presented_marks, 2);
    assert_eq!(
        diagnostics.selection,
        SelectionState::Confirming(ProductId::new("2"))
    );

    let json = view.diagnostics_json_pretty().expect("serialize");
    let decoded: ScatterViewDiagnostics = serde_json::from_str(&json).expect("decode");
    assert_eq!(decoded.presented_marks, 2);
    assert_eq!(decoded.selection, diagnostics.selection);
}
