use scatter_rs::ChartError;
use scatter_rs::api::ScatterChartConfig;
use scatter_rs::core::{ProductDraft, ProductId, Viewport};
use scatter_rs::store::HttpStoreConfig;
use scatter_rs::store::wire::{decode_list, decode_one};
use scatter_rs::store::{StoreError, StoreOperation};

#[test]
fn default_store_config_targets_local_product_service() {
    let config = HttpStoreConfig::default();
    config.validate().expect("defaults are valid");

    assert_eq!(config.collection_url(), "http://localhost:5001/api/products");
    assert_eq!(
        config.item_url(&ProductId::new("65a1")),
        "http://localhost:5001/api/products/65a1"
    );
}

#[test]
fn store_config_json_fills_missing_fields_and_trims_slashes() {
    let config = HttpStoreConfig::from_json_str(r#"{"base_url":"https://shop.example/"}"#)
        .expect("partial config");
    assert_eq!(config.collection_url(), "https://shop.example/api/products");

    let custom = HttpStoreConfig::new("http://10.0.0.2:8080").with_resource_path("/v2/items/");
    assert_eq!(custom.collection_url(), "http://10.0.0.2:8080/v2/items");
}

#[test]
fn store_config_rejects_malformed_locations() {
    assert!(HttpStoreConfig::from_json_str(r#"{"base_url":"localhost:5001"}"#).is_err());
    assert!(HttpStoreConfig::new("http://localhost").with_resource_path("api").validate().is_err());
    assert!(HttpStoreConfig::from_json_str("not json").is_err());
}

#[test]
fn chart_config_json_overrides_selected_fields() {
    let config = ScatterChartConfig::from_json_str(
        r#"{"viewport":{"width":640,"height":320},"point_radius_px":5.0}"#,
    )
    .expect("partial config");

    assert_eq!(config.viewport, Viewport::new(640, 320));
    assert_eq!(config.point_radius_px, 5.0);
    assert_eq!(config.hit_radius_px, 1.0);
    assert_eq!(config.dataset_label, "Products");
    assert_eq!(config.x_axis_title.text, "x-coordinate");
}

#[test]
fn chart_config_validation_catches_bad_values() {
    let zero_viewport = ScatterChartConfig::new(Viewport::new(0, 300));
    assert!(matches!(
        zero_viewport.validate(),
        Err(ChartError::InvalidViewport { width: 0, .. })
    ));
    assert!(ScatterChartConfig::default().with_point_radius(0.0).validate().is_err());
    assert!(ScatterChartConfig::default().with_hit_radius(-1.0).validate().is_err());
    assert!(
        ScatterChartConfig::default()
            .with_domain_padding_ratio(f64::NAN)
            .validate()
            .is_err()
    );
}

#[test]
fn wire_payloads_use_store_field_names() {
    let body = r#"{"data":[
        {"_id":"1","label":"p1","xCoordinates":2,"yCoordinates":3},
        {"_id":"2","label":"p2","xCoordinates":-4.5,"yCoordinates":0.25}
    ]}"#;
    let products = decode_list(body).expect("decode list");
    assert_eq!(products.len(), 2);
    assert_eq!(products[1].x, -4.5);

    let draft = ProductDraft::new("p3", 1.0, 2.0).expect("draft");
    let json = serde_json::to_value(&draft).expect("encode");
    assert_eq!(
        json,
        serde_json::json!({"label":"p3","xCoordinates":1.0,"yCoordinates":2.0})
    );
}

#[test]
fn malformed_bodies_surface_as_decode_errors() {
    let err = decode_list(r#"{"items":[]}"#).expect_err("missing envelope");
    assert!(matches!(
        err,
        StoreError::Decode {
            operation: StoreOperation::List,
            ..
        }
    ));

    let err = decode_one(StoreOperation::Create, r#"{"data":[]}"#, None).expect_err("empty");
    assert_eq!(err.operation(), Some(StoreOperation::Create));
}

#[test]
fn form_inputs_are_trimmed_and_required() {
    let draft = ProductDraft::from_form_inputs("  p1 ", " 2.5", "-3").expect("valid");
    assert_eq!(draft.label, "p1");
    assert_eq!((draft.x, draft.y), (2.5, -3.0));

    assert!(ProductDraft::from_form_inputs("", "1", "1").is_err());
    assert!(ProductDraft::from_form_inputs("p", "", "1").is_err());
    assert!(ProductDraft::from_form_inputs("p", "1", "abc").is_err());
    assert!(ProductDraft::from_form_inputs("p", "inf", "1").is_err());
}

#[test]
fn item_url_keeps_id_inside_one_path_segment() {
    let config = HttpStoreConfig::default();

    assert_eq!(
        config.item_url(&ProductId::new("a/b?c#d")),
        "http://localhost:5001/api/products/a%2Fb%3Fc%23d"
    );
    assert_eq!(
        config.item_url(&ProductId::new("65a1-f_0.9~")),
        "http://localhost:5001/api/products/65a1-f_0.9~"
    );
    assert_eq!(
        config.item_url(&ProductId::new("two words")),
        "http://localhost:5001/api/products/two%20words"
    );
}
