//! Integration tests for the Observer API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server, against the sample datasets in `data/`.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use railmap_core::CoverageSession;
use railmap_core::config::DataConfig;
use railmap_loader::load_datasets;
use railmap_observer::router::build_router;
use railmap_observer::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

fn sample_data() -> DataConfig {
    DataConfig {
        dir: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("data"),
        ..DataConfig::default()
    }
}

fn make_state(data: &DataConfig) -> Arc<AppState> {
    let datasets = load_datasets(&data.sources().unwrap()).unwrap();
    let session = CoverageSession::new(datasets).unwrap();
    Arc::new(AppState::new(session))
}

fn make_test_state() -> Arc<AppState> {
    make_state(&sample_data())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(state: &Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let app = build_router(Arc::clone(state));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn put_edits(state: &Arc<AppState>, edits: &Value) -> (StatusCode, Value) {
    let app = build_router(Arc::clone(state));
    let request = Request::builder()
        .method("PUT")
        .uri("/api/coverage")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "edits": edits }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

/// The current flags of every department, as an edit list.
async fn current_edits(state: &Arc<AppState>) -> Vec<Value> {
    let (_, json) = get(state, "/api/regions").await;
    json["regions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| {
            json!({
                "code": row["code"],
                "has_line": row["has_line"],
                "has_service": row["has_service"],
            })
        })
        .collect()
}

#[tokio::test]
async fn index_returns_html() {
    let app = build_router(make_test_state());
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Desserte TGV"));
    assert!(html.contains("6 905 000"));
    assert!(html.contains("58.07 %"));
}

#[tokio::test]
async fn summary_reports_category_shares() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/summary").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_display"], "6 905 000");
    assert_eq!(json["regions"], 5);

    let summary = &json["summary"];
    assert_eq!(summary["total"], 6_905_000);
    assert_eq!(summary["by_category"]["full"]["population"], 4_010_000);
    assert_eq!(summary["by_category"]["full"]["percentage"], "58.07");
    assert_eq!(summary["by_category"]["line_only"]["percentage"], "9.85");
    assert_eq!(summary["by_category"]["service_only"]["percentage"], "30.41");
    assert_eq!(summary["by_category"]["none"]["percentage"], "1.67");
    assert_eq!(summary["with_line"]["percentage"], "67.92");
    assert_eq!(summary["with_service"]["percentage"], "88.49");
}

#[tokio::test]
async fn regions_sorted_by_population() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/regions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 5);
    let codes: Vec<&str> = json["regions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["75", "13", "69", "01", "23"]);
    assert_eq!(json["regions"][0]["population_display"], "2 100 000");
}

#[tokio::test]
async fn region_lookup_normalizes_code() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/regions/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["code"], "01");
    assert_eq!(json["name"], "Ain");
    assert_eq!(json["category"], "line_only");
}

#[tokio::test]
async fn region_without_rail_row_defaults_to_none() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/regions/23").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["has_line"], false);
    assert_eq!(json["has_service"], false);
    assert_eq!(json["category"], "none");
}

#[tokio::test]
async fn excluded_region_not_found() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/regions/2A").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn map_features_are_annotated() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/map").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "FeatureCollection");

    let features = json["features"].as_array().unwrap();
    // 2A and 2B are excluded from the boundaries.
    assert_eq!(features.len(), 6);
    assert!(
        features
            .iter()
            .all(|f| f["properties"]["code"] != "2A" && f["properties"]["code"] != "2B")
    );

    let paris = features
        .iter()
        .find(|f| f["properties"]["code"] == "75")
        .unwrap();
    assert_eq!(paris["properties"]["ligne_grande_vitesse"], false);
    assert_eq!(paris["properties"]["desserte_tgv"], true);
    assert_eq!(paris["properties"]["PTOT"], 2_100_000);
    assert_eq!(paris["properties"]["population"], "2 100 000");

    // 05 has a boundary but no population row.
    let hautes_alpes = features
        .iter()
        .find(|f| f["properties"]["code"] == "05")
        .unwrap();
    assert_eq!(hautes_alpes["properties"]["PTOT"], 0);
    assert_eq!(hautes_alpes["properties"]["desserte_tgv"], false);
}

#[tokio::test]
async fn lines_overlay_served() {
    let state = make_test_state();
    let (status, json) = get(&state, "/api/lines").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["type"], "FeatureCollection");
    assert_eq!(json["features"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn lines_missing_returns_404() {
    let data = DataConfig {
        lines_file: None,
        ..sample_data()
    };
    let state = make_state(&data);
    let (status, _) = get(&state, "/api/lines").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unchanged_edits_report_not_updated() {
    let state = make_test_state();
    let edits = Value::Array(current_edits(&state).await);
    let (status, json) = put_edits(&state, &edits).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["updated"], false);
    assert_eq!(json["changed"], 0);

    let (_, coverage) = get(&state, "/api/coverage").await;
    assert_eq!(coverage["edits_applied"], 0);
    assert!(coverage["last_edit_at"].is_null());
}

#[tokio::test]
async fn edit_updates_summary_and_persists() {
    let state = make_test_state();
    let mut edits = current_edits(&state).await;
    for edit in &mut edits {
        if edit["code"] == "23" {
            edit["has_line"] = json!(true);
            edit["has_service"] = json!(true);
        }
    }

    let (status, json) = put_edits(&state, &Value::Array(edits)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["updated"], true);
    assert_eq!(json["changed"], 1);
    assert_eq!(json["summary"]["by_category"]["none"]["population"], 0);
    assert_eq!(json["summary"]["by_category"]["full"]["population"], 4_125_000);

    // The next read sees the stored flags.
    let (_, region) = get(&state, "/api/regions/23").await;
    assert_eq!(region["category"], "full");

    let (_, coverage) = get(&state, "/api/coverage").await;
    assert_eq!(coverage["edits_applied"], 1);
    assert_eq!(coverage["coverage"]["23"]["has_line"], true);
    assert!(coverage["last_edit_at"].is_string());
}

#[tokio::test]
async fn incomplete_edit_rejected() {
    let state = make_test_state();
    let mut edits = current_edits(&state).await;
    edits.pop();
    if let Some(first) = edits.first_mut() {
        first["has_service"] = json!(false);
    }

    let (status, json) = put_edits(&state, &Value::Array(edits)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);

    // Nothing was written.
    let (_, region) = get(&state, "/api/regions/75").await;
    assert_eq!(region["has_service"], true);
}

#[tokio::test]
async fn unknown_region_edit_rejected() {
    let state = make_test_state();
    let mut edits = current_edits(&state).await;
    edits.push(json!({ "code": "99", "has_line": true, "has_service": true }));

    let (status, _) = put_edits(&state, &Value::Array(edits)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_router(make_test_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/unknown")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
