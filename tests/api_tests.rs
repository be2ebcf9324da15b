use arc_swap::ArcSwap;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tile_estimator::{
    auth::Credentials,
    config::Config,
    estimate::{EstimateArchive, TextRenderer},
    handlers::AppState,
    server::create_router,
    store::{MemoryStore, PriceTableStore},
};
use tower::ServiceExt;

/// Helper to build a router over an in-memory store and a temp archive
fn create_test_app(read_only: bool) -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();

    let state = AppState {
        config: Arc::new(ArcSwap::from_pointee(Config::default())),
        prices: Arc::new(PriceTableStore::new(Box::new(MemoryStore::new()), read_only)),
        archive: Arc::new(EstimateArchive::new(temp_dir.path().join("estimates"))),
        renderer: Arc::new(TextRenderer::new().unwrap()),
    };

    (create_router(state, None), temp_dir)
}

fn admin_header() -> String {
    Credentials::new("admin", "admin123").to_basic_header()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_json_as_admin(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, admin_header())
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_as_admin(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, admin_header())
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_health_and_ready() {
    let (app, _dir) = create_test_app(false);

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/ready")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["storage"], "read-write");
}

#[tokio::test]
async fn test_public_prices_are_defaults() {
    let (app, _dir) = create_test_app(false);

    let response = app.oneshot(get("/api/prices")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["base"]["bathroom"]["tile"], 1200.0);
    assert_eq!(body["extras"]["minJob"], 12000.0);
    assert_eq!(body["sizeMultipliers"]["large60x120"], 1.08);
}

#[tokio::test]
async fn test_auth_mode_requires_credentials() {
    let (app, _dir) = create_test_app(false);

    let response = app.clone().oneshot(get("/api/prices?mode=auth")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "unauthorized");

    let request = Request::builder()
        .uri("/api/prices?mode=auth")
        .header(
            header::AUTHORIZATION,
            Credentials::new("admin", "nope").to_basic_header(),
        )
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.oneshot(get_as_admin("/api/prices?mode=auth")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_save_prices_then_quote_uses_them() {
    let (app, _dir) = create_test_app(false);

    let response = app
        .clone()
        .oneshot(post_json_as_admin(
            "/api/prices",
            json!({ "extras": { "minJob": 20000 } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "ok": true }));

    let response = app
        .oneshot(post_json("/api/quote", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["quote"]["total"], 16815.0);
    assert_eq!(body["quote"]["finalTotal"], 20000.0);
    assert_eq!(body["quote"]["minApplied"], true);
}

#[tokio::test]
async fn test_save_prices_rejects_bad_credentials_without_writing() {
    let (app, _dir) = create_test_app(false);

    let request = Request::builder()
        .method("POST")
        .uri("/api/prices")
        .header(
            header::AUTHORIZATION,
            Credentials::new("admin", "guess").to_basic_header(),
        )
        .body(Body::from(json!({ "extras": { "minJob": 1 } }).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.oneshot(get("/api/prices")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["extras"]["minJob"], 12000.0);
}

#[tokio::test]
async fn test_save_prices_validation_and_read_only() {
    let (app, _dir) = create_test_app(false);
    let response = app
        .oneshot(post_json_as_admin(
            "/api/prices",
            json!({ "extras": { "packageDiscountPct": 120 } }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (app, _dir) = create_test_app(true);
    let response = app
        .oneshot(post_json_as_admin("/api/prices", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    let body = body_json(response).await;
    assert_eq!(body["error"]["type"], "writes_disabled");
}

#[tokio::test]
async fn test_quote_reference_scenario() {
    let (app, _dir) = create_test_app(false);

    let selection = json!({
        "areaType": "bathroom",
        "material": "tile",
        "tileSize": "medium",
        "area": 6,
        "complexity": "normal",
        "withDemolition": false,
        "withPrep": true,
        "withAdhesive": true,
        "withGrout": true,
        "withWaterproofing": true,
        "linkWaterproofingToArea": true,
        "turnkey": true
    });

    let response = app.oneshot(post_json("/api/quote", selection)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let quote = &body["quote"];
    assert_eq!(quote["baseCost"], 7200.0);
    assert_eq!(quote["subtotal"], 17700.0);
    assert_eq!(quote["discount"], 885.0);
    assert_eq!(quote["finalTotal"], 16815.0);
    assert_eq!(quote["minApplied"], false);
    assert_eq!(quote["lines"][0]["kind"], "base");

    let url = body["lead"]["url"].as_str().unwrap();
    assert!(url.starts_with("https://wa.me/79510050002?text="));
    assert!(body["lead"]["message"]
        .as_str()
        .unwrap()
        .contains("Санузел"));
}

#[tokio::test]
async fn test_contacts_follow_reloaded_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = Arc::new(ArcSwap::from_pointee(Config::default()));
    let state = AppState {
        config: config.clone(),
        prices: Arc::new(PriceTableStore::new(Box::new(MemoryStore::new()), false)),
        archive: Arc::new(EstimateArchive::new(temp_dir.path())),
        renderer: Arc::new(TextRenderer::new().unwrap()),
    };
    let app = create_router(state, None);

    let body = body_json(app.clone().oneshot(get("/api/contacts")).await.unwrap()).await;
    assert_eq!(body["domain"], "masterplitkivl.ru");
    assert!(body["whatsapp"]["url"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/79510050002?text="));

    let mut updated = Config::default();
    updated.contacts.whatsapp_phone = "+7 (900) 111-22-33".to_string();
    config.store(Arc::new(updated));

    let body = body_json(app.oneshot(get("/api/contacts")).await.unwrap()).await;
    assert!(body["whatsapp"]["url"]
        .as_str()
        .unwrap()
        .starts_with("https://wa.me/79001112233?text="));
}

#[tokio::test]
async fn test_linear_helper() {
    let (app, _dir) = create_test_app(false);

    let response = app
        .oneshot(post_json(
            "/api/helper/linear",
            json!({ "width": 2, "depth": 1.5, "externalCorners": 1, "height": 2.7 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["siliconeLm"], 7.0);
    assert_eq!(body["miterLm"], 5.4);
}

#[tokio::test]
async fn test_estimate_requires_admin() {
    let (app, _dir) = create_test_app(false);

    let response = app
        .clone()
        .oneshot(post_json("/api/estimate", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.oneshot(get("/api/estimate?file=smeta_1.txt")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_estimate_create_and_download() {
    let (app, dir) = create_test_app(false);

    let response = app
        .clone()
        .oneshot(post_json_as_admin("/api/estimate", json!({ "area": 8 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["ok"], true);
    let file = body["file"].as_str().unwrap().to_string();
    assert!(file.starts_with("smeta_") && file.ends_with(".txt"));
    assert!(dir.path().join("estimates").join(&file).exists());

    let download_url = body["downloadUrl"].as_str().unwrap();
    assert_eq!(download_url, format!("/api/estimate?file={}", file));

    let response = app.oneshot(get_as_admin(download_url)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "no-store"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!("attachment; filename=\"{}\"", file).as_str()
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("Смета на плиточные работы"));
    assert!(text.contains("Площадь: 8 м²"));
}

#[tokio::test]
async fn test_estimate_download_errors() {
    let (app, _dir) = create_test_app(false);

    let response = app.clone().oneshot(get_as_admin("/api/estimate")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get_as_admin("/api/estimate?file=smeta_0.txt"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get_as_admin("/api/estimate?file=..%2F..%2Fetc%2Fpasswd"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let (app, _dir) = create_test_app(false);

    let padding = "x".repeat(2 * 1024 * 1024);
    let request = Request::builder()
        .method("POST")
        .uri("/api/prices")
        .header(header::AUTHORIZATION, admin_header())
        .body(Body::from(format!("{{\"pad\":\"{}\"}}", padding)))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
