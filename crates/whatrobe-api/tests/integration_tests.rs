//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use whatrobe_api::{create_app, AppState};
use whatrobe_composer::CompatibilityPolicy;
use whatrobe_proposer::{DisabledModel, GenerativeModel, ModelError};

struct FixedModel(&'static str);

#[async_trait]
impl GenerativeModel for FixedModel {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn generate(&self, _prompt: &str, _max_tokens: u32) -> Result<String, ModelError> {
        Ok(self.0.to_string())
    }
}

fn app_with(model: Arc<dyn GenerativeModel>) -> Router {
    let state = AppState::new(model, CompatibilityPolicy::standard(), 1024, Some(7)).unwrap();
    create_app(state)
}

fn app() -> Router {
    app_with(Arc::new(DisabledModel))
}

async fn send(app: &Router, method: &str, uri: &str, user: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri).header("x-user-id", user);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn add(app: &Router, user: &str, body: Value) -> String {
    let (status, item) = send(app, "POST", "/v1/clothing", user, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    item["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), "GET", "/v1/health", "u", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["pipeline"], "proposer→composer");
}

#[tokio::test]
async fn test_clothing_crud_with_normalized_labels() {
    let app = app();
    let id = add(&app, "alice", json!({"category": "Jeans", "color": "Grey", "formality": "smart casual"})).await;

    let (status, item) = send(&app, "GET", &format!("/v1/clothing/{}", id), "alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["category"], "bottoms");
    assert_eq!(item["color"], "gray");
    assert_eq!(item["formality"], "smart-casual");
    assert!(item["createdAt"].is_string());

    let (status, _) = send(&app, "GET", &format!("/v1/clothing/{}", id), "bob", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, list) = send(&app, "GET", "/v1/clothing?category=bottoms", "alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["items"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/v1/clothing?category=capes", "alice", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");

    let (status, _) = send(&app, "DELETE", &format!("/v1/clothing/{}", id), "alice", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = send(&app, "DELETE", &format!("/v1/clothing/{}", id), "alice", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_recommend_with_small_inventory() {
    let app = app();
    add(&app, "u", json!({"category": "tops", "color": "black"})).await;

    let (status, body) = send(&app, "POST", "/v1/outfits/recommend", "u", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "insufficient_inventory");
    assert_eq!(body["message"], "Not enough items in wardrobe. Add at least 2 items.");
    assert_eq!(body["outfits"], json!([]));
}

#[tokio::test]
async fn test_recommend_falls_back_without_model() {
    let app = app();
    add(&app, "u", json!({"category": "shirt", "color": "black", "formality": "casual"})).await;
    add(&app, "u", json!({"category": "pants", "color": "white", "formality": "casual"})).await;

    let (status, body) = send(&app, "POST", "/v1/outfits/recommend", "u", Some(json!({"weather": "cold"}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let outfits = body["outfits"].as_array().unwrap();
    assert_eq!(outfits.len(), 1);
    assert_eq!(outfits[0]["itemIds"].as_array().unwrap().len(), 2);
    assert_eq!(outfits[0]["weather"], "cold");
    assert_eq!(outfits[0]["occasion"], "casual");
    assert_eq!(body["proof"]["seed"], 7);
    assert!(body["proof"]["stages"][0]["error"].as_str().unwrap().contains("DISABLED"));

    let (_, metrics) = send_text(&app, "/metrics").await;
    assert!(metrics.contains("whatrobe_recommend_total{status=\"ok\"} 1"));
    assert!(metrics.contains("whatrobe_stage_failures_total{stage=\"proposer.generative.v1\"} 1"));
}

#[tokio::test]
async fn test_unresolvable_model_outfits_fall_back() {
    let app = app_with(Arc::new(FixedModel(
        r#"Sure! [{"name": "Monochrome", "itemIds": ["a", "b"], "description": "Black on white"}]"#,
    )));
    // Ids are generated by the service, so the scripted reply cannot reference
    // them; every proposal is dropped and the composer fills in.
    add(&app, "u", json!({"category": "tops", "color": "black"})).await;
    add(&app, "u", json!({"category": "bottoms", "color": "white"})).await;

    let (_, body) = send(&app, "POST", "/v1/outfits/recommend", "u", Some(json!({}))).await;

    assert_eq!(body["proof"]["stages"][0]["accepted"], 0);
    assert_eq!(body["proof"]["stages"][0]["rejected"], 1);
    assert_eq!(body["outfits"][0]["source"], "composer");
}

#[tokio::test]
async fn test_favorites_round_trip() {
    let app = app();
    let outfit = json!({
        "id": "o-1",
        "name": "Weekend",
        "items": [],
        "itemIds": ["x", "y"],
        "occasion": "casual",
        "style": "comfortable",
        "weather": "moderate",
        "description": "d",
        "aiReason": "r"
    });

    let (status, saved) = send(&app, "POST", "/v1/outfits/favorites", "u", Some(outfit)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["id"], "o-1");
    assert!(saved["favoritedAt"].is_string());

    let (_, list) = send(&app, "GET", "/v1/outfits/favorites", "u", None).await;
    assert_eq!(list["favorites"].as_array().unwrap().len(), 1);
    let (_, other) = send(&app, "GET", "/v1/outfits/favorites", "someone-else", None).await;
    assert_eq!(other["favorites"], json!([]));
}

#[tokio::test]
async fn test_missing_user_header_is_anonymous() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/clothing")
        .header("content-type", "application/json")
        .body(Body::from(json!({"category": "tops"}).to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let (_, list) = send(&app, "GET", "/v1/clothing", "anonymous", None).await;
    assert_eq!(list["items"].as_array().unwrap().len(), 1);
}

async fn send_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).to_string())
}
