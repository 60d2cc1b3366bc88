use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use healer_cell::router::healer_routes;
use healer_cell::HEALER_COLLECTION;
use shared_database::DocumentStore;
use shared_utils::test_utils::{FailingStore, Fixtures, InMemoryStore, TestConfig};

fn create_test_app(store: Arc<InMemoryStore>) -> Router {
    healer_routes(TestConfig::default().state_with(store))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json_response = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, json_response)
}

fn post_json(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_create_healer_then_list() {
    let store = Arc::new(InMemoryStore::new());
    let app = create_test_app(store.clone());

    let (status, created) = send(app.clone(), post_json(&Fixtures::healer_payload("Mira Sol"))).await;
    assert_eq!(status, StatusCode::OK);

    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);

    let (status, healers) = send(app, get("/")).await;
    assert_eq!(status, StatusCode::OK);

    let healers = healers.as_array().unwrap();
    assert_eq!(healers.len(), 1);
    assert_eq!(healers[0]["id"], id);
    assert_eq!(healers[0]["name"], "Mira Sol");
    assert_eq!(healers[0]["specialty"], "Usui Reiki");
    assert_eq!(healers[0]["rating"], 4.9);
    assert!(healers[0]["created_at"].is_string());
    assert!(healers[0].get("_id").is_none());
}

#[tokio::test]
async fn test_create_healer_keeps_explicit_rating() {
    let store = Arc::new(InMemoryStore::new());
    let app = create_test_app(store.clone());

    let mut payload = Fixtures::healer_payload("Mira Sol");
    payload["rating"] = json!(3.5);

    let (status, _) = send(app.clone(), post_json(&payload)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, healers) = send(app, get("/")).await;
    assert_eq!(healers[0]["rating"], 3.5);
}

#[tokio::test]
async fn test_create_healer_rejects_invalid_fields() {
    let store = Arc::new(InMemoryStore::new());
    let app = create_test_app(store.clone());

    let invalid_payloads = vec![
        json!({ "name": "M", "specialty": "Usui Reiki" }),
        json!({ "name": "Mira", "specialty": "U" }),
        json!({ "name": "Mira", "specialty": "Usui Reiki", "email": "not-an-email" }),
        json!({ "name": "Mira", "specialty": "Usui Reiki", "rating": 7 }),
        json!({ "specialty": "Usui Reiki" }),
    ];

    for payload in invalid_payloads {
        let (status, body) = send(app.clone(), post_json(&payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "payload: {}", payload);
        assert!(body["error"].is_string());
    }

    assert_eq!(store.count(HEALER_COLLECTION).await, 0);
}

#[tokio::test]
async fn test_list_healers_respects_limit() {
    let store = Arc::new(InMemoryStore::new());
    let app = create_test_app(store.clone());

    for name in ["Ana Lux", "Bo Tide", "Cy Rain"] {
        let (status, _) = send(app.clone(), post_json(&Fixtures::healer_payload(name))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, limited) = send(app.clone(), get("/?limit=2")).await;
    assert_eq!(limited.as_array().unwrap().len(), 2);

    let (status, fallback) = send(app, get("/?limit=lots")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fallback.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_healers_skips_unreadable_documents() {
    let store = Arc::new(InMemoryStore::new());

    let mut numeric_timestamp = Fixtures::healer_document("Ana");
    numeric_timestamp.insert("created_at", 100i64);
    store.insert_one(HEALER_COLLECTION, numeric_timestamp).await.unwrap();
    store
        .insert_one(HEALER_COLLECTION, bson::doc! { "name": "No specialty" })
        .await
        .unwrap();
    store.insert_one(HEALER_COLLECTION, Fixtures::healer_document("Bo")).await.unwrap();

    let (status, healers) = send(create_test_app(store), get("/")).await;
    assert_eq!(status, StatusCode::OK);

    let healers = healers.as_array().unwrap();
    let names: Vec<&str> = healers.iter().map(|h| h["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Ana", "Bo"]);
    assert_eq!(healers[0]["created_at"], "1970-01-01T00:00:00.100Z");
}

#[tokio::test]
async fn test_list_healers_empty() {
    let app = create_test_app(Arc::new(InMemoryStore::new()));

    let (status, healers) = send(app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(healers, json!([]));
}

#[tokio::test]
async fn test_store_unavailable_returns_500() {
    let app = healer_routes(TestConfig::unconfigured().unavailable_state());

    let (status, body) = send(app.clone(), post_json(&Fixtures::healer_payload("Mira Sol"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Database not available"));

    let (status, _) = send(app, get("/")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_store_error_is_passed_through() {
    let store = Arc::new(FailingStore::new("server selection timeout"));
    let app = healer_routes(TestConfig::default().state_with(store));

    let (status, body) = send(app.clone(), post_json(&Fixtures::healer_payload("Mira Sol"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "server selection timeout");

    let (status, body) = send(app, get("/")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "server selection timeout");
}
