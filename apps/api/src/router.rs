use std::sync::Arc;

use axum::{
    Json,
    Router,
    routing::get,
};
use serde_json::{json, Value};

use booking_cell::router::booking_routes;
use healer_cell::router::healer_routes;
use monitoring_cell::router::monitoring_routes;
use shared_database::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(monitoring_routes(state.clone()))
        .nest("/healers", healer_routes(state.clone()))
        .nest("/bookings", booking_routes(state))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Reiki Booking Backend is running" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use shared_utils::test_utils::{Fixtures, InMemoryStore, TestConfig};

    async fn call(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json_body) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json_body.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_root_message() {
        let app = create_router(TestConfig::unconfigured().unavailable_state());

        let (status, body) = call(app, "GET", "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Reiki Booking Backend is running" }));
    }

    #[tokio::test]
    async fn test_degraded_mode_keeps_root_and_diagnostics() {
        let app = create_router(TestConfig::unconfigured().unavailable_state());

        let (status, report) = call(app.clone(), "GET", "/test", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["connection_status"], "Not Connected");
        assert_eq!(report["database"], "Available but not initialized");

        let (status, _) = call(app.clone(), "GET", "/healers", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = call(app, "GET", "/bookings", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_healer_to_booking_flow() {
        let app = create_router(TestConfig::default().state_with(Arc::new(InMemoryStore::new())));

        let (status, created) = call(app.clone(), "POST", "/healers", Some(Fixtures::healer_payload("Mira Sol"))).await;
        assert_eq!(status, StatusCode::OK);
        let healer_id = created["id"].as_str().unwrap().to_string();

        let (status, healers) = call(app.clone(), "GET", "/healers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(healers[0]["id"], healer_id.as_str());

        let (status, booking) = call(app.clone(), "POST", "/bookings", Some(Fixtures::booking_payload(&healer_id))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(booking["id"].is_string());

        let (status, bookings) = call(app, "GET", "/bookings?limit=5", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bookings[0]["healer"]["name"], "Mira Sol");
        assert_eq!(bookings[0]["healer"]["specialty"], "Usui Reiki");
    }
}
