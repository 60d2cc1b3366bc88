use std::sync::Arc;

use axum::{routing::post, Router};

use shared_database::AppState;

use crate::handlers;

pub fn healer_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::create_healer).get(handlers::list_healers))
        .with_state(state)
}
