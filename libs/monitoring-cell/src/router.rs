use std::sync::Arc;

use axum::{routing::get, Router};

use shared_database::AppState;

use crate::handlers;

pub fn monitoring_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/test", get(handlers::run_diagnostics))
        .with_state(state)
}
