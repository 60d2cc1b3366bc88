use std::sync::Arc;

use axum::{extract::State, Json};

use shared_database::AppState;

use crate::models::DiagnosticReport;
use crate::services::DiagnosticsService;

#[axum::debug_handler]
pub async fn run_diagnostics(State(state): State<Arc<AppState>>) -> Json<DiagnosticReport> {
    Json(DiagnosticsService::new(state).run().await)
}
