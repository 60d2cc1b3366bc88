use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::{error::AppError, ListQuery};
use shared_utils::ValidatedJson;

use crate::models::{CreateHealerRequest, Healer};
use crate::services::HealerService;

#[axum::debug_handler]
pub async fn create_healer(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateHealerRequest>,
) -> Result<Json<Value>, AppError> {
    let service = HealerService::new(state.store()?);

    let id = service.create_healer(request).await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({ "id": id })))
}

#[axum::debug_handler]
pub async fn list_healers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Healer>>, AppError> {
    let service = HealerService::new(state.store()?);

    let healers = service.list_healers(query.limit()).await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(healers))
}
