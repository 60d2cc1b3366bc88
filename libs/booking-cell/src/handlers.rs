use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::{error::AppError, ListQuery};
use shared_utils::ValidatedJson;

use crate::models::{Booking, CreateBookingRequest};
use crate::services::BookingService;

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<CreateBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let service = BookingService::new(state.store()?);

    let id = service.create_booking(request).await?;

    Ok(Json(json!({ "id": id })))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let service = BookingService::new(state.store()?);

    let bookings = service.list_bookings(query.limit()).await?;

    Ok(Json(bookings))
}
