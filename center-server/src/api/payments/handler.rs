//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::services::payments;
use crate::utils::AppResult;
use shared::models::{PaymentCreate, PaymentUpdate, PaymentView};

/// POST /api/payments
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<PaymentView>> {
    Ok(Json(payments::create(&state.pool, payload).await?))
}

/// GET /api/payments
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PaymentView>>> {
    Ok(Json(payments::list(&state.pool).await?))
}

/// GET /api/payments/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PaymentView>> {
    Ok(Json(payments::get(&state.pool, id).await?))
}

/// GET /api/payments/student/:studentId
pub async fn list_by_student(
    State(state): State<ServerState>,
    Path(student_id): Path<i64>,
) -> AppResult<Json<Vec<PaymentView>>> {
    Ok(Json(payments::list_by_student(&state.pool, student_id).await?))
}

/// GET /api/payments/group/:groupId
pub async fn list_by_group(
    State(state): State<ServerState>,
    Path(group_id): Path<i64>,
) -> AppResult<Json<Vec<PaymentView>>> {
    Ok(Json(payments::list_by_group(&state.pool, group_id).await?))
}

/// PUT /api/payments/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PaymentUpdate>,
) -> AppResult<Json<PaymentView>> {
    Ok(Json(payments::update(&state.pool, id, payload).await?))
}

/// DELETE /api/payments/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    payments::delete(&state.pool, id).await?;
    Ok(Json(true))
}
