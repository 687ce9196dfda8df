//! Inquiry API Handlers
//!
//! Plain CRUD over the inquiry repository; no business rules beyond
//! status parsing.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::inquiry;
use crate::utils::{AppError, AppResult};
use shared::models::{Inquiry, InquiryCreate, InquiryStatus, InquiryUpdate};

fn parse_status(raw: &str) -> AppResult<InquiryStatus> {
    match raw.to_uppercase().as_str() {
        "NEW" => Ok(InquiryStatus::New),
        "CONTACTED" => Ok(InquiryStatus::Contacted),
        "ENROLLED" => Ok(InquiryStatus::Enrolled),
        "CLOSED" => Ok(InquiryStatus::Closed),
        other => Err(AppError::validation(format!(
            "Unknown inquiry status: {other}"
        ))),
    }
}

/// GET /api/inquiries
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Inquiry>>> {
    Ok(Json(inquiry::find_all(&state.pool).await?))
}

/// GET /api/inquiries/status/:status
pub async fn list_by_status(
    State(state): State<ServerState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Inquiry>>> {
    let status = parse_status(&status)?;
    Ok(Json(inquiry::find_by_status(&state.pool, status).await?))
}

/// GET /api/inquiries/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Inquiry>> {
    let found = inquiry::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Inquiry {id}")))?;
    Ok(Json(found))
}

/// POST /api/inquiries
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InquiryCreate>,
) -> AppResult<Json<Inquiry>> {
    payload.validate()?;
    let id = inquiry::insert(&state.pool, &payload).await?;
    tracing::info!(inquiry_id = id, "Inquiry created");
    let created = inquiry::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::database("Inquiry row missing after insert"))?;
    Ok(Json(created))
}

/// PUT /api/inquiries/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InquiryUpdate>,
) -> AppResult<Json<Inquiry>> {
    let rows = inquiry::update(&state.pool, id, &payload).await?;
    if rows == 0 {
        return Err(AppError::not_found(format!("Inquiry {id}")));
    }
    let updated = inquiry::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Inquiry {id}")))?;
    Ok(Json(updated))
}

/// DELETE /api/inquiries/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    if !inquiry::delete(&state.pool, id).await? {
        return Err(AppError::not_found(format!("Inquiry {id}")));
    }
    Ok(Json(true))
}
