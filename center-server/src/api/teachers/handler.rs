//! Teacher API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::services::teachers;
use crate::utils::AppResult;
use shared::models::{TeacherCreate, TeacherResponse, TeacherUpdate};

/// GET /api/teachers
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<TeacherResponse>>> {
    Ok(Json(teachers::list(&state.pool).await?))
}

/// GET /api/teachers/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<TeacherResponse>> {
    Ok(Json(teachers::get(&state.pool, id).await?))
}

/// POST /api/teachers
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TeacherCreate>,
) -> AppResult<Json<TeacherResponse>> {
    payload.validate()?;
    Ok(Json(teachers::create(&state.pool, payload).await?))
}

/// PUT /api/teachers/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TeacherUpdate>,
) -> AppResult<Json<TeacherResponse>> {
    payload.validate()?;
    Ok(Json(teachers::update(&state.pool, id, payload).await?))
}

/// DELETE /api/teachers/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    teachers::delete(&state.pool, id).await?;
    Ok(Json(true))
}
