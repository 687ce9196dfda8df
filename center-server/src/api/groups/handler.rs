//! Group API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::core::ServerState;
use crate::services::groups;
use crate::utils::AppResult;
use shared::models::{GroupCreate, GroupResponse, GroupUpdate};

/// GET /api/groups
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<GroupResponse>>> {
    Ok(Json(groups::list(&state.pool).await?))
}

/// GET /api/groups/sorted-by-teacher - groups ordered by teacher, with the
/// current month's collected total
pub async fn list_sorted_by_teacher(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<GroupResponse>>> {
    Ok(Json(groups::list_sorted_by_teacher(&state.pool).await?))
}

/// GET /api/groups/teacher/:teacherId
pub async fn list_by_teacher(
    State(state): State<ServerState>,
    Path(teacher_id): Path<i64>,
) -> AppResult<Json<Vec<GroupResponse>>> {
    Ok(Json(groups::list_by_teacher(&state.pool, teacher_id).await?))
}

/// GET /api/groups/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<GroupResponse>> {
    Ok(Json(groups::get(&state.pool, id).await?))
}

/// POST /api/groups
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GroupCreate>,
) -> AppResult<Json<GroupResponse>> {
    payload.validate()?;
    Ok(Json(groups::create(&state.pool, payload).await?))
}

/// PUT /api/groups/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<GroupUpdate>,
) -> AppResult<Json<GroupResponse>> {
    payload.validate()?;
    Ok(Json(groups::update(&state.pool, id, payload).await?))
}

/// DELETE /api/groups/:id - cascades enrollments, attendance and payments
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    groups::delete(&state.pool, id).await?;
    Ok(Json(true))
}
