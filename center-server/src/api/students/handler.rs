//! Student API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::services::students;
use crate::utils::AppResult;
use shared::models::{StudentCreate, StudentResponse, StudentUpdate};

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// GET /api/students
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<StudentResponse>>> {
    Ok(Json(students::list(&state.pool).await?))
}

/// GET /api/students/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StudentResponse>> {
    Ok(Json(students::get(&state.pool, id).await?))
}

/// GET /api/students/group/:groupId?year=&month= - active students of a
/// group, with payment status for the requested (or current) month
pub async fn list_by_group(
    State(state): State<ServerState>,
    Path(group_id): Path<i64>,
    Query(query): Query<MonthQuery>,
) -> AppResult<Json<Vec<StudentResponse>>> {
    Ok(Json(
        students::list_by_group(&state.pool, group_id, query.year, query.month).await?,
    ))
}

/// POST /api/students
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StudentCreate>,
) -> AppResult<Json<StudentResponse>> {
    payload.validate()?;
    Ok(Json(students::create(&state.pool, payload).await?))
}

/// PUT /api/students/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StudentUpdate>,
) -> AppResult<Json<StudentResponse>> {
    payload.validate()?;
    Ok(Json(students::update(&state.pool, id, payload).await?))
}

/// DELETE /api/students/:id - removes the student and every dependent record
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    students::delete(&state.pool, id).await?;
    Ok(Json(true))
}
