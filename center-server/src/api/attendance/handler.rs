//! Attendance API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;

use crate::core::ServerState;
use crate::services::attendance;
use crate::utils::{AppResult, time};
use shared::models::{AttendanceSheetRequest, AttendanceUpdate, AttendanceView};

/// POST /api/attendance - record a sheet for one group and date
pub async fn create_sheet(
    State(state): State<ServerState>,
    Json(payload): Json<AttendanceSheetRequest>,
) -> AppResult<Json<Vec<AttendanceView>>> {
    Ok(Json(attendance::create_sheet(&state.pool, payload).await?))
}

/// GET /api/attendance/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AttendanceView>> {
    Ok(Json(attendance::get(&state.pool, id).await?))
}

/// GET /api/attendance/group/:groupId/date/:date
pub async fn list_by_group_and_date(
    State(state): State<ServerState>,
    Path((group_id, date)): Path<(i64, String)>,
) -> AppResult<Json<Vec<AttendanceView>>> {
    let date: NaiveDate = time::parse_date(&date)?;
    Ok(Json(
        attendance::list_by_group_and_date(&state.pool, group_id, date).await?,
    ))
}

/// GET /api/attendance/month/:year/:month
pub async fn list_by_month(
    State(state): State<ServerState>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Json<Vec<AttendanceView>>> {
    Ok(Json(attendance::list_by_month(&state.pool, year, month).await?))
}

/// GET /api/attendance/group/:groupId/month/:year/:month
pub async fn list_by_group_and_month(
    State(state): State<ServerState>,
    Path((group_id, year, month)): Path<(i64, i32, u32)>,
) -> AppResult<Json<Vec<AttendanceView>>> {
    Ok(Json(
        attendance::list_by_group_and_month(&state.pool, group_id, year, month).await?,
    ))
}

/// GET /api/attendance/student/:studentId/month/:year/:month
pub async fn list_by_student_and_month(
    State(state): State<ServerState>,
    Path((student_id, year, month)): Path<(i64, i32, u32)>,
) -> AppResult<Json<Vec<AttendanceView>>> {
    Ok(Json(
        attendance::list_by_student_and_month(&state.pool, student_id, year, month).await?,
    ))
}

/// GET /api/attendance/student/:studentId/group/:groupId/month/:year/:month
pub async fn list_by_pair_and_month(
    State(state): State<ServerState>,
    Path((student_id, group_id, year, month)): Path<(i64, i64, i32, u32)>,
) -> AppResult<Json<Vec<AttendanceView>>> {
    Ok(Json(
        attendance::list_by_pair_and_month(&state.pool, student_id, group_id, year, month).await?,
    ))
}

/// PUT /api/attendance/:id/status - correct a recorded status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AttendanceUpdate>,
) -> AppResult<Json<AttendanceView>> {
    Ok(Json(
        attendance::update_status(&state.pool, id, payload.status).await?,
    ))
}
