//! Enrollment API Handlers
//!
//! Thin wrappers around [`EnrollmentManager`]; all lifecycle rules live
//! there.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::enrollment::EnrollmentManager;
use crate::utils::AppResult;
use shared::models::{EnrollmentRequest, EnrollmentView};

/// POST /api/enrollments - enroll a student into a group
pub async fn enroll(
    State(state): State<ServerState>,
    Json(payload): Json<EnrollmentRequest>,
) -> AppResult<Json<EnrollmentView>> {
    let manager = EnrollmentManager::new(state.pool.clone());
    Ok(Json(
        manager.enroll(payload.student_id, payload.group_id).await?,
    ))
}

/// DELETE /api/enrollments/:studentId/:groupId - withdraw a student from a
/// group. Withdrawing the last active membership deletes the student and
/// all of their history.
pub async fn withdraw(
    State(state): State<ServerState>,
    Path((student_id, group_id)): Path<(i64, i64)>,
) -> AppResult<Json<bool>> {
    let manager = EnrollmentManager::new(state.pool.clone());
    manager.withdraw(student_id, group_id).await?;
    Ok(Json(true))
}

/// GET /api/enrollments/student/:studentId - all rows, active and historical
pub async fn list_by_student(
    State(state): State<ServerState>,
    Path(student_id): Path<i64>,
) -> AppResult<Json<Vec<EnrollmentView>>> {
    let manager = EnrollmentManager::new(state.pool.clone());
    Ok(Json(manager.list_by_student(student_id).await?))
}

/// GET /api/enrollments/student/:studentId/active
pub async fn list_active_by_student(
    State(state): State<ServerState>,
    Path(student_id): Path<i64>,
) -> AppResult<Json<Vec<EnrollmentView>>> {
    let manager = EnrollmentManager::new(state.pool.clone());
    Ok(Json(manager.list_active_by_student(student_id).await?))
}

/// GET /api/enrollments/group/:groupId - active enrollments only
pub async fn list_by_group(
    State(state): State<ServerState>,
    Path(group_id): Path<i64>,
) -> AppResult<Json<Vec<EnrollmentView>>> {
    let manager = EnrollmentManager::new(state.pool.clone());
    Ok(Json(manager.list_by_group(group_id).await?))
}
