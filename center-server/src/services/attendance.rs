//! Attendance service
//!
//! Sheets are taken per group per date: one record for every active
//! enrollee. The creation workflow enforces at most one sheet per
//! (group, date).

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db::repository::attendance::NewAttendance;
use crate::db::repository::{attendance, enrollment, group, student};
use crate::utils::{AppError, AppResult, time};
use shared::models::{AttendanceSheetRequest, AttendanceStatus, AttendanceView};
use std::collections::HashSet;

/// Record a full sheet for one group and date.
pub async fn create_sheet(
    pool: &SqlitePool,
    request: AttendanceSheetRequest,
) -> AppResult<Vec<AttendanceView>> {
    let mut tx = pool.begin().await?;

    if !group::exists(&mut *tx, request.group_id).await? {
        return Err(AppError::not_found(format!("Group {}", request.group_id)));
    }
    if attendance::exists_by_group_and_date(&mut *tx, request.group_id, request.date).await? {
        return Err(AppError::validation(
            "Attendance already exists for this group and date",
        ));
    }

    let enrollees = enrollment::find_active_enrollees(&mut *tx, request.group_id).await?;
    if enrollees.is_empty() {
        return Err(AppError::validation("No students enrolled in this group"));
    }

    let absent: HashSet<i64> = request.absent_student_ids.iter().copied().collect();
    let records: Vec<NewAttendance> = enrollees
        .iter()
        .map(|e| NewAttendance {
            student_id: e.student_id,
            group_id: request.group_id,
            date: request.date,
            status: if absent.contains(&e.student_id) {
                AttendanceStatus::Absent
            } else {
                AttendanceStatus::Present
            },
        })
        .collect();

    attendance::insert_many(&mut tx, &records).await?;
    tx.commit().await?;

    tracing::info!(
        group_id = request.group_id,
        date = %request.date,
        records = records.len(),
        "Attendance sheet recorded"
    );

    Ok(attendance::find_by_group_and_date(pool, request.group_id, request.date).await?)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<AttendanceView> {
    attendance::find_view_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Attendance {id}")))
}

pub async fn list_by_group_and_date(
    pool: &SqlitePool,
    group_id: i64,
    date: NaiveDate,
) -> AppResult<Vec<AttendanceView>> {
    if !group::exists(pool, group_id).await? {
        return Err(AppError::not_found(format!("Group {group_id}")));
    }
    Ok(attendance::find_by_group_and_date(pool, group_id, date).await?)
}

pub async fn list_by_month(
    pool: &SqlitePool,
    year: i32,
    month: u32,
) -> AppResult<Vec<AttendanceView>> {
    let (start, end) = time::month_bounds(year, month)?;
    Ok(attendance::find_in_range(pool, start, end).await?)
}

pub async fn list_by_group_and_month(
    pool: &SqlitePool,
    group_id: i64,
    year: i32,
    month: u32,
) -> AppResult<Vec<AttendanceView>> {
    if !group::exists(pool, group_id).await? {
        return Err(AppError::not_found(format!("Group {group_id}")));
    }
    let (start, end) = time::month_bounds(year, month)?;
    Ok(attendance::find_by_group_in_range(pool, group_id, start, end).await?)
}

pub async fn list_by_student_and_month(
    pool: &SqlitePool,
    student_id: i64,
    year: i32,
    month: u32,
) -> AppResult<Vec<AttendanceView>> {
    if !student::exists(pool, student_id).await? {
        return Err(AppError::not_found(format!("Student {student_id}")));
    }
    let (start, end) = time::month_bounds(year, month)?;
    Ok(attendance::find_by_student_in_range(pool, student_id, start, end).await?)
}

pub async fn list_by_pair_and_month(
    pool: &SqlitePool,
    student_id: i64,
    group_id: i64,
    year: i32,
    month: u32,
) -> AppResult<Vec<AttendanceView>> {
    if !student::exists(pool, student_id).await? {
        return Err(AppError::not_found(format!("Student {student_id}")));
    }
    if !group::exists(pool, group_id).await? {
        return Err(AppError::not_found(format!("Group {group_id}")));
    }
    let (start, end) = time::month_bounds(year, month)?;
    Ok(attendance::find_by_pair_in_range(pool, student_id, group_id, start, end).await?)
}

pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: AttendanceStatus,
) -> AppResult<AttendanceView> {
    let rows = attendance::update_status(pool, id, status).await?;
    if rows == 0 {
        return Err(AppError::not_found(format!("Attendance {id}")));
    }
    get(pool, id).await
}
