//! Group service
//!
//! Deleting a group removes its children first (enrollments, attendance,
//! payments) inside one transaction, then the group row itself.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::db::repository::{
    UNKNOWN_LABEL, attendance, enrollment, group, payment, teacher,
};
use crate::utils::{AppError, AppResult};
use shared::models::{GroupCreate, GroupResponse, GroupUpdate, GroupWithTeacher};

async fn to_response(pool: &SqlitePool, g: GroupWithTeacher) -> AppResult<GroupResponse> {
    let students_count = enrollment::count_active_by_group(pool, g.id).await?;
    let total_paid = payment::total_by_group(pool, g.id).await?;
    Ok(assemble(g, students_count, total_paid))
}

fn assemble(g: GroupWithTeacher, students_count: i64, total_paid: Decimal) -> GroupResponse {
    GroupResponse {
        id: g.id,
        name: g.name,
        teacher_id: g.teacher_id,
        teacher_name: g.teacher_name.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        monthly_fee: g.monthly_fee,
        students_count,
        total_amount_to_pay: g.monthly_fee * Decimal::from(students_count),
        total_paid,
        created_at: g.created_at,
        updated_at: g.updated_at,
    }
}

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<GroupResponse>> {
    let groups = group::find_all(pool).await?;
    let mut out = Vec::with_capacity(groups.len());
    for g in groups {
        out.push(to_response(pool, g).await?);
    }
    Ok(out)
}

/// Groups ordered by teacher then name; the paid total only covers the
/// current billing month (this feeds the per-teacher overview screen).
pub async fn list_sorted_by_teacher(pool: &SqlitePool) -> AppResult<Vec<GroupResponse>> {
    let today = Utc::now().date_naive();
    let current_month = shared::util::month_key(today.year(), today.month());

    let groups = group::find_all_sorted_by_teacher(pool).await?;
    let mut out = Vec::with_capacity(groups.len());
    for g in groups {
        let students_count = enrollment::count_active_by_group(pool, g.id).await?;
        let total_paid = payment::total_by_group_and_month(pool, g.id, &current_month).await?;
        out.push(assemble(g, students_count, total_paid));
    }
    Ok(out)
}

pub async fn list_by_teacher(pool: &SqlitePool, teacher_id: i64) -> AppResult<Vec<GroupResponse>> {
    if !teacher::exists(pool, teacher_id).await? {
        return Err(AppError::not_found(format!("Teacher {teacher_id}")));
    }
    let groups = group::find_by_teacher(pool, teacher_id).await?;
    let mut out = Vec::with_capacity(groups.len());
    for g in groups {
        out.push(to_response(pool, g).await?);
    }
    Ok(out)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<GroupResponse> {
    let g = group::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Group {id}")))?;
    to_response(pool, g).await
}

pub async fn create(pool: &SqlitePool, data: GroupCreate) -> AppResult<GroupResponse> {
    if data.monthly_fee < Decimal::ZERO {
        return Err(AppError::validation("Monthly fee must be non-negative"));
    }
    if !teacher::exists(pool, data.teacher_id).await? {
        return Err(AppError::not_found(format!("Teacher {}", data.teacher_id)));
    }
    let id = group::insert(pool, &data).await?;
    tracing::info!(group_id = id, "Group created");
    get(pool, id).await
}

pub async fn update(pool: &SqlitePool, id: i64, data: GroupUpdate) -> AppResult<GroupResponse> {
    if let Some(fee) = data.monthly_fee
        && fee < Decimal::ZERO
    {
        return Err(AppError::validation("Monthly fee must be non-negative"));
    }
    if let Some(teacher_id) = data.teacher_id
        && !teacher::exists(pool, teacher_id).await?
    {
        return Err(AppError::not_found(format!("Teacher {teacher_id}")));
    }
    let rows = group::update(pool, id, &data).await?;
    if rows == 0 {
        return Err(AppError::not_found(format!("Group {id}")));
    }
    get(pool, id).await
}

/// Delete a group and everything hanging off it, children first.
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;

    if !group::exists(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Group {id}")));
    }

    let enrollments = enrollment::delete_by_group(&mut *tx, id).await?;
    let attendance_rows = attendance::delete_by_group(&mut *tx, id).await?;
    let payments = payment::delete_by_group(&mut *tx, id).await?;
    group::delete(&mut *tx, id).await?;

    tx.commit().await?;
    tracing::info!(
        group_id = id,
        enrollments,
        attendance_rows,
        payments,
        "Group deleted with all related data"
    );
    Ok(())
}
