//! Teacher service
//!
//! A teacher cannot be deleted while any group still references them.

use sqlx::SqlitePool;

use crate::db::repository::{group, payment, teacher};
use crate::utils::{AppError, AppResult};
use rust_decimal::Decimal;
use shared::models::{Teacher, TeacherCreate, TeacherResponse, TeacherUpdate};

/// Income across all of the teacher's groups, all time.
async fn total_income(pool: &SqlitePool, teacher_id: i64) -> AppResult<Decimal> {
    let groups = group::find_by_teacher(pool, teacher_id).await?;
    let mut total = Decimal::ZERO;
    for g in groups {
        total += payment::total_by_group(pool, g.id).await?;
    }
    Ok(total)
}

fn to_response(t: Teacher, total_income: Decimal) -> TeacherResponse {
    TeacherResponse {
        id: t.id,
        full_name: t.full_name,
        phone_number: t.phone_number,
        total_income,
        created_at: t.created_at,
        updated_at: t.updated_at,
    }
}

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<TeacherResponse>> {
    let teachers = teacher::find_all(pool).await?;
    let mut out = Vec::with_capacity(teachers.len());
    for t in teachers {
        let income = total_income(pool, t.id).await?;
        out.push(to_response(t, income));
    }
    Ok(out)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<TeacherResponse> {
    let t = teacher::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Teacher {id}")))?;
    let income = total_income(pool, id).await?;
    Ok(to_response(t, income))
}

pub async fn create(pool: &SqlitePool, data: TeacherCreate) -> AppResult<TeacherResponse> {
    let id = teacher::insert(pool, &data).await?;
    tracing::info!(teacher_id = id, "Teacher created");
    get(pool, id).await
}

pub async fn update(pool: &SqlitePool, id: i64, data: TeacherUpdate) -> AppResult<TeacherResponse> {
    let rows = teacher::update(pool, id, &data).await?;
    if rows == 0 {
        return Err(AppError::not_found(format!("Teacher {id}")));
    }
    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    if !teacher::exists(pool, id).await? {
        return Err(AppError::not_found(format!("Teacher {id}")));
    }
    if group::exists_by_teacher(pool, id).await? {
        return Err(AppError::conflict(
            "Cannot delete teacher with assigned groups",
        ));
    }
    teacher::delete(pool, id).await?;
    tracing::info!(teacher_id = id, "Teacher deleted");
    Ok(())
}
