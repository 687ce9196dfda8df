//! Student service
//!
//! Responses carry the student's lifetime paid total plus a per-group payment
//! status for a billing month. Deleting a student reuses the same purge
//! procedure (and ordering) as withdrawal.

use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::db::repository::{enrollment, group, payment, student};
use crate::enrollment::purge_student;
use crate::utils::{AppError, AppResult};
use shared::models::{
    EnrollmentView, Student, StudentCreate, StudentGroupInfo, StudentResponse, StudentUpdate,
};

fn current_month_key() -> String {
    let today = Utc::now().date_naive();
    shared::util::month_key(today.year(), today.month())
}

/// Month key to check payment status against: explicit year/month when
/// given, otherwise the current month.
fn check_month(year: Option<i32>, month: Option<u32>) -> AppResult<String> {
    match (year, month) {
        (Some(y), Some(m)) => {
            if !(1..=12).contains(&m) {
                return Err(AppError::validation(format!(
                    "Month must be between 1 and 12, got {m}"
                )));
            }
            Ok(shared::util::month_key(y, m))
        }
        _ => Ok(current_month_key()),
    }
}

async fn to_response(
    pool: &SqlitePool,
    s: Student,
    month_key: &str,
) -> AppResult<StudentResponse> {
    let total_paid = payment::total_by_student(pool, s.id).await?;
    let active = enrollment::find_active_views_by_student(pool, s.id).await?;
    assemble(pool, s, total_paid, active, month_key).await
}

async fn assemble(
    pool: &SqlitePool,
    s: Student,
    total_paid: Decimal,
    active: Vec<EnrollmentView>,
    month_key: &str,
) -> AppResult<StudentResponse> {
    let mut groups = Vec::with_capacity(active.len());
    let mut paid_count = 0i64;
    for view in &active {
        let amount_paid =
            payment::total_by_pair_and_month(pool, s.id, view.group_id, month_key).await?;
        let paid = amount_paid > Decimal::ZERO;
        if paid {
            paid_count += 1;
        }
        groups.push(StudentGroupInfo {
            group_id: view.group_id,
            group_name: view.group_name.clone(),
            teacher_name: view.teacher_name.clone(),
            monthly_fee: view.monthly_fee,
            paid_for_month: paid,
            month: month_key.to_string(),
            amount_paid_this_month: amount_paid,
        });
    }

    let active_count = groups.len() as i64;
    Ok(StudentResponse {
        id: s.id,
        full_name: s.full_name,
        parent_name: s.parent_name,
        parent_phone_number: s.parent_phone_number,
        sms_link_code: s.sms_link_code,
        total_paid,
        active_groups: groups,
        active_groups_count: active_count,
        paid_for_current_month: active_count > 0 && paid_count == active_count,
        groups_paid_count: paid_count,
        groups_unpaid_count: active_count - paid_count,
        created_at: s.created_at,
        updated_at: s.updated_at,
    })
}

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<StudentResponse>> {
    let month_key = current_month_key();
    let students = student::find_all(pool).await?;
    // one query for all lifetime totals instead of one per student
    let totals = payment::totals_by_student(pool).await?;

    let mut out = Vec::with_capacity(students.len());
    for s in students {
        let total_paid = totals.get(&s.id).copied().unwrap_or(Decimal::ZERO);
        let active = enrollment::find_active_views_by_student(pool, s.id).await?;
        out.push(assemble(pool, s, total_paid, active, &month_key).await?);
    }
    Ok(out)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<StudentResponse> {
    let s = student::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Student {id}")))?;
    to_response(pool, s, &current_month_key()).await
}

/// Students actively enrolled in a group, with payment status for the given
/// (or current) month.
pub async fn list_by_group(
    pool: &SqlitePool,
    group_id: i64,
    year: Option<i32>,
    month: Option<u32>,
) -> AppResult<Vec<StudentResponse>> {
    if !group::exists(pool, group_id).await? {
        return Err(AppError::not_found(format!("Group {group_id}")));
    }
    let month_key = check_month(year, month)?;

    let enrollees = enrollment::find_active_enrollees(pool, group_id).await?;
    let mut out = Vec::with_capacity(enrollees.len());
    for enrollee in enrollees {
        let s = match student::find_by_id(pool, enrollee.student_id).await? {
            Some(s) => s,
            None => continue,
        };
        out.push(to_response(pool, s, &month_key).await?);
    }
    Ok(out)
}

pub async fn create(pool: &SqlitePool, data: StudentCreate) -> AppResult<StudentResponse> {
    let id = student::insert(pool, &data).await?;
    tracing::info!(student_id = id, "Student created");
    get(pool, id).await
}

pub async fn update(pool: &SqlitePool, id: i64, data: StudentUpdate) -> AppResult<StudentResponse> {
    let rows = student::update(pool, id, &data).await?;
    if rows == 0 {
        return Err(AppError::not_found(format!("Student {id}")));
    }
    get(pool, id).await
}

/// Delete a student outright, with the same child-first ordering the
/// enrollment lifecycle uses for its purge.
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    purge_student(&mut tx, id).await?;
    tx.commit().await?;
    Ok(())
}
