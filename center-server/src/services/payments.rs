//! Payment service
//!
//! A payment requires an enrollment row for the (student, group) pair, but
//! the row may be inactive: back-payments for memberships that have since
//! ended are accepted.

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::db::repository::{enrollment, group, payment, student};
use crate::utils::{AppError, AppResult, time};
use shared::models::{PaymentCreate, PaymentUpdate, PaymentView};

pub async fn create(pool: &SqlitePool, data: PaymentCreate) -> AppResult<PaymentView> {
    if data.amount <= Decimal::ZERO {
        return Err(AppError::validation("Amount must be greater than 0"));
    }
    time::validate_month_key(&data.paid_for_month)?;

    if !student::exists(pool, data.student_id).await? {
        return Err(AppError::not_found(format!("Student {}", data.student_id)));
    }
    if !group::exists(pool, data.group_id).await? {
        return Err(AppError::not_found(format!("Group {}", data.group_id)));
    }

    match enrollment::find_by_pair(pool, data.student_id, data.group_id).await? {
        None => {
            return Err(AppError::validation(
                "Student is not enrolled in this group. Please enroll the student first.",
            ));
        }
        Some(row) if !row.active => {
            tracing::warn!(
                student_id = data.student_id,
                group_id = data.group_id,
                "Accepting payment for inactive enrollment"
            );
        }
        Some(_) => {}
    }

    let id = payment::insert(pool, &data).await?;
    tracing::info!(payment_id = id, "Payment created");

    payment::find_view_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::database("Payment row missing after insert"))
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<PaymentView> {
    payment::find_view_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Payment {id}")))
}

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<PaymentView>> {
    Ok(payment::find_all(pool).await?)
}

pub async fn list_by_student(pool: &SqlitePool, student_id: i64) -> AppResult<Vec<PaymentView>> {
    if !student::exists(pool, student_id).await? {
        return Err(AppError::not_found(format!("Student {student_id}")));
    }
    Ok(payment::find_by_student(pool, student_id).await?)
}

pub async fn list_by_group(pool: &SqlitePool, group_id: i64) -> AppResult<Vec<PaymentView>> {
    if !group::exists(pool, group_id).await? {
        return Err(AppError::not_found(format!("Group {group_id}")));
    }
    Ok(payment::find_by_group(pool, group_id).await?)
}

pub async fn update(pool: &SqlitePool, id: i64, data: PaymentUpdate) -> AppResult<PaymentView> {
    let existing = get(pool, id).await?;

    if let Some(amount) = data.amount
        && amount <= Decimal::ZERO
    {
        return Err(AppError::validation("Amount must be greater than 0"));
    }
    if let Some(month) = data.paid_for_month.as_deref() {
        time::validate_month_key(month)?;
    }

    // moving the payment to another pair requires an enrollment row there
    let target_student = data.student_id.unwrap_or(existing.student_id);
    let target_group = data.group_id.unwrap_or(existing.group_id);
    if target_student != existing.student_id || target_group != existing.group_id {
        if !student::exists(pool, target_student).await? {
            return Err(AppError::not_found(format!("Student {target_student}")));
        }
        if !group::exists(pool, target_group).await? {
            return Err(AppError::not_found(format!("Group {target_group}")));
        }
        if enrollment::find_by_pair(pool, target_student, target_group)
            .await?
            .is_none()
        {
            return Err(AppError::validation(
                "Student is not enrolled in this group. Cannot update payment.",
            ));
        }
    }

    payment::update_fields(
        pool,
        id,
        data.student_id,
        data.group_id,
        data.amount,
        data.paid_for_month.as_deref(),
    )
    .await?;

    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    if !payment::delete(pool, id).await? {
        return Err(AppError::not_found(format!("Payment {id}")));
    }
    tracing::info!(payment_id = id, "Payment deleted");
    Ok(())
}
