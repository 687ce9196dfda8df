//! Enrollment lifecycle
//!
//! Owns every transition of the student↔group membership:
//!
//! - first enrollment creates the row (active, enrolled today)
//! - withdrawal deactivates it and stamps the leave date
//! - re-enrollment reactivates the same row, never a duplicate
//! - a withdrawal that leaves the student with zero active memberships purges
//!   the student together with all attendance, payment and enrollment history
//!
//! Each operation runs as one SQLite transaction, so the purge's four-stage
//! delete is never observable half-done.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};

use crate::db::repository::{attendance, enrollment, group, payment, student};
use crate::utils::{AppError, AppResult};
use shared::models::EnrollmentView;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct EnrollmentManager {
    pool: SqlitePool,
}

impl EnrollmentManager {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Enroll a student into a group.
    ///
    /// Reuses an inactive row for the pair when one exists; a second active
    /// enrollment for the same pair is a conflict.
    pub async fn enroll(&self, student_id: i64, group_id: i64) -> AppResult<EnrollmentView> {
        let mut tx = self.pool.begin().await?;

        if !student::exists(&mut *tx, student_id).await? {
            return Err(AppError::not_found(format!("Student {student_id}")));
        }
        if !group::exists(&mut *tx, group_id).await? {
            return Err(AppError::not_found(format!("Group {group_id}")));
        }

        if enrollment::exists_active_pair(&mut *tx, student_id, group_id).await? {
            return Err(AppError::conflict(
                "Student is already enrolled in this group",
            ));
        }

        match enrollment::find_by_pair(&mut *tx, student_id, group_id).await? {
            Some(existing) => {
                enrollment::reactivate(&mut *tx, existing.id).await?;
                tracing::info!(student_id, group_id, "Reactivated enrollment");
            }
            None => {
                let today = Utc::now().date_naive();
                enrollment::insert(&mut *tx, student_id, group_id, today).await?;
                tracing::info!(student_id, group_id, "Student enrolled");
            }
        }

        let view = enrollment::find_view_by_pair(&mut *tx, student_id, group_id)
            .await?
            .ok_or_else(|| AppError::database("Enrollment row missing after write"))?;

        tx.commit().await?;
        Ok(view)
    }

    /// Withdraw a student from a group.
    ///
    /// The enrollment row (active or not) must exist. When this was the
    /// student's last active membership, the student is purged entirely.
    pub async fn withdraw(&self, student_id: i64, group_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let existing = enrollment::find_by_pair(&mut *tx, student_id, group_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Enrollment for student {student_id} in group {group_id}"
                ))
            })?;

        enrollment::deactivate(&mut *tx, existing.id, Utc::now().date_naive()).await?;
        tracing::info!(student_id, group_id, "Student withdrawn from group");

        let remaining = enrollment::count_active_by_student(&mut *tx, student_id).await?;
        if remaining == 0 {
            tracing::warn!(
                student_id,
                "Student has no active groups left, deleting student and all related data"
            );
            purge_student(&mut tx, student_id).await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// All enrollment rows of a student, active and historical.
    pub async fn list_by_student(&self, student_id: i64) -> AppResult<Vec<EnrollmentView>> {
        if !student::exists(&self.pool, student_id).await? {
            return Err(AppError::not_found(format!("Student {student_id}")));
        }
        Ok(enrollment::find_views_by_student(&self.pool, student_id).await?)
    }

    /// Only the student's active enrollments.
    pub async fn list_active_by_student(&self, student_id: i64) -> AppResult<Vec<EnrollmentView>> {
        if !student::exists(&self.pool, student_id).await? {
            return Err(AppError::not_found(format!("Student {student_id}")));
        }
        Ok(enrollment::find_active_views_by_student(&self.pool, student_id).await?)
    }

    /// Active enrollments of a group.
    pub async fn list_by_group(&self, group_id: i64) -> AppResult<Vec<EnrollmentView>> {
        if !group::exists(&self.pool, group_id).await? {
            return Err(AppError::not_found(format!("Group {group_id}")));
        }
        Ok(enrollment::find_active_views_by_group(&self.pool, group_id).await?)
    }

    pub async fn count_active_in_group(&self, group_id: i64) -> AppResult<i64> {
        Ok(enrollment::count_active_by_group(&self.pool, group_id).await?)
    }

    pub async fn is_enrolled(&self, student_id: i64, group_id: i64) -> AppResult<bool> {
        Ok(enrollment::exists_active_pair(&self.pool, student_id, group_id).await?)
    }
}

/// Delete a student and every dependent record, children before parent:
/// attendance, then payments, then enrollment rows, then the student itself.
/// The ordering is a contract (foreign keys are enforced), not an
/// implementation detail. Must run inside the caller's transaction.
pub(crate) async fn purge_student(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> AppResult<()> {
    if !student::exists(&mut *conn, student_id).await? {
        return Err(AppError::not_found(format!("Student {student_id}")));
    }

    let attendance_count = attendance::delete_by_student(&mut *conn, student_id).await?;
    let payment_count = payment::delete_by_student(&mut *conn, student_id).await?;
    let enrollment_count = enrollment::delete_by_student(&mut *conn, student_id).await?;
    student::delete(&mut *conn, student_id).await?;

    tracing::info!(
        student_id,
        attendance_count,
        payment_count,
        enrollment_count,
        "Student and all related data deleted"
    );
    Ok(())
}
