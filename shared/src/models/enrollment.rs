//! Enrollment Model ("student group")
//!
//! The membership of a student in a group. One row per (student, group) pair
//! for the row's whole life: leaving deactivates it, rejoining reactivates the
//! same row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Enrollment row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub group_id: i64,
    pub active: bool,
    pub enrolled_at: NaiveDate,
    /// Set when the student left the group, cleared on re-enrollment.
    pub left_at: Option<NaiveDate>,
    pub created_at: i64,
}

/// Enroll/withdraw request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentRequest {
    pub student_id: i64,
    pub group_id: i64,
}

/// Enrollment view with student/group/teacher names resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentView {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub group_id: i64,
    pub group_name: String,
    pub teacher_name: String,
    pub monthly_fee: Decimal,
    pub active: bool,
    pub enrolled_at: NaiveDate,
    pub left_at: Option<NaiveDate>,
}
