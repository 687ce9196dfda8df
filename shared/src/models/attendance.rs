//! Attendance Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attendance status for a single student on a single date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum AttendanceStatus {
    Present,
    Absent,
}

/// Attendance view with student/group names resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AttendanceView {
    pub id: i64,
    pub date: NaiveDate,
    pub student_id: i64,
    pub student_name: String,
    pub group_id: i64,
    pub group_name: String,
    pub status: AttendanceStatus,
    pub created_at: i64,
}

/// Bulk attendance sheet for one group on one date.
///
/// Every active enrollee gets a record: ABSENT for the listed ids, PRESENT
/// for everyone else.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSheetRequest {
    pub group_id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub absent_student_ids: Vec<i64>,
}

/// Status correction payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceUpdate {
    pub status: AttendanceStatus,
}
