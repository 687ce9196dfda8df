//! Report value objects
//!
//! Every field is concrete: absent data renders as zero or an empty list so
//! clients always receive the full shape. The `zeroed` constructors back the
//! report endpoints' degrade-to-empty policy for invalid inputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One group's attendance for a single day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAttendanceSummary {
    pub group_id: i64,
    pub group_name: String,
    pub teacher_name: String,
    pub present_count: i64,
    pub absent_count: i64,
    pub total_students: i64,
}

/// One payment as listed in the daily report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    pub payment_id: i64,
    pub student_name: String,
    pub group_name: String,
    pub amount: Decimal,
    pub paid_for_month: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    /// `YYYY-MM-DD`; kept as text so an invalid requested date can still be
    /// echoed back on a zeroed report.
    pub date: String,
    pub total_students_present: i64,
    pub total_students_absent: i64,
    pub total_payments_received: Decimal,
    pub payment_count: i64,
    pub group_attendances: Vec<GroupAttendanceSummary>,
    pub payments: Vec<PaymentSummary>,
}

impl DailyReport {
    pub fn zeroed(year: i32, month: u32, day: u32) -> Self {
        Self {
            date: format!("{year:04}-{month:02}-{day:02}"),
            total_students_present: 0,
            total_students_absent: 0,
            total_payments_received: Decimal::ZERO,
            payment_count: 0,
            group_attendances: Vec::new(),
            payments: Vec::new(),
        }
    }
}

/// One group's expected vs. actual revenue for a billing month
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMonthlyStats {
    pub group_id: i64,
    pub group_name: String,
    pub teacher_name: String,
    pub active_students: i64,
    pub expected_revenue: Decimal,
    pub actual_revenue: Decimal,
    pub paid_students: i64,
    pub unpaid_students: i64,
    pub collection_rate: Decimal,
}

/// An enrolled student who has not paid for the month, for outreach
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPaymentStatus {
    pub student_id: i64,
    pub student_name: String,
    pub parent_name: String,
    pub parent_phone_number: String,
    pub group_id: i64,
    pub group_name: String,
    pub amount_due: Decimal,
    pub has_paid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub total_present: i64,
    pub total_absent: i64,
    pub attendance_rate: Decimal,
}

impl AttendanceStats {
    pub fn zeroed() -> Self {
        Self {
            total_present: 0,
            total_absent: 0,
            attendance_rate: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub total_active_students: i64,
    pub total_groups: i64,
    pub expected_revenue: Decimal,
    pub actual_revenue: Decimal,
    pub collection_rate: Decimal,
    pub total_payments: i64,
    pub students_who_paid: i64,
    pub students_who_did_not_pay: i64,
    pub group_stats: Vec<GroupMonthlyStats>,
    pub unpaid_students: Vec<StudentPaymentStatus>,
    pub attendance_stats: AttendanceStats,
}

impl MonthlyReport {
    pub fn zeroed(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            month_name: String::new(),
            total_active_students: 0,
            total_groups: 0,
            expected_revenue: Decimal::ZERO,
            actual_revenue: Decimal::ZERO,
            collection_rate: Decimal::ZERO,
            total_payments: 0,
            students_who_paid: 0,
            students_who_did_not_pay: 0,
            group_stats: Vec::new(),
            unpaid_students: Vec::new(),
            attendance_stats: AttendanceStats::zeroed(),
        }
    }
}

/// Revenue for one calendar month inside a yearly report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueSummary {
    pub month: u32,
    pub month_name: String,
    pub revenue: Decimal,
    pub payment_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherYearlyStats {
    pub teacher_id: i64,
    pub teacher_name: String,
    pub group_count: i64,
    pub total_students: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupYearlyStats {
    pub group_id: i64,
    pub group_name: String,
    pub teacher_name: String,
    pub total_revenue: Decimal,
    pub total_payments: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReport {
    pub year: i32,
    pub total_revenue: Decimal,
    pub total_payments: i64,
    /// Always 12 entries, one per calendar month.
    pub monthly_breakdown: Vec<MonthlyRevenueSummary>,
    pub teacher_stats: Vec<TeacherYearlyStats>,
    pub top_groups: Vec<GroupYearlyStats>,
    pub attendance_stats: AttendanceStats,
}
