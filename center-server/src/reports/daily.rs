//! Daily report
//!
//! Attendance is grouped by the record's calendar date; payments by the
//! moment they were recorded, not by their billing month token.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::{ReportService, name_or_unknown, safe_fetch};
use crate::db::repository::{attendance, payment};
use crate::utils::{AppResult, time};
use shared::models::{AttendanceStatus, DailyReport, GroupAttendanceSummary, PaymentSummary};

struct GroupTally {
    group_name: String,
    teacher_name: String,
    present: i64,
    absent: i64,
}

impl ReportService {
    /// Report for one calendar day. An impossible date (e.g. February 30th)
    /// is a validation error; the API layer may downgrade it to a zeroed
    /// report.
    pub async fn daily(&self, year: i32, month: u32, day: u32) -> AppResult<DailyReport> {
        let date = time::date_of(year, month, day)?;

        let attendance_rows = safe_fetch(
            attendance::find_report_rows_by_date(self.pool(), date).await,
            "daily attendance",
        );
        let (start, end) = time::day_millis_range(date);
        let payments = safe_fetch(
            payment::find_by_recorded_range(self.pool(), start, end).await,
            "daily payments",
        );

        let mut present = 0i64;
        let mut absent = 0i64;
        let mut by_group: BTreeMap<i64, GroupTally> = BTreeMap::new();

        for row in attendance_rows {
            match row.status {
                AttendanceStatus::Present => present += 1,
                AttendanceStatus::Absent => absent += 1,
            }
            let tally = by_group.entry(row.group_id).or_insert_with(|| GroupTally {
                group_name: row.group_name.clone().unwrap_or_default(),
                teacher_name: name_or_unknown(row.teacher_name.clone()),
                present: 0,
                absent: 0,
            });
            match row.status {
                AttendanceStatus::Present => tally.present += 1,
                AttendanceStatus::Absent => tally.absent += 1,
            }
        }

        let mut group_attendances: Vec<GroupAttendanceSummary> = by_group
            .into_iter()
            .map(|(group_id, tally)| GroupAttendanceSummary {
                group_id,
                group_name: tally.group_name,
                teacher_name: tally.teacher_name,
                present_count: tally.present,
                absent_count: tally.absent,
                total_students: tally.present + tally.absent,
            })
            .collect();
        group_attendances.sort_by(|a, b| a.group_name.cmp(&b.group_name));

        let total_payments_received: Decimal = payments.iter().map(|p| p.amount).sum();
        let payment_count = payments.len() as i64;
        let payment_summaries: Vec<PaymentSummary> = payments
            .into_iter()
            .map(|p| PaymentSummary {
                payment_id: p.id,
                student_name: p.student_name,
                group_name: p.group_name,
                amount: p.amount,
                paid_for_month: p.paid_for_month,
            })
            .collect();

        Ok(DailyReport {
            date: date.format("%Y-%m-%d").to_string(),
            total_students_present: present,
            total_students_absent: absent,
            total_payments_received,
            payment_count,
            group_attendances,
            payments: payment_summaries,
        })
    }
}
