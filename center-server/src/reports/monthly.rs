//! Monthly report
//!
//! Revenue is grouped by the payments' billing month token. Expected revenue
//! counts only groups with at least one active enrollment: fee × enrollee
//! count, exact decimal math. Paid/unpaid tallies are per group; a student
//! with mixed payment status across groups appears in both global sets.

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::{ReportService, name_or_unknown, safe_fetch};
use crate::db::repository::{attendance, enrollment, group, payment};
use crate::reports::rates;
use crate::utils::{AppError, AppResult, time};
use shared::models::{
    AttendanceStats, GroupMonthlyStats, MonthlyReport, StudentPaymentStatus,
};

impl ReportService {
    pub async fn monthly(&self, year: i32, month: u32) -> AppResult<MonthlyReport> {
        if !(1..=12).contains(&month) {
            return Err(AppError::validation(format!(
                "Month must be between 1 and 12, got {month}"
            )));
        }

        let month_key = shared::util::month_key(year, month);
        let groups = safe_fetch(group::find_all(self.pool()).await, "groups");
        let payments = safe_fetch(
            payment::find_by_month_key(self.pool(), &month_key).await,
            "monthly payments",
        );

        let mut expected_total = Decimal::ZERO;
        let mut actual_total = Decimal::ZERO;
        let mut group_stats: Vec<GroupMonthlyStats> = Vec::new();
        let mut unpaid_students: Vec<StudentPaymentStatus> = Vec::new();
        let mut paid_ids: HashSet<i64> = HashSet::new();
        let mut unpaid_ids: HashSet<i64> = HashSet::new();
        let mut enrolled_ids: HashSet<i64> = HashSet::new();

        for g in &groups {
            let enrollees = safe_fetch(
                enrollment::find_active_enrollees(self.pool(), g.id).await,
                "active enrollees",
            );
            if enrollees.is_empty() {
                continue;
            }

            let expected = g.monthly_fee * Decimal::from(enrollees.len() as i64);
            expected_total += expected;

            let group_payments: Vec<_> =
                payments.iter().filter(|p| p.group_id == g.id).collect();
            let actual: Decimal = group_payments.iter().map(|p| p.amount).sum();
            actual_total += actual;

            let group_paid_ids: HashSet<i64> =
                group_payments.iter().map(|p| p.student_id).collect();
            paid_ids.extend(&group_paid_ids);

            let teacher_name = name_or_unknown(g.teacher_name.clone());
            let mut group_unpaid = 0i64;
            for enrollee in &enrollees {
                enrolled_ids.insert(enrollee.student_id);
                if !group_paid_ids.contains(&enrollee.student_id) {
                    group_unpaid += 1;
                    unpaid_ids.insert(enrollee.student_id);
                    unpaid_students.push(StudentPaymentStatus {
                        student_id: enrollee.student_id,
                        student_name: enrollee.student_name.clone(),
                        parent_name: enrollee.parent_name.clone(),
                        parent_phone_number: enrollee.parent_phone_number.clone(),
                        group_id: g.id,
                        group_name: g.name.clone(),
                        amount_due: g.monthly_fee,
                        has_paid: false,
                    });
                }
            }

            group_stats.push(GroupMonthlyStats {
                group_id: g.id,
                group_name: g.name.clone(),
                teacher_name,
                active_students: enrollees.len() as i64,
                expected_revenue: expected,
                actual_revenue: actual,
                paid_students: (enrollees.len() as i64) - group_unpaid,
                unpaid_students: group_unpaid,
                collection_rate: rates::collection_rate(actual, expected),
            });
        }

        // calendar-month attendance, not a 30-day window
        let (start, end) = time::month_bounds(year, month)?;
        let counts = safe_fetch(
            attendance::count_in_range(self.pool(), start, end).await,
            "monthly attendance counts",
        );

        Ok(MonthlyReport {
            year,
            month,
            month_name: time::month_name(month).to_string(),
            total_active_students: enrolled_ids.len() as i64,
            total_groups: group_stats.len() as i64,
            expected_revenue: expected_total,
            actual_revenue: actual_total,
            collection_rate: rates::collection_rate(actual_total, expected_total),
            total_payments: payments.len() as i64,
            students_who_paid: paid_ids.len() as i64,
            students_who_did_not_pay: unpaid_ids.len() as i64,
            group_stats,
            unpaid_students,
            attendance_stats: AttendanceStats {
                total_present: counts.present,
                total_absent: counts.absent,
                attendance_rate: rates::attendance_rate(counts.present, counts.absent),
            },
        })
    }
}
