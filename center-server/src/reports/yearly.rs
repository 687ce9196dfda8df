//! Yearly report
//!
//! Revenue is grouped by the billing token's year component. The monthly
//! breakdown always carries 12 entries; attendance totals are accumulated
//! from the 12 individual monthly tallies.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use super::{ReportService, name_or_unknown, safe_fetch};
use crate::db::repository::{attendance, enrollment, group, payment};
use crate::reports::rates;
use crate::utils::{AppResult, time};
use shared::models::{
    AttendanceStats, GroupYearlyStats, MonthlyRevenueSummary, TeacherYearlyStats, YearlyReport,
};

#[derive(Default)]
struct GroupAgg {
    revenue: Decimal,
    count: i64,
}

impl ReportService {
    pub async fn yearly(&self, year: i32) -> AppResult<YearlyReport> {
        let payments = safe_fetch(
            payment::find_by_year(self.pool(), year).await,
            "yearly payments",
        );
        let groups = safe_fetch(group::find_all(self.pool()).await, "groups");
        let active_pairs = safe_fetch(
            enrollment::find_active_pairs(self.pool()).await,
            "active enrollment pairs",
        );

        let total_revenue: Decimal = payments.iter().map(|p| p.amount).sum();
        let total_payments = payments.len() as i64;

        // 12-slot breakdown keyed by the token's month component
        let mut monthly_revenue = [Decimal::ZERO; 12];
        let mut monthly_counts = [0i64; 12];
        let mut per_group: HashMap<i64, GroupAgg> = HashMap::new();
        for p in &payments {
            if let Some((_, month)) = time::parse_month_key(&p.paid_for_month) {
                monthly_revenue[(month - 1) as usize] += p.amount;
                monthly_counts[(month - 1) as usize] += 1;
            }
            let agg = per_group.entry(p.group_id).or_default();
            agg.revenue += p.amount;
            agg.count += 1;
        }

        let monthly_breakdown: Vec<MonthlyRevenueSummary> = (1..=12u32)
            .map(|month| MonthlyRevenueSummary {
                month,
                month_name: time::month_name(month).to_string(),
                revenue: monthly_revenue[(month - 1) as usize],
                payment_count: monthly_counts[(month - 1) as usize],
            })
            .collect();

        // active student ids per group, for per-teacher distinct counts
        let mut students_by_group: HashMap<i64, Vec<i64>> = HashMap::new();
        for pair in &active_pairs {
            students_by_group
                .entry(pair.group_id)
                .or_default()
                .push(pair.student_id);
        }

        // per-teacher aggregates, in group-list order, then by revenue
        let mut teacher_order: Vec<i64> = Vec::new();
        let mut teacher_stats_by_id: HashMap<i64, TeacherYearlyStats> = HashMap::new();
        for g in &groups {
            let entry = teacher_stats_by_id.entry(g.teacher_id).or_insert_with(|| {
                teacher_order.push(g.teacher_id);
                TeacherYearlyStats {
                    teacher_id: g.teacher_id,
                    teacher_name: name_or_unknown(g.teacher_name.clone()),
                    group_count: 0,
                    total_students: 0,
                    total_revenue: Decimal::ZERO,
                }
            });
            entry.group_count += 1;
            if let Some(agg) = per_group.get(&g.id) {
                entry.total_revenue += agg.revenue;
            }
        }
        // distinct active students across each teacher's groups
        for teacher_id in &teacher_order {
            let mut distinct: HashSet<i64> = HashSet::new();
            for g in groups.iter().filter(|g| g.teacher_id == *teacher_id) {
                if let Some(students) = students_by_group.get(&g.id) {
                    distinct.extend(students);
                }
            }
            if let Some(entry) = teacher_stats_by_id.get_mut(teacher_id) {
                entry.total_students = distinct.len() as i64;
            }
        }
        let mut teacher_stats: Vec<TeacherYearlyStats> = teacher_order
            .iter()
            .filter_map(|id| teacher_stats_by_id.remove(id))
            .collect();
        teacher_stats.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));

        // top groups by revenue, ties kept in group-list order
        let mut top_groups: Vec<GroupYearlyStats> = groups
            .iter()
            .map(|g| {
                let agg = per_group.get(&g.id);
                GroupYearlyStats {
                    group_id: g.id,
                    group_name: g.name.clone(),
                    teacher_name: name_or_unknown(g.teacher_name.clone()),
                    total_revenue: agg.map(|a| a.revenue).unwrap_or(Decimal::ZERO),
                    total_payments: agg.map(|a| a.count).unwrap_or(0),
                }
            })
            .collect();
        top_groups.sort_by(|a, b| b.total_revenue.cmp(&a.total_revenue));
        top_groups.truncate(10);

        // attendance: sum the 12 monthly tallies, one query each
        let mut present = 0i64;
        let mut absent = 0i64;
        for month in 1..=12u32 {
            let (start, end) = time::month_bounds(year, month)?;
            let counts = safe_fetch(
                attendance::count_in_range(self.pool(), start, end).await,
                "yearly attendance counts",
            );
            present += counts.present;
            absent += counts.absent;
        }

        Ok(YearlyReport {
            year,
            total_revenue,
            total_payments,
            monthly_breakdown,
            teacher_stats,
            top_groups,
            attendance_stats: AttendanceStats {
                total_present: present,
                total_absent: absent,
                attendance_rate: rates::attendance_rate(present, absent),
            },
        })
    }
}
