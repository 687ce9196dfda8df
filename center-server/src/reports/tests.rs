use super::*;
use crate::db::DbService;
use crate::db::repository::attendance::NewAttendance;
use crate::db::repository::{attendance, group, payment, student, teacher};
use crate::enrollment::EnrollmentManager;
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::models::{
    AttendanceStatus, GroupCreate, PaymentCreate, StudentCreate, TeacherCreate,
};
use sqlx::SqlitePool;
use std::str::FromStr;

async fn test_pool() -> SqlitePool {
    DbService::in_memory().await.unwrap().pool
}

async fn create_teacher(pool: &SqlitePool, name: &str) -> i64 {
    teacher::insert(
        pool,
        &TeacherCreate {
            full_name: name.to_string(),
            phone_number: "+998901234567".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn create_group(pool: &SqlitePool, teacher_id: i64, name: &str, fee: i64) -> i64 {
    group::insert(
        pool,
        &GroupCreate {
            name: name.to_string(),
            teacher_id,
            monthly_fee: Decimal::from(fee),
        },
    )
    .await
    .unwrap()
}

async fn create_student(pool: &SqlitePool, name: &str) -> i64 {
    student::insert(
        pool,
        &StudentCreate {
            full_name: name.to_string(),
            parent_name: format!("{name} sr."),
            parent_phone_number: "+998901111111".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn pay(pool: &SqlitePool, student_id: i64, group_id: i64, amount: i64, month: &str) {
    payment::insert(
        pool,
        &PaymentCreate {
            student_id,
            group_id,
            amount: Decimal::from(amount),
            paid_for_month: month.to_string(),
        },
    )
    .await
    .unwrap();
}

async fn mark_attendance(
    pool: &SqlitePool,
    student_id: i64,
    group_id: i64,
    date: NaiveDate,
    status: AttendanceStatus,
) {
    let mut conn = pool.acquire().await.unwrap();
    attendance::insert_many(
        &mut conn,
        &[NewAttendance {
            student_id,
            group_id,
            date,
            status,
        }],
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn daily_report_on_empty_day_is_zeroed_not_an_error() {
    let pool = test_pool().await;
    let service = ReportService::new(pool);

    let report = service.daily(2024, 3, 15).await.unwrap();
    assert_eq!(report.date, "2024-03-15");
    assert_eq!(report.total_students_present, 0);
    assert_eq!(report.total_students_absent, 0);
    assert_eq!(report.total_payments_received, Decimal::ZERO);
    assert_eq!(report.payment_count, 0);
    assert!(report.group_attendances.is_empty());
    assert!(report.payments.is_empty());
}

#[tokio::test]
async fn daily_report_rejects_impossible_dates() {
    let pool = test_pool().await;
    let service = ReportService::new(pool);

    let err = service.daily(2024, 2, 30).await.unwrap_err();
    assert!(matches!(err, crate::utils::AppError::Validation(_)));
}

#[tokio::test]
async fn daily_report_counts_attendance_and_payments() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool, "Aziza Karimova").await;
    let group_b = create_group(&pool, teacher_id, "Beta", 300_000).await;
    let group_a = create_group(&pool, teacher_id, "Alpha", 250_000).await;
    let s1 = create_student(&pool, "Timur").await;
    let s2 = create_student(&pool, "Malika").await;

    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    mark_attendance(&pool, s1, group_b, date, AttendanceStatus::Present).await;
    mark_attendance(&pool, s2, group_b, date, AttendanceStatus::Absent).await;
    mark_attendance(&pool, s1, group_a, date, AttendanceStatus::Present).await;
    // a different day must not leak in
    mark_attendance(
        &pool,
        s2,
        group_a,
        NaiveDate::from_ymd_opt(2024, 3, 16).unwrap(),
        AttendanceStatus::Present,
    )
    .await;

    // payments are selected by recorded timestamp, so record them "today"
    let today = Utc::now().date_naive();
    pay(&pool, s1, group_b, 300_000, "2024-03").await;

    let service = ReportService::new(pool);
    let report = service.daily(2024, 3, 15).await.unwrap();
    assert_eq!(report.total_students_present, 2);
    assert_eq!(report.total_students_absent, 1);
    assert_eq!(report.payment_count, 0); // recorded today, not on the 15th

    // group summaries sorted by name ascending
    assert_eq!(report.group_attendances.len(), 2);
    assert_eq!(report.group_attendances[0].group_name, "Alpha");
    assert_eq!(report.group_attendances[1].group_name, "Beta");
    assert_eq!(report.group_attendances[1].present_count, 1);
    assert_eq!(report.group_attendances[1].absent_count, 1);
    assert_eq!(report.group_attendances[1].total_students, 2);

    let today_report = service
        .daily(today.year(), today.month(), today.day())
        .await
        .unwrap();
    assert_eq!(today_report.payment_count, 1);
    assert_eq!(today_report.total_payments_received, Decimal::from(300_000));
    assert_eq!(today_report.payments.len(), 1);
    assert_eq!(today_report.payments[0].student_name, "Timur");
    assert_eq!(today_report.payments[0].paid_for_month, "2024-03");
}

#[tokio::test]
async fn monthly_report_rejects_bad_month() {
    let pool = test_pool().await;
    let service = ReportService::new(pool);
    let err = service.monthly(2024, 13).await.unwrap_err();
    assert!(matches!(err, crate::utils::AppError::Validation(_)));
    let err = service.monthly(2024, 0).await.unwrap_err();
    assert!(matches!(err, crate::utils::AppError::Validation(_)));
}

#[tokio::test]
async fn monthly_report_half_collected_group() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool, "Aziza Karimova").await;
    let group_id = create_group(&pool, teacher_id, "English Beginners A1", 300_000).await;
    let a = create_student(&pool, "Student A").await;
    let b = create_student(&pool, "Student B").await;

    let manager = EnrollmentManager::new(pool.clone());
    manager.enroll(a, group_id).await.unwrap();
    manager.enroll(b, group_id).await.unwrap();

    pay(&pool, a, group_id, 300_000, "2024-03").await;

    let service = ReportService::new(pool);
    let report = service.monthly(2024, 3).await.unwrap();

    assert_eq!(report.month_name, "March");
    assert_eq!(report.expected_revenue, Decimal::from(600_000));
    assert_eq!(report.actual_revenue, Decimal::from(300_000));
    assert_eq!(report.collection_rate, Decimal::from_str("50.00").unwrap());
    assert_eq!(report.students_who_paid, 1);
    assert_eq!(report.students_who_did_not_pay, 1);
    assert_eq!(report.total_groups, 1);
    assert_eq!(report.total_active_students, 2);
    assert_eq!(report.total_payments, 1);

    assert_eq!(report.group_stats.len(), 1);
    let stats = &report.group_stats[0];
    assert_eq!(stats.active_students, 2);
    assert_eq!(stats.paid_students, 1);
    assert_eq!(stats.unpaid_students, 1);
    assert_eq!(stats.collection_rate, Decimal::from_str("50.00").unwrap());

    assert_eq!(report.unpaid_students.len(), 1);
    let unpaid = &report.unpaid_students[0];
    assert_eq!(unpaid.student_id, b);
    assert_eq!(unpaid.group_id, group_id);
    assert_eq!(unpaid.amount_due, Decimal::from(300_000));
    assert!(!unpaid.has_paid);
}

#[tokio::test]
async fn monthly_report_skips_groups_without_active_enrollments() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool, "Aziza Karimova").await;
    let empty_group = create_group(&pool, teacher_id, "Empty", 500_000).await;
    let group_id = create_group(&pool, teacher_id, "Live", 300_000).await;
    let a = create_student(&pool, "Student A").await;

    let manager = EnrollmentManager::new(pool.clone());
    manager.enroll(a, group_id).await.unwrap();
    // payment against the empty group must not count toward actual revenue
    pay(&pool, a, empty_group, 100_000, "2024-03").await;

    let service = ReportService::new(pool);
    let report = service.monthly(2024, 3).await.unwrap();
    assert_eq!(report.total_groups, 1);
    assert_eq!(report.expected_revenue, Decimal::from(300_000));
    assert_eq!(report.actual_revenue, Decimal::ZERO);
    // the payment still carries the month token
    assert_eq!(report.total_payments, 1);
}

#[tokio::test]
async fn monthly_report_mixed_membership_student_is_in_both_sets() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool, "Aziza Karimova").await;
    let group_a = create_group(&pool, teacher_id, "Group A", 300_000).await;
    let group_b = create_group(&pool, teacher_id, "Group B", 200_000).await;
    let s = create_student(&pool, "Mixed").await;

    let manager = EnrollmentManager::new(pool.clone());
    manager.enroll(s, group_a).await.unwrap();
    manager.enroll(s, group_b).await.unwrap();
    pay(&pool, s, group_a, 300_000, "2024-03").await;

    let service = ReportService::new(pool);
    let report = service.monthly(2024, 3).await.unwrap();
    assert_eq!(report.students_who_paid, 1);
    assert_eq!(report.students_who_did_not_pay, 1);
    assert_eq!(report.unpaid_students.len(), 1);
    assert_eq!(report.unpaid_students[0].group_id, group_b);
    assert_eq!(
        report.unpaid_students[0].amount_due,
        Decimal::from(200_000)
    );
}

#[tokio::test]
async fn monthly_attendance_uses_calendar_bounds() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool, "Aziza Karimova").await;
    let group_id = create_group(&pool, teacher_id, "Math", 300_000).await;
    let s = create_student(&pool, "Timur").await;

    let manager = EnrollmentManager::new(pool.clone());
    manager.enroll(s, group_id).await.unwrap();

    mark_attendance(
        &pool,
        s,
        group_id,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        AttendanceStatus::Present,
    )
    .await;
    mark_attendance(
        &pool,
        s,
        group_id,
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        AttendanceStatus::Absent,
    )
    .await;
    // outside the month
    mark_attendance(
        &pool,
        s,
        group_id,
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        AttendanceStatus::Present,
    )
    .await;

    let service = ReportService::new(pool);
    let report = service.monthly(2024, 3).await.unwrap();
    assert_eq!(report.attendance_stats.total_present, 1);
    assert_eq!(report.attendance_stats.total_absent, 1);
    assert_eq!(
        report.attendance_stats.attendance_rate,
        Decimal::from_str("50.00").unwrap()
    );
}

#[tokio::test]
async fn yearly_breakdown_always_has_twelve_entries() {
    let pool = test_pool().await;
    let service = ReportService::new(pool);

    let report = service.yearly(2024).await.unwrap();
    assert_eq!(report.monthly_breakdown.len(), 12);
    assert_eq!(report.monthly_breakdown[0].month, 1);
    assert_eq!(report.monthly_breakdown[0].month_name, "January");
    assert_eq!(report.monthly_breakdown[11].month, 12);
    assert!(
        report
            .monthly_breakdown
            .iter()
            .all(|m| m.revenue == Decimal::ZERO && m.payment_count == 0)
    );
    assert_eq!(report.total_revenue, Decimal::ZERO);
    assert_eq!(report.attendance_stats.attendance_rate, Decimal::ZERO);
}

#[tokio::test]
async fn yearly_report_aggregates_by_token_year() {
    let pool = test_pool().await;
    let t1 = create_teacher(&pool, "Teacher One").await;
    let t2 = create_teacher(&pool, "Teacher Two").await;
    let g1 = create_group(&pool, t1, "Group One", 300_000).await;
    let g2 = create_group(&pool, t2, "Group Two", 200_000).await;
    let a = create_student(&pool, "A").await;
    let b = create_student(&pool, "B").await;

    let manager = EnrollmentManager::new(pool.clone());
    manager.enroll(a, g1).await.unwrap();
    manager.enroll(b, g2).await.unwrap();

    pay(&pool, a, g1, 300_000, "2024-01").await;
    pay(&pool, a, g1, 300_000, "2024-02").await;
    pay(&pool, b, g2, 200_000, "2024-02").await;
    // other year, must be excluded
    pay(&pool, b, g2, 999_999, "2023-12").await;

    let service = ReportService::new(pool);
    let report = service.yearly(2024).await.unwrap();

    assert_eq!(report.total_revenue, Decimal::from(800_000));
    assert_eq!(report.total_payments, 3);
    assert_eq!(report.monthly_breakdown[0].revenue, Decimal::from(300_000));
    assert_eq!(report.monthly_breakdown[1].revenue, Decimal::from(500_000));
    assert_eq!(report.monthly_breakdown[1].payment_count, 2);

    // teacher stats sorted by revenue descending
    assert_eq!(report.teacher_stats.len(), 2);
    assert_eq!(report.teacher_stats[0].teacher_name, "Teacher One");
    assert_eq!(report.teacher_stats[0].total_revenue, Decimal::from(600_000));
    assert_eq!(report.teacher_stats[0].group_count, 1);
    assert_eq!(report.teacher_stats[0].total_students, 1);

    // top groups sorted by revenue descending
    assert_eq!(report.top_groups[0].group_name, "Group One");
    assert_eq!(report.top_groups[0].total_payments, 2);
    assert_eq!(report.top_groups[1].group_name, "Group Two");
}
