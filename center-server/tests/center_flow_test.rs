//! End-to-end flows through the service layer: CRUD rules, cascades and the
//! report math on top of them.

use center_server::db::DbService;
use center_server::db::repository::{enrollment, payment, student};
use center_server::services::{attendance, groups, payments, students, teachers};
use center_server::{AppError, EnrollmentManager, ReportService};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{
    AttendanceSheetRequest, GroupCreate, PaymentCreate, StudentCreate, TeacherCreate,
};
use sqlx::SqlitePool;
use std::str::FromStr;

async fn test_pool() -> SqlitePool {
    DbService::in_memory().await.unwrap().pool
}

fn teacher_payload(name: &str) -> TeacherCreate {
    TeacherCreate {
        full_name: name.to_string(),
        phone_number: "+998901234567".to_string(),
    }
}

fn student_payload(name: &str) -> StudentCreate {
    StudentCreate {
        full_name: name.to_string(),
        parent_name: format!("{name} sr."),
        parent_phone_number: "+998901111111".to_string(),
    }
}

#[tokio::test]
async fn full_center_flow() {
    let pool = test_pool().await;

    let teacher = teachers::create(&pool, teacher_payload("Aziza Karimova"))
        .await
        .unwrap();
    let group = groups::create(
        &pool,
        GroupCreate {
            name: "English Beginners A1".to_string(),
            teacher_id: teacher.id,
            monthly_fee: Decimal::from(300_000),
        },
    )
    .await
    .unwrap();
    assert_eq!(group.teacher_name, "Aziza Karimova");
    assert_eq!(group.students_count, 0);

    let a = students::create(&pool, student_payload("Student A"))
        .await
        .unwrap();
    let b = students::create(&pool, student_payload("Student B"))
        .await
        .unwrap();
    assert!(a.sms_link_code.starts_with("STU-"));

    let manager = EnrollmentManager::new(pool.clone());
    manager.enroll(a.id, group.id).await.unwrap();
    manager.enroll(b.id, group.id).await.unwrap();

    // group aggregates reflect enrollments
    let group_view = groups::get(&pool, group.id).await.unwrap();
    assert_eq!(group_view.students_count, 2);
    assert_eq!(group_view.total_amount_to_pay, Decimal::from(600_000));

    // one of two students pays for March 2024
    let payment = payments::create(
        &pool,
        PaymentCreate {
            student_id: a.id,
            group_id: group.id,
            amount: Decimal::from(300_000),
            paid_for_month: "2024-03".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(payment.student_name, "Student A");

    // attendance sheet for one lesson in March
    let sheet = attendance::create_sheet(
        &pool,
        AttendanceSheetRequest {
            group_id: group.id,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            absent_student_ids: vec![b.id],
        },
    )
    .await
    .unwrap();
    assert_eq!(sheet.len(), 2);

    let report = ReportService::new(pool.clone())
        .monthly(2024, 3)
        .await
        .unwrap();
    assert_eq!(report.expected_revenue, Decimal::from(600_000));
    assert_eq!(report.actual_revenue, Decimal::from(300_000));
    assert_eq!(report.collection_rate, Decimal::from_str("50.00").unwrap());
    assert_eq!(report.students_who_paid, 1);
    assert_eq!(report.unpaid_students.len(), 1);
    assert_eq!(report.unpaid_students[0].student_id, b.id);
    assert_eq!(report.unpaid_students[0].amount_due, Decimal::from(300_000));
    assert_eq!(report.attendance_stats.total_present, 1);
    assert_eq!(report.attendance_stats.total_absent, 1);

    // teacher income reflects the collected payment
    let teacher_view = teachers::get(&pool, teacher.id).await.unwrap();
    assert_eq!(teacher_view.total_income, Decimal::from(300_000));
}

#[tokio::test]
async fn teacher_with_groups_cannot_be_deleted() {
    let pool = test_pool().await;
    let teacher = teachers::create(&pool, teacher_payload("Jasur Alimov"))
        .await
        .unwrap();
    let group = groups::create(
        &pool,
        GroupCreate {
            name: "Math".to_string(),
            teacher_id: teacher.id,
            monthly_fee: Decimal::from(250_000),
        },
    )
    .await
    .unwrap();

    let err = teachers::delete(&pool, teacher.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    groups::delete(&pool, group.id).await.unwrap();
    teachers::delete(&pool, teacher.id).await.unwrap();
    assert!(matches!(
        teachers::get(&pool, teacher.id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn group_delete_cascades_children() {
    let pool = test_pool().await;
    let teacher = teachers::create(&pool, teacher_payload("Dilnoza Rahimova"))
        .await
        .unwrap();
    let group = groups::create(
        &pool,
        GroupCreate {
            name: "Piano Basics".to_string(),
            teacher_id: teacher.id,
            monthly_fee: Decimal::from(400_000),
        },
    )
    .await
    .unwrap();
    let s = students::create(&pool, student_payload("Timur"))
        .await
        .unwrap();

    let manager = EnrollmentManager::new(pool.clone());
    manager.enroll(s.id, group.id).await.unwrap();
    payments::create(
        &pool,
        PaymentCreate {
            student_id: s.id,
            group_id: group.id,
            amount: Decimal::from(400_000),
            paid_for_month: "2024-03".to_string(),
        },
    )
    .await
    .unwrap();
    attendance::create_sheet(
        &pool,
        AttendanceSheetRequest {
            group_id: group.id,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            absent_student_ids: vec![],
        },
    )
    .await
    .unwrap();

    groups::delete(&pool, group.id).await.unwrap();

    // children are gone, the student itself survives
    assert!(
        payment::find_by_student(&pool, s.id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        enrollment::find_by_pair(&pool, s.id, group.id)
            .await
            .unwrap()
            .is_none()
    );
    assert!(student::exists(&pool, s.id).await.unwrap());
}

#[tokio::test]
async fn payment_requires_an_enrollment_row_but_accepts_inactive_ones() {
    let pool = test_pool().await;
    let teacher = teachers::create(&pool, teacher_payload("Sherzod Tursunov"))
        .await
        .unwrap();
    let group_a = groups::create(
        &pool,
        GroupCreate {
            name: "Chess".to_string(),
            teacher_id: teacher.id,
            monthly_fee: Decimal::from(200_000),
        },
    )
    .await
    .unwrap();
    let group_b = groups::create(
        &pool,
        GroupCreate {
            name: "Robotics".to_string(),
            teacher_id: teacher.id,
            monthly_fee: Decimal::from(380_000),
        },
    )
    .await
    .unwrap();
    let s = students::create(&pool, student_payload("Malika"))
        .await
        .unwrap();

    // never enrolled anywhere: rejected
    let err = payments::create(
        &pool,
        PaymentCreate {
            student_id: s.id,
            group_id: group_a.id,
            amount: Decimal::from(200_000),
            paid_for_month: "2024-03".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let manager = EnrollmentManager::new(pool.clone());
    manager.enroll(s.id, group_a.id).await.unwrap();
    manager.enroll(s.id, group_b.id).await.unwrap();
    // leaving group A keeps the row (inactive) because B is still active
    manager.withdraw(s.id, group_a.id).await.unwrap();

    // back-payment for the inactive membership is accepted
    payments::create(
        &pool,
        PaymentCreate {
            student_id: s.id,
            group_id: group_a.id,
            amount: Decimal::from(200_000),
            paid_for_month: "2024-02".to_string(),
        },
    )
    .await
    .unwrap();

    // malformed month token is rejected
    let err = payments::create(
        &pool,
        PaymentCreate {
            student_id: s.id,
            group_id: group_b.id,
            amount: Decimal::from(380_000),
            paid_for_month: "2024-3".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn attendance_sheet_rules() {
    let pool = test_pool().await;
    let teacher = teachers::create(&pool, teacher_payload("Nodira Mustafaeva"))
        .await
        .unwrap();
    let group = groups::create(
        &pool,
        GroupCreate {
            name: "Art".to_string(),
            teacher_id: teacher.id,
            monthly_fee: Decimal::from(220_000),
        },
    )
    .await
    .unwrap();
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

    // no students enrolled yet
    let err = attendance::create_sheet(
        &pool,
        AttendanceSheetRequest {
            group_id: group.id,
            date,
            absent_student_ids: vec![],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let s = students::create(&pool, student_payload("Timur"))
        .await
        .unwrap();
    EnrollmentManager::new(pool.clone())
        .enroll(s.id, group.id)
        .await
        .unwrap();

    attendance::create_sheet(
        &pool,
        AttendanceSheetRequest {
            group_id: group.id,
            date,
            absent_student_ids: vec![],
        },
    )
    .await
    .unwrap();

    // same group and date again: rejected by the creation workflow
    let err = attendance::create_sheet(
        &pool,
        AttendanceSheetRequest {
            group_id: group.id,
            date,
            absent_student_ids: vec![],
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn student_delete_purges_dependents() {
    let pool = test_pool().await;
    let teacher = teachers::create(&pool, teacher_payload("Aziza Karimova"))
        .await
        .unwrap();
    let group = groups::create(
        &pool,
        GroupCreate {
            name: "IELTS".to_string(),
            teacher_id: teacher.id,
            monthly_fee: Decimal::from(500_000),
        },
    )
    .await
    .unwrap();
    let s = students::create(&pool, student_payload("Leaver"))
        .await
        .unwrap();

    EnrollmentManager::new(pool.clone())
        .enroll(s.id, group.id)
        .await
        .unwrap();
    payments::create(
        &pool,
        PaymentCreate {
            student_id: s.id,
            group_id: group.id,
            amount: Decimal::from(500_000),
            paid_for_month: "2024-03".to_string(),
        },
    )
    .await
    .unwrap();

    students::delete(&pool, s.id).await.unwrap();

    assert!(!student::exists(&pool, s.id).await.unwrap());
    assert!(
        payment::find_by_student(&pool, s.id)
            .await
            .unwrap()
            .is_empty()
    );
    // the group itself is untouched
    assert_eq!(groups::get(&pool, group.id).await.unwrap().students_count, 0);
}
