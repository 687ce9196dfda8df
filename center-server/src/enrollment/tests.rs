use super::*;
use crate::db::DbService;
use crate::db::repository::attendance::NewAttendance;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{AttendanceStatus, GroupCreate, PaymentCreate, StudentCreate, TeacherCreate};

async fn test_pool() -> SqlitePool {
    DbService::in_memory().await.unwrap().pool
}

async fn create_teacher(pool: &SqlitePool) -> i64 {
    crate::db::repository::teacher::insert(
        pool,
        &TeacherCreate {
            full_name: "Aziza Karimova".to_string(),
            phone_number: "+998901234567".to_string(),
        },
    )
    .await
    .unwrap()
}

async fn create_group(pool: &SqlitePool, teacher_id: i64, name: &str) -> i64 {
    group::insert(
        pool,
        &GroupCreate {
            name: name.to_string(),
            teacher_id,
            monthly_fee: Decimal::from(300_000),
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
            parent_name: "Parent".to_string(),
            parent_phone_number: "+998901111111".to_string(),
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn enroll_returns_denormalized_view() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool).await;
    let group_id = create_group(&pool, teacher_id, "English Beginners A1").await;
    let student_id = create_student(&pool, "Timur Aliyev").await;

    let manager = EnrollmentManager::new(pool);
    let view = manager.enroll(student_id, group_id).await.unwrap();

    assert!(view.active);
    assert_eq!(view.student_name, "Timur Aliyev");
    assert_eq!(view.group_name, "English Beginners A1");
    assert_eq!(view.teacher_name, "Aziza Karimova");
    assert_eq!(view.monthly_fee, Decimal::from(300_000));
    assert!(view.left_at.is_none());
}

#[tokio::test]
async fn enroll_rejects_unknown_ids() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool).await;
    let group_id = create_group(&pool, teacher_id, "Math").await;
    let student_id = create_student(&pool, "Timur").await;

    let manager = EnrollmentManager::new(pool);

    let err = manager.enroll(9999, group_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = manager.enroll(student_id, 9999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn duplicate_active_enrollment_is_a_conflict() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool).await;
    let group_id = create_group(&pool, teacher_id, "Math").await;
    let student_id = create_student(&pool, "Timur").await;

    let manager = EnrollmentManager::new(pool);
    manager.enroll(student_id, group_id).await.unwrap();

    let err = manager.enroll(student_id, group_id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn withdraw_requires_an_enrollment_row() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool).await;
    let group_id = create_group(&pool, teacher_id, "Math").await;
    let student_id = create_student(&pool, "Timur").await;

    let manager = EnrollmentManager::new(pool);
    let err = manager.withdraw(student_id, group_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn reenroll_reuses_the_same_row() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool).await;
    let group_a = create_group(&pool, teacher_id, "Group A").await;
    let group_b = create_group(&pool, teacher_id, "Group B").await;
    let student_id = create_student(&pool, "Timur").await;

    let manager = EnrollmentManager::new(pool.clone());
    let first = manager.enroll(student_id, group_a).await.unwrap();
    // second membership keeps the student alive through the withdrawal below
    manager.enroll(student_id, group_b).await.unwrap();

    manager.withdraw(student_id, group_a).await.unwrap();
    let row = enrollment::find_by_pair(&pool, student_id, group_a)
        .await
        .unwrap()
        .unwrap();
    assert!(!row.active);
    assert!(row.left_at.is_some());

    let second = manager.enroll(student_id, group_a).await.unwrap();
    assert_eq!(second.id, first.id);
    assert!(second.active);
    assert!(second.left_at.is_none());

    // still exactly one row for the pair
    let all = manager.list_by_student(student_id).await.unwrap();
    assert_eq!(all.iter().filter(|v| v.group_id == group_a).count(), 1);
}

#[tokio::test]
async fn withdrawing_last_membership_purges_the_student() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool).await;
    let group_id = create_group(&pool, teacher_id, "Math").await;
    let student_id = create_student(&pool, "Timur").await;

    let manager = EnrollmentManager::new(pool.clone());
    manager.enroll(student_id, group_id).await.unwrap();

    payment::insert(
        &pool,
        &PaymentCreate {
            student_id,
            group_id,
            amount: Decimal::from(300_000),
            paid_for_month: "2024-03".to_string(),
        },
    )
    .await
    .unwrap();

    let mut conn = pool.acquire().await.unwrap();
    attendance::insert_many(
        &mut conn,
        &[NewAttendance {
            student_id,
            group_id,
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status: AttendanceStatus::Present,
        }],
    )
    .await
    .unwrap();
    drop(conn);

    manager.withdraw(student_id, group_id).await.unwrap();

    assert!(!student::exists(&pool, student_id).await.unwrap());
    assert!(
        payment::find_by_student(&pool, student_id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        enrollment::find_by_pair(&pool, student_id, group_id)
            .await
            .unwrap()
            .is_none()
    );
    let counts = attendance::count_in_range(
        &pool,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(counts.present + counts.absent, 0);
}

#[tokio::test]
async fn withdrawal_with_other_active_memberships_keeps_the_student() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool).await;
    let group_a = create_group(&pool, teacher_id, "Group A").await;
    let group_b = create_group(&pool, teacher_id, "Group B").await;
    let student_id = create_student(&pool, "Timur").await;

    let manager = EnrollmentManager::new(pool.clone());
    manager.enroll(student_id, group_a).await.unwrap();
    manager.enroll(student_id, group_b).await.unwrap();

    manager.withdraw(student_id, group_a).await.unwrap();

    assert!(student::exists(&pool, student_id).await.unwrap());
    let active = manager.list_active_by_student(student_id).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].group_id, group_b);
}

#[tokio::test]
async fn group_listing_is_active_only() {
    let pool = test_pool().await;
    let teacher_id = create_teacher(&pool).await;
    let group_id = create_group(&pool, teacher_id, "Math").await;
    let keeper = create_student(&pool, "Keeper").await;
    let leaver = create_student(&pool, "Leaver").await;

    let manager = EnrollmentManager::new(pool.clone());
    manager.enroll(keeper, group_id).await.unwrap();
    manager.enroll(leaver, group_id).await.unwrap();
    manager.withdraw(leaver, group_id).await.unwrap();

    let listed = manager.list_by_group(group_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].student_id, keeper);
    assert_eq!(manager.count_active_in_group(group_id).await.unwrap(), 1);
    assert!(manager.is_enrolled(keeper, group_id).await.unwrap());
}
