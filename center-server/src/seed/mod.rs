//! Demo data seeder
//!
//! Populates an empty database with a realistic fixture: teachers, groups,
//! students, enrollments, recent payments and attendance. Only runs when
//! explicitly invoked (`center-server --seed-demo`) and only against an
//! empty store. The random source is a fixed-seed `StdRng`, so two runs
//! against fresh databases produce the same choices.

use chrono::{Datelike, Duration, Utc, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use crate::db::repository::attendance::NewAttendance;
use crate::db::repository::{attendance, enrollment, group, payment, student, teacher};
use crate::utils::{AppError, AppResult};
use shared::models::{
    AttendanceStatus, GroupCreate, PaymentCreate, StudentCreate, TeacherCreate,
};

const RNG_SEED: u64 = 42;

const TEACHERS: &[(&str, &str)] = &[
    ("Aziza Karimova", "+998901234567"),
    ("Jasur Alimov", "+998901234568"),
    ("Dilnoza Rahimova", "+998901234569"),
    ("Sherzod Tursunov", "+998901234570"),
    ("Nodira Mustafaeva", "+998901234571"),
];

/// (name, teacher index, monthly fee)
const GROUPS: &[(&str, usize, i64)] = &[
    ("English Beginners A1", 0, 300_000),
    ("English Elementary A2", 0, 350_000),
    ("Mathematics Grade 5", 1, 250_000),
    ("Mathematics Grade 7", 1, 280_000),
    ("Piano Basics", 2, 400_000),
    ("Piano Advanced", 2, 450_000),
    ("Chess Club", 3, 200_000),
    ("Robotics Starter", 3, 380_000),
    ("Art & Drawing", 4, 220_000),
    ("IELTS Preparation", 4, 500_000),
];

const STUDENTS: &[(&str, &str, &str)] = &[
    ("Timur Aliyev", "Rustam Aliyev", "+998901110001"),
    ("Malika Yusupova", "Gulnora Yusupova", "+998901110002"),
    ("Bobur Saidov", "Akmal Saidov", "+998901110003"),
    ("Sevara Nazarova", "Dilshod Nazarov", "+998901110004"),
    ("Jahongir Umarov", "Bahrom Umarov", "+998901110005"),
    ("Nilufar Tosheva", "Madina Tosheva", "+998901110006"),
    ("Sardor Ergashev", "Olim Ergashev", "+998901110007"),
    ("Zarina Abdullayeva", "Kamola Abdullayeva", "+998901110008"),
    ("Aziz Mirzaev", "Farhod Mirzaev", "+998901110009"),
    ("Kamila Rashidova", "Lola Rashidova", "+998901110010"),
    ("Otabek Khamidov", "Ilhom Khamidov", "+998901110011"),
    ("Feruza Ikramova", "Nargiza Ikramova", "+998901110012"),
    ("Davron Yuldashev", "Anvar Yuldashev", "+998901110013"),
    ("Shahzoda Karimova", "Umida Karimova", "+998901110014"),
    ("Ulugbek Nosirov", "Tohir Nosirov", "+998901110015"),
];

/// Seed the demo fixture. Refuses to touch a non-empty store.
pub async fn run(pool: &SqlitePool) -> AppResult<()> {
    if !teacher::find_all(pool).await?.is_empty() {
        return Err(AppError::conflict(
            "Demo data seeding requires an empty database",
        ));
    }

    tracing::info!("===== Starting demo data initialization =====");
    let mut rng = StdRng::seed_from_u64(RNG_SEED);

    let mut teacher_ids = Vec::with_capacity(TEACHERS.len());
    for (name, phone) in TEACHERS {
        let id = teacher::insert(
            pool,
            &TeacherCreate {
                full_name: name.to_string(),
                phone_number: phone.to_string(),
            },
        )
        .await?;
        teacher_ids.push(id);
    }
    tracing::info!("Created {} teachers", teacher_ids.len());

    let mut group_ids = Vec::with_capacity(GROUPS.len());
    for (name, teacher_idx, fee) in GROUPS {
        let id = group::insert(
            pool,
            &GroupCreate {
                name: name.to_string(),
                teacher_id: teacher_ids[*teacher_idx],
                monthly_fee: Decimal::from(*fee),
            },
        )
        .await?;
        group_ids.push(id);
    }
    tracing::info!("Created {} groups", group_ids.len());

    let today = Utc::now().date_naive();
    let mut enrollments: Vec<(i64, i64)> = Vec::new();
    for (name, parent, phone) in STUDENTS {
        let student_id = student::insert(
            pool,
            &StudentCreate {
                full_name: name.to_string(),
                parent_name: parent.to_string(),
                parent_phone_number: phone.to_string(),
            },
        )
        .await?;

        // each student joins one or two groups
        let first = rng.gen_range(0..group_ids.len());
        let mut memberships = vec![first];
        if rng.gen_bool(0.4) {
            let second = rng.gen_range(0..group_ids.len());
            if second != first {
                memberships.push(second);
            }
        }
        for idx in memberships {
            let group_id = group_ids[idx];
            enrollment::insert(pool, student_id, group_id, today - Duration::days(60)).await?;
            enrollments.push((student_id, group_id));
        }
    }
    tracing::info!("Created {} student enrollments", enrollments.len());

    // payments: most members pay the previous month, some already paid the
    // current one
    let current = shared::util::month_key(today.year(), today.month());
    let prev_date = today.with_day(1).unwrap_or(today) - Duration::days(1);
    let previous = shared::util::month_key(prev_date.year(), prev_date.month());

    let fee_of = |group_id: i64| -> Decimal {
        GROUPS
            .iter()
            .zip(&group_ids)
            .find(|(_, id)| **id == group_id)
            .map(|((_, _, fee), _)| Decimal::from(*fee))
            .unwrap_or(Decimal::ZERO)
    };

    let mut payment_count = 0usize;
    for (student_id, group_id) in &enrollments {
        if rng.gen_bool(0.85) {
            payment::insert(
                pool,
                &PaymentCreate {
                    student_id: *student_id,
                    group_id: *group_id,
                    amount: fee_of(*group_id),
                    paid_for_month: previous.clone(),
                },
            )
            .await?;
            payment_count += 1;
        }
        if rng.gen_bool(0.5) {
            payment::insert(
                pool,
                &PaymentCreate {
                    student_id: *student_id,
                    group_id: *group_id,
                    amount: fee_of(*group_id),
                    paid_for_month: current.clone(),
                },
            )
            .await?;
            payment_count += 1;
        }
    }
    tracing::info!("Created {} payments", payment_count);

    // attendance: weekdays of the last two weeks, ~90% present
    let mut attendance_count = 0usize;
    let mut conn = pool.acquire().await?;
    for day_offset in 1..=14i64 {
        let date = today - Duration::days(day_offset);
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        for (student_id, group_id) in &enrollments {
            let status = if rng.gen_bool(0.9) {
                AttendanceStatus::Present
            } else {
                AttendanceStatus::Absent
            };
            attendance::insert_many(
                &mut conn,
                &[NewAttendance {
                    student_id: *student_id,
                    group_id: *group_id,
                    date,
                    status,
                }],
            )
            .await?;
            attendance_count += 1;
        }
    }
    tracing::info!("Created {} attendance records", attendance_count);

    tracing::info!("===== Demo data initialization completed =====");
    Ok(())
}
