//! Enrollment Repository ("student_groups" table)
//!
//! The UNIQUE(student_id, group_id) constraint backs the one-row-per-pair
//! invariant; reactivation updates the existing row instead of inserting.

use super::{RepoResult, UNKNOWN_LABEL, parse_amount};
use chrono::NaiveDate;
use shared::models::{Enrollment, EnrollmentView};
use sqlx::{Executor, Sqlite};

const ENROLLMENT_SELECT: &str = "SELECT id, student_id, group_id, active, enrolled_at, left_at, created_at FROM student_groups";

const VIEW_SELECT: &str = "SELECT sg.id, sg.student_id, s.full_name AS student_name, sg.group_id, g.name AS group_name, t.full_name AS teacher_name, g.monthly_fee, sg.active, sg.enrolled_at, sg.left_at FROM student_groups sg JOIN students s ON s.id = sg.student_id JOIN study_groups g ON g.id = sg.group_id LEFT JOIN teachers t ON t.id = g.teacher_id";

#[derive(sqlx::FromRow)]
struct EnrollmentViewRow {
    id: i64,
    student_id: i64,
    student_name: String,
    group_id: i64,
    group_name: String,
    teacher_name: Option<String>,
    monthly_fee: String,
    active: bool,
    enrolled_at: NaiveDate,
    left_at: Option<NaiveDate>,
}

impl From<EnrollmentViewRow> for EnrollmentView {
    fn from(row: EnrollmentViewRow) -> Self {
        EnrollmentView {
            id: row.id,
            student_id: row.student_id,
            student_name: row.student_name,
            group_id: row.group_id,
            group_name: row.group_name,
            teacher_name: row.teacher_name.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            monthly_fee: parse_amount(&row.monthly_fee),
            active: row.active,
            enrolled_at: row.enrolled_at,
            left_at: row.left_at,
        }
    }
}

/// Active enrollee of a group, with the contact fields outreach needs.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActiveEnrollee {
    pub student_id: i64,
    pub student_name: String,
    pub parent_name: String,
    pub parent_phone_number: String,
}

/// One active (group, student) membership pair.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct ActivePair {
    pub group_id: i64,
    pub student_id: i64,
}

pub async fn find_by_pair<'e, E>(
    ex: E,
    student_id: i64,
    group_id: i64,
) -> RepoResult<Option<Enrollment>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{ENROLLMENT_SELECT} WHERE student_id = ? AND group_id = ?");
    let row = sqlx::query_as::<_, Enrollment>(&sql)
        .bind(student_id)
        .bind(group_id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

pub async fn exists_active_pair<'e, E>(ex: E, student_id: i64, group_id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: i64 = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM student_groups WHERE student_id = ? AND group_id = ? AND active = 1)",
    )
    .bind(student_id)
    .bind(group_id)
    .fetch_one(ex)
    .await?;
    Ok(found != 0)
}

/// Insert a fresh enrollment row (active, no left date); returns the id.
pub async fn insert<'e, E>(
    ex: E,
    student_id: i64,
    group_id: i64,
    enrolled_at: NaiveDate,
) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO student_groups (id, student_id, group_id, active, enrolled_at, left_at, created_at) VALUES (?1, ?2, ?3, 1, ?4, NULL, ?5)",
    )
    .bind(id)
    .bind(student_id)
    .bind(group_id)
    .bind(enrolled_at)
    .bind(now)
    .execute(ex)
    .await?;
    Ok(id)
}

/// Reactivate an existing row: active again, left date cleared.
pub async fn reactivate<'e, E>(ex: E, id: i64) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("UPDATE student_groups SET active = 1, left_at = NULL WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}

/// Deactivate a row, stamping the leave date.
pub async fn deactivate<'e, E>(ex: E, id: i64, left_at: NaiveDate) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("UPDATE student_groups SET active = 0, left_at = ? WHERE id = ?")
        .bind(left_at)
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn count_active_by_student<'e, E>(ex: E, student_id: i64) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM student_groups WHERE student_id = ? AND active = 1",
    )
    .bind(student_id)
    .fetch_one(ex)
    .await?;
    Ok(count)
}

pub async fn count_active_by_group<'e, E>(ex: E, group_id: i64) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM student_groups WHERE group_id = ? AND active = 1")
            .bind(group_id)
            .fetch_one(ex)
            .await?;
    Ok(count)
}

pub async fn find_views_by_student<'e, E>(ex: E, student_id: i64) -> RepoResult<Vec<EnrollmentView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} WHERE sg.student_id = ? ORDER BY sg.enrolled_at, sg.id");
    let rows = sqlx::query_as::<_, EnrollmentViewRow>(&sql)
        .bind(student_id)
        .fetch_all(ex)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_active_views_by_student<'e, E>(
    ex: E,
    student_id: i64,
) -> RepoResult<Vec<EnrollmentView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "{VIEW_SELECT} WHERE sg.student_id = ? AND sg.active = 1 ORDER BY sg.enrolled_at, sg.id"
    );
    let rows = sqlx::query_as::<_, EnrollmentViewRow>(&sql)
        .bind(student_id)
        .fetch_all(ex)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_active_views_by_group<'e, E>(
    ex: E,
    group_id: i64,
) -> RepoResult<Vec<EnrollmentView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "{VIEW_SELECT} WHERE sg.group_id = ? AND sg.active = 1 ORDER BY s.full_name, sg.id"
    );
    let rows = sqlx::query_as::<_, EnrollmentViewRow>(&sql)
        .bind(group_id)
        .fetch_all(ex)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_view_by_pair<'e, E>(
    ex: E,
    student_id: i64,
    group_id: i64,
) -> RepoResult<Option<EnrollmentView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} WHERE sg.student_id = ? AND sg.group_id = ?");
    let row = sqlx::query_as::<_, EnrollmentViewRow>(&sql)
        .bind(student_id)
        .bind(group_id)
        .fetch_optional(ex)
        .await?;
    Ok(row.map(Into::into))
}

/// Active enrollees of a group with parent contact details.
pub async fn find_active_enrollees<'e, E>(ex: E, group_id: i64) -> RepoResult<Vec<ActiveEnrollee>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, ActiveEnrollee>(
        "SELECT sg.student_id, s.full_name AS student_name, s.parent_name, s.parent_phone_number FROM student_groups sg JOIN students s ON s.id = sg.student_id WHERE sg.group_id = ? AND sg.active = 1 ORDER BY s.full_name, sg.id",
    )
    .bind(group_id)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Every active (group, student) pair in the store.
pub async fn find_active_pairs<'e, E>(ex: E) -> RepoResult<Vec<ActivePair>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, ActivePair>(
        "SELECT group_id, student_id FROM student_groups WHERE active = 1",
    )
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

pub async fn delete_by_student<'e, E>(ex: E, student_id: i64) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM student_groups WHERE student_id = ?")
        .bind(student_id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn delete_by_group<'e, E>(ex: E, group_id: i64) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM student_groups WHERE group_id = ?")
        .bind(group_id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}
