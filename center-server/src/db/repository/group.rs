//! Group Repository
//!
//! `monthly_fee` is stored as a canonical decimal string; rows are mapped
//! through an internal struct and parsed into `Decimal` on the way out.

use super::{RepoResult, parse_amount};
use shared::models::{GroupCreate, GroupUpdate, GroupWithTeacher};
use sqlx::{Executor, Sqlite};

const GROUP_WITH_TEACHER_SELECT: &str = "SELECT g.id, g.name, g.teacher_id, t.full_name AS teacher_name, g.monthly_fee, g.created_at, g.updated_at FROM study_groups g LEFT JOIN teachers t ON t.id = g.teacher_id";

#[derive(sqlx::FromRow)]
struct GroupWithTeacherRow {
    id: i64,
    name: String,
    teacher_id: i64,
    teacher_name: Option<String>,
    monthly_fee: String,
    created_at: i64,
    updated_at: i64,
}

impl From<GroupWithTeacherRow> for GroupWithTeacher {
    fn from(row: GroupWithTeacherRow) -> Self {
        GroupWithTeacher {
            id: row.id,
            name: row.name,
            teacher_id: row.teacher_id,
            teacher_name: row.teacher_name,
            monthly_fee: parse_amount(&row.monthly_fee),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub async fn find_all<'e, E>(ex: E) -> RepoResult<Vec<GroupWithTeacher>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{GROUP_WITH_TEACHER_SELECT} ORDER BY g.id");
    let rows = sqlx::query_as::<_, GroupWithTeacherRow>(&sql)
        .fetch_all(ex)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// All groups ordered by owning teacher, then name (for the per-teacher
/// overview screen).
pub async fn find_all_sorted_by_teacher<'e, E>(ex: E) -> RepoResult<Vec<GroupWithTeacher>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{GROUP_WITH_TEACHER_SELECT} ORDER BY g.teacher_id, g.name");
    let rows = sqlx::query_as::<_, GroupWithTeacherRow>(&sql)
        .fetch_all(ex)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_by_id<'e, E>(ex: E, id: i64) -> RepoResult<Option<GroupWithTeacher>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{GROUP_WITH_TEACHER_SELECT} WHERE g.id = ?");
    let row = sqlx::query_as::<_, GroupWithTeacherRow>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row.map(Into::into))
}

pub async fn find_by_teacher<'e, E>(ex: E, teacher_id: i64) -> RepoResult<Vec<GroupWithTeacher>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{GROUP_WITH_TEACHER_SELECT} WHERE g.teacher_id = ? ORDER BY g.name");
    let rows = sqlx::query_as::<_, GroupWithTeacherRow>(&sql)
        .bind(teacher_id)
        .fetch_all(ex)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn exists<'e, E>(ex: E, id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM study_groups WHERE id = ?)")
        .bind(id)
        .fetch_one(ex)
        .await?;
    Ok(found != 0)
}

/// Whether any group still references the teacher (delete guard).
pub async fn exists_by_teacher<'e, E>(ex: E, teacher_id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: i64 =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM study_groups WHERE teacher_id = ?)")
            .bind(teacher_id)
            .fetch_one(ex)
            .await?;
    Ok(found != 0)
}

/// Insert a new group row; returns the generated id.
pub async fn insert<'e, E>(ex: E, data: &GroupCreate) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO study_groups (id, name, teacher_id, monthly_fee, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.teacher_id)
    .bind(data.monthly_fee.to_string())
    .bind(now)
    .execute(ex)
    .await?;
    Ok(id)
}

pub async fn update<'e, E>(ex: E, id: i64, data: &GroupUpdate) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE study_groups SET name = COALESCE(?1, name), teacher_id = COALESCE(?2, teacher_id), monthly_fee = COALESCE(?3, monthly_fee), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(data.teacher_id)
    .bind(data.monthly_fee.map(|f| f.to_string()))
    .bind(now)
    .bind(id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected())
}

pub async fn delete<'e, E>(ex: E, id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM study_groups WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}
