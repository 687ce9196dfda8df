//! Teacher Repository

use super::RepoResult;
use shared::models::{Teacher, TeacherCreate, TeacherUpdate};
use sqlx::{Executor, Sqlite};

pub async fn find_all<'e, E>(ex: E) -> RepoResult<Vec<Teacher>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, Teacher>(
        "SELECT id, full_name, phone_number, created_at, updated_at FROM teachers ORDER BY id",
    )
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

pub async fn find_by_id<'e, E>(ex: E, id: i64) -> RepoResult<Option<Teacher>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query_as::<_, Teacher>(
        "SELECT id, full_name, phone_number, created_at, updated_at FROM teachers WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(ex)
    .await?;
    Ok(row)
}

pub async fn exists<'e, E>(ex: E, id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teachers WHERE id = ?)")
        .bind(id)
        .fetch_one(ex)
        .await?;
    Ok(found != 0)
}

/// Insert a new teacher row; returns the generated id.
pub async fn insert<'e, E>(ex: E, data: &TeacherCreate) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO teachers (id, full_name, phone_number, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
    )
    .bind(id)
    .bind(&data.full_name)
    .bind(&data.phone_number)
    .bind(now)
    .execute(ex)
    .await?;
    Ok(id)
}

pub async fn update<'e, E>(ex: E, id: i64, data: &TeacherUpdate) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE teachers SET full_name = COALESCE(?1, full_name), phone_number = COALESCE(?2, phone_number), updated_at = ?3 WHERE id = ?4",
    )
    .bind(&data.full_name)
    .bind(&data.phone_number)
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
    let rows = sqlx::query("DELETE FROM teachers WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}
