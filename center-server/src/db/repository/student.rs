//! Student Repository

use super::RepoResult;
use shared::models::{Student, StudentCreate, StudentUpdate};
use sqlx::{Executor, Sqlite};

const STUDENT_SELECT: &str = "SELECT id, full_name, parent_name, parent_phone_number, sms_link_code, created_at, updated_at FROM students";

pub async fn find_all<'e, E>(ex: E) -> RepoResult<Vec<Student>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{STUDENT_SELECT} ORDER BY id");
    let rows = sqlx::query_as::<_, Student>(&sql).fetch_all(ex).await?;
    Ok(rows)
}

pub async fn find_by_id<'e, E>(ex: E, id: i64) -> RepoResult<Option<Student>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{STUDENT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Student>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

pub async fn exists<'e, E>(ex: E, id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = ?)")
        .bind(id)
        .fetch_one(ex)
        .await?;
    Ok(found != 0)
}

/// Insert a new student row with a fresh reference code; returns the
/// generated id.
pub async fn insert<'e, E>(ex: E, data: &StudentCreate) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let ref_code = shared::util::student_ref_code();
    sqlx::query(
        "INSERT INTO students (id, full_name, parent_name, parent_phone_number, sms_link_code, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.full_name)
    .bind(&data.parent_name)
    .bind(&data.parent_phone_number)
    .bind(&ref_code)
    .bind(now)
    .execute(ex)
    .await?;
    Ok(id)
}

pub async fn update<'e, E>(ex: E, id: i64, data: &StudentUpdate) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE students SET full_name = COALESCE(?1, full_name), parent_name = COALESCE(?2, parent_name), parent_phone_number = COALESCE(?3, parent_phone_number), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.full_name)
    .bind(&data.parent_name)
    .bind(&data.parent_phone_number)
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
    let rows = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}
