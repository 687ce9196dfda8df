//! Inquiry Repository

use super::RepoResult;
use shared::models::{Inquiry, InquiryCreate, InquiryStatus, InquiryUpdate};
use sqlx::{Executor, Sqlite};

const INQUIRY_SELECT: &str = "SELECT id, full_name, parent_name, parent_phone_number, interested_courses, status, notes, created_at, updated_at FROM inquiries";

fn status_text(status: InquiryStatus) -> &'static str {
    match status {
        InquiryStatus::New => "NEW",
        InquiryStatus::Contacted => "CONTACTED",
        InquiryStatus::Enrolled => "ENROLLED",
        InquiryStatus::Closed => "CLOSED",
    }
}

pub async fn find_all<'e, E>(ex: E) -> RepoResult<Vec<Inquiry>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{INQUIRY_SELECT} ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Inquiry>(&sql).fetch_all(ex).await?;
    Ok(rows)
}

pub async fn find_by_id<'e, E>(ex: E, id: i64) -> RepoResult<Option<Inquiry>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{INQUIRY_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Inquiry>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

pub async fn find_by_status<'e, E>(ex: E, status: InquiryStatus) -> RepoResult<Vec<Inquiry>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{INQUIRY_SELECT} WHERE status = ? ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Inquiry>(&sql)
        .bind(status_text(status))
        .fetch_all(ex)
        .await?;
    Ok(rows)
}

/// Insert a new inquiry; returns the generated id.
pub async fn insert<'e, E>(ex: E, data: &InquiryCreate) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let status = data.status.unwrap_or(InquiryStatus::New);
    sqlx::query(
        "INSERT INTO inquiries (id, full_name, parent_name, parent_phone_number, interested_courses, status, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.full_name)
    .bind(&data.parent_name)
    .bind(&data.parent_phone_number)
    .bind(&data.interested_courses)
    .bind(status_text(status))
    .bind(&data.notes)
    .bind(now)
    .execute(ex)
    .await?;
    Ok(id)
}

pub async fn update<'e, E>(ex: E, id: i64, data: &InquiryUpdate) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inquiries SET full_name = COALESCE(?1, full_name), parent_name = COALESCE(?2, parent_name), parent_phone_number = COALESCE(?3, parent_phone_number), interested_courses = COALESCE(?4, interested_courses), status = COALESCE(?5, status), notes = COALESCE(?6, notes), updated_at = ?7 WHERE id = ?8",
    )
    .bind(&data.full_name)
    .bind(&data.parent_name)
    .bind(&data.parent_phone_number)
    .bind(&data.interested_courses)
    .bind(data.status.map(status_text))
    .bind(&data.notes)
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
    let rows = sqlx::query("DELETE FROM inquiries WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}
