//! Attendance Repository
//!
//! Date filters are half-open ranges (`>= start AND < end`) over the TEXT
//! date column; bounds are computed by the caller.

use super::RepoResult;
use chrono::NaiveDate;
use shared::models::{AttendanceStatus, AttendanceView};
use sqlx::{Executor, Sqlite, SqliteConnection};

const VIEW_SELECT: &str = "SELECT a.id, a.date, a.student_id, s.full_name AS student_name, a.group_id, g.name AS group_name, a.status, a.created_at FROM attendance a JOIN students s ON s.id = a.student_id JOIN study_groups g ON g.id = a.group_id";

/// Attendance joined with group and teacher names, as the daily report
/// consumes it. Names stay optional so a half-deleted group degrades to a
/// placeholder instead of dropping the row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DailyAttendanceRow {
    pub group_id: i64,
    pub group_name: Option<String>,
    pub teacher_name: Option<String>,
    pub status: AttendanceStatus,
}

/// Present/absent tally over a date range.
#[derive(Debug, Clone, Copy, Default, sqlx::FromRow)]
pub struct AttendanceCounts {
    pub present: i64,
    pub absent: i64,
}

/// New attendance record, before the id is assigned.
#[derive(Debug, Clone)]
pub struct NewAttendance {
    pub student_id: i64,
    pub group_id: i64,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

fn status_text(status: AttendanceStatus) -> &'static str {
    match status {
        AttendanceStatus::Present => "PRESENT",
        AttendanceStatus::Absent => "ABSENT",
    }
}

/// Insert a batch of records (one group sheet) inside the caller's
/// transaction; returns the created ids.
pub async fn insert_many(
    conn: &mut SqliteConnection,
    records: &[NewAttendance],
) -> RepoResult<Vec<i64>> {
    let now = shared::util::now_millis();
    let mut ids = Vec::with_capacity(records.len());
    for record in records {
        let id = shared::util::snowflake_id();
        sqlx::query(
            "INSERT INTO attendance (id, student_id, group_id, date, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(id)
        .bind(record.student_id)
        .bind(record.group_id)
        .bind(record.date)
        .bind(status_text(record.status))
        .bind(now)
        .execute(&mut *conn)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}

pub async fn find_view_by_id<'e, E>(ex: E, id: i64) -> RepoResult<Option<AttendanceView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} WHERE a.id = ?");
    let row = sqlx::query_as::<_, AttendanceView>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row)
}

pub async fn find_by_group_and_date<'e, E>(
    ex: E,
    group_id: i64,
    date: NaiveDate,
) -> RepoResult<Vec<AttendanceView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} WHERE a.group_id = ? AND a.date = ? ORDER BY s.full_name");
    let rows = sqlx::query_as::<_, AttendanceView>(&sql)
        .bind(group_id)
        .bind(date)
        .fetch_all(ex)
        .await?;
    Ok(rows)
}

pub async fn exists_by_group_and_date<'e, E>(
    ex: E,
    group_id: i64,
    date: NaiveDate,
) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: i64 = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM attendance WHERE group_id = ? AND date = ?)",
    )
    .bind(group_id)
    .bind(date)
    .fetch_one(ex)
    .await?;
    Ok(found != 0)
}

pub async fn find_in_range<'e, E>(
    ex: E,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<Vec<AttendanceView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} WHERE a.date >= ? AND a.date < ? ORDER BY a.date, a.id");
    let rows = sqlx::query_as::<_, AttendanceView>(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(ex)
        .await?;
    Ok(rows)
}

pub async fn find_by_group_in_range<'e, E>(
    ex: E,
    group_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<Vec<AttendanceView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "{VIEW_SELECT} WHERE a.group_id = ? AND a.date >= ? AND a.date < ? ORDER BY a.date, a.id"
    );
    let rows = sqlx::query_as::<_, AttendanceView>(&sql)
        .bind(group_id)
        .bind(start)
        .bind(end)
        .fetch_all(ex)
        .await?;
    Ok(rows)
}

pub async fn find_by_student_in_range<'e, E>(
    ex: E,
    student_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<Vec<AttendanceView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "{VIEW_SELECT} WHERE a.student_id = ? AND a.date >= ? AND a.date < ? ORDER BY a.date, a.id"
    );
    let rows = sqlx::query_as::<_, AttendanceView>(&sql)
        .bind(student_id)
        .bind(start)
        .bind(end)
        .fetch_all(ex)
        .await?;
    Ok(rows)
}

pub async fn find_by_pair_in_range<'e, E>(
    ex: E,
    student_id: i64,
    group_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<Vec<AttendanceView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        "{VIEW_SELECT} WHERE a.student_id = ? AND a.group_id = ? AND a.date >= ? AND a.date < ? ORDER BY a.date, a.id"
    );
    let rows = sqlx::query_as::<_, AttendanceView>(&sql)
        .bind(student_id)
        .bind(group_id)
        .bind(start)
        .bind(end)
        .fetch_all(ex)
        .await?;
    Ok(rows)
}

/// All records on one date with group/teacher names, for the daily report.
pub async fn find_report_rows_by_date<'e, E>(
    ex: E,
    date: NaiveDate,
) -> RepoResult<Vec<DailyAttendanceRow>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query_as::<_, DailyAttendanceRow>(
        "SELECT a.group_id, g.name AS group_name, t.full_name AS teacher_name, a.status FROM attendance a LEFT JOIN study_groups g ON g.id = a.group_id LEFT JOIN teachers t ON t.id = g.teacher_id WHERE a.date = ?",
    )
    .bind(date)
    .fetch_all(ex)
    .await?;
    Ok(rows)
}

/// Present/absent totals over a date range.
pub async fn count_in_range<'e, E>(
    ex: E,
    start: NaiveDate,
    end: NaiveDate,
) -> RepoResult<AttendanceCounts>
where
    E: Executor<'e, Database = Sqlite>,
{
    let counts = sqlx::query_as::<_, AttendanceCounts>(
        "SELECT COALESCE(SUM(CASE WHEN status = 'PRESENT' THEN 1 ELSE 0 END), 0) AS present, COALESCE(SUM(CASE WHEN status = 'ABSENT' THEN 1 ELSE 0 END), 0) AS absent FROM attendance WHERE date >= ? AND date < ?",
    )
    .bind(start)
    .bind(end)
    .fetch_one(ex)
    .await?;
    Ok(counts)
}

pub async fn update_status<'e, E>(ex: E, id: i64, status: AttendanceStatus) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("UPDATE attendance SET status = ? WHERE id = ?")
        .bind(status_text(status))
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn delete_by_student<'e, E>(ex: E, student_id: i64) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM attendance WHERE student_id = ?")
        .bind(student_id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn delete_by_group<'e, E>(ex: E, group_id: i64) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM attendance WHERE group_id = ?")
        .bind(group_id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}
