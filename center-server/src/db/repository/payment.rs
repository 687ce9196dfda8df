//! Payment Repository
//!
//! Two distinct time axes: `paid_at` (recorded timestamp, Unix millis) feeds
//! the daily report; `paid_for_month` (billing token `YYYY-MM`) feeds monthly
//! and yearly revenue. Amounts are TEXT decimals summed client-side so the
//! totals stay exact.

use super::{RepoResult, UNKNOWN_LABEL, parse_amount, sum_amounts};
use rust_decimal::Decimal;
use shared::models::{PaymentCreate, PaymentView};
use sqlx::{Executor, Sqlite};
use std::collections::HashMap;

const VIEW_SELECT: &str = "SELECT p.id, p.student_id, s.full_name AS student_name, p.group_id, g.name AS group_name, p.amount, p.paid_for_month, p.paid_at FROM payments p LEFT JOIN students s ON s.id = p.student_id LEFT JOIN study_groups g ON g.id = p.group_id";

#[derive(sqlx::FromRow)]
struct PaymentViewRow {
    id: i64,
    student_id: i64,
    student_name: Option<String>,
    group_id: i64,
    group_name: Option<String>,
    amount: String,
    paid_for_month: String,
    paid_at: i64,
}

impl From<PaymentViewRow> for PaymentView {
    fn from(row: PaymentViewRow) -> Self {
        PaymentView {
            id: row.id,
            student_id: row.student_id,
            student_name: row.student_name.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            group_id: row.group_id,
            group_name: row.group_name.unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            amount: parse_amount(&row.amount),
            paid_for_month: row.paid_for_month,
            paid_at: row.paid_at,
        }
    }
}

fn into_views(rows: Vec<PaymentViewRow>) -> Vec<PaymentView> {
    rows.into_iter().map(Into::into).collect()
}

/// Insert a new payment; returns the generated id.
pub async fn insert<'e, E>(ex: E, data: &PaymentCreate) -> RepoResult<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO payments (id, student_id, group_id, amount, paid_for_month, paid_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(id)
    .bind(data.student_id)
    .bind(data.group_id)
    .bind(data.amount.to_string())
    .bind(&data.paid_for_month)
    .bind(now)
    .execute(ex)
    .await?;
    Ok(id)
}

pub async fn find_view_by_id<'e, E>(ex: E, id: i64) -> RepoResult<Option<PaymentView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} WHERE p.id = ?");
    let row = sqlx::query_as::<_, PaymentViewRow>(&sql)
        .bind(id)
        .fetch_optional(ex)
        .await?;
    Ok(row.map(Into::into))
}

pub async fn find_all<'e, E>(ex: E) -> RepoResult<Vec<PaymentView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} ORDER BY p.paid_at DESC");
    let rows = sqlx::query_as::<_, PaymentViewRow>(&sql)
        .fetch_all(ex)
        .await?;
    Ok(into_views(rows))
}

pub async fn find_by_student<'e, E>(ex: E, student_id: i64) -> RepoResult<Vec<PaymentView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} WHERE p.student_id = ? ORDER BY p.paid_at DESC");
    let rows = sqlx::query_as::<_, PaymentViewRow>(&sql)
        .bind(student_id)
        .fetch_all(ex)
        .await?;
    Ok(into_views(rows))
}

pub async fn find_by_group<'e, E>(ex: E, group_id: i64) -> RepoResult<Vec<PaymentView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} WHERE p.group_id = ? ORDER BY p.paid_at DESC");
    let rows = sqlx::query_as::<_, PaymentViewRow>(&sql)
        .bind(group_id)
        .fetch_all(ex)
        .await?;
    Ok(into_views(rows))
}

/// Payments recorded inside a `[start, end)` millis window (daily report).
pub async fn find_by_recorded_range<'e, E>(
    ex: E,
    start: i64,
    end: i64,
) -> RepoResult<Vec<PaymentView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} WHERE p.paid_at >= ? AND p.paid_at < ? ORDER BY p.paid_at");
    let rows = sqlx::query_as::<_, PaymentViewRow>(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(ex)
        .await?;
    Ok(into_views(rows))
}

/// Payments carrying one billing month token.
pub async fn find_by_month_key<'e, E>(ex: E, month_key: &str) -> RepoResult<Vec<PaymentView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} WHERE p.paid_for_month = ? ORDER BY p.paid_at");
    let rows = sqlx::query_as::<_, PaymentViewRow>(&sql)
        .bind(month_key.to_string())
        .fetch_all(ex)
        .await?;
    Ok(into_views(rows))
}

/// Payments whose billing token falls inside one year.
pub async fn find_by_year<'e, E>(ex: E, year: i32) -> RepoResult<Vec<PaymentView>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let sql = format!("{VIEW_SELECT} WHERE substr(p.paid_for_month, 1, 4) = ? ORDER BY p.paid_for_month, p.paid_at");
    let rows = sqlx::query_as::<_, PaymentViewRow>(&sql)
        .bind(format!("{year:04}"))
        .fetch_all(ex)
        .await?;
    Ok(into_views(rows))
}

pub async fn total_by_student<'e, E>(ex: E, student_id: i64) -> RepoResult<Decimal>
where
    E: Executor<'e, Database = Sqlite>,
{
    let amounts: Vec<String> =
        sqlx::query_scalar("SELECT amount FROM payments WHERE student_id = ?")
            .bind(student_id)
            .fetch_all(ex)
            .await?;
    Ok(sum_amounts(&amounts))
}

pub async fn total_by_group<'e, E>(ex: E, group_id: i64) -> RepoResult<Decimal>
where
    E: Executor<'e, Database = Sqlite>,
{
    let amounts: Vec<String> = sqlx::query_scalar("SELECT amount FROM payments WHERE group_id = ?")
        .bind(group_id)
        .fetch_all(ex)
        .await?;
    Ok(sum_amounts(&amounts))
}

pub async fn total_by_group_and_month<'e, E>(
    ex: E,
    group_id: i64,
    month_key: &str,
) -> RepoResult<Decimal>
where
    E: Executor<'e, Database = Sqlite>,
{
    let amounts: Vec<String> = sqlx::query_scalar(
        "SELECT amount FROM payments WHERE group_id = ? AND paid_for_month = ?",
    )
    .bind(group_id)
    .bind(month_key.to_string())
    .fetch_all(ex)
    .await?;
    Ok(sum_amounts(&amounts))
}

pub async fn total_by_pair_and_month<'e, E>(
    ex: E,
    student_id: i64,
    group_id: i64,
    month_key: &str,
) -> RepoResult<Decimal>
where
    E: Executor<'e, Database = Sqlite>,
{
    let amounts: Vec<String> = sqlx::query_scalar(
        "SELECT amount FROM payments WHERE student_id = ? AND group_id = ? AND paid_for_month = ?",
    )
    .bind(student_id)
    .bind(group_id)
    .bind(month_key.to_string())
    .fetch_all(ex)
    .await?;
    Ok(sum_amounts(&amounts))
}

/// Lifetime paid totals keyed by student, for the student list view.
pub async fn totals_by_student<'e, E>(ex: E) -> RepoResult<HashMap<i64, Decimal>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT student_id, amount FROM payments")
        .fetch_all(ex)
        .await?;
    let mut totals: HashMap<i64, Decimal> = HashMap::new();
    for (student_id, amount) in rows {
        *totals.entry(student_id).or_default() += parse_amount(&amount);
    }
    Ok(totals)
}

pub async fn update_fields<'e, E>(
    ex: E,
    id: i64,
    student_id: Option<i64>,
    group_id: Option<i64>,
    amount: Option<Decimal>,
    paid_for_month: Option<&str>,
) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query(
        "UPDATE payments SET student_id = COALESCE(?1, student_id), group_id = COALESCE(?2, group_id), amount = COALESCE(?3, amount), paid_for_month = COALESCE(?4, paid_for_month) WHERE id = ?5",
    )
    .bind(student_id)
    .bind(group_id)
    .bind(amount.map(|a| a.to_string()))
    .bind(paid_for_month.map(|m| m.to_string()))
    .bind(id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected())
}

pub async fn delete<'e, E>(ex: E, id: i64) -> RepoResult<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM payments WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn delete_by_student<'e, E>(ex: E, student_id: i64) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM payments WHERE student_id = ?")
        .bind(student_id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn delete_by_group<'e, E>(ex: E, group_id: i64) -> RepoResult<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let rows = sqlx::query("DELETE FROM payments WHERE group_id = ?")
        .bind(group_id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}
