//! Reporting engine
//!
//! Pure read-side aggregation over groups, enrollments, attendance and
//! payments. Nothing in here mutates stored state, and a failed sub-fetch
//! never aborts a report: [`safe_fetch`] degrades it to an empty collection
//! so the caller always receives a fully shaped value object.
//!
//! Invalid inputs (impossible calendar date, month outside 1–12) are the one
//! exception: those are rejected with a validation error, and the API layer
//! decides whether to surface it or downgrade to a zeroed report.

mod daily;
mod monthly;
mod yearly;

pub mod rates;

#[cfg(test)]
mod tests;

use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, UNKNOWN_LABEL};

pub use rates::{attendance_rate, collection_rate};

#[derive(Clone)]
pub struct ReportService {
    pool: SqlitePool,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Degrade a failed sub-fetch to its default value.
///
/// Reports prefer availability over completeness: one broken collection
/// produces a warning and an empty slice, not a failed report.
pub(crate) fn safe_fetch<T: Default>(result: RepoResult<T>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(target: "reports", error = %err, "{what} fetch failed, substituting empty result");
            T::default()
        }
    }
}

/// Render an optional name with the shared placeholder label.
pub(crate) fn name_or_unknown(name: Option<String>) -> String {
    match name {
        Some(n) if !n.is_empty() => n,
        _ => UNKNOWN_LABEL.to_string(),
    }
}
