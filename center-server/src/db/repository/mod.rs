//! Repository Module
//!
//! CRUD and query functions over the SQLite tables. Functions are free
//! functions generic over the executor so the same call works against the
//! pool or inside a transaction (`&mut *tx`). Each function issues exactly
//! one statement; multi-statement workflows compose them in the service
//! layer under one transaction.

pub mod attendance;
pub mod enrollment;
pub mod group;
pub mod inquiry;
pub mod payment;
pub mod student;
pub mod teacher;

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err
            && db_err.is_unique_violation()
        {
            return RepoError::Duplicate(db_err.to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Placeholder label for missing teacher/group/student names in views.
pub const UNKNOWN_LABEL: &str = "Noma'lum";

/// Parse a stored decimal amount; malformed or empty values fall back to zero
/// so a bad row degrades a report instead of aborting it.
pub(crate) fn parse_amount(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// Sum a list of stored decimal amounts.
pub(crate) fn sum_amounts<'a>(amounts: impl IntoIterator<Item = &'a String>) -> Decimal {
    amounts.into_iter().map(|a| parse_amount(a)).sum()
}
