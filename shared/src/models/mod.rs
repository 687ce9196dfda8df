//! Data models
//!
//! Shared between the server and API clients. DB row types use
//! `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`; types carrying
//! `Decimal` fields are mapped by hand in the repository layer instead.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake-generated).

pub mod attendance;
pub mod enrollment;
pub mod group;
pub mod inquiry;
pub mod payment;
pub mod report;
pub mod student;
pub mod teacher;

// Re-exports
pub use attendance::*;
pub use enrollment::*;
pub use group::*;
pub use inquiry::*;
pub use payment::*;
pub use report::*;
pub use student::*;
pub use teacher::*;
