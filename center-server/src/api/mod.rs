//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`teachers`] - teacher management
//! - [`groups`] - group management
//! - [`students`] - student management
//! - [`enrollments`] - enrollment lifecycle (enroll/withdraw/listings)
//! - [`attendance`] - attendance sheets and corrections
//! - [`payments`] - tuition payments
//! - [`inquiries`] - prospective-student inquiries
//! - [`reports`] - daily/monthly/yearly reports

pub mod attendance;
pub mod enrollments;
pub mod groups;
pub mod health;
pub mod inquiries;
pub mod payments;
pub mod reports;
pub mod students;
pub mod teachers;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
