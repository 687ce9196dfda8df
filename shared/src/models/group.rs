//! Group Model
//!
//! A group is a class owned by exactly one teacher, with a monthly fee that
//! drives expected-revenue math in the reports.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Group with its teacher's display name resolved.
///
/// `teacher_name` is `None` when the teacher row is missing; report code
/// substitutes a placeholder label instead of failing.
#[derive(Debug, Clone, Serialize)]
pub struct GroupWithTeacher {
    pub id: i64,
    pub name: String,
    pub teacher_id: i64,
    pub teacher_name: Option<String>,
    pub monthly_fee: Decimal,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create group payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GroupCreate {
    #[validate(length(min = 1, message = "Group name is required"))]
    pub name: String,
    pub teacher_id: i64,
    pub monthly_fee: Decimal,
}

/// Update group payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GroupUpdate {
    #[validate(length(min = 1, message = "Group name must not be empty"))]
    pub name: Option<String>,
    pub teacher_id: Option<i64>,
    pub monthly_fee: Option<Decimal>,
}

/// Group detail/list view with enrollment and payment aggregates
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: i64,
    pub name: String,
    pub teacher_id: i64,
    pub teacher_name: String,
    pub monthly_fee: Decimal,
    pub students_count: i64,
    pub total_amount_to_pay: Decimal,
    pub total_paid: Decimal,
    pub created_at: i64,
    pub updated_at: i64,
}
