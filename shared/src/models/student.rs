//! Student Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Student entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    pub parent_name: String,
    pub parent_phone_number: String,
    /// Unique reference code ("STU-XXXXXXXX"), assigned on creation.
    pub sms_link_code: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create student payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentCreate {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Parent name is required"))]
    pub parent_name: String,
    #[validate(length(min = 1, message = "Parent phone number is required"))]
    pub parent_phone_number: String,
}

/// Update student payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdate {
    #[validate(length(min = 1, message = "Full name must not be empty"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, message = "Parent name must not be empty"))]
    pub parent_name: Option<String>,
    #[validate(length(min = 1, message = "Parent phone number must not be empty"))]
    pub parent_phone_number: Option<String>,
}

/// One of a student's active groups, with payment status for a billing month
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentGroupInfo {
    pub group_id: i64,
    pub group_name: String,
    pub teacher_name: String,
    pub monthly_fee: Decimal,
    pub paid_for_month: bool,
    pub month: String,
    pub amount_paid_this_month: Decimal,
}

/// Student detail/list view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: i64,
    pub full_name: String,
    pub parent_name: String,
    pub parent_phone_number: String,
    pub sms_link_code: String,
    pub total_paid: Decimal,
    pub active_groups: Vec<StudentGroupInfo>,
    pub active_groups_count: i64,
    /// True when every active group has a payment for the checked month.
    pub paid_for_current_month: bool,
    pub groups_paid_count: i64,
    pub groups_unpaid_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}
