//! Teacher Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Teacher entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Teacher {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create teacher payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeacherCreate {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
}

/// Update teacher payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeacherUpdate {
    #[validate(length(min = 1, message = "Full name must not be empty"))]
    pub full_name: Option<String>,
    #[validate(length(min = 1, message = "Phone number must not be empty"))]
    pub phone_number: Option<String>,
}

/// Teacher detail/list view, with income across all of the teacher's groups
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherResponse {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub total_income: Decimal,
    pub created_at: i64,
    pub updated_at: i64,
}
