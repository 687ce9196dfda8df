//! Inquiry Model
//!
//! Walk-in/phone inquiries from prospective parents, tracked until the child
//! either enrolls or the inquiry is closed.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "UPPERCASE"))]
pub enum InquiryStatus {
    New,
    Contacted,
    Enrolled,
    Closed,
}

/// Inquiry entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Inquiry {
    pub id: i64,
    pub full_name: String,
    pub parent_name: String,
    pub parent_phone_number: String,
    pub interested_courses: Option<String>,
    pub status: InquiryStatus,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create inquiry payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InquiryCreate {
    #[validate(length(min = 1, message = "Full name is required"))]
    pub full_name: String,
    #[validate(length(min = 1, message = "Parent name is required"))]
    pub parent_name: String,
    #[validate(length(min = 1, message = "Parent phone number is required"))]
    pub parent_phone_number: String,
    pub interested_courses: Option<String>,
    pub status: Option<InquiryStatus>,
    pub notes: Option<String>,
}

/// Update inquiry payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryUpdate {
    pub full_name: Option<String>,
    pub parent_name: Option<String>,
    pub parent_phone_number: Option<String>,
    pub interested_courses: Option<String>,
    pub status: Option<InquiryStatus>,
    pub notes: Option<String>,
}
