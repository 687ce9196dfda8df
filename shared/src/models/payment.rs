//! Payment Model
//!
//! `paid_for_month` is the billing month token (`YYYY-MM`), independent of
//! `paid_at`, the moment the payment was recorded. Daily reports group by
//! `paid_at`; monthly and yearly revenue group by the token.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Create payment payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    pub student_id: i64,
    pub group_id: i64,
    pub amount: Decimal,
    pub paid_for_month: String,
}

/// Update payment payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdate {
    pub student_id: Option<i64>,
    pub group_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub paid_for_month: Option<String>,
}

/// Payment view with student/group names resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub group_id: i64,
    pub group_name: String,
    pub amount: Decimal,
    pub paid_for_month: String,
    pub paid_at: i64,
}
