//! Report API Handlers
//!
//! Report endpoints prefer availability: invalid date input degrades to a
//! zero-filled report with the requested period echoed back, never an HTTP
//! error. Downstream dashboards rely on always getting a 200 with the full
//! shape.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::reports::ReportService;
use crate::utils::{AppError, AppResult};
use shared::models::{DailyReport, MonthlyReport, YearlyReport};

/// GET /api/reports/daily/:year/:month/:day
pub async fn daily(
    State(state): State<ServerState>,
    Path((year, month, day)): Path<(i32, u32, u32)>,
) -> AppResult<Json<DailyReport>> {
    let service = ReportService::new(state.pool.clone());
    match service.daily(year, month, day).await {
        Ok(report) => Ok(Json(report)),
        Err(AppError::Validation(msg)) => {
            tracing::warn!(year, month, day, error = %msg, "Invalid daily report request, returning zeroed report");
            Ok(Json(DailyReport::zeroed(year, month, day)))
        }
        Err(err) => Err(err),
    }
}

/// GET /api/reports/monthly/:year/:month
pub async fn monthly(
    State(state): State<ServerState>,
    Path((year, month)): Path<(i32, u32)>,
) -> AppResult<Json<MonthlyReport>> {
    let service = ReportService::new(state.pool.clone());
    match service.monthly(year, month).await {
        Ok(report) => Ok(Json(report)),
        Err(AppError::Validation(msg)) => {
            tracing::warn!(year, month, error = %msg, "Invalid monthly report request, returning zeroed report");
            Ok(Json(MonthlyReport::zeroed(year, month)))
        }
        Err(err) => Err(err),
    }
}

/// GET /api/reports/yearly/:year
pub async fn yearly(
    State(state): State<ServerState>,
    Path(year): Path<i32>,
) -> AppResult<Json<YearlyReport>> {
    let service = ReportService::new(state.pool.clone());
    Ok(Json(service.yearly(year).await?))
}
