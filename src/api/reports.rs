//! Reporting endpoints: per-day revenue rows, dashboard counters, and the
//! plain-text report export.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::engine::export::render_revenue_report;
use crate::engine::reports::{self, DashboardStats, RevenueRow};
use crate::AppState;

use super::error::{ApiError, ValidationErrorBuilder};
use super::validation::validate_date;

#[derive(Debug, Deserialize)]
pub struct ReportRangeQuery {
    pub from: String,
    pub to: String,
}

fn validate_range(query: &ReportRangeQuery) -> Result<(), ApiError> {
    let mut errors = ValidationErrorBuilder::new();
    if let Err(e) = validate_date(&query.from, "from") {
        errors.add("from", e);
    }
    if let Err(e) = validate_date(&query.to, "to") {
        errors.add("to", e);
    }
    errors.finish()
}

/// Per-day revenue and collection over an inclusive date range
pub async fn revenue_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportRangeQuery>,
) -> Result<Json<Vec<RevenueRow>>, ApiError> {
    validate_range(&query)?;
    let rows = reports::revenue_report(&state.db, &query.from, &query.to).await?;
    Ok(Json(rows))
}

/// Render the revenue report as plain text for saving to a file
pub async fn export_revenue_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportRangeQuery>,
) -> Result<String, ApiError> {
    validate_range(&query)?;
    let rows = reports::revenue_report(&state.db, &query.from, &query.to).await?;
    Ok(render_revenue_report(&query.from, &query.to, &rows))
}

/// Occupancy counters and today's revenue
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardStats>, ApiError> {
    let stats = reports::dashboard_stats(&state.db).await?;
    Ok(Json(stats))
}
