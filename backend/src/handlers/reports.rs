//! HTTP handlers for sales report endpoints

use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::DateRange;

use crate::error::AppResult;
use crate::services::reporting::SalesReport;
use crate::AppState;

#[derive(Deserialize)]
pub struct SalesReportRequest {
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
}

/// Generate a sales report for a date range
pub async fn generate_sales_report(
    State(state): State<AppState>,
    Json(input): Json<SalesReportRequest>,
) -> AppResult<Json<SalesReport>> {
    let range = DateRange::new(input.start_date, input.end_date);

    // Snapshot the sales before releasing the lock; report generation can
    // take a while and must not hold up inventory commands.
    let sales = {
        let inventory = state.inventory.lock().await;
        inventory.sales().to_vec()
    };

    let report = state.reports.sales_report(range, &sales).await?;
    Ok(Json(report))
}
