//! Sales report service
//!
//! Produces a human-readable summary for a date range, preferring the hosted
//! generation service and falling back to a deterministic locally computed
//! summary on any failure. Report failures never surface to the end user.

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{validate_date_range, DateRange, Sale};

use crate::error::{AppError, AppResult};
use crate::external::report_generator::{GenerateReportRequest, ReportGeneratorClient};

/// Canned summary used when the period holds no sales
pub const NO_DATA_MESSAGE: &str = "No sales data available for the selected period.";

/// Above this many records the generator is advised to concentrate on top
/// sellers
const TOP_SALES_THRESHOLD: usize = 10;

/// Products listed in the local fallback summary
const TOP_PRODUCTS_LIMIT: usize = 5;

/// A generated sales report
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    #[serde(rename = "reportSummary")]
    pub report_summary: String,
}

/// Aggregated quantity sold for one product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuantity {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
}

/// Report generation adapter
pub struct ReportService {
    generator: Option<ReportGeneratorClient>,
}

impl ReportService {
    /// Create a report service; without a generator client every report is
    /// computed locally
    pub fn new(generator: Option<ReportGeneratorClient>) -> Self {
        Self { generator }
    }

    /// Generate a summary for the sales falling inside `range`
    ///
    /// An empty period short-circuits to [`NO_DATA_MESSAGE`] without ever
    /// invoking the generation backend.
    pub async fn sales_report(&self, range: DateRange, sales: &[Sale]) -> AppResult<SalesReport> {
        validate_date_range(&range).map_err(|message| AppError::Validation {
            field: "date_range".to_string(),
            message: message.to_string(),
        })?;

        let in_range: Vec<Sale> = sales
            .iter()
            .filter(|s| {
                let day = s.date.date_naive();
                day >= range.start && day <= range.end
            })
            .cloned()
            .collect();

        if in_range.is_empty() {
            return Ok(SalesReport {
                report_summary: NO_DATA_MESSAGE.to_string(),
            });
        }

        Ok(SalesReport {
            report_summary: self.summarize(range, &in_range).await,
        })
    }

    async fn summarize(&self, range: DateRange, sales: &[Sale]) -> String {
        if let Some(generator) = &self.generator {
            match Self::generate_remote(generator, range, sales).await {
                Ok(summary) if !summary.trim().is_empty() => return summary,
                Ok(_) => {
                    tracing::warn!("Report generator returned an empty summary; using local fallback")
                }
                Err(e) => tracing::warn!("Report generation failed; using local fallback: {}", e),
            }
        }
        local_summary(range, sales)
    }

    async fn generate_remote(
        generator: &ReportGeneratorClient,
        range: DateRange,
        sales: &[Sale],
    ) -> AppResult<String> {
        let sales_data = serde_json::to_string(sales)
            .map_err(|e| AppError::ReportGeneration(format!("Failed to serialize sales: {}", e)))?;

        let request = GenerateReportRequest {
            start_date: range.start.to_string(),
            end_date: range.end.to_string(),
            sales_data,
            filter_top_sales: sales.len() > TOP_SALES_THRESHOLD,
        };

        Ok(generator.generate(&request).await?.report_summary)
    }
}

/// Deterministic locally computed summary: total count, total amount, and
/// the top products by quantity sold
pub fn local_summary(range: DateRange, sales: &[Sale]) -> String {
    let total_amount: Decimal = sales.iter().map(|s| s.total_amount).sum();

    let mut lines = vec![
        format!("Sales report for {} to {}.", range.start, range.end),
        format!("Total sales: {}.", sales.len()),
        format!("Total amount: {:.2}.", total_amount),
        "Top products by quantity sold:".to_string(),
    ];
    for (rank, entry) in top_products_by_quantity(sales, TOP_PRODUCTS_LIMIT)
        .iter()
        .enumerate()
    {
        lines.push(format!(
            "{}. {} ({} sold)",
            rank + 1,
            entry.product_name,
            entry.quantity
        ));
    }
    lines.join("\n")
}

/// Top `limit` products by total quantity sold, descending; ties keep the
/// order in which the products were first encountered
pub fn top_products_by_quantity(sales: &[Sale], limit: usize) -> Vec<ProductQuantity> {
    let mut totals: Vec<ProductQuantity> = Vec::new();
    for sale in sales {
        match totals.iter_mut().find(|t| t.product_id == sale.product_id) {
            Some(entry) => entry.quantity += sale.quantity,
            None => totals.push(ProductQuantity {
                product_id: sale.product_id.clone(),
                product_name: sale.product_name.clone(),
                quantity: sale.quantity,
            }),
        }
    }
    // sort_by is stable, so equal quantities keep first-encountered order
    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals.truncate(limit);
    totals
}
