//! Sales report generation client
//!
//! Client for the hosted text-generation service that turns a date range and
//! a serialized sales snapshot into a natural-language summary. Callers must
//! treat every failure as recoverable; the reporting service falls back to a
//! locally computed summary.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Client for the report generation service
#[derive(Clone)]
pub struct ReportGeneratorClient {
    api_endpoint: String,
    api_key: Option<String>,
    http_client: Client,
}

/// Request to generate a sales report summary
#[derive(Debug, Serialize)]
pub struct GenerateReportRequest {
    /// Start of the report period (YYYY-MM-DD)
    #[serde(rename = "startDate")]
    pub start_date: String,

    /// End of the report period (YYYY-MM-DD)
    #[serde(rename = "endDate")]
    pub end_date: String,

    /// Sales records serialized as a JSON array
    #[serde(rename = "salesData")]
    pub sales_data: String,

    /// Advisory hint that the summary should concentrate on top sellers.
    /// Context for the generator, not a filter applied to the data.
    #[serde(rename = "filterTopSales")]
    pub filter_top_sales: bool,
}

/// Response from the report generation service
#[derive(Debug, Deserialize)]
pub struct GenerateReportResponse {
    #[serde(rename = "reportSummary")]
    pub report_summary: String,
}

impl ReportGeneratorClient {
    /// Create a new report generation client
    pub fn new(
        api_endpoint: String,
        api_key: Option<String>,
        timeout: std::time::Duration,
    ) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_endpoint,
            api_key,
            http_client,
        }
    }

    /// Request a generated summary for the given period and snapshot
    pub async fn generate(
        &self,
        request: &GenerateReportRequest,
    ) -> AppResult<GenerateReportResponse> {
        let mut builder = self
            .http_client
            .post(&self.api_endpoint)
            .header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key);
        }

        let response = builder
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::ReportGeneration(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ReportGeneration(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: GenerateReportResponse = response.json().await.map_err(|e| {
            AppError::ReportGeneration(format!("Failed to parse response: {}", e))
        })?;

        Ok(result)
    }
}
