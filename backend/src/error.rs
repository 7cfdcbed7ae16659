//! Error handling for the Kitchen Command backend
//!
//! Business-rule violations are plain result values; nothing in this
//! subsystem is fatal to the process.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::external::record_store::StoreError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Business-rule violations, detected synchronously before any mutation
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Not enough stock of {product_name}: requested {requested}, available {available}")]
    InsufficientStock {
        product_name: String,
        requested: i64,
        available: i64,
    },

    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    // Remote synchronization errors
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    // Local snapshot errors
    #[error("Snapshot storage error: {0}")]
    Snapshot(String),

    // External service errors
    #[error("Report generation error: {0}")]
    ReportGeneration(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::ProductNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "PRODUCT_NOT_FOUND".to_string(),
                    message: format!("Product {} not found", id),
                    field: None,
                },
            ),
            AppError::InsufficientStock {
                product_name,
                requested,
                available,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INSUFFICIENT_STOCK".to_string(),
                    message: format!(
                        "Not enough stock of {}: requested {}, available {}",
                        product_name, requested, available
                    ),
                    field: None,
                },
            ),
            AppError::SaleNotFound(id) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "SALE_NOT_FOUND".to_string(),
                    message: format!("Sale {} not found", id),
                    field: None,
                },
            ),
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::Store(StoreError::Timeout(msg)) => (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorDetail {
                    code: "RECORD_STORE_TIMEOUT".to_string(),
                    message: format!("Record store timed out: {}", msg),
                    field: None,
                },
            ),
            AppError::Store(err) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "RECORD_STORE_ERROR".to_string(),
                    message: format!("Record store error: {}", err),
                    field: None,
                },
            ),
            AppError::Snapshot(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "SNAPSHOT_ERROR".to_string(),
                    message: format!("Snapshot storage error: {}", msg),
                    field: None,
                },
            ),
            AppError::ReportGeneration(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "REPORT_GENERATION_ERROR".to_string(),
                    message: format!("Report generation error: {}", msg),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                    field: None,
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
