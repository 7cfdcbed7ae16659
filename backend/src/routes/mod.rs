//! Route definitions for the Kitchen Command backend

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Product catalog
        .nest("/products", product_routes())
        // Sales
        .nest("/sales", sale_routes())
        // Reports
        .nest("/reports", report_routes())
}

/// Product catalog routes
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_products).post(handlers::create_product))
        .route("/:product_id", delete(handlers::remove_product))
        .route("/:product_id/stock", patch(handlers::update_product_stock))
}

/// Sale routes
fn sale_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::record_sale))
        .route("/:sale_id", delete(handlers::delete_sale))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new().route("/sales", post(handlers::generate_sales_report))
}
