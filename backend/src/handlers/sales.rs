//! HTTP handlers for sale endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::Sale;

use crate::error::AppResult;
use crate::AppState;

#[derive(Serialize)]
pub struct SalesResponse {
    pub sales: Vec<Sale>,
}

#[derive(Deserialize)]
pub struct RecordSaleRequest {
    #[serde(rename = "productId")]
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Serialize)]
pub struct DeleteSaleResponse {
    pub deleted: bool,
}

/// List recorded sales, most recent first
pub async fn list_sales(State(state): State<AppState>) -> Json<SalesResponse> {
    let inventory = state.inventory.lock().await;
    Json(SalesResponse {
        sales: inventory.sales().to_vec(),
    })
}

/// Record a sale
pub async fn record_sale(
    State(state): State<AppState>,
    Json(input): Json<RecordSaleRequest>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let mut inventory = state.inventory.lock().await;
    let sale = inventory.record_sale(&input.product_id, input.quantity).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// Delete a sale
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<String>,
) -> Json<DeleteSaleResponse> {
    let mut inventory = state.inventory.lock().await;
    let deleted = inventory.delete_sale(&sale_id).await;
    Json(DeleteSaleResponse { deleted })
}
