//! HTTP handlers for product catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{Product, ProductDraft};

use crate::error::AppResult;
use crate::AppState;

#[derive(Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

#[derive(Deserialize)]
pub struct UpdateStockRequest {
    pub stock: i64,
}

#[derive(Serialize)]
pub struct RemoveProductResponse {
    pub success: bool,
}

/// List the product catalog
pub async fn list_products(State(state): State<AppState>) -> Json<ProductsResponse> {
    let inventory = state.inventory.lock().await;
    Json(ProductsResponse {
        products: inventory.products().to_vec(),
    })
}

/// Add a product to the catalog
pub async fn create_product(
    State(state): State<AppState>,
    Json(draft): Json<ProductDraft>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let mut inventory = state.inventory.lock().await;
    let product = inventory.add_product(draft).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse { product })))
}

/// Set a product's stock level
pub async fn update_product_stock(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(input): Json<UpdateStockRequest>,
) -> AppResult<Json<ProductResponse>> {
    let mut inventory = state.inventory.lock().await;
    let product = inventory
        .update_product_stock(&product_id, input.stock)
        .await?;
    Ok(Json(ProductResponse { product }))
}

/// Remove a product and all of its sales
pub async fn remove_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Json<RemoveProductResponse> {
    let mut inventory = state.inventory.lock().await;
    let success = inventory.remove_product(&product_id).await;
    Json(RemoveProductResponse { success })
}
