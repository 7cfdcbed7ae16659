//! Sale records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Product;

/// A recorded sale
///
/// `product_name` and `total_amount` are frozen at sale time; later edits to
/// the product do not change past sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    #[serde(rename = "productId")]
    pub product_id: String,
    #[serde(rename = "productName")]
    pub product_name: String,
    pub quantity: i64,
    #[serde(rename = "totalAmount")]
    pub total_amount: Decimal,
    pub date: DateTime<Utc>,
}

impl Sale {
    /// Create a sale for `quantity` units of `product`, capturing the
    /// product name and price as they are right now
    pub fn record(product: &Product, quantity: i64) -> Self {
        Self {
            id: sale_id(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity,
            total_amount: product.price * Decimal::from(quantity),
            date: Utc::now(),
        }
    }
}

/// Generate a sale id
pub fn sale_id() -> String {
    format!("sale_{}", Uuid::new_v4())
}
