//! Product catalog models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix carried by client-assigned identifiers until the record store
/// confirms the create and the durable id is adopted.
pub const TEMP_ID_PREFIX: &str = "tmp_";

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    /// Quantity on hand, never negative
    pub stock: i64,
}

impl Product {
    /// Whether this entry still carries a client-assigned temporary id
    pub fn has_temporary_id(&self) -> bool {
        self.id.starts_with(TEMP_ID_PREFIX)
    }
}

/// Input for creating a product, before an id is assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
}

impl ProductDraft {
    /// Materialize the draft as an optimistic in-memory entry with a
    /// temporary id
    pub fn into_product(self) -> Product {
        Product {
            id: temp_product_id(),
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock.max(0),
        }
    }
}

/// Generate a temporary client-side product id
pub fn temp_product_id() -> String {
    format!("{}{}", TEMP_ID_PREFIX, Uuid::new_v4())
}

/// Built-in seed catalog used when neither the record store nor the local
/// snapshot can provide products
pub fn seed_catalog() -> Vec<Product> {
    fn price(units: i64, cents: u32) -> Decimal {
        Decimal::new(units * 100 + i64::from(cents), 2)
    }

    vec![
        Product {
            id: "prod_001".to_string(),
            name: "Chef's Knife".to_string(),
            description: "High-carbon stainless steel 8-inch blade.".to_string(),
            price: price(79, 99),
            stock: 50,
        },
        Product {
            id: "prod_002".to_string(),
            name: "Cast Iron Skillet".to_string(),
            description: "12-inch pre-seasoned skillet for even heating.".to_string(),
            price: price(45, 50),
            stock: 30,
        },
        Product {
            id: "prod_003".to_string(),
            name: "Digital Kitchen Scale".to_string(),
            description: "Measures up to 11lbs with tare function.".to_string(),
            price: price(25, 0),
            stock: 75,
        },
        Product {
            id: "prod_004".to_string(),
            name: "Silicone Spatula Set".to_string(),
            description: "Set of 4 heat-resistant spatulas.".to_string(),
            price: price(19, 99),
            stock: 120,
        },
        Product {
            id: "prod_005".to_string(),
            name: "Non-stick Frying Pan".to_string(),
            description: "10-inch eco-friendly non-stick coating.".to_string(),
            price: price(35, 0),
            stock: 40,
        },
        Product {
            id: "prod_006".to_string(),
            name: "Stainless Steel Whisk".to_string(),
            description: "10-inch balloon whisk for mixing and aerating.".to_string(),
            price: price(9, 99),
            stock: 90,
        },
        Product {
            id: "prod_007".to_string(),
            name: "Bamboo Cutting Board Set".to_string(),
            description: "Set of 3 boards in different sizes.".to_string(),
            price: price(29, 99),
            stock: 60,
        },
    ]
}
