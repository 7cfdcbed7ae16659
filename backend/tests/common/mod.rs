//! Shared test fixtures
//!
//! An in-memory record store standing in for the remote persistence service,
//! with switchable failure modes per operation.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use kitchen_command_backend::external::record_store::{ProductUpdate, RecordStore, StoreError};
use shared::{Product, ProductDraft, Sale};

/// Per-operation failure switches
#[derive(Debug, Default, Clone)]
pub struct Failures {
    pub fetch_products: bool,
    pub fetch_sales: bool,
    pub create_product: bool,
    pub update_product: bool,
    pub create_sale: bool,
    pub delete_sale: bool,
    pub delete_product: bool,
    pub delete_sales_for_product: bool,
}

/// In-memory fake of the remote record store
#[derive(Default)]
pub struct InMemoryRecordStore {
    pub products: Mutex<Vec<Product>>,
    pub sales: Mutex<Vec<Sale>>,
    pub failures: Mutex<Failures>,
    /// Remaining transient transport failures before requests succeed again
    pub transient_failures: Mutex<u32>,
    /// Total requests seen, including failed ones
    pub requests: Mutex<u32>,
    next_id: Mutex<u64>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        let store = Self::default();
        *store.products.lock().unwrap() = products;
        store
    }

    pub fn set_failures(&self, failures: Failures) {
        *self.failures.lock().unwrap() = failures;
    }

    pub fn set_transient_failures(&self, count: u32) {
        *self.transient_failures.lock().unwrap() = count;
    }

    pub fn request_count(&self) -> u32 {
        *self.requests.lock().unwrap()
    }

    fn rejected() -> StoreError {
        StoreError::Rejected {
            status: 500,
            message: "induced failure".to_string(),
        }
    }

    /// Record the request and report whether it should fail
    fn gate(&self, permanently_failed: bool) -> Result<(), StoreError> {
        *self.requests.lock().unwrap() += 1;

        let mut transient = self.transient_failures.lock().unwrap();
        if *transient > 0 {
            *transient -= 1;
            return Err(StoreError::Transport("connection reset".to_string()));
        }
        if permanently_failed {
            return Err(Self::rejected());
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        self.gate(self.failures.lock().unwrap().fetch_products)?;
        Ok(self.products.lock().unwrap().clone())
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        self.gate(self.failures.lock().unwrap().create_product)?;
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let product = Product {
            id: format!("prod_r{:03}", *next_id),
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            stock: draft.stock,
        };
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn update_product(
        &self,
        id: &str,
        update: &ProductUpdate,
    ) -> Result<Product, StoreError> {
        self.gate(self.failures.lock().unwrap().update_product)?;
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::Rejected {
                status: 400,
                message: "Missing id".to_string(),
            })?;
        if let Some(name) = &update.name {
            product.name = name.clone();
        }
        if let Some(description) = &update.description {
            product.description = description.clone();
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(stock) = update.stock {
            product.stock = stock;
        }
        Ok(product.clone())
    }

    async fn delete_product(&self, id: &str) -> Result<u64, StoreError> {
        self.gate(self.failures.lock().unwrap().delete_product)?;
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok((before - products.len()) as u64)
    }

    async fn fetch_sales(&self) -> Result<Vec<Sale>, StoreError> {
        self.gate(self.failures.lock().unwrap().fetch_sales)?;
        Ok(self.sales.lock().unwrap().clone())
    }

    async fn create_sale(&self, sale: &Sale) -> Result<(), StoreError> {
        self.gate(self.failures.lock().unwrap().create_sale)?;
        self.sales.lock().unwrap().push(sale.clone());
        Ok(())
    }

    async fn delete_sale(&self, id: &str) -> Result<u64, StoreError> {
        self.gate(self.failures.lock().unwrap().delete_sale)?;
        let mut sales = self.sales.lock().unwrap();
        let before = sales.len();
        sales.retain(|s| s.id != id);
        Ok((before - sales.len()) as u64)
    }

    async fn delete_sales_for_product(&self, product_id: &str) -> Result<u64, StoreError> {
        self.gate(self.failures.lock().unwrap().delete_sales_for_product)?;
        let mut sales = self.sales.lock().unwrap();
        let before = sales.len();
        sales.retain(|s| s.product_id != product_id);
        Ok((before - sales.len()) as u64)
    }
}
