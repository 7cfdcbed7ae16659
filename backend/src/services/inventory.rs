//! Inventory state manager
//!
//! Owns the canonical in-memory Product and Sale collections for the session.
//! Mutations are applied optimistically against memory; synchronization with
//! the record store either happens inline (creates and deletes, which need a
//! confirmed outcome) or through the outbox (stock pushes and sale persists,
//! which favor responsiveness over strict remote consistency).

use std::sync::Arc;

use shared::{
    clamp_stock, seed_catalog, validate_product_draft, validate_quantity, Lifecycle, Product,
    ProductDraft, Sale,
};

use crate::error::{AppError, AppResult};
use crate::external::record_store::RecordStore;
use crate::services::snapshot::SnapshotCache;
use crate::services::sync::{Outbox, SyncOperation};

/// Inventory state manager holding the session's canonical state
pub struct InventoryService {
    store: Arc<dyn RecordStore>,
    snapshot: SnapshotCache,
    outbox: Outbox,
    lifecycle: Lifecycle,
    products: Vec<Product>,
    sales: Vec<Sale>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn RecordStore>, snapshot: SnapshotCache, outbox: Outbox) -> Self {
        Self {
            store,
            snapshot,
            outbox,
            lifecycle: Lifecycle::Uninitialized,
            products: Vec::new(),
            sales: Vec::new(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Sales, most recent first
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// Load products and sales before surfacing any state
    ///
    /// Products prefer the record store; on failure the local snapshot, then
    /// the built-in seed catalog. Sales come from the record store and
    /// default to empty. The lifecycle reaches `Ready` exactly once, after
    /// both loads settle, so callers can tell "not yet known" apart from
    /// "known empty". Calling again after that is a no-op.
    pub async fn initialize(&mut self) {
        if self.lifecycle != Lifecycle::Uninitialized {
            tracing::warn!("initialize called more than once; ignoring");
            return;
        }
        self.lifecycle = Lifecycle::Loading;

        match self.store.fetch_products().await {
            Ok(products) => {
                tracing::info!("Loaded {} products from the record store", products.len());
                self.products = products;
                self.snapshot.save(&self.products).await;
            }
            Err(e) => {
                tracing::warn!("Failed to load products from the record store: {}", e);
                match self.snapshot.load().await {
                    Some(products) => {
                        tracing::info!("Loaded {} products from the local snapshot", products.len());
                        self.products = products;
                    }
                    None => {
                        tracing::info!("No usable snapshot; seeding the built-in catalog");
                        self.products = seed_catalog();
                        self.snapshot.save(&self.products).await;
                    }
                }
            }
        }

        match self.store.fetch_sales().await {
            Ok(mut sales) => {
                sales.sort_by(|a, b| b.date.cmp(&a.date));
                tracing::info!("Loaded {} sales from the record store", sales.len());
                self.sales = sales;
            }
            Err(e) => {
                tracing::warn!("Failed to load sales from the record store: {}", e);
                self.sales = Vec::new();
            }
        }

        self.lifecycle = Lifecycle::Ready;
    }

    /// Add a product to the catalog
    ///
    /// The entry appears in memory immediately under a temporary id. A
    /// confirmed create replaces it with the store's record; a failed create
    /// removes it and surfaces the failure.
    pub async fn add_product(&mut self, draft: ProductDraft) -> AppResult<Product> {
        validate_product_draft(&draft).map_err(|message| AppError::Validation {
            field: "product".to_string(),
            message: message.to_string(),
        })?;

        let optimistic = draft.clone().into_product();
        let temp_id = optimistic.id.clone();
        self.products.push(optimistic);
        self.snapshot.save(&self.products).await;

        match self.store.create_product(&draft).await {
            Ok(confirmed) => {
                if let Some(entry) = self.products.iter_mut().find(|p| p.id == temp_id) {
                    *entry = confirmed.clone();
                }
                self.snapshot.save(&self.products).await;
                Ok(confirmed)
            }
            Err(e) => {
                tracing::warn!("Product create rejected by the record store: {}", e);
                self.products.retain(|p| p.id != temp_id);
                self.snapshot.save(&self.products).await;
                Err(e.into())
            }
        }
    }

    /// Set a product's stock level, clamped to a minimum of 0
    ///
    /// The in-memory product changes immediately; the new level is pushed to
    /// the record store through the outbox. A remote failure is logged by the
    /// sync worker and never rolls back the local change.
    pub async fn update_product_stock(
        &mut self,
        product_id: &str,
        new_stock: i64,
    ) -> AppResult<Product> {
        let updated = self.apply_stock(product_id, new_stock)?;
        self.snapshot.save(&self.products).await;
        Ok(updated)
    }

    /// Record a sale of `quantity` units of the given product
    ///
    /// Validation happens before any mutation: unknown product and
    /// insufficient stock both leave state untouched. On success the stock
    /// decrement goes through the stock-update path, the sale is prepended
    /// to the in-memory list, and persistence is handed to the outbox.
    pub async fn record_sale(&mut self, product_id: &str, quantity: i64) -> AppResult<Sale> {
        validate_quantity(quantity).map_err(|message| AppError::Validation {
            field: "quantity".to_string(),
            message: message.to_string(),
        })?;

        let product = self
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| AppError::ProductNotFound(product_id.to_string()))?;

        if product.stock < quantity {
            return Err(AppError::InsufficientStock {
                product_name: product.name,
                requested: quantity,
                available: product.stock,
            });
        }

        let sale = Sale::record(&product, quantity);

        self.apply_stock(product_id, product.stock - quantity)?;
        self.sales.insert(0, sale.clone());
        self.outbox.enqueue(SyncOperation::PersistSale(sale.clone()));
        self.snapshot.save(&self.products).await;

        Ok(sale)
    }

    /// Delete a sale, remote first
    ///
    /// The sale leaves memory only after the record store confirms the
    /// delete; the action is destructive and user-confirmed, so consistency
    /// wins over responsiveness here. Returns whether the delete went
    /// through.
    pub async fn delete_sale(&mut self, sale_id: &str) -> bool {
        match self.store.delete_sale(sale_id).await {
            Ok(_) => {
                self.sales.retain(|s| s.id != sale_id);
                true
            }
            Err(e) => {
                tracing::warn!("Failed to delete sale {} in the record store: {}", sale_id, e);
                false
            }
        }
    }

    /// Remove a product and all of its sales
    ///
    /// Memory is updated immediately (optimistic cascade); the remote deletes
    /// for the product's sales and then the product itself follow. Reports
    /// aggregate success only if both remote deletes succeed; memory is not
    /// rolled back on partial failure.
    pub async fn remove_product(&mut self, product_id: &str) -> bool {
        self.sales.retain(|s| s.product_id != product_id);
        self.products.retain(|p| p.id != product_id);
        self.snapshot.save(&self.products).await;

        let sales_deleted = match self.store.delete_sales_for_product(product_id).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to delete sales of product {} in the record store: {}",
                    product_id,
                    e
                );
                false
            }
        };

        let product_deleted = match self.store.delete_product(product_id).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    "Failed to delete product {} in the record store: {}",
                    product_id,
                    e
                );
                false
            }
        };

        sales_deleted && product_deleted
    }

    /// Apply a clamped stock level in memory and enqueue the remote push
    fn apply_stock(&mut self, product_id: &str, new_stock: i64) -> AppResult<Product> {
        let stock = clamp_stock(new_stock);
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| AppError::ProductNotFound(product_id.to_string()))?;

        product.stock = stock;
        let updated = product.clone();
        self.outbox.enqueue(SyncOperation::PushStock {
            product_id: product_id.to_string(),
            stock,
        });
        Ok(updated)
    }
}
