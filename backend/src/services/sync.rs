//! Background synchronization outbox
//!
//! Fire-and-forget mutations are not detached background calls: each one is
//! enqueued as an explicit pending operation that the sync worker delivers to
//! the record store with bounded retry and backoff. Operations are delivered
//! in enqueue order, so successive stock pushes for the same product cannot
//! overtake each other.

use std::sync::Arc;
use std::time::Duration;

use shared::Sale;
use tokio::sync::mpsc;

use crate::external::record_store::{ProductUpdate, RecordStore, StoreError};

/// A pending synchronization with the record store
#[derive(Debug, Clone)]
pub enum SyncOperation {
    /// Push a product's new stock level
    PushStock { product_id: String, stock: i64 },
    /// Persist a recorded sale
    PersistSale(Sale),
}

impl SyncOperation {
    fn describe(&self) -> String {
        match self {
            SyncOperation::PushStock { product_id, stock } => {
                format!("stock push for product {} (stock {})", product_id, stock)
            }
            SyncOperation::PersistSale(sale) => format!("sale persist for {}", sale.id),
        }
    }
}

/// Sending half of the outbox, held by the inventory state manager
#[derive(Clone)]
pub struct Outbox {
    tx: mpsc::UnboundedSender<SyncOperation>,
}

impl Outbox {
    /// Create an outbox and the receiving end for a [`SyncWorker`]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SyncOperation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueue a pending operation; never blocks the caller
    pub fn enqueue(&self, operation: SyncOperation) {
        if let Err(e) = self.tx.send(operation) {
            tracing::error!("Sync worker is gone; dropping {}", e.0.describe());
        }
    }
}

/// Drains the outbox against the record store
pub struct SyncWorker {
    store: Arc<dyn RecordStore>,
    rx: mpsc::UnboundedReceiver<SyncOperation>,
    max_attempts: u32,
    base_delay: Duration,
}

impl SyncWorker {
    pub fn new(
        store: Arc<dyn RecordStore>,
        rx: mpsc::UnboundedReceiver<SyncOperation>,
        max_attempts: u32,
        base_delay: Duration,
    ) -> Self {
        Self {
            store,
            rx,
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Process operations until the outbox is dropped
    pub async fn run(mut self) {
        while let Some(operation) = self.rx.recv().await {
            self.deliver(operation).await;
        }
        tracing::debug!("Outbox closed; sync worker stopping");
    }

    async fn deliver(&self, operation: SyncOperation) {
        let mut delay = self.base_delay;
        for attempt in 1..=self.max_attempts {
            match self.execute(&operation).await {
                Ok(()) => {
                    tracing::debug!("Delivered {}", operation.describe());
                    return;
                }
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    tracing::warn!(
                        "Failed {} (attempt {}/{}): {}",
                        operation.describe(),
                        attempt,
                        self.max_attempts,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => {
                    // Definitive rejections are not retried; in-memory state
                    // stays ahead of the store until the next full reload.
                    tracing::error!("Giving up on {}: {}", operation.describe(), e);
                    return;
                }
            }
        }
    }

    async fn execute(&self, operation: &SyncOperation) -> Result<(), StoreError> {
        match operation {
            SyncOperation::PushStock { product_id, stock } => self
                .store
                .update_product(product_id, &ProductUpdate::stock(*stock))
                .await
                .map(|_| ()),
            SyncOperation::PersistSale(sale) => self.store.create_sale(sale).await,
        }
    }
}
