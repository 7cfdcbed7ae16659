//! Local snapshot cache for the product list
//!
//! A single JSON file holding the last-persisted product list, used as an
//! offline seed when the record store cannot be reached. The in-memory state
//! stays authoritative for the session regardless of persistence success, so
//! every failure here is logged and swallowed.

use std::path::{Path, PathBuf};

use shared::Product;

/// Durable local cache holding one product-list snapshot
#[derive(Clone)]
pub struct SnapshotCache {
    path: PathBuf,
}

impl SnapshotCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the last-persisted product list
    ///
    /// Returns `None` when the snapshot is absent or corrupt; a corrupt file
    /// is reported but never propagated.
    pub async fn load(&self) -> Option<Vec<Product>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read product snapshot: {}", e);
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(products) => Some(products),
            Err(e) => {
                tracing::warn!("Discarding corrupt product snapshot: {}", e);
                None
            }
        }
    }

    /// Best-effort durable write of the product list
    pub async fn save(&self, products: &[Product]) {
        let json = match serde_json::to_vec_pretty(products) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize product snapshot: {}", e);
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!("Failed to create snapshot directory: {}", e);
                return;
            }
        }

        if let Err(e) = tokio::fs::write(&self.path, json).await {
            tracing::warn!("Failed to persist product snapshot: {}", e);
        }
    }
}
