//! Business logic services for the Kitchen Command backend

pub mod inventory;
pub mod reporting;
pub mod snapshot;
pub mod sync;

pub use inventory::InventoryService;
pub use reporting::ReportService;
pub use snapshot::SnapshotCache;
pub use sync::{Outbox, SyncOperation, SyncWorker};
