//! Kitchen Command - retail inventory backend
//!
//! Product catalog management, stock adjustment, sale recording, and
//! AI-assisted sales reports, backed by a remote record store with a durable
//! local snapshot as fallback.

use std::sync::Arc;

use tokio::sync::Mutex;

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use services::{InventoryService, ReportService};

/// Application state shared across handlers
///
/// Every inventory operation runs to completion while the lock is held, so
/// in-memory read-modify-write sequences never interleave with each other.
#[derive(Clone)]
pub struct AppState {
    pub inventory: Arc<Mutex<InventoryService>>,
    pub reports: Arc<ReportService>,
    pub config: Arc<Config>,
}
