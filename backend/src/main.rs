//! Kitchen Command - Backend Server
//!
//! A retail inventory service for managing the product catalog, adjusting
//! stock, recording sales, and generating sales reports.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kitchen_command_backend::{
    config::Config,
    external::{HttpRecordStore, ReportGeneratorClient},
    routes,
    services::{InventoryService, Outbox, ReportService, SnapshotCache, SyncWorker},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "kc_server=debug,kitchen_command_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Kitchen Command Server");
    tracing::info!("Environment: {}", config.environment);

    // Remote record store client
    let store = Arc::new(HttpRecordStore::new(
        config.store.base_url.clone(),
        config.store.api_key.clone(),
        Duration::from_secs(config.store.timeout_seconds),
    ));

    // Local snapshot cache
    let snapshot = SnapshotCache::new(&config.snapshot.path);

    // Background synchronization outbox and worker
    let (outbox, outbox_rx) = Outbox::channel();
    let worker = SyncWorker::new(
        store.clone(),
        outbox_rx,
        config.store.sync_max_attempts,
        Duration::from_millis(config.store.sync_base_delay_ms),
    );
    tokio::spawn(worker.run());

    // Load inventory state before serving
    let mut inventory = InventoryService::new(store, snapshot, outbox);
    tracing::info!("Loading inventory state...");
    inventory.initialize().await;
    tracing::info!("Inventory state ready");

    // Report generation client, optional
    let generator = config.report.api_endpoint.clone().map(|endpoint| {
        ReportGeneratorClient::new(
            endpoint,
            config.report.api_key.clone(),
            Duration::from_secs(config.report.timeout_seconds),
        )
    });
    if generator.is_none() {
        tracing::info!("No report generation endpoint configured; reports are computed locally");
    }

    // Create application state
    let state = AppState {
        inventory: Arc::new(Mutex::new(inventory)),
        reports: Arc::new(ReportService::new(generator)),
        config: Arc::new(config.clone()),
    };

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Kitchen Command Inventory API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
