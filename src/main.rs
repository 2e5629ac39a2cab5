mod catalog;
mod config;
mod matcher;
mod model;
mod parser;
mod server;
mod storage;
mod vocab;

use catalog::{CatalogStore, Refresher};
use config::{AppConfig, load_config};
use matcher::ScoringMatcher;
use parser::DescriptionParser;
use server::{AppState, HttpApi};
use std::sync::Arc;
use storage::SqliteCatalog;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration from file
    let config: Arc<AppConfig> = match load_config("config.json") {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    // Open the catalog database (SQLite)
    let source = match SqliteCatalog::new(&config.database_path) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Failed to open catalog database: {e}");
            return;
        }
    };

    let store = Arc::new(CatalogStore::new());
    let refresher = Arc::new(Refresher::new(source, store.clone()));

    // The first snapshot must load before any request is served.
    if let Err(e) = refresher.refresh().await {
        error!("Failed to load initial catalog snapshot: {e}");
        return;
    }

    // Periodic refresh on a fixed interval
    Refresher::spawn_periodic(refresher.clone(), config.cache_refresh_seconds);

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        refresher,
        parser: DescriptionParser::new(),
        matcher: ScoringMatcher::new(),
    });

    let port = config.port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = HttpApi::start(state, port).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
}
