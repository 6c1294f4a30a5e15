//! Lifeway server binary.
//!
//! Wires the configuration, durable store, shared cache, repository,
//! and HTTP surface together and serves until terminated.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the environment
//! 3. Connect to `PostgreSQL` and run migrations
//! 4. Connect to the shared cache (optional; degraded mode on failure)
//! 5. Build the repository and shared state
//! 6. Serve

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lifeway_db::{BoardStore, CachePool};
use lifeway_repo::BoardRepository;
use lifeway_server::config::ServiceConfig;
use lifeway_server::server::serve;
use lifeway_server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging. LOG_LEVEL wins over RUST_LOG.
    let filter = std::env::var("LOG_LEVEL").map_or_else(
        |_| EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        EnvFilter::new,
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("lifeway-server starting");

    // 2. Load configuration.
    let config = ServiceConfig::from_env();
    info!(
        port = config.port,
        public_host = config.public_host,
        ttl_current = config.ttls.current,
        ttl_generation = config.ttls.generation,
        "Configuration loaded"
    );

    // 3. Connect to PostgreSQL and run migrations.
    let store = BoardStore::connect(&config.database_url).await?;
    store.run_migrations().await?;

    // 4. Connect to the shared cache. Failure is survivable: the
    //    repository degrades to the durable backend.
    let cache = match CachePool::connect(&config.cache_url).await {
        Ok(cache) => Some(cache),
        Err(e) => {
            warn!(error = %e, "Shared cache unavailable; running in degraded mode");
            None
        }
    };

    // 5. Build the repository and shared state.
    let repo = BoardRepository::new(store, cache, config.ttls);
    let state = Arc::new(AppState::new(repo, config.public_host.clone(), config.port));

    // 6. Serve until Ctrl-C or SIGTERM.
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    serve(addr, state).await?;

    Ok(())
}
