//! # docgate-server
//!
//! HTTP front end for docgate: a generic gateway that exposes any collection of a
//! schema-less document store through three endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/api/data?collection=...` | Query with translated filters, sort and limit |
//! | PUT | `/api/data/{id}?collection=...` | Partial update from a nested JSON body |
//! | DELETE | `/api/data/{id}?collection=...` | Delete one document |
//! | GET | `/health` | Health check |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use docgate::{memory::InMemoryStore, store::DocumentStore};
//! use docgate_server::{ServerConfig, create_app_with_config};
//!
//! let config = ServerConfig::default();
//! let store = DocumentStore::with_configs(InMemoryStore::new(), config.collection_configs());
//! let app = create_app_with_config(Arc::new(store), config);
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod responses;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::{BackendKind, ServerConfig};
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use docgate::{backend::StoreBackend, store::DocumentStore};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
pub fn create_app<B>(store: DocumentStore<B>) -> Router
where
    B: StoreBackend + 'static,
{
    create_app_with_config(Arc::new(store), ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// The store is shared so the caller can keep a handle for shutdown.
pub fn create_app_with_config<B>(store: Arc<DocumentStore<B>>, config: ServerConfig) -> Router
where
    B: StoreBackend + 'static,
{
    info!(
        backend = store.backend().backend_name(),
        "Creating docgate API server"
    );

    let state = AppState::new(store, config.clone());
    let router = routing::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        router.layer(build_cors_layer(&config))
    } else {
        router
    };

    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any);

    if config.cors_origins == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "docgate_server={level},docgate_core={level},docgate_memory={level},docgate_mongodb={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
