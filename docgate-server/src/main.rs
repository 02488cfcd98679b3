//! docgate server binary.

use std::sync::Arc;

use clap::Parser;
use docgate::{
    backend::StoreBackendBuilder,
    memory::InMemoryStore,
    store::{DocumentStore, DynDocumentStore},
};
use docgate_server::{BackendKind, ServerConfig, create_app_with_config, init_logging};
use tracing::{info, warn};

/// Builds the configured store backend.
async fn create_store(config: &ServerConfig) -> anyhow::Result<DynDocumentStore> {
    let store = match config.backend {
        BackendKind::Memory => {
            info!("Initializing in-memory backend");
            DocumentStore::with_configs(
                InMemoryStore::builder().build().await?,
                config.collection_configs(),
            )
            .into_dyn()
        }
        BackendKind::Mongodb => create_mongodb_store(config).await?,
    };

    Ok(store)
}

#[cfg(feature = "mongodb")]
async fn create_mongodb_store(config: &ServerConfig) -> anyhow::Result<DynDocumentStore> {
    use docgate::mongodb::MongoDbStore;

    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("The mongodb backend requires a database URL"))?;
    info!(database = %config.database_name, "Initializing MongoDB backend");

    let backend = MongoDbStore::builder(url, &config.database_name)
        .build()
        .await?;

    Ok(DocumentStore::with_configs(backend, config.collection_configs()).into_dyn())
}

/// Fallback when mongodb feature is not enabled.
#[cfg(not(feature = "mongodb"))]
async fn create_mongodb_store(_config: &ServerConfig) -> anyhow::Result<DynDocumentStore> {
    anyhow::bail!(
        "The mongodb backend requires the 'mongodb' feature. \
         Build with: cargo build -p docgate-server --features mongodb"
    )
}

/// Starts the Axum HTTP server and stops on Ctrl-C.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        backend = %config.backend,
        "Starting docgate server"
    );

    let store = Arc::new(create_store(&config).await?);
    let app = create_app_with_config(Arc::clone(&store), config.clone());

    serve(app, &config).await?;

    match Arc::try_unwrap(store) {
        Ok(store) => store.shutdown().await?,
        Err(_) => warn!("Store still in use, skipping backend shutdown"),
    }

    info!("Server stopped");
    Ok(())
}
