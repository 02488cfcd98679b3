//! Application state shared by all request handlers.

use std::sync::Arc;

use docgate::{backend::StoreBackend, store::DocumentStore};

use crate::config::ServerConfig;

pub struct AppState<B: StoreBackend> {
    store: Arc<DocumentStore<B>>,
    config: Arc<ServerConfig>,
}

// Manually implement Clone since B is wrapped in Arc and doesn't need to be Clone
impl<B: StoreBackend> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
        }
    }
}

impl<B: StoreBackend> AppState<B> {
    pub fn new(store: Arc<DocumentStore<B>>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    pub fn store(&self) -> &DocumentStore<B> {
        &self.store
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
