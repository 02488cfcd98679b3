//! Process-wide cache of collection handles.
//!
//! A handle binds a collection name to its resolved [`CollectionConfig`]. Handles are
//! created the first time a name is requested and live as long as the registry; the set of
//! names is operator controlled, so nothing is ever evicted.

use std::{collections::HashMap, sync::Arc};

use mea::rwlock::RwLock;
use tracing::debug;

use crate::config::{CollectionConfig, CollectionConfigs, IdMode};

/// A named collection together with its store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionHandle {
    name: String,
    config: CollectionConfig,
}

impl CollectionHandle {
    pub fn new(name: impl Into<String>, config: CollectionConfig) -> Self {
        Self { name: name.into(), config }
    }

    /// Returns the name of this collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> CollectionConfig {
        self.config
    }

    pub fn id_mode(&self) -> IdMode {
        self.config.id_mode
    }
}

/// Lookup/create-if-absent cache of [`CollectionHandle`]s keyed by name.
///
/// Safe to share between tasks; lookups of known names only take the read lock.
#[derive(Debug)]
pub struct CollectionRegistry {
    configs: CollectionConfigs,
    handles: RwLock<HashMap<String, Arc<CollectionHandle>>>,
}

impl CollectionRegistry {
    pub fn new(configs: CollectionConfigs) -> Self {
        Self {
            configs,
            handles: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the handle for `name`, creating it on first use.
    pub async fn handle(&self, name: &str) -> Arc<CollectionHandle> {
        {
            let handles = self.handles.read().await;
            if let Some(handle) = handles.get(name) {
                return Arc::clone(handle);
            }
        }

        let mut handles = self.handles.write().await;
        let handle = handles
            .entry(name.to_string())
            .or_insert_with(|| {
                let config = self.configs.get(name);
                debug!(collection = %name, id_mode = ?config.id_mode, "Registering collection handle");
                Arc::new(CollectionHandle::new(name, config))
            });

        Arc::clone(handle)
    }

    /// Number of handles created so far.
    pub async fn len(&self) -> usize {
        self.handles.read().await.len()
    }

    pub fn configs(&self) -> &CollectionConfigs {
        &self.configs
    }
}

impl Default for CollectionRegistry {
    fn default() -> Self {
        Self::new(CollectionConfigs::default())
    }
}
