//! Per-collection store configuration.
//!
//! Collections are not declared anywhere, so every name gets the default configuration
//! unless it appears in the [`CollectionConfigs`] table. The table is consulted once, when
//! the collection handle is first created (see [`crate::registry`]).

use std::collections::HashMap;

/// Collections whose `_id` is always a plain string, registered by default.
pub const STRING_ID_COLLECTIONS: [&str; 1] = ["shiftwise_data"];

/// How a request identifier is matched against a stored `_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdMode {
    /// Match the raw string, its numeric value, or the ObjectId it spells.
    #[default]
    Flexible,
    /// Match the raw string only.
    String,
}

/// Store settings that apply to one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollectionConfig {
    pub id_mode: IdMode,
}

impl CollectionConfig {
    pub fn with_id_mode(id_mode: IdMode) -> Self {
        Self { id_mode }
    }
}

/// Static lookup table from collection name to [`CollectionConfig`].
#[derive(Debug, Clone)]
pub struct CollectionConfigs {
    fallback: CollectionConfig,
    entries: HashMap<String, CollectionConfig>,
}

impl CollectionConfigs {
    /// A table with no entries; every collection gets the default configuration.
    pub fn empty() -> Self {
        Self {
            fallback: CollectionConfig::default(),
            entries: HashMap::new(),
        }
    }

    /// Registers `config` for the collection `name`.
    pub fn with(mut self, name: impl Into<String>, config: CollectionConfig) -> Self {
        self.entries.insert(name.into(), config);
        self
    }

    /// Registers every name in `names` as using string identifiers.
    pub fn with_string_ids<N: Into<String>>(self, names: impl IntoIterator<Item = N>) -> Self {
        names.into_iter().fold(self, |configs, name| {
            configs.with(name, CollectionConfig::with_id_mode(IdMode::String))
        })
    }

    /// Returns the configuration for `name`.
    pub fn get(&self, name: &str) -> CollectionConfig {
        self.entries
            .get(name)
            .copied()
            .unwrap_or(self.fallback)
    }
}

impl Default for CollectionConfigs {
    fn default() -> Self {
        Self::empty().with_string_ids(STRING_ID_COLLECTIONS)
    }
}
