//! The raw query-string parameter set handed over by the HTTP layer.

use serde::Deserialize;

/// Name of the parameter selecting the target collection.
pub const COLLECTION: &str = "collection";
/// Name of the parameter capping the number of returned documents.
pub const LIMIT: &str = "limit";
/// Name of the parameter selecting the sort field.
pub const SORT_BY: &str = "sortBy";
/// Name of the parameter selecting the sort direction.
pub const SORT_ORDER: &str = "sortOrder";

/// Parameter names that steer the query instead of filtering documents.
pub const RESERVED: [&str; 4] = [COLLECTION, LIMIT, SORT_BY, SORT_ORDER];

/// Returns `true` when `key` is one of the [`RESERVED`] control parameters.
pub fn is_reserved(key: &str) -> bool {
    RESERVED.contains(&key)
}

/// An ordered mapping from parameter name to a single raw string value.
///
/// Values are kept exactly as decoded from the query string. A repeated key replaces
/// the earlier value but keeps the position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
pub struct RawParams {
    pairs: Vec<(String, String)>,
}

impl RawParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value for the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Returns the raw value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the requested collection name, treating an empty value as missing.
    pub fn collection(&self) -> Option<&str> {
        self.get(COLLECTION).filter(|name| !name.is_empty())
    }

    /// Iterates over all parameters in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl From<Vec<(String, String)>> for RawParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for RawParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = RawParams::new();

        for (key, value) in iter {
            params.insert(key, value);
        }

        params
    }
}
