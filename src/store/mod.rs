pub mod datatype;
pub mod loader;

use std::collections::BTreeMap;

use tracing::{debug, error, info, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use datatype::DataType;

/// Key-value store with three failure policies over one mapping.
///
/// `get_optional` never fails, `get_required` and `set` fail loudly, and the
/// bulk loader in [`loader`] splits format problems from I/O problems.
#[derive(Debug, Default)]
pub struct Store {
    data: BTreeMap<String, DataType>,
}

impl Store {
    pub fn new() -> Self {
        info!("Store initialized");
        Self { data: BTreeMap::new() }
    }

    /// Build a store and merge the configured seed source, if any.
    ///
    /// A malformed seed leaves the store empty. An unreachable seed is an
    /// error.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let mut store = Self::new();
        if let Some(seed) = &config.seed {
            if !store.load_from_file(seed)? {
                warn!(seed = %seed.display(), "Seed source rejected, starting empty");
            }
        }
        Ok(store)
    }

    /// Look up `key`, handing back `fallback` when the key is invalid or absent.
    pub fn get_optional(&self, key: &str, fallback: Option<DataType>) -> Option<DataType> {
        let Some(key) = normalize_key(key) else {
            warn!(key, "Invalid key requested, using fallback");
            return fallback;
        };

        match self.data.get(key) {
            Some(value) => {
                debug!(key, ?value, "Key retrieved");
                Some(value.clone())
            }
            None => {
                warn!(key, ?fallback, "Key not found, using fallback");
                fallback
            }
        }
    }

    pub fn get_required(&self, key: &str) -> Result<DataType> {
        let Some(normalized) = normalize_key(key) else {
            error!(key, "Invalid key for required lookup");
            return Err(StoreError::InvalidKey { key: key.to_string() });
        };

        match self.data.get(normalized) {
            Some(value) => {
                info!(key = normalized, "Required key retrieved");
                Ok(value.clone())
            }
            None => {
                error!(key = normalized, "Required key missing");
                Err(StoreError::RequiredKeyMissing { key: normalized.to_string() })
            }
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<DataType>) -> Result<()> {
        let Some(normalized) = normalize_key(key) else {
            error!(key, "Invalid key for set");
            return Err(StoreError::InvalidKey { key: key.to_string() });
        };

        let value = value.into();
        if value.is_null() {
            error!(key = normalized, "Refusing to store null value");
            return Err(StoreError::InvalidValue { key: normalized.to_string() });
        }

        let changed = self.data.get(normalized) != Some(&value);
        info!(key = normalized, ?value, changed, "Key set");
        self.data.insert(normalized.to_string(), value);
        Ok(())
    }

    /// Snapshot of every entry. Changes to the snapshot never reach the store.
    pub fn get_all(&self) -> BTreeMap<String, DataType> {
        debug!(entries = self.data.len(), "All entries requested");
        self.data.clone()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Only called once every entry has passed validation.
    fn merge(&mut self, entries: BTreeMap<String, DataType>) {
        self.data.extend(entries);
    }
}

/// Trimmed key, or `None` when nothing is left after trimming.
pub(crate) fn normalize_key(key: &str) -> Option<&str> {
    let trimmed = key.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
