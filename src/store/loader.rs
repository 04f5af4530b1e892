//! Bulk merging of external JSON documents into a [`Store`].
//!
//! Two channels, never mixed:
//! - the source cannot be opened or read: `Err(StoreError::SourceUnavailable)`
//! - the source was read but is not a JSON object of valid entries: `Ok(false)`
//!
//! Entries are merged only on `Ok(true)`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, error, info, warn};

use super::datatype::DataType;
use super::{normalize_key, Store};
use crate::error::{Result, StoreError};

impl Store {
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let file = File::open(path).map_err(|e| unavailable(&origin, e))?;
        self.load_from_reader(file, &origin)
    }

    /// Read `reader` to the end and merge it. `origin` names the source in
    /// logs and errors.
    pub fn load_from_reader(&mut self, mut reader: impl Read, origin: &str) -> Result<bool> {
        let mut text = String::new();
        match reader.read_to_string(&mut text) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(origin, error = %e, "Source is not valid UTF-8");
                return Ok(false);
            }
            Err(e) => return Err(unavailable(origin, e)),
        }
        Ok(self.load_from_str(&text, origin))
    }

    /// Parse and merge an already-read document. Never fails loudly.
    pub fn load_from_str(&mut self, text: &str, origin: &str) -> bool {
        let parsed: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                warn!(origin, error = %e, "Invalid JSON in source");
                return false;
            }
        };

        let serde_json::Value::Object(object) = parsed else {
            warn!(origin, "Invalid format in source: not a JSON object");
            return false;
        };

        let mut entries = BTreeMap::new();
        for (key, value) in object {
            let Some(normalized) = normalize_key(&key) else {
                warn!(origin, key = %key, "Invalid key in source");
                return false;
            };
            let value = DataType::from(value);
            if value.is_null() {
                warn!(origin, key = normalized, "Null value in source");
                return false;
            }
            if entries.insert(normalized.to_string(), value).is_some() {
                warn!(origin, key = normalized, "Duplicate key in source after trimming");
                return false;
            }
        }

        let count = entries.len();
        self.merge(entries);
        info!(origin, keys = count, "Source loaded");
        debug!(total = self.len(), "Store size after load");
        true
    }
}

fn unavailable(origin: &str, source: io::Error) -> StoreError {
    error!(origin, error = %source, "Source unavailable");
    StoreError::SourceUnavailable {
        origin: origin.to_string(),
        source,
    }
}
