//! # Storage Layer
//!
//! Persistence for craic is a plain key-value interface. Each store owns one
//! key and keeps a JSON array there, rewritten wholesale on every mutation.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - One file per key: `{key}.json`
//!   - Writes go to a temp file and are renamed into place
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Can simulate write failures
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! .craic/
//! ├── documents.json        # Document list (JSON array)
//! ├── annotationSets.json   # Annotation set list (JSON array)
//! ├── session.json          # CLI selection pointers
//! └── config.json           # Scope configuration
//! ```
//!
//! There is no schema versioning: a value that fails to parse is an error,
//! never silently replaced by the default.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod fs;
pub mod memory;

/// Abstract key-value persistence.
///
/// Implementations deal in raw serialized strings; the typed `get`/`set`
/// helpers layer JSON on top.
pub trait KeyValueStore {
    /// Read the raw value for `key`. `Ok(None)` means the key was never written.
    fn read_raw(&self, key: &str) -> Result<Option<String>>;

    /// Replace the raw value for `key`.
    fn write_raw(&mut self, key: &str, value: &str) -> Result<()>;

    /// Read and deserialize `key`, falling back to `default` when absent.
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        match self.read_raw(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(default),
        }
    }

    /// Serialize `value` and store it under `key`.
    fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string_pretty(value)?;
        self.write_raw(key, &raw)
    }
}
