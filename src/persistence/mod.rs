//! Key-value persistence boundary
//!
//! Features:
//! - `Storage` trait over a string key-value store
//! - LocalStorage backend on web, in-memory backend for native runs and tests
//! - JSON helpers that treat missing or corrupt values as absent

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod local;

pub use memory::MemoryStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised by a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// No backing store (e.g. LocalStorage disabled by the browser)
    #[error("storage is unavailable")]
    Unavailable,
    /// The backend rejected a read or write
    #[error("storage access failed: {0}")]
    Access(String),
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key-value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Load and decode a JSON value. Missing, unreadable or malformed data is `None`.
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    let json = match storage.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read '{}': {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed '{}': {}", key, e);
            None
        }
    }
}

/// Encode and store a JSON value
pub fn save_json<T: Serialize>(
    storage: &mut dyn Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A backend whose every access fails
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Access("quota".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let mut storage = MemoryStorage::new();
        save_json(&mut storage, "k", &vec![1u32, 2, 3]).unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[1,2,3]"));
        let loaded: Option<Vec<u32>> = load_json(&storage, "k");
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_missing_and_malformed_are_none() {
        let mut storage = MemoryStorage::new();
        assert_eq!(load_json::<Vec<u32>>(&storage, "k"), None);

        storage.set("k", "{not json").unwrap();
        assert_eq!(load_json::<Vec<u32>>(&storage, "k"), None);

        storage.set("k", "\"a string\"").unwrap();
        assert_eq!(load_json::<Vec<u32>>(&storage, "k"), None);
    }

    #[test]
    fn test_broken_backend() {
        let mut storage = BrokenStorage;
        assert_eq!(load_json::<Vec<u32>>(&storage, "k"), None);
        let err = save_json(&mut storage, "k", &1u32).unwrap_err();
        assert!(matches!(err, StorageError::Unavailable));
        assert_eq!(err.to_string(), "storage is unavailable");
    }
}
