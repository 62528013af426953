//! Browser LocalStorage backend

use super::{Storage, StorageError};

pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Open `window.localStorage`
    pub fn open() -> Result<Self, StorageError> {
        let inner = web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Access(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)?;
        Ok(Self { inner })
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }
}
