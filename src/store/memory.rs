use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::warn;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// In-memory adapter backed by a shared map.
///
/// Clones share the same contents, so a repository and a test can observe
/// the same store.
#[derive(Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let guard = match self.data.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("MemoryStore lock poisoned on read; recovering");
                poisoned.into_inner()
            }
        };
        Ok(guard.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut guard = match self.data.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!("MemoryStore lock poisoned on write; recovering");
                poisoned.into_inner()
            }
        };
        guard.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
