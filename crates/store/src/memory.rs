use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Result, StoreKey, store::StateStore};

/// In-memory state store implementation.
///
/// Serves as the test double and as the backend for dev mode when no
/// database is configured. Provides the same interface and last-write-wins
/// behavior as the PostgreSQL implementation.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently stored.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Clears all stored state.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl StateStore for InMemoryStore {
    async fn get(&self, key: &StoreKey) -> Result<Option<serde_json::Value>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&key.storage_key()).cloned())
    }

    async fn set(&self, key: &StoreKey, value: serde_json::Value) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(key.storage_key(), value);
        Ok(())
    }
}
