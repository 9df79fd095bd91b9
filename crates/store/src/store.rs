use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Result, StoreKey};

/// Core trait for state store implementations.
///
/// The store holds JSON-serializable values under namespaced keys. There
/// are no transactions and no cross-key guarantees; each `set` replaces
/// the whole value for its key (last write wins). All implementations
/// must be thread-safe (Send + Sync).
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Retrieves the value stored under `key`.
    ///
    /// Returns None if nothing has been stored for the key yet.
    async fn get(&self, key: &StoreKey) -> Result<Option<serde_json::Value>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// A failed write surfaces as an error; it is never silently dropped.
    async fn set(&self, key: &StoreKey, value: serde_json::Value) -> Result<()>;
}

/// Extension trait providing typed convenience methods for state stores.
#[async_trait]
pub trait StateStoreExt: StateStore {
    /// Retrieves and deserializes the value stored under `key`.
    async fn get_json<T: DeserializeOwned>(&self, key: &StoreKey) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Serializes and stores `value` under `key`.
    async fn put_json<T: Serialize + Sync>(&self, key: &StoreKey, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(key, value).await
    }
}

// Blanket implementation for all StateStore implementations
impl<T: StateStore + ?Sized> StateStoreExt for T {}
