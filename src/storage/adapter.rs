use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::{KeyValueStore, MemoryStore, StoreError, StoreKey};

/// Key prefix used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "dpizza";

/// Typed JSON access to named records.
///
/// Reads are fail-soft: an absent, empty, unreadable or unparseable record
/// yields the caller's fallback and is never reported as an error. Writes
/// propagate backend failures as [`StoreError`].
#[derive(Clone)]
pub struct StoreAdapter {
    backend: Arc<dyn KeyValueStore>,
    namespace: Arc<str>,
}

impl StoreAdapter {
    pub fn new(backend: Arc<dyn KeyValueStore>, namespace: impl Into<String>) -> Self {
        Self {
            backend,
            namespace: Arc::from(namespace.into()),
        }
    }

    /// Adapter over a fresh [`MemoryStore`] with the default namespace.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), DEFAULT_NAMESPACE)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Physical key for a record, e.g. `dpizza_history`.
    pub fn physical_key(&self, key: StoreKey) -> String {
        if self.namespace.is_empty() || !key.is_namespaced() {
            key.name().to_string()
        } else {
            format!("{}_{}", self.namespace, key.name())
        }
    }

    /// Deserialized record, or `fallback` when it is missing or corrupt.
    #[instrument(skip(self, fallback), fields(key = %key))]
    pub async fn read<T: DeserializeOwned>(&self, key: StoreKey, fallback: T) -> T {
        self.read_optional(key).await.unwrap_or(fallback)
    }

    /// Deserialized record, or `None` when it is missing or corrupt.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn read_optional<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let physical = self.physical_key(key);
        let raw = match self.backend.get(&physical).await {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                debug!("Record absent");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Record unreadable, using fallback");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "Record corrupt, using fallback");
                None
            }
        }
    }

    /// True when the record holds a non-empty raw value, whether or not it parses.
    pub async fn is_present(&self, key: StoreKey) -> Result<bool, StoreError> {
        let raw = self.backend.get(&self.physical_key(key)).await?;
        Ok(raw.is_some_and(|raw| !raw.trim().is_empty()))
    }

    /// Raw, unencoded text of a record; `None` when absent, blank or unreadable.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn read_raw(&self, key: StoreKey) -> Option<String> {
        match self.backend.get(&self.physical_key(key)).await {
            Ok(Some(raw)) if !raw.trim().is_empty() => Some(raw),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Record unreadable, using fallback");
                None
            }
        }
    }

    /// Stores `value` as-is, without JSON encoding.
    #[instrument(skip(self, value), fields(key = %key))]
    pub async fn write_raw(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        self.backend.set(&self.physical_key(key), value.to_string()).await?;
        debug!("Record written");
        Ok(())
    }

    #[instrument(skip(self, value), fields(key = %key))]
    pub async fn write<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let physical = self.physical_key(key);
        let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: physical.clone(),
            source,
        })?;
        self.backend.set(&physical, encoded).await?;
        debug!("Record written");
        Ok(())
    }

    #[instrument(skip(self), fields(key = %key))]
    pub async fn delete(&self, key: StoreKey) -> Result<(), StoreError> {
        self.backend.remove(&self.physical_key(key)).await?;
        debug!("Record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        title: String,
        stars: u8,
    }

    #[tokio::test]
    async fn write_then_read_returns_equal_value() {
        let store = StoreAdapter::in_memory();
        let note = Note { title: "Garlic bread".into(), stars: 4 };

        store.write(StoreKey::Profile, &note).await.unwrap();
        let read: Option<Note> = store.read_optional(StoreKey::Profile).await;
        assert_eq!(read, Some(note));
    }

    #[tokio::test]
    async fn unwritten_key_yields_fallback() {
        let store = StoreAdapter::in_memory();
        let coupons: Vec<String> = store.read(StoreKey::Coupons, vec!["fallback".into()]).await;
        assert_eq!(coupons, vec!["fallback".to_string()]);
    }

    #[tokio::test]
    async fn corrupt_and_empty_records_fall_back() {
        let backend = MemoryStore::new();
        let store = StoreAdapter::new(Arc::new(backend.clone()), "dpizza");

        backend.set("dpizza_coupons", "{not json".into()).await.unwrap();
        let coupons: Vec<String> = store.read(StoreKey::Coupons, Vec::new()).await;
        assert!(coupons.is_empty());
        assert!(store.is_present(StoreKey::Coupons).await.unwrap());

        backend.set("dpizza_menu", "".into()).await.unwrap();
        let menu: Vec<String> = store.read(StoreKey::Menu, vec!["seed".into()]).await;
        assert_eq!(menu, vec!["seed".to_string()]);
        assert!(!store.is_present(StoreKey::Menu).await.unwrap());
    }

    #[tokio::test]
    async fn namespace_prefixes_physical_keys() {
        let backend = MemoryStore::new();
        let store = StoreAdapter::new(Arc::new(backend.clone()), "dpizza");
        store.write(StoreKey::OrderHistory, &vec![1]).await.unwrap();
        assert_eq!(backend.get("dpizza_history").await.unwrap().as_deref(), Some("[1]"));

        let bare = StoreAdapter::new(Arc::new(MemoryStore::new()), "");
        assert_eq!(bare.physical_key(StoreKey::OrderHistory), "history");
    }

    #[tokio::test]
    async fn last_order_id_is_bare_and_unencoded() {
        let backend = MemoryStore::new();
        let store = StoreAdapter::new(Arc::new(backend.clone()), "dpizza");
        store.write_raw(StoreKey::LastOrderId, "ORD123456").await.unwrap();
        assert_eq!(backend.get("last_order_id").await.unwrap().as_deref(), Some("ORD123456"));
        assert_eq!(store.read_raw(StoreKey::LastOrderId).await.as_deref(), Some("ORD123456"));

        backend.set("last_order_id", "  ".into()).await.unwrap();
        assert_eq!(store.read_raw(StoreKey::LastOrderId).await, None);
    }

    #[tokio::test]
    async fn delete_removes_record() {
        let store = StoreAdapter::in_memory();
        store.write(StoreKey::OrderHistory, &vec![1, 2, 3]).await.unwrap();
        store.delete(StoreKey::OrderHistory).await.unwrap();
        let history: Vec<u32> = store.read(StoreKey::OrderHistory, Vec::new()).await;
        assert!(history.is_empty());
    }
}
