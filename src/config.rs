use anyhow::bail;
use std::path::PathBuf;
use std::sync::Arc;

use crate::storage::{FileStore, MemoryStore, StoreAdapter, StoreError, DEFAULT_NAMESPACE};

pub const DEFAULT_CHANNEL_BUFFER: usize = 32;

/// Runtime settings, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for the file-backed store; `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub namespace: String,
    pub channel_buffer: usize,
    pub json_logs: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            channel_buffer: DEFAULT_CHANNEL_BUFFER,
            json_logs: false,
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source. Unparseable numbers fall
    /// back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let data_dir = lookup("STOREFRONT_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);
        let namespace = lookup("STOREFRONT_NAMESPACE").unwrap_or_else(|| DEFAULT_NAMESPACE.into());
        if !namespace
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            bail!("STOREFRONT_NAMESPACE may only contain letters, digits, '_' and '-': {namespace:?}");
        }
        let channel_buffer = lookup("STOREFRONT_CHANNEL_BUFFER")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_CHANNEL_BUFFER);
        let json_logs = lookup("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);

        Ok(Self {
            data_dir,
            namespace,
            channel_buffer,
            json_logs,
        })
    }

    pub async fn open_store(&self) -> Result<StoreAdapter, StoreError> {
        let store = match &self.data_dir {
            Some(dir) => StoreAdapter::new(Arc::new(FileStore::open(dir.clone()).await?), self.namespace.clone()),
            None => StoreAdapter::new(Arc::new(MemoryStore::new()), self.namespace.clone()),
        };
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = StorefrontConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn reads_overrides_and_ignores_bad_numbers() {
        let config = StorefrontConfig::from_lookup(lookup(&[
            ("STOREFRONT_DATA_DIR", "/tmp/shop"),
            ("STOREFRONT_NAMESPACE", "tandoor"),
            ("STOREFRONT_CHANNEL_BUFFER", "many"),
            ("LOG_FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/shop")));
        assert_eq!(config.namespace, "tandoor");
        assert_eq!(config.channel_buffer, DEFAULT_CHANNEL_BUFFER);
        assert!(config.json_logs);

        let config = StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_CHANNEL_BUFFER", "0")])).unwrap();
        assert_eq!(config.channel_buffer, DEFAULT_CHANNEL_BUFFER);
    }

    #[test]
    fn rejects_namespace_with_path_characters() {
        assert!(StorefrontConfig::from_lookup(lookup(&[("STOREFRONT_NAMESPACE", "../x")])).is_err());
    }

    #[tokio::test]
    async fn opens_file_store_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorefrontConfig {
            data_dir: Some(dir.path().join("data")),
            ..StorefrontConfig::default()
        };
        let store = config.open_store().await.unwrap();
        store.write(crate::storage::StoreKey::Coupons, &Vec::<u8>::new()).await.unwrap();
        assert!(dir.path().join("data").join("dpizza_coupons.json").exists());
    }
}
