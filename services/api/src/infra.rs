use hdi90::assessment::{DraftStore, FileDraftStore, InMemoryDraftStore, StorageError};
use hdi90::config::DraftConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Draft backend picked at startup: files when a directory is configured, memory otherwise.
#[derive(Debug)]
pub(crate) enum ConfiguredDraftStore {
    Memory(InMemoryDraftStore),
    File(FileDraftStore),
}

impl ConfiguredDraftStore {
    pub(crate) fn from_config(config: &DraftConfig) -> Self {
        match &config.directory {
            Some(directory) => Self::File(FileDraftStore::new(directory.clone())),
            None => Self::Memory(InMemoryDraftStore::default()),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "memory".to_string(),
            Self::File(store) => store.directory().display().to_string(),
        }
    }
}

impl DraftStore for ConfiguredDraftStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match self {
            Self::Memory(store) => store.get(key),
            Self::File(store) => store.get(key),
        }
    }

    fn set(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        match self {
            Self::Memory(store) => store.set(key, bytes),
            Self::File(store) => store.set(key, bytes),
        }
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Self::Memory(store) => store.delete(key),
            Self::File(store) => store.delete(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn picks_backend_from_config() {
        let memory = ConfiguredDraftStore::from_config(&DraftConfig::default());
        assert!(matches!(memory, ConfiguredDraftStore::Memory(_)));
        assert_eq!(memory.describe(), "memory");

        let file = ConfiguredDraftStore::from_config(&DraftConfig {
            directory: Some(PathBuf::from("/srv/hdi90")),
        });
        assert!(matches!(file, ConfiguredDraftStore::File(_)));
        assert_eq!(file.describe(), "/srv/hdi90");
    }

    #[test]
    fn memory_backend_round_trips() {
        let store = ConfiguredDraftStore::from_config(&DraftConfig::default());
        store.set("draft", b"{}").expect("set");
        assert_eq!(store.get("draft").expect("get"), Some(b"{}".to_vec()));
        store.delete("draft").expect("delete");
        assert!(store.get("draft").expect("get").is_none());
    }
}
