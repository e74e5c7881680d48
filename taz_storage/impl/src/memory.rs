use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use anyhow::anyhow;
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use taz_storage_contracts::StorageService;
use taz_utils::trace_instrument;

use crate::entries::Entries;

/// Storage that only lives as long as the process. Clones share their
/// contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<Entries>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<R>(&self, f: impl FnOnce(&mut Entries) -> R) -> anyhow::Result<R> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("Memory storage has been poisoned"))?;
        Ok(f(&mut entries))
    }
}

impl StorageService for MemoryStorage {
    #[tracing::instrument(level = "trace", skip(self))]
    async fn get<T: DeserializeOwned + 'static>(&self, key: &str) -> anyhow::Result<Option<T>> {
        self.with_entries(|entries| entries.get(key, Utc::now()))?
    }

    #[tracing::instrument(level = "trace", skip(self, value))]
    async fn set<T: Serialize + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> anyhow::Result<()> {
        self.with_entries(|entries| entries.set(key, value, ttl, Utc::now()))?
    }

    #[trace_instrument(skip(self))]
    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }

    #[trace_instrument(skip(self))]
    async fn keys(&self) -> anyhow::Result<Vec<String>> {
        self.with_entries(|entries| entries.keys(Utc::now()))
    }

    #[trace_instrument(skip(self))]
    async fn clear(&self) -> anyhow::Result<()> {
        self.with_entries(Entries::clear)
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        self.with_entries(|entries| entries.prune(Utc::now()))
    }
}
