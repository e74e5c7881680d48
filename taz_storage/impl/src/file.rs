use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context;
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use taz_storage_contracts::StorageService;
use taz_utils::trace_instrument;
use tokio::sync::Mutex;

use crate::entries::Entries;

/// Storage backed by a single JSON document on disk.
///
/// Every operation reads the document, and every write replaces it
/// atomically by renaming a temporary file. Operations of clones of the same
/// `FileStorage` are serialized.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Default::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> anyhow::Result<Entries> {
        let content = match tokio::fs::read(&*self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Entries::default()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read storage file at {}", self.path.display())
                })
            }
        };

        serde_json::from_slice(&content).with_context(|| {
            format!("Failed to parse storage file at {}", self.path.display())
        })
    }

    async fn write(&self, entries: &Entries) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content = serde_json::to_vec_pretty(entries).context("Failed to serialize storage")?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, content)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &*self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))
    }
}

impl StorageService for FileStorage {
    #[tracing::instrument(level = "trace", skip(self))]
    async fn get<T: DeserializeOwned + 'static>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let _guard = self.lock.lock().await;
        self.read().await?.get(key, Utc::now())
    }

    #[tracing::instrument(level = "trace", skip(self, value))]
    async fn set<T: Serialize + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        entries.set(key, value, ttl, Utc::now())?;
        self.write(&entries).await
    }

    #[trace_instrument(skip(self))]
    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        if entries.remove(key) {
            self.write(&entries).await?;
        }
        Ok(())
    }

    #[trace_instrument(skip(self))]
    async fn keys(&self) -> anyhow::Result<Vec<String>> {
        let _guard = self.lock.lock().await;
        Ok(self.read().await?.keys(Utc::now()))
    }

    #[trace_instrument(skip(self))]
    async fn clear(&self) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await.unwrap_or_default();
        entries.clear();
        self.write(&entries).await
    }

    #[trace_instrument(skip(self))]
    async fn ping(&self) -> anyhow::Result<()> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read().await?;
        entries.prune(Utc::now());
        self.write(&entries).await
    }
}
