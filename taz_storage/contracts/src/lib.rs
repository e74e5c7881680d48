use std::{future::Future, time::Duration};

use serde::{de::DeserializeOwned, Serialize};

/// Durable key-value storage surviving restarts of the application.
///
/// Values are serialized as JSON.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait StorageService: Sized + Send + Sync + 'static {
    /// Reads an item.
    ///
    /// Returns `None` if the item does not exist or has expired. Fails if the
    /// stored value cannot be deserialized into `T`.
    fn get<T: DeserializeOwned + 'static>(
        &self,
        key: &str,
    ) -> impl Future<Output = anyhow::Result<Option<T>>> + Send;

    /// Creates a new or replaces an existing item.
    ///
    /// If `ttl` is set, the item is treated as absent after this timeout.
    fn set<T: Serialize + Sync + 'static>(
        &self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Removes an existing item.
    ///
    /// Does nothing if the item does not exist.
    fn remove(&self, key: &str) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Returns the keys of all items that have not expired.
    fn keys(&self) -> impl Future<Output = anyhow::Result<Vec<String>>> + Send;

    /// Removes all items.
    fn clear(&self) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Verify that the storage is readable and writable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockStorageService {
    pub fn with_get<T: DeserializeOwned + Send + 'static>(
        mut self,
        key: String,
        result: Option<T>,
    ) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    /// Expect a read of `key` that fails, e.g. because the stored value is
    /// corrupted.
    pub fn with_get_error<T: DeserializeOwned + Send + 'static>(mut self, key: String) -> Self {
        self.expect_get::<T>()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "Failed to deserialize stored value"
                ))))
            });
        self
    }

    pub fn with_set<T: std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static>(
        mut self,
        key: String,
        value: T,
        ttl: Option<Duration>,
    ) -> Self {
        self.expect_set()
            .once()
            .with(
                mockall::predicate::eq(key),
                mockall::predicate::eq(value),
                mockall::predicate::eq(ttl),
            )
            .return_once(|_, _, _| Box::pin(std::future::ready(Ok(()))));
        self
    }

    /// Expect a write of `value` to `key` that fails.
    pub fn with_set_error<T: std::fmt::Debug + PartialEq + Serialize + Send + Sync + 'static>(
        mut self,
        key: String,
        value: T,
        ttl: Option<Duration>,
    ) -> Self {
        self.expect_set()
            .once()
            .with(
                mockall::predicate::eq(key),
                mockall::predicate::eq(value),
                mockall::predicate::eq(ttl),
            )
            .return_once(|_, _, _| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "Failed to write storage"
                ))))
            });
        self
    }

    pub fn with_remove(mut self, key: String) -> Self {
        self.expect_remove()
            .once()
            .with(mockall::predicate::eq(key))
            .return_once(|_| Box::pin(std::future::ready(Ok(()))));
        self
    }
}
