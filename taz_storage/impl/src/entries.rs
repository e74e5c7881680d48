use std::{collections::BTreeMap, time::Duration};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// The complete contents of a storage, keyed by item key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Entries(BTreeMap<String, Entry>);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Entry {
    value: Value,
    /// Expiration as milliseconds since the unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<i64>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at <= now.timestamp_millis())
    }
}

impl Entries {
    pub(crate) fn get<T: DeserializeOwned>(
        &self,
        key: &str,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<T>> {
        self.0
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| serde_json::from_value(entry.value.clone()))
            .transpose()
            .with_context(|| format!("Failed to deserialize stored value of {key:?}"))
    }

    pub(crate) fn set<T: Serialize>(
        &mut self,
        key: &str,
        value: &T,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let value = serde_json::to_value(value).context("Failed to serialize value")?;
        let expires_at = ttl
            .map(|ttl| i64::try_from(ttl.as_millis()).map(|ttl| now.timestamp_millis() + ttl))
            .transpose()
            .context("Invalid ttl")?;

        self.prune(now);
        self.0.insert(key.into(), Entry { value, expires_at });
        Ok(())
    }

    /// Returns whether the item existed.
    pub(crate) fn remove(&mut self, key: &str) -> bool {
        self.0.remove(key).is_some()
    }

    pub(crate) fn keys(&self, now: DateTime<Utc>) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    /// Drop all expired items.
    pub(crate) fn prune(&mut self, now: DateTime<Utc>) {
        self.0.retain(|_, entry| !entry.is_expired(now));
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    #[test]
    fn expiration() {
        let now = Utc::now();
        let mut entries = Entries::default();

        entries
            .set("a", &1, Some(Duration::from_secs(10)), now)
            .unwrap();
        entries.set("b", &2, None, now).unwrap();

        let later = now + TimeDelta::seconds(11);
        assert_eq!(entries.get::<i32>("a", now).unwrap(), Some(1));
        assert_eq!(entries.get::<i32>("a", later).unwrap(), None);
        assert_eq!(entries.keys(later), ["b"]);

        entries.set("c", &3, None, later).unwrap();
        assert_eq!(entries.keys(now), ["b", "c"]);
    }

    #[test]
    fn wrong_type() {
        let now = Utc::now();
        let mut entries = Entries::default();
        entries.set("a", &"not a list", None, now).unwrap();

        assert!(entries.get::<Vec<i64>>("a", now).is_err());
    }
}
