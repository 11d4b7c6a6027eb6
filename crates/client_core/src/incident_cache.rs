use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use shared::{
    domain::{CachedField, StoreKey, CACHED_KEYS},
    protocol::ChatResponse,
};
use storage::{KeyValueStore, StoredItem};
use tokio::sync::{Mutex, MutexGuard};

/// Shared handle over the coords/news entries. The chat handler writes
/// through it; the map view reads through a clone of the same handle.
#[derive(Clone)]
pub struct IncidentCache {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

/// Exclusive right to write both keys. Writers are admitted in the order
/// they asked, so the last one admitted leaves the final values.
pub struct CacheWriter<'a> {
    cache: &'a IncidentCache,
    _guard: MutexGuard<'a, ()>,
}

impl CacheWriter<'_> {
    /// Writes coords, then news. Absent fields are stored as JSON `null` so
    /// both keys always hold valid JSON after a successful call.
    pub async fn record(self, response: &ChatResponse) -> Result<()> {
        self.cache
            .write(CachedField::Coords, response.coords.as_ref())
            .await?;
        self.cache
            .write(CachedField::RecentNews, response.recent_news.as_ref())
            .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CachedValue {
    pub value: Value,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncidentSnapshot {
    pub coords: Option<CachedValue>,
    pub recent_news: Option<CachedValue>,
}

impl IncidentCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Waits for earlier writers to finish, then holds the cache until the
    /// returned writer is consumed or dropped.
    pub async fn begin_write(&self) -> CacheWriter<'_> {
        CacheWriter {
            cache: self,
            _guard: self.write_lock.lock().await,
        }
    }

    pub async fn record(&self, response: &ChatResponse) -> Result<()> {
        self.begin_write().await.record(response).await
    }

    async fn write(&self, field: CachedField, value: Option<&Value>) -> Result<()> {
        let key = field.key();
        let serialized = serde_json::to_string(value.unwrap_or(&Value::Null))
            .with_context(|| format!("failed to serialize {key}"))?;
        self.store.set_item(key.as_str(), &serialized).await
    }

    pub async fn read(&self, field: CachedField) -> Result<Option<CachedValue>> {
        let key = field.key();
        self.store
            .get_entry(key.as_str())
            .await?
            .map(|item| parse_item(key, item))
            .transpose()
    }

    pub async fn incident_coords(&self) -> Result<Option<Value>> {
        Ok(self.read(CachedField::Coords).await?.map(|cached| cached.value))
    }

    pub async fn recent_news(&self) -> Result<Option<Value>> {
        Ok(self
            .read(CachedField::RecentNews)
            .await?
            .map(|cached| cached.value))
    }

    pub async fn snapshot(&self) -> Result<IncidentSnapshot> {
        Ok(IncidentSnapshot {
            coords: self.read(CachedField::Coords).await?,
            recent_news: self.read(CachedField::RecentNews).await?,
        })
    }

    pub async fn clear(&self) -> Result<()> {
        let _writer = self.begin_write().await;
        for key in CACHED_KEYS {
            self.store.remove_item(key.as_str()).await?;
        }
        Ok(())
    }
}

fn parse_item(key: StoreKey, item: StoredItem) -> Result<CachedValue> {
    let value = serde_json::from_str(&item.value)
        .with_context(|| format!("cached {key} is not valid JSON"))?;
    Ok(CachedValue {
        value,
        updated_at: item.updated_at,
    })
}
