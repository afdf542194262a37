// ABOUTME: In-memory insight store with LRU eviction
// ABOUTME: Shared tokio RwLock over a bounded LruCache; eviction only forces regeneration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::{CacheRecord, InsightKey, InsightStore};
use crate::config::InsightConfig;
use crate::constants::insights::DEFAULT_INSIGHT_MAX_ENTRIES;
use crate::errors::AppResult;

/// In-memory insight store
///
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct InMemoryInsightStore {
    store: Arc<RwLock<LruCache<InsightKey, CacheRecord>>>,
}

impl InMemoryInsightStore {
    /// Capacity used when zero is requested
    const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(DEFAULT_INSIGHT_MAX_ENTRIES) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Store bounded to `max_entries` records
    #[must_use]
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(Self::DEFAULT_CAPACITY);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Store sized from insight configuration
    #[must_use]
    pub fn from_config(config: &InsightConfig) -> Self {
        Self::new(config.max_entries)
    }

    /// Maximum number of records held before eviction
    pub async fn capacity(&self) -> usize {
        self.store.read().await.cap().get()
    }

    /// Drop every record expired at `now`; returns how many were removed
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut store = self.store.write().await;
        let expired: Vec<InsightKey> = store
            .iter()
            .filter(|(_, record)| !record.is_live(now))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            store.pop(key);
        }
        drop(store);

        if !expired.is_empty() {
            debug!("Purged {} expired insight records", expired.len());
        }
        expired.len()
    }
}

#[async_trait]
impl InsightStore for InMemoryInsightStore {
    async fn get(&self, key: &InsightKey) -> AppResult<Option<CacheRecord>> {
        // LruCache::get is mutable (updates access order)
        let mut store = self.store.write().await;
        let record = store.get(key).cloned();
        drop(store);
        Ok(record)
    }

    async fn upsert(&self, key: &InsightKey, record: CacheRecord) -> AppResult<()> {
        let mut store = self.store.write().await;
        if let Some((evicted, _)) = store.push(key.clone(), record) {
            if evicted != *key {
                debug!(evicted = %evicted, "Insight store at capacity, evicted least recent");
            }
        }
        drop(store);
        Ok(())
    }

    async fn remove(&self, key: &InsightKey) -> AppResult<bool> {
        Ok(self.store.write().await.pop(key).is_some())
    }

    async fn len(&self) -> AppResult<usize> {
        Ok(self.store.read().await.len())
    }
}
