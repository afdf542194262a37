// ABOUTME: Insight store abstraction keyed by user, week, and insight key
// ABOUTME: Pluggable backends hold one record per key with upsert semantics
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Insight Store
//!
//! Persistence for generated coaching text is injected, never global. A
//! backend keeps at most one [`CacheRecord`] per [`InsightKey`]; `upsert`
//! overwrites. Freshness (hash and TTL) is decided by
//! [`crate::insights::InsightCache`], not by the store.

/// In-memory LRU-bounded store
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::AppResult;

pub use memory::InMemoryInsightStore;

/// Key of one cached insight
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightKey {
    /// User the insight was generated for
    pub user_id: Uuid,
    /// Plan week
    pub week: u32,
    /// Insight kind (e.g. `weekly_summary`)
    pub insight_key: String,
}

impl InsightKey {
    /// Create a key
    #[must_use]
    pub fn new(user_id: Uuid, week: u32, insight_key: impl Into<String>) -> Self {
        Self {
            user_id,
            week,
            insight_key: insight_key.into(),
        }
    }
}

impl fmt::Display for InsightKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "insight:{}:week:{}:{}",
            self.user_id, self.week, self.insight_key
        )
    }
}

/// Persisted generated text with the context hash it was generated for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    /// Sanitized generated text
    pub content: String,
    /// Hash of the generation context
    pub context_hash: String,
    /// Generation time
    pub generated_at: DateTime<Utc>,
    /// Time after which the record must be regenerated
    pub expires_at: DateTime<Utc>,
}

impl CacheRecord {
    /// Whether the record is still within its TTL at `now`
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Whether the record may be served for `context_hash` at `now`
    #[must_use]
    pub fn is_reusable(&self, context_hash: &str, now: DateTime<Utc>) -> bool {
        self.context_hash == context_hash && self.is_live(now)
    }
}

/// Injected storage for generated insights
#[async_trait]
pub trait InsightStore: Send + Sync {
    /// Record for `key`, if any (expired records included)
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    async fn get(&self, key: &InsightKey) -> AppResult<Option<CacheRecord>>;

    /// Insert or replace the record for `key`
    ///
    /// Concurrent upserts for one key resolve as last write wins.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    async fn upsert(&self, key: &InsightKey, record: CacheRecord) -> AppResult<()>;

    /// Remove the record for `key`; returns whether one existed
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    async fn remove(&self, key: &InsightKey) -> AppResult<bool>;

    /// Number of stored records
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    async fn len(&self) -> AppResult<usize>;

    /// Whether the store holds no records
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails
    async fn is_empty(&self) -> AppResult<bool> {
        Ok(self.len().await? == 0)
    }
}
