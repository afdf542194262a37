// ABOUTME: Content-hash and TTL keyed cache in front of expensive coaching text generation
// ABOUTME: Reuses a stored insight only while its context hash matches and it has not expired
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Insight Cache
//!
//! Generated coaching text is keyed by `(user, week, insight key)` and
//! tagged with a hash of the context it was generated for. A stored record
//! is served only when all of the following hold:
//!
//! - the caller did not force a refresh
//! - the stored context hash equals the current one
//! - the record has not expired
//!
//! Otherwise the generator runs, its text is sanitized, and the single record
//! for the key is overwritten. A failed generation writes nothing.
//!
//! Two concurrent cold requests for one key may both generate; the store
//! resolves them as last write wins.

/// Weekly coaching prompt construction
pub mod prompt;
/// Greeting, sentence, and length cleanup of generated text
pub mod sanitize;
/// Generator + cache bundle for weekly summaries
pub mod service;

pub use prompt::{build_coaching_prompt, CoachingContext, CoachingTone};
pub use sanitize::sanitize_insight;
pub use service::{CoachingInsightService, WeeklyInsightRequest};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::future::Future;
use tracing::{debug, info, instrument, warn};

use crate::cache::{CacheRecord, InsightKey, InsightStore};
use crate::config::{EngineConfig, InsightConfig};
use crate::errors::{AppError, AppResult, GenerationError};

/// Stable hash of a generation context
///
/// The context goes through `serde_json::Value`, whose objects keep keys
/// sorted, so map insertion order never changes the hash.
///
/// # Errors
///
/// Returns `SERIALIZATION_ERROR` if the context cannot be serialized.
pub fn context_hash<C: Serialize + ?Sized>(context: &C) -> AppResult<String> {
    let value = serde_json::to_value(context)?;
    let bytes = serde_json::to_vec(&value)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// One cache lookup
#[derive(Debug, Clone)]
pub struct InsightRequest<C> {
    /// Storage key
    pub key: InsightKey,
    /// Every input that can change the generated text
    pub context: C,
    /// Skip the cache and regenerate
    pub force_refresh: bool,
}

impl<C> InsightRequest<C> {
    /// Request that may be served from cache
    #[must_use]
    pub const fn new(key: InsightKey, context: C) -> Self {
        Self {
            key,
            context,
            force_refresh: false,
        }
    }

    /// Set whether the cache is bypassed
    #[must_use]
    pub const fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }
}

/// Served insight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResponse {
    /// Sanitized text
    pub content: String,
    /// Whether the text came from the store
    pub from_cache: bool,
    /// When the text was generated
    pub generated_at: DateTime<Utc>,
    /// When the text must be regenerated
    pub expires_at: DateTime<Utc>,
    /// Hash of the context the text belongs to
    pub context_hash: String,
}

impl InsightResponse {
    fn from_record(record: CacheRecord, from_cache: bool) -> Self {
        Self {
            content: record.content,
            from_cache,
            generated_at: record.generated_at,
            expires_at: record.expires_at,
            context_hash: record.context_hash,
        }
    }
}

/// Cache decision logic over an injected [`InsightStore`]
pub struct InsightCache<S: InsightStore> {
    store: S,
    config: InsightConfig,
}

impl<S: InsightStore> InsightCache<S> {
    /// Cache using the global insight configuration
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::global().insights.clone())
    }

    /// Cache with an explicit configuration
    #[must_use]
    pub const fn with_config(store: S, config: InsightConfig) -> Self {
        Self { store, config }
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Serve a cached insight or generate a fresh one, using the current time
    ///
    /// # Errors
    ///
    /// See [`Self::get_or_generate_at`].
    pub async fn get_or_generate<C, F, Fut>(
        &self,
        request: &InsightRequest<C>,
        generate: F,
    ) -> AppResult<InsightResponse>
    where
        C: Serialize + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<String, GenerationError>> + Send,
    {
        self.get_or_generate_at(request, Utc::now(), generate).await
    }

    /// Serve a cached insight or generate a fresh one as of `now`
    ///
    /// `generate` is called at most once, and only on a miss.
    ///
    /// # Errors
    ///
    /// - `EXTERNAL_GENERATION_FAILED` if `generate` fails or its text is
    ///   empty after sanitization; nothing is written in that case
    /// - `SERIALIZATION_ERROR` if the context cannot be hashed
    /// - `STORAGE_ERROR` if the store fails
    #[instrument(
        skip(self, request, generate),
        fields(
            user_id = %request.key.user_id,
            week = request.key.week,
            insight_key = %request.key.insight_key,
            force_refresh = request.force_refresh,
        )
    )]
    pub async fn get_or_generate_at<C, F, Fut>(
        &self,
        request: &InsightRequest<C>,
        now: DateTime<Utc>,
        generate: F,
    ) -> AppResult<InsightResponse>
    where
        C: Serialize + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<String, GenerationError>> + Send,
    {
        let hash = context_hash(&request.context)?;

        if !request.force_refresh {
            if let Some(record) = self.store.get(&request.key).await? {
                if record.is_reusable(&hash, now) {
                    debug!("Insight cache hit");
                    return Ok(InsightResponse::from_record(record, true));
                }
                debug!(
                    expired = !record.is_live(now),
                    context_changed = record.context_hash != hash,
                    "Insight cache stale"
                );
            }
        }

        let raw = generate().await.map_err(|e| {
            warn!("Insight generation failed, nothing cached: {}", e);
            AppError::from(e)
        })?;

        let content = sanitize_insight(&raw, &self.config);
        if content.is_empty() {
            warn!("Generated insight was empty after sanitization");
            return Err(GenerationError::EmptyResponse.into());
        }

        let record = CacheRecord {
            content,
            context_hash: hash,
            generated_at: now,
            expires_at: now
                .checked_add_signed(self.config.ttl())
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        self.store.upsert(&request.key, record.clone()).await?;

        info!(expires_at = %record.expires_at, "Insight regenerated");
        Ok(InsightResponse::from_record(record, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn test_context_hash_ignores_map_insertion_order() {
        let mut first = HashMap::new();
        first.insert("tone", "direct");
        first.insert("goal", "5k");
        let mut second = BTreeMap::new();
        second.insert("goal", "5k");
        second.insert("tone", "direct");

        assert_eq!(
            context_hash(&first).unwrap(),
            context_hash(&second).unwrap()
        );
    }

    #[test]
    fn test_context_hash_is_hex_sha256() {
        let hash = context_hash(&serde_json::json!({"week": 3})).unwrap();
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
