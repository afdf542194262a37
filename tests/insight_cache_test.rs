// ABOUTME: Integration tests for the hash and TTL keyed insight cache
// ABOUTME: Counts generator calls to prove hits, misses, refreshes, and failure handling
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use chrono::{Duration, TimeZone, Utc};
use coachplan::cache::{InMemoryInsightStore, InsightKey, InsightStore};
use coachplan::config::InsightConfig;
use coachplan::constants::insights::DEFAULT_INSIGHT_MAX_ENTRIES;
use coachplan::errors::{ErrorCode, GenerationError};
use coachplan::insights::{context_hash, InsightCache, InsightRequest};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

const TTL_SECS: u64 = 3600;

fn cache() -> InsightCache<InMemoryInsightStore> {
    cache_with_capacity(100)
}

fn cache_with_capacity(max_entries: usize) -> InsightCache<InMemoryInsightStore> {
    let config = InsightConfig {
        ttl_secs: TTL_SECS,
        max_entries,
        ..InsightConfig::default()
    };
    InsightCache::with_config(InMemoryInsightStore::from_config(&config), config)
}

fn key(user_id: Uuid) -> InsightKey {
    InsightKey::new(user_id, 2, "weekly_summary")
}

/// Generator returning `text` and counting its calls
async fn counted(calls: &AtomicUsize, text: &str) -> Result<String, GenerationError> {
    calls.fetch_add(1, Ordering::SeqCst);
    Ok(text.to_owned())
}

// ============================================================================
// Hits and Misses
// ============================================================================

#[tokio::test]
async fn test_second_request_is_served_from_cache() {
    common::init_test_logging();
    let cache = cache();
    let calls = AtomicUsize::new(0);
    let request = InsightRequest::new(key(Uuid::new_v4()), json!({"week": 2, "goal": "5k"}));

    let first = cache
        .get_or_generate(&request, || counted(&calls, "Keep your long run easy."))
        .await
        .unwrap();
    let second = cache
        .get_or_generate(&request, || counted(&calls, "Different text."))
        .await
        .unwrap();

    assert!(!first.from_cache);
    assert!(second.from_cache);
    assert_eq!(second.content, "Keep your long run easy.");
    assert_eq!(second.context_hash, first.context_hash);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_force_refresh_always_regenerates() {
    let cache = cache();
    let calls = AtomicUsize::new(0);
    let request = InsightRequest::new(key(Uuid::new_v4()), json!({"week": 2}));

    cache
        .get_or_generate(&request, || counted(&calls, "First."))
        .await
        .unwrap();
    let refreshed = cache
        .get_or_generate(&request.clone().with_force_refresh(true), || {
            counted(&calls, "Second.")
        })
        .await
        .unwrap();

    assert!(!refreshed.from_cache);
    assert_eq!(refreshed.content, "Second.");
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let cached = cache
        .get_or_generate(&request, || counted(&calls, "Third."))
        .await
        .unwrap();
    assert_eq!(cached.content, "Second.");
}

#[tokio::test]
async fn test_changed_context_overwrites_single_record() {
    let cache = cache();
    let calls = AtomicUsize::new(0);
    let key = key(Uuid::new_v4());

    let before = InsightRequest::new(key.clone(), json!({"calories": 2200}));
    let after = InsightRequest::new(key.clone(), json!({"calories": 2400}));

    cache
        .get_or_generate(&before, || counted(&calls, "Old plan."))
        .await
        .unwrap();
    let response = cache
        .get_or_generate(&after, || counted(&calls, "New plan."))
        .await
        .unwrap();

    assert!(!response.from_cache);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.store().len().await.unwrap(), 1);

    let stored = cache.store().get(&key).await.unwrap().unwrap();
    assert_eq!(stored.content, "New plan.");
    assert_eq!(stored.context_hash, context_hash(&json!({"calories": 2400})).unwrap());
}

#[tokio::test]
async fn test_expired_record_is_regenerated() {
    let cache = cache();
    let calls = AtomicUsize::new(0);
    let request = InsightRequest::new(key(Uuid::new_v4()), json!({"week": 2}));
    let generated = Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0).unwrap();

    let first = cache
        .get_or_generate_at(&request, generated, || counted(&calls, "Fresh."))
        .await
        .unwrap();
    assert_eq!(first.expires_at, generated + Duration::hours(1));

    let just_before = generated + Duration::minutes(59);
    let hit = cache
        .get_or_generate_at(&request, just_before, || counted(&calls, "Unused."))
        .await
        .unwrap();
    assert!(hit.from_cache);

    let at_expiry = generated + Duration::hours(1);
    let miss = cache
        .get_or_generate_at(&request, at_expiry, || counted(&calls, "Renewed."))
        .await
        .unwrap();
    assert!(!miss.from_cache);
    assert_eq!(miss.content, "Renewed.");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_failed_generation_writes_nothing() {
    let cache = cache();
    let calls = AtomicUsize::new(0);
    let request = InsightRequest::new(key(Uuid::new_v4()), json!({"week": 2}));

    let error = cache
        .get_or_generate(&request, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(GenerationError::failed("model unavailable"))
        })
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalGenerationFailed);
    assert!(cache.store().is_empty().await.unwrap());

    let retried = cache
        .get_or_generate(&request, || counted(&calls, "Recovered."))
        .await
        .unwrap();
    assert!(!retried.from_cache);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_record() {
    let cache = cache();
    let calls = AtomicUsize::new(0);
    let key = key(Uuid::new_v4());
    let request = InsightRequest::new(key.clone(), json!({"week": 2}));

    cache
        .get_or_generate(&request, || counted(&calls, "Original."))
        .await
        .unwrap();
    let result = cache
        .get_or_generate(&request.clone().with_force_refresh(true), || async {
            Err(GenerationError::EmptyResponse)
        })
        .await;

    assert!(result.is_err());
    let stored = cache.store().get(&key).await.unwrap().unwrap();
    assert_eq!(stored.content, "Original.");
}

#[tokio::test]
async fn test_blank_output_is_an_error() {
    let cache = cache();
    let calls = AtomicUsize::new(0);
    let request = InsightRequest::new(key(Uuid::new_v4()), json!({"week": 2}));

    let error = cache
        .get_or_generate(&request, || counted(&calls, "   \n  "))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalGenerationFailed);
    assert!(cache.store().is_empty().await.unwrap());
}

#[tokio::test]
async fn test_sanitized_text_is_what_gets_stored() {
    let cache = cache();
    let calls = AtomicUsize::new(0);
    let key = key(Uuid::new_v4());
    let request = InsightRequest::new(key.clone(), json!({"week": 2}));

    let response = cache
        .get_or_generate(&request, || {
            counted(&calls, "Hello Sam!   Great   week ahead.\n\nRest on Sunday.")
        })
        .await
        .unwrap();

    assert_eq!(response.content, "Great week ahead. Rest on Sunday.");
    let stored = cache.store().get(&key).await.unwrap().unwrap();
    assert_eq!(stored.content, response.content);
}

// ============================================================================
// Concurrency and Store Maintenance
// ============================================================================

#[tokio::test]
async fn test_concurrent_cold_requests_leave_one_record() {
    let cache = cache();
    let calls = AtomicUsize::new(0);
    let request = InsightRequest::new(key(Uuid::new_v4()), json!({"week": 2}));

    let (a, b) = tokio::join!(
        cache.get_or_generate(&request, || counted(&calls, "From A.")),
        cache.get_or_generate(&request, || counted(&calls, "From B.")),
    );

    a.unwrap();
    b.unwrap();
    assert!((1..=2).contains(&calls.load(Ordering::SeqCst)));
    assert_eq!(cache.store().len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_purge_expired_removes_only_stale_records() {
    let cache = cache();
    let calls = AtomicUsize::new(0);
    let t0 = Utc.with_ymd_and_hms(2025, 3, 3, 8, 0, 0).unwrap();

    let old = InsightRequest::new(key(Uuid::new_v4()), json!({"week": 1}));
    let recent = InsightRequest::new(key(Uuid::new_v4()), json!({"week": 1}));
    cache
        .get_or_generate_at(&old, t0, || counted(&calls, "Old."))
        .await
        .unwrap();
    cache
        .get_or_generate_at(&recent, t0 + Duration::minutes(30), || counted(&calls, "New."))
        .await
        .unwrap();

    let purged = cache.store().purge_expired(t0 + Duration::minutes(61)).await;

    assert_eq!(purged, 1);
    assert!(cache.store().get(&old.key).await.unwrap().is_none());
    assert!(cache.store().get(&recent.key).await.unwrap().is_some());
}

#[tokio::test]
async fn test_capacity_evicts_least_recent_key() {
    let cache = cache_with_capacity(2);
    let calls = AtomicUsize::new(0);
    let requests: Vec<_> = (0..3)
        .map(|_| InsightRequest::new(key(Uuid::new_v4()), json!({"week": 2})))
        .collect();

    for request in &requests {
        cache
            .get_or_generate(request, || counted(&calls, "Text."))
            .await
            .unwrap();
    }

    assert_eq!(cache.store().len().await.unwrap(), 2);
    assert!(cache.store().get(&requests[0].key).await.unwrap().is_none());

    // Evicted keys simply regenerate
    let again = cache
        .get_or_generate(&requests[0], || counted(&calls, "Text."))
        .await
        .unwrap();
    assert!(!again.from_cache);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_zero_capacity_uses_configured_default() {
    let store = InMemoryInsightStore::new(0);
    assert_eq!(store.capacity().await, DEFAULT_INSIGHT_MAX_ENTRIES);

    assert_eq!(InMemoryInsightStore::new(5).capacity().await, 5);
}
