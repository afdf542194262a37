// ABOUTME: Integration tests for the weekly coaching insight service
// ABOUTME: Uses a scripted text generator to check prompting, caching, and error mapping
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use async_trait::async_trait;
use coachplan::cache::{InMemoryInsightStore, InsightKey, InsightStore};
use coachplan::config::InsightConfig;
use coachplan::constants::insights::WEEKLY_SUMMARY_KEY;
use coachplan::errors::{AppError, ErrorCode, GenerationError};
use coachplan::insights::{
    CoachingContext, CoachingInsightService, CoachingTone, InsightCache, WeeklyInsightRequest,
};
use coachplan::llm::{ChatRequest, ChatResponse, LlmProvider, LlmTextGenerator, TextGenerator};
use coachplan::models::{ContentKind, MealSlot, PathAssignment};
use coachplan::planning::{InMemoryPlanData, WeeklyPlanner};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use common::{date, enrollment, entry, ingredient, recipe_with_macros};

/// Generator replying with a fixed text and recording every prompt
#[derive(Clone, Default)]
struct ScriptedGenerator {
    reply: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGenerator {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_owned()),
            prompts: Arc::default(),
        }
    }

    fn failing() -> Self {
        Self::default()
    }

    fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.reply
            .clone()
            .ok_or_else(|| GenerationError::failed("scripted failure"))
    }
}

fn coaching_context() -> CoachingContext {
    let data = InMemoryPlanData {
        assignments: vec![
            PathAssignment::new("path-1", ContentKind::Training, "train-a", 1, 8),
            PathAssignment::new("path-1", ContentKind::Nutrition, "nutri-a", 1, 8),
        ],
        meal_entries: vec![entry(
            "nutri-a",
            MealSlot::Lunch,
            200.0,
            "g",
            ingredient("rice", 200.0, 5.0, 40.0, 2.0),
        )],
        recipes: vec![recipe_with_macros("rice-bowl", 400.0, 10.0, 80.0, 4.0)],
    };
    let planner = WeeklyPlanner::with_config(data, coachplan::config::EngineConfig::default());
    let plan = planner
        .plan_week(&enrollment("path-1", date(2025, 3, 3), &[]), date(2025, 3, 10))
        .unwrap();
    CoachingContext::new("Run a half marathon", plan.insight_context())
}

fn service(
    generator: ScriptedGenerator,
) -> CoachingInsightService<ScriptedGenerator, InMemoryInsightStore> {
    let config = InsightConfig::default();
    let cache = InsightCache::with_config(InMemoryInsightStore::from_config(&config), config);
    CoachingInsightService::new(generator, cache)
}

// ============================================================================
// Weekly Insights
// ============================================================================

#[tokio::test]
async fn test_weekly_insight_generates_then_caches() {
    common::init_test_logging();
    let generator = ScriptedGenerator::replying("Hi Alex! Keep lunch carb-focused this week.");
    let service = service(generator.clone());
    let user_id = Uuid::new_v4();

    let first = service
        .weekly_insight(WeeklyInsightRequest::new(user_id, coaching_context()))
        .await
        .unwrap();
    let second = service
        .weekly_insight(WeeklyInsightRequest::new(user_id, coaching_context()))
        .await
        .unwrap();

    assert!(!first.from_cache);
    assert!(second.from_cache);
    assert_eq!(first.content, "Keep lunch carb-focused this week.");
    assert_eq!(generator.calls(), 1);

    let prompt = generator.last_prompt();
    assert!(prompt.contains("Goal: Run a half marathon"));
    assert!(prompt.contains("Week 2"));
    assert!(prompt.contains("LUNCH: 400 kcal"));
    assert!(prompt.contains("1 matching recipe(s)"));

    let key = InsightKey::new(user_id, 2, WEEKLY_SUMMARY_KEY);
    assert!(service.cache().store().get(&key).await.unwrap().is_some());
}

#[tokio::test]
async fn test_refreshed_request_regenerates() {
    let generator = ScriptedGenerator::replying("Stay consistent.");
    let service = service(generator.clone());
    let user_id = Uuid::new_v4();

    service
        .weekly_insight(WeeklyInsightRequest::new(user_id, coaching_context()))
        .await
        .unwrap();
    let refreshed = service
        .weekly_insight(WeeklyInsightRequest::new(user_id, coaching_context()).refreshed())
        .await
        .unwrap();

    assert!(!refreshed.from_cache);
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn test_prompt_follows_configured_sentence_limit() {
    let generator = ScriptedGenerator::replying("One. Two. Three.");
    let config = InsightConfig {
        max_sentences: 2,
        ..InsightConfig::default()
    };
    let cache = InsightCache::with_config(InMemoryInsightStore::from_config(&config), config);
    let service = CoachingInsightService::new(generator.clone(), cache);

    let response = service
        .weekly_insight(WeeklyInsightRequest::new(Uuid::new_v4(), coaching_context()))
        .await
        .unwrap();

    assert!(generator.last_prompt().contains("Use at most 2 sentence(s)."));
    assert_eq!(response.content, "One. Two.");
}

#[tokio::test]
async fn test_tone_change_invalidates_cached_text() {
    let generator = ScriptedGenerator::replying("Push the pace on Thursday.");
    let service = service(generator.clone());
    let user_id = Uuid::new_v4();

    service
        .weekly_insight(WeeklyInsightRequest::new(user_id, coaching_context()))
        .await
        .unwrap();
    let direct = coaching_context().with_tone(CoachingTone::Direct);
    let response = service
        .weekly_insight(WeeklyInsightRequest::new(user_id, direct))
        .await
        .unwrap();

    assert!(!response.from_cache);
    assert!(generator.last_prompt().contains("short, factual"));
    assert_eq!(service.cache().store().len().await.unwrap(), 1);
}

#[tokio::test]
async fn test_users_are_cached_separately() {
    let generator = ScriptedGenerator::replying("Good week.");
    let service = service(generator.clone());

    for _ in 0..2 {
        service
            .weekly_insight(WeeklyInsightRequest::new(Uuid::new_v4(), coaching_context()))
            .await
            .unwrap();
    }

    assert_eq!(generator.calls(), 2);
    assert_eq!(service.cache().store().len().await.unwrap(), 2);
}

#[tokio::test]
async fn test_generator_failure_maps_to_generation_error() {
    let generator = ScriptedGenerator::failing();
    let service = service(generator.clone());

    let error = service
        .weekly_insight(WeeklyInsightRequest::new(Uuid::new_v4(), coaching_context()))
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::ExternalGenerationFailed);
    assert!(service.cache().store().is_empty().await.unwrap());
}

// ============================================================================
// Provider Adapter
// ============================================================================

/// Provider that always fails like an unreachable backend
struct DownProvider;

#[async_trait]
impl LlmProvider for DownProvider {
    fn name(&self) -> &'static str {
        "down"
    }

    fn default_model(&self) -> &str {
        "none"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        Err(AppError::external_service("TextGeneration", "connection refused"))
    }
}

#[tokio::test]
async fn test_provider_errors_become_generation_failures() {
    let generator = LlmTextGenerator::new(DownProvider).with_temperature(0.3);

    let error = generator.generate_text("Summarize week 2").await.unwrap_err();

    assert!(matches!(error, GenerationError::Failed { .. }));
    assert!(error.to_string().contains("connection refused"));
}
