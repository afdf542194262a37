// ABOUTME: Weekly coaching insight service combining prompt building, generation, and caching
// ABOUTME: The generator is only invoked when the insight cache misses
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use super::prompt::{build_coaching_prompt, CoachingContext};
use super::{InsightCache, InsightRequest, InsightResponse};
use crate::cache::{InsightKey, InsightStore};
use crate::constants::insights::WEEKLY_SUMMARY_KEY;
use crate::errors::AppResult;
use crate::llm::TextGenerator;

/// Request for one user's weekly coaching text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyInsightRequest {
    /// User the text is for
    pub user_id: Uuid,
    /// Insight kind; defaults to the weekly summary
    pub insight_key: String,
    /// Generation context (also the cache hash input)
    pub context: CoachingContext,
    /// Bypass the cache
    pub force_refresh: bool,
}

impl WeeklyInsightRequest {
    /// Weekly summary request served from cache when possible
    #[must_use]
    pub fn new(user_id: Uuid, context: CoachingContext) -> Self {
        Self {
            user_id,
            insight_key: WEEKLY_SUMMARY_KEY.to_owned(),
            context,
            force_refresh: false,
        }
    }

    /// Bypass the cache
    #[must_use]
    pub const fn refreshed(mut self) -> Self {
        self.force_refresh = true;
        self
    }
}

/// Generates weekly coaching text through an [`InsightCache`]
pub struct CoachingInsightService<G: TextGenerator, S: InsightStore> {
    generator: G,
    cache: InsightCache<S>,
}

impl<G: TextGenerator, S: InsightStore> CoachingInsightService<G, S> {
    /// Bundle a generator with a cache
    #[must_use]
    pub const fn new(generator: G, cache: InsightCache<S>) -> Self {
        Self { generator, cache }
    }

    /// Underlying cache
    #[must_use]
    pub const fn cache(&self) -> &InsightCache<S> {
        &self.cache
    }

    /// Weekly insight for the request, generated only on a cache miss
    ///
    /// # Errors
    ///
    /// Returns `EXTERNAL_GENERATION_FAILED` when generation fails, or a
    /// storage/serialization error from the cache.
    #[instrument(skip(self, request), fields(user_id = %request.user_id, week = request.context.plan.week))]
    pub async fn weekly_insight(
        &self,
        request: WeeklyInsightRequest,
    ) -> AppResult<InsightResponse> {
        let prompt =
            build_coaching_prompt(&request.context, self.cache.config().max_sentences);
        let key = InsightKey::new(
            request.user_id,
            request.context.plan.week,
            request.insight_key,
        );
        let insight_request =
            InsightRequest::new(key, request.context).with_force_refresh(request.force_refresh);

        self.cache
            .get_or_generate(&insight_request, || self.generator.generate_text(&prompt))
            .await
    }
}
