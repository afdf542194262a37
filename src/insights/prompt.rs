// ABOUTME: Prompt construction for weekly coaching insights
// ABOUTME: CoachingContext is both the prompt input and the insight cache hash input
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::planning::{PlanInsightContext, ResolvedWeek};

/// Voice of generated coaching text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachingTone {
    /// Warm and encouraging
    #[default]
    Supportive,
    /// Short and factual
    Direct,
    /// Energetic, challenge-oriented
    Motivational,
}

impl CoachingTone {
    const fn instruction(self) -> &'static str {
        match self {
            Self::Supportive => "Write in a warm, encouraging voice.",
            Self::Direct => "Write in a short, factual voice.",
            Self::Motivational => "Write in an energetic voice that sets a small challenge.",
        }
    }
}

/// Everything that can change a weekly coaching text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingContext {
    /// Requested voice
    pub tone: CoachingTone,
    /// The user's goal in their own words
    pub goal: String,
    /// Resolved plan summary
    pub plan: PlanInsightContext,
}

impl CoachingContext {
    /// Context with the default tone
    #[must_use]
    pub fn new(goal: impl Into<String>, plan: PlanInsightContext) -> Self {
        Self {
            tone: CoachingTone::default(),
            goal: goal.into(),
            plan,
        }
    }

    /// Override the tone
    #[must_use]
    pub const fn with_tone(mut self, tone: CoachingTone) -> Self {
        self.tone = tone;
        self
    }
}

/// Prompt for the weekly coaching summary, asking for at most `max_sentences` sentences
#[must_use]
pub fn build_coaching_prompt(context: &CoachingContext, max_sentences: usize) -> String {
    let plan = &context.plan;
    let mut prompt = String::with_capacity(512);

    prompt.push_str("You are a fitness and nutrition coach. ");
    prompt.push_str(context.tone.instruction());
    let _ = write!(
        prompt,
        " Do not greet the user. Use at most {max_sentences} sentence(s).\n\n"
    );

    let goal = context.goal.trim();
    if !goal.is_empty() {
        let _ = writeln!(prompt, "Goal: {goal}");
    }

    match &plan.content {
        ResolvedWeek::NotConfigured => {
            prompt.push_str(
                "The plan has no content yet. Encourage the user to check back soon.\n",
            );
            return prompt;
        }
        ResolvedWeek::NotStarted => {
            prompt.push_str("The plan has not started yet. Help the user prepare.\n");
            return prompt;
        }
        ResolvedWeek::Configured { week, content } => {
            let _ = writeln!(
                prompt,
                "Week {week}: {} training plan(s), {} nutrition plan(s), {} info item(s).",
                content.training.len(),
                content.nutrition.len(),
                content.info.len()
            );
        }
    }

    if !plan.slot_targets.is_empty() {
        prompt.push_str("Daily meal targets:\n");
    }
    for (slot, target) in &plan.slot_targets {
        let _ = write!(
            prompt,
            "- {}: {:.0} kcal, {:.0} g protein, {:.0} g carbs, {:.0} g fat",
            slot.code(),
            target.calories,
            target.protein,
            target.carbs,
            target.fat
        );
        if target.has_estimated_conversions {
            prompt.push_str(" (estimated)");
        }
        let matched = plan.matched_recipes.get(slot).map_or(0, Vec::len);
        let _ = writeln!(prompt, ", {matched} matching recipe(s)");
    }

    prompt.push_str("\nSummarize what this week asks of the user and one concrete focus.\n");
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn context(content: ResolvedWeek) -> CoachingContext {
        CoachingContext::new(
            "Run a half marathon",
            PlanInsightContext {
                path_id: "path-1".to_owned(),
                week: 2,
                content,
                slot_targets: BTreeMap::new(),
                matched_recipes: BTreeMap::new(),
            },
        )
    }

    #[test]
    fn test_prompt_mentions_goal_and_tone() {
        let prompt = build_coaching_prompt(
            &context(ResolvedWeek::NotStarted).with_tone(CoachingTone::Direct),
            4,
        );
        assert!(prompt.contains("Goal: Run a half marathon"));
        assert!(prompt.contains("short, factual"));
        assert!(prompt.contains("has not started yet"));
        assert!(!prompt.contains("next week"));
    }

    #[test]
    fn test_prompt_uses_sentence_limit() {
        let prompt = build_coaching_prompt(&context(ResolvedWeek::NotConfigured), 2);
        assert!(prompt.contains("Use at most 2 sentence(s)."));
        assert!(!prompt.contains("four"));
    }
}
