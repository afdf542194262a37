// ABOUTME: Sibling position renumbering for moves and removals applied as one atomic batch
// ABOUTME: Planning is pure; the injected PositionStore applies a batch all-or-nothing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Coachplan Contributors

//! # Sibling Reordering
//!
//! Ordered siblings (exercises in a training day, entries in a slot) carry
//! a dense `0..n` position. Moving or removing one renumbers the others.
//! [`plan_move`] and [`plan_removal`] compute the whole renumbering up front;
//! a [`PositionStore`] applies it so that no reader ever sees a partially
//! renumbered sequence.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::errors::{AppError, AppResult};

/// A sibling and its current position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionedItem {
    /// Item identifier
    pub id: String,
    /// Current position
    pub position: u32,
}

impl PositionedItem {
    /// Create a positioned item
    #[must_use]
    pub fn new(id: impl Into<String>, position: u32) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }
}

/// One position change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionUpdate {
    /// Item identifier
    pub id: String,
    /// Position the plan was computed against
    pub from: u32,
    /// New position
    pub to: u32,
}

/// Everything one reorder or removal changes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionBatch {
    /// Items deleted by the batch
    pub removals: Vec<String>,
    /// Position changes of the remaining items
    pub updates: Vec<PositionUpdate>,
}

impl PositionBatch {
    /// Whether the batch changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removals.is_empty() && self.updates.is_empty()
    }
}

/// Items in current order: position, then id
fn ordered(items: &[PositionedItem]) -> Vec<&PositionedItem> {
    let mut sorted: Vec<&PositionedItem> = items.iter().collect();
    sorted.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
    sorted
}

fn renumber(sequence: &[&PositionedItem]) -> Vec<PositionUpdate> {
    sequence
        .iter()
        .zip(0_u32..)
        .filter(|(item, index)| item.position != *index)
        .map(|(item, index)| PositionUpdate {
            id: item.id.clone(),
            from: item.position,
            to: index,
        })
        .collect()
}

fn index_of(sequence: &[&PositionedItem], item_id: &str) -> AppResult<usize> {
    sequence
        .iter()
        .position(|item| item.id == item_id)
        .ok_or_else(|| AppError::not_found(format!("Item {item_id}")))
}

/// Renumbering for moving `item_id` to `new_index`
///
/// An index past the end moves the item last. Only changed rows are returned;
/// gaps or duplicates in the current positions are repaired on the way.
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` when `item_id` is not among `items`.
pub fn plan_move(
    items: &[PositionedItem],
    item_id: &str,
    new_index: usize,
) -> AppResult<PositionBatch> {
    let mut sequence = ordered(items);
    let from = index_of(&sequence, item_id)?;
    let moved = sequence.remove(from);
    let to = new_index.min(sequence.len());
    sequence.insert(to, moved);

    Ok(PositionBatch {
        removals: Vec::new(),
        updates: renumber(&sequence),
    })
}

/// Removal of `item_id` plus renumbering of the remaining siblings
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` when `item_id` is not among `items`.
pub fn plan_removal(items: &[PositionedItem], item_id: &str) -> AppResult<PositionBatch> {
    let mut sequence = ordered(items);
    let index = index_of(&sequence, item_id)?;
    sequence.remove(index);

    Ok(PositionBatch {
        removals: vec![item_id.to_owned()],
        updates: renumber(&sequence),
    })
}

/// Storage able to apply a position batch atomically
#[async_trait]
pub trait PositionStore: Send + Sync {
    /// Apply every removal and update, or none of them
    ///
    /// # Errors
    ///
    /// Returns an error, leaving storage untouched, if any part of the batch
    /// cannot be applied.
    async fn apply_position_batch(&self, batch: &PositionBatch) -> AppResult<()>;
}

/// In-memory position store validating a batch before mutating anything
#[derive(Debug, Default)]
pub struct InMemoryPositionStore {
    positions: RwLock<HashMap<String, u32>>,
}

impl InMemoryPositionStore {
    /// Store seeded with items
    #[must_use]
    pub fn new(items: &[PositionedItem]) -> Self {
        Self {
            positions: RwLock::new(
                items
                    .iter()
                    .map(|item| (item.id.clone(), item.position))
                    .collect(),
            ),
        }
    }

    /// Current items in position order
    pub async fn items(&self) -> Vec<PositionedItem> {
        let positions = self.positions.read().await;
        let mut items: Vec<PositionedItem> = positions
            .iter()
            .map(|(id, position)| PositionedItem::new(id.clone(), *position))
            .collect();
        drop(positions);
        items.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.id.cmp(&b.id)));
        items
    }

    fn validate(positions: &HashMap<String, u32>, batch: &PositionBatch) -> AppResult<()> {
        for id in &batch.removals {
            if !positions.contains_key(id) {
                return Err(AppError::not_found(format!("Item {id}")));
            }
        }
        for update in &batch.updates {
            match positions.get(&update.id) {
                None => return Err(AppError::not_found(format!("Item {}", update.id))),
                Some(current) if *current != update.from => {
                    return Err(AppError::invalid_input(format!(
                        "Item {} moved concurrently (expected position {}, found {current})",
                        update.id, update.from
                    )));
                }
                Some(_) => {}
            }
        }

        let removed: HashSet<&str> = batch.removals.iter().map(String::as_str).collect();
        let updated: HashMap<&str, u32> = batch
            .updates
            .iter()
            .map(|u| (u.id.as_str(), u.to))
            .collect();
        let mut seen = HashSet::new();
        for (id, position) in positions {
            if removed.contains(id.as_str()) {
                continue;
            }
            let final_position = updated.get(id.as_str()).copied().unwrap_or(*position);
            if !seen.insert(final_position) {
                return Err(AppError::invalid_input(format!(
                    "Batch leaves two items at position {final_position}"
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PositionStore for InMemoryPositionStore {
    #[instrument(skip_all, fields(removals = batch.removals.len(), updates = batch.updates.len()))]
    async fn apply_position_batch(&self, batch: &PositionBatch) -> AppResult<()> {
        let mut positions = self.positions.write().await;
        Self::validate(&positions, batch)?;

        for id in &batch.removals {
            positions.remove(id);
        }
        for update in &batch.updates {
            positions.insert(update.id.clone(), update.to);
        }
        drop(positions);
        debug!("Position batch applied");
        Ok(())
    }
}
