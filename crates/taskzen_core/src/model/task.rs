//! Task domain model.
//!
//! # Responsibility
//! - Define the single record the store, sync and seed layers agree on.
//! - Keep the serialized shape stable: `{id, title, completed}`.
//!
//! # Invariants
//! - `id` is unique within one collection. It is derived from the creation
//!   timestamp, but uniqueness, not ordering, is the contract.
//! - `title` keeps the raw input text; blank-after-trim titles never enter
//!   a collection through `TaskStore::add`.

use serde::{Deserialize, Serialize};

/// Stable identifier for a task: epoch milliseconds at creation time.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// A single to-do item.
///
/// Inbound payloads may carry extra fields (remote seed records do); serde
/// ignores them. A missing `completed` defaults to `false` because not every
/// seed source is trustworthy about the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates an incomplete task with the given creation-timestamp id.
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }

    /// Flips the completion flag in place.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
