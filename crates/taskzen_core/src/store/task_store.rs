//! Task collection store and its mutation operations.
//!
//! # Responsibility
//! - Own the ordered task collection for one session.
//! - Expose add/remove/toggle/rewrite with silent-no-op semantics for
//!   absent ids and blank titles.
//!
//! # Invariants
//! - Task ids stay pairwise distinct; `add` bumps a colliding timestamp id.
//! - Insertion prepends; no other operation reorders the collection.
//! - All operations are synchronous in-memory mutations; none blocks.

use crate::model::task::{Task, TaskId};

/// Ordered task collection, newest-first on insertion.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the collection wholesale with the startup seed.
    ///
    /// # Contract
    /// - Called once, by the sync layer, before user mutations run.
    /// - The seed is accepted as-is; a malformed seed carrying duplicate ids
    ///   is not corrected here.
    pub fn initialize(&mut self, seed: Vec<Task>) {
        self.tasks = seed;
    }

    /// Prepends a new incomplete task with `now_ms` as its id.
    ///
    /// Blank-after-trim titles change nothing. The stored title keeps the
    /// raw untrimmed input. Returns the assigned id, or `None` when the
    /// input was ignored.
    pub fn add(&mut self, title: &str, now_ms: i64) -> Option<TaskId> {
        if title.trim().is_empty() {
            return None;
        }
        let id = self.unique_id(now_ms);
        self.tasks.insert(0, Task::new(id, title));
        Some(id)
    }

    /// Removes the task with a matching id. Returns whether one was removed.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        self.tasks.len() != before
    }

    /// Flips `completed` on the matching task, leaving every other field and
    /// every other task untouched. Returns whether a task matched.
    pub fn toggle_completed(&mut self, id: TaskId) -> bool {
        match self.tasks.iter_mut().find(|task| task.id == id) {
            Some(task) => {
                task.toggle();
                true
            }
            None => false,
        }
    }

    /// Replaces every task wholesale with the rewritten set.
    ///
    /// The optimization pass builds `rewritten` from the snapshot captured
    /// when it was scheduled; edits committed while the pass was pending are
    /// overwritten here by contract.
    pub fn rewrite_all(&mut self, rewritten: Vec<Task>) {
        self.tasks = rewritten;
    }

    /// Current collection, newest-first on insertion.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Owned copy of the collection, for slot writes and pass snapshots.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // Two adds can land in the same millisecond; uniqueness is the hard
    // invariant, so a colliding timestamp id is bumped until free.
    fn unique_id(&self, now_ms: i64) -> TaskId {
        let mut candidate = now_ms;
        while self.tasks.iter().any(|task| task.id == candidate) {
            candidate += 1;
        }
        candidate
    }
}
