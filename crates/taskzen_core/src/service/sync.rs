//! Durable-slot synchronization for the task collection.
//!
//! # Responsibility
//! - Supply the startup seed from the slot when it holds a usable payload.
//! - Mirror every committed collection change back into the slot.
//!
//! # Invariants
//! - One fixed slot key holds the whole serialized collection.
//! - Writes are best-effort: failures are logged and swallowed, never
//!   retried, never batched.
//! - A malformed payload is treated exactly like an absent one.

use crate::model::task::Task;
use crate::repo::slot_repo::SlotRepository;
use log::{debug, warn};

/// Fixed key under which the serialized collection lives.
pub const SLOT_KEY: &str = "tasks";

/// Write-through bridge between the store and the durable slot.
pub struct PersistenceSync<R: SlotRepository> {
    repo: R,
}

impl<R: SlotRepository> PersistenceSync<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Reads the slot and parses it as a task list.
    ///
    /// Returns `None` when the slot is absent, unreadable or malformed; the
    /// caller falls through to the remote seed source in every such case.
    pub fn load_seed(&self) -> Option<Vec<Task>> {
        let payload = match self.repo.read(SLOT_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => return None,
            Err(err) => {
                warn!("event=slot_read module=sync status=error error={err}");
                return None;
            }
        };

        match serde_json::from_str::<Vec<Task>>(&payload) {
            Ok(tasks) => {
                debug!(
                    "event=slot_read module=sync status=ok count={}",
                    tasks.len()
                );
                Some(tasks)
            }
            Err(err) => {
                warn!("event=slot_read module=sync status=malformed error={err}");
                None
            }
        }
    }

    /// Serializes the full collection and overwrites the slot.
    ///
    /// Fire-and-forget by contract: serialization and write failures are
    /// logged and dropped, never surfaced to the caller.
    pub fn persist(&self, tasks: &[Task]) {
        let payload = match serde_json::to_string(tasks) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("event=slot_write module=sync status=error error={err}");
                return;
            }
        };

        if let Err(err) = self.repo.write(SLOT_KEY, &payload) {
            warn!("event=slot_write module=sync status=error error={err}");
        }
    }
}
