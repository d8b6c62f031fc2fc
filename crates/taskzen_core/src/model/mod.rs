//! Domain model for the task-list session.
//!
//! # Responsibility
//! - Define the canonical task record used by every other layer.
//! - Pin the wire shape shared by slot payloads and remote seed records.
//!
//! # Invariants
//! - Every task is identified by an integer id, unique within a collection.
//! - Deletion is hard removal by id; there are no tombstones.

pub mod task;
