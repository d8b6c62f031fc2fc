//! In-memory ownership of the task collection.
//!
//! # Responsibility
//! - Hold the one ordered collection a session operates on.
//! - Keep mutation semantics (silent no-ops, prepend ordering) in one place.
//!
//! # Invariants
//! - This layer performs no I/O; mirroring committed changes to durable
//!   storage is the sync layer's job.

pub mod task_store;
