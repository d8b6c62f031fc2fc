//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the single-key durable-slot contract the sync layer depends on.
//! - Isolate SQLite query details from session orchestration.
//!
//! # Invariants
//! - A slot write unconditionally replaces the previous payload.
//! - Repository APIs return semantic errors in addition to DB transport
//!   errors.

pub mod slot_repo;
