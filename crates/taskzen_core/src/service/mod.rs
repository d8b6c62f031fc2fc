//! Session orchestration services.
//!
//! # Responsibility
//! - Bridge the in-memory store to durable storage and the seed source.
//! - Keep presentation layers decoupled from storage and transport details.

pub mod session;
pub mod sync;
