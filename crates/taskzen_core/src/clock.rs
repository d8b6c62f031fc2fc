//! Time port for id derivation and analysis scheduling.
//!
//! # Responsibility
//! - Supply "now" in epoch milliseconds to the session.
//!
//! # Invariants
//! - Core code never reads wall-clock time ambiently; the clock is always
//!   injected, so tests can drive ids and due instants deterministically.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall-clock implementation used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as i64)
            .unwrap_or(0)
    }
}
