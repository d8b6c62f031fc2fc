//! Remote seed source port and implementations.
//!
//! # Responsibility
//! - Define the one-shot bounded fetch contract used on first startup.
//! - Keep transport details (HTTP, fixtures) behind the port.
//!
//! # Invariants
//! - A source is consulted at most once per session, and only when the
//!   durable slot holds no usable payload.
//! - Fetches are single-shot: no retry.

mod http;

pub use http::{HttpSeedSource, DEFAULT_SEED_ENDPOINT};

use crate::model::task::Task;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SeedResult<T> = Result<T, SeedError>;

/// Seed fetch failure.
///
/// Non-fatal by design: the session degrades to an empty collection with an
/// error phase instead of crashing or spinning.
#[derive(Debug)]
pub enum SeedError {
    Transport(reqwest::Error),
    Status(u16),
    Malformed(serde_json::Error),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "seed transport failed: {err}"),
            Self::Status(code) => write!(f, "seed endpoint returned status {code}"),
            Self::Malformed(err) => write!(f, "seed payload did not parse: {err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status(_) => None,
            Self::Malformed(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for SeedError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Read-only source of initial task records.
pub trait SeedSource {
    /// Fetches at most `limit` seed records.
    fn fetch(&self, limit: u32) -> SeedResult<Vec<Task>>;
}

/// Fixed-list seed source for offline sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSeedSource {
    records: Vec<Task>,
}

impl StaticSeedSource {
    pub fn new(records: Vec<Task>) -> Self {
        Self { records }
    }
}

impl SeedSource for StaticSeedSource {
    fn fetch(&self, limit: u32) -> SeedResult<Vec<Task>> {
        Ok(self
            .records
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
