//! Core domain logic for TaskZen.
//! This crate is the single source of truth for task-list behavior.

pub mod analysis;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod store;

pub use analysis::{
    prioritize_task, prioritize_title, AnalysisScheduler, ANALYSIS_DELAY_MS, URGENT_MARKER,
};
pub use clock::{Clock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Task, TaskId};
pub use repo::slot_repo::{
    MemorySlotRepository, RepoError, RepoResult, SlotRepository, SqliteSlotRepository,
};
pub use seed::{
    HttpSeedSource, SeedError, SeedResult, SeedSource, StaticSeedSource, DEFAULT_SEED_ENDPOINT,
};
pub use service::session::{LoadPhase, SessionConfig, TaskSession};
pub use service::sync::{PersistenceSync, SLOT_KEY};
pub use store::task_store::TaskStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
