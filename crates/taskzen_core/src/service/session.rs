//! Session facade: store + slot sync + seed source + analysis scheduling.
//!
//! # Responsibility
//! - Run the startup protocol once and expose its outcome.
//! - Route user mutations through the store and mirror each commit out.
//! - Gate the simulated optimization pass behind its pending flag.
//!
//! # Invariants
//! - The slot seed wins over the remote source; at most one remote fetch
//!   happens per session, and only when the slot has no usable payload.
//! - Every committed change, the initial seed delivery included, produces
//!   exactly one slot write.
//! - A failed remote fetch leaves the slot untouched, so the next session
//!   retries it.

use crate::analysis::{AnalysisScheduler, ANALYSIS_DELAY_MS};
use crate::clock::Clock;
use crate::model::task::{Task, TaskId};
use crate::repo::slot_repo::SlotRepository;
use crate::seed::SeedSource;
use crate::service::sync::PersistenceSync;
use crate::store::task_store::TaskStore;
use log::{info, warn};

/// Startup outcome the presentation boundary renders.
///
/// `SeedFailed` is terminal for the session: it stays usable over an empty
/// collection instead of spinning on an unfulfilled load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Ready,
    SeedFailed,
}

/// Tuning knobs for one session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Bound passed to the seed source on first startup.
    pub seed_limit: u32,
    /// Delay between triggering the optimization pass and its rewrite.
    pub analysis_delay_ms: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed_limit: 5,
            analysis_delay_ms: ANALYSIS_DELAY_MS,
        }
    }
}

/// One interactive task-list session.
pub struct TaskSession<R: SlotRepository, C: Clock> {
    store: TaskStore,
    sync: PersistenceSync<R>,
    clock: C,
    scheduler: AnalysisScheduler,
    config: SessionConfig,
    phase: LoadPhase,
}

impl<R: SlotRepository, C: Clock> TaskSession<R, C> {
    /// Runs the startup protocol and returns the initialized session.
    ///
    /// # Contract
    /// - A present, parseable slot payload is the seed; the remote source
    ///   is not consulted.
    /// - Otherwise: one remote fetch of at most `config.seed_limit` records.
    /// - The delivered seed is re-persisted verbatim; overwriting an
    ///   unchanged payload is a no-op in effect.
    ///
    /// The seed source is borrowed only for the duration of startup, which
    /// enforces the consult-at-most-once rule structurally.
    pub fn start<S: SeedSource>(repo: R, seeds: &S, clock: C, config: SessionConfig) -> Self {
        let sync = PersistenceSync::new(repo);
        let mut store = TaskStore::new();
        let mut phase = LoadPhase::Ready;

        match sync.load_seed() {
            Some(seed) => {
                info!(
                    "event=session_start module=session seed=slot count={}",
                    seed.len()
                );
                store.initialize(seed);
                sync.persist(store.tasks());
            }
            None => match seeds.fetch(config.seed_limit) {
                Ok(seed) => {
                    info!(
                        "event=session_start module=session seed=remote count={}",
                        seed.len()
                    );
                    store.initialize(seed);
                    sync.persist(store.tasks());
                }
                Err(err) => {
                    warn!("event=session_start module=session status=seed_failed error={err}");
                    phase = LoadPhase::SeedFailed;
                }
            },
        }

        Self {
            store,
            sync,
            clock,
            scheduler: AnalysisScheduler::new(),
            config,
            phase,
        }
    }

    /// Startup outcome.
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Current collection, newest-first on insertion.
    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Whether an optimization pass is scheduled and not yet applied.
    pub fn analysis_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Adds a task titled `title`.
    ///
    /// Blank-after-trim input changes nothing and writes nothing. Returns
    /// the assigned id when a task was added.
    pub fn add(&mut self, title: &str) -> Option<TaskId> {
        let id = self.store.add(title, self.clock.now_ms())?;
        self.sync.persist(self.store.tasks());
        Some(id)
    }

    /// Removes the task with `id`, if present.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let removed = self.store.remove(id);
        if removed {
            self.sync.persist(self.store.tasks());
        }
        removed
    }

    /// Flips completion on the task with `id`, if present.
    pub fn toggle_completed(&mut self, id: TaskId) -> bool {
        let toggled = self.store.toggle_completed(id);
        if toggled {
            self.sync.persist(self.store.tasks());
        }
        toggled
    }

    /// Triggers the simulated optimization pass over the current collection.
    ///
    /// Returns `false` while a pass is already pending. The pass rewrites
    /// the snapshot captured here; edits committed before the pass resolves
    /// are overwritten at resolution.
    pub fn run_analysis(&mut self) -> bool {
        let accepted = self.scheduler.trigger(
            self.clock.now_ms(),
            self.config.analysis_delay_ms,
            self.store.snapshot(),
        );
        if accepted {
            info!(
                "event=analysis_schedule module=session due_in_ms={}",
                self.config.analysis_delay_ms
            );
        }
        accepted
    }

    /// Resolves a due optimization pass, if any. Returns whether a rewrite
    /// was applied.
    ///
    /// The host calls this from its event loop; nothing happens until the
    /// scheduled delay has elapsed on the session clock.
    pub fn tick(&mut self) -> bool {
        match self.scheduler.poll(self.clock.now_ms()) {
            Some(rewritten) => {
                info!(
                    "event=analysis_apply module=session count={}",
                    rewritten.len()
                );
                self.store.rewrite_all(rewritten);
                self.sync.persist(self.store.tasks());
                true
            }
            None => false,
        }
    }

    /// Drops a pending optimization pass, for teardown paths. Returns
    /// whether one was dropped.
    pub fn cancel_analysis(&mut self) -> bool {
        self.scheduler.cancel()
    }
}
