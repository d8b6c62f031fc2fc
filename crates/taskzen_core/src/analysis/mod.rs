//! Simulated title-optimization pass.
//!
//! # Responsibility
//! - Normalize task titles with the canonical urgency marker.
//! - Hold the one delayed bulk rewrite and guard its pending state.
//!
//! # Invariants
//! - `prioritize_title` is idempotent: every known marker variant is
//!   stripped before the canonical marker is prepended.
//! - At most one pass is pending at a time; re-triggering is rejected.
//! - A pass rewrites the snapshot captured at trigger time, not the
//!   collection as of resolution. Interim edits are overwritten.

use crate::model::task::Task;
use once_cell::sync::Lazy;
use regex::Regex;

/// Canonical urgency marker prepended to every title by the pass.
pub const URGENT_MARKER: &str = "🚀 СРОЧНО: ";

/// Delay between triggering a pass and its rewrite becoming due.
pub const ANALYSIS_DELAY_MS: i64 = 1_000;

// Older sessions persisted titles marked with the bare rocket or the bare
// label; all variants strip to the same stem so re-marking stays idempotent.
static MARKER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:🚀\s*)?(?:СРОЧНО:\s*)?").expect("valid marker regex"));

/// Returns the title with exactly one canonical marker at the front.
pub fn prioritize_title(title: &str) -> String {
    let stem = MARKER_PREFIX_RE.replace(title, "");
    format!("{URGENT_MARKER}{stem}")
}

/// Applies [`prioritize_title`] to one task; other fields pass through.
pub fn prioritize_task(task: &Task) -> Task {
    Task {
        id: task.id,
        title: prioritize_title(&task.title),
        completed: task.completed,
    }
}

/// One scheduled rewrite, held until its due instant.
#[derive(Debug)]
struct PendingPass {
    due_at_ms: i64,
    snapshot: Vec<Task>,
}

/// Pending-state guard and delayed-job handle for the optimization pass.
///
/// The scheduler never reads time itself; the session compares its injected
/// clock against the due instant by calling [`AnalysisScheduler::poll`].
#[derive(Debug, Default)]
pub struct AnalysisScheduler {
    pending: Option<PendingPass>,
}

impl AnalysisScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules one pass over `snapshot`, due `delay_ms` after `now_ms`.
    ///
    /// Returns `false` and schedules nothing while a pass is already
    /// pending.
    pub fn trigger(&mut self, now_ms: i64, delay_ms: i64, snapshot: Vec<Task>) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(PendingPass {
            due_at_ms: now_ms + delay_ms,
            snapshot,
        });
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resolves the pending pass once its due instant has been reached.
    ///
    /// Returns the rewritten snapshot and clears the pending state, or
    /// `None` while nothing is due.
    pub fn poll(&mut self, now_ms: i64) -> Option<Vec<Task>> {
        if self.pending.as_ref()?.due_at_ms > now_ms {
            return None;
        }
        let pass = self.pending.take()?;
        Some(pass.snapshot.iter().map(prioritize_task).collect())
    }

    /// Drops a pending pass without applying it, for teardown paths.
    /// Returns whether one was dropped.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{prioritize_title, AnalysisScheduler, URGENT_MARKER};
    use crate::model::task::Task;

    #[test]
    fn prioritize_title_marks_a_plain_title_once() {
        let marked = prioritize_title("Buy milk");
        assert_eq!(marked, "🚀 СРОЧНО: Buy milk");
        assert_eq!(prioritize_title(&marked), marked);
    }

    #[test]
    fn prioritize_title_normalizes_older_marker_variants() {
        assert_eq!(prioritize_title("🚀 Buy milk"), "🚀 СРОЧНО: Buy milk");
        assert_eq!(prioritize_title("СРОЧНО: Buy milk"), "🚀 СРОЧНО: Buy milk");
        assert_eq!(prioritize_title("🚀 СРОЧНО: Buy milk"), "🚀 СРОЧНО: Buy milk");
    }

    #[test]
    fn prioritize_title_keeps_marker_like_text_after_the_stem_start() {
        let marked = prioritize_title("Mail СРОЧНО: draft");
        assert_eq!(marked, format!("{URGENT_MARKER}Mail СРОЧНО: draft"));
    }

    #[test]
    fn trigger_is_rejected_while_a_pass_is_pending() {
        let mut scheduler = AnalysisScheduler::new();
        assert!(scheduler.trigger(0, 1_000, vec![Task::new(1, "a")]));
        assert!(!scheduler.trigger(10, 1_000, vec![Task::new(2, "b")]));
        assert!(scheduler.is_pending());
    }

    #[test]
    fn poll_before_the_due_instant_keeps_the_pass_pending() {
        let mut scheduler = AnalysisScheduler::new();
        scheduler.trigger(0, 1_000, vec![Task::new(1, "a")]);

        assert!(scheduler.poll(999).is_none());
        assert!(scheduler.is_pending());

        let rewritten = scheduler.poll(1_000).expect("pass should be due");
        assert_eq!(rewritten[0].title, "🚀 СРОЧНО: a");
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn poll_rewrites_the_captured_snapshot_not_a_live_view() {
        let mut scheduler = AnalysisScheduler::new();
        scheduler.trigger(0, 1_000, vec![Task::new(1, "captured")]);

        let rewritten = scheduler.poll(2_000).expect("pass should be due");
        assert_eq!(rewritten.len(), 1);
        assert_eq!(rewritten[0].id, 1);
        assert_eq!(rewritten[0].title, "🚀 СРОЧНО: captured");
    }

    #[test]
    fn cancel_drops_the_pending_pass() {
        let mut scheduler = AnalysisScheduler::new();
        scheduler.trigger(0, 1_000, vec![Task::new(1, "a")]);

        assert!(scheduler.cancel());
        assert!(!scheduler.is_pending());
        assert!(scheduler.poll(5_000).is_none());
        assert!(!scheduler.cancel());
    }
}
