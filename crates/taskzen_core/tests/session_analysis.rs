use std::cell::Cell;
use std::rc::Rc;

use taskzen_core::{
    Clock, MemorySlotRepository, SessionConfig, StaticSeedSource, Task, TaskSession, URGENT_MARKER,
};

/// Hand-driven clock shared between the test and the session it drives.
#[derive(Clone, Default)]
struct ManualClock {
    now_ms: Rc<Cell<i64>>,
}

impl ManualClock {
    fn advance(&self, delta_ms: i64) {
        self.now_ms.set(self.now_ms.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.get()
    }
}

fn seeded_session(
    titles: &[&str],
) -> (
    TaskSession<MemorySlotRepository, ManualClock>,
    MemorySlotRepository,
    ManualClock,
) {
    let repo = MemorySlotRepository::new();
    let clock = ManualClock::default();
    // Keep add-derived ids far away from the small seed ids.
    clock.advance(1_000_000);

    let records = titles
        .iter()
        .enumerate()
        .map(|(index, title)| Task::new(index as i64 + 1, *title))
        .collect();
    let seeds = StaticSeedSource::new(records);
    let session = TaskSession::start(
        repo.clone(),
        &seeds,
        clock.clone(),
        SessionConfig::default(),
    );
    (session, repo, clock)
}

#[test]
fn analysis_marks_every_title_after_the_delay() {
    let (mut session, _repo, clock) = seeded_session(&["Buy milk", "Call mom"]);

    assert!(session.run_analysis());
    assert!(session.analysis_pending());
    assert!(!session.tick());

    clock.advance(999);
    assert!(!session.tick());

    clock.advance(1);
    assert!(session.tick());

    assert!(!session.analysis_pending());
    assert_eq!(session.tasks()[0].title, "🚀 СРОЧНО: Buy milk");
    assert_eq!(session.tasks()[1].title, "🚀 СРОЧНО: Call mom");
}

#[test]
fn a_second_pass_leaves_titles_unchanged() {
    let (mut session, _repo, clock) = seeded_session(&["Buy milk"]);

    session.run_analysis();
    clock.advance(1_000);
    session.tick();
    let first = session.tasks().to_vec();

    session.run_analysis();
    clock.advance(1_000);
    session.tick();

    assert_eq!(session.tasks(), first.as_slice());
}

#[test]
fn retrigger_while_pending_is_rejected_and_writes_nothing_extra() {
    let (mut session, repo, clock) = seeded_session(&["Buy milk"]);
    let writes_after_start = repo.write_count();

    assert!(session.run_analysis());
    assert!(!session.run_analysis());
    assert_eq!(repo.write_count(), writes_after_start);

    clock.advance(1_000);
    assert!(session.tick());
    assert!(!session.tick());
    assert_eq!(repo.write_count(), writes_after_start + 1);
}

#[test]
fn a_pending_pass_overwrites_interim_edits() {
    let (mut session, _repo, clock) = seeded_session(&["Buy milk"]);

    session.run_analysis();
    session.add("added while pending").unwrap();
    assert_eq!(session.tasks().len(), 2);

    clock.advance(1_000);
    session.tick();

    // The rewrite is built from the pre-trigger snapshot.
    assert_eq!(session.tasks().len(), 1);
    assert_eq!(session.tasks()[0].title, format!("{URGENT_MARKER}Buy milk"));
}

#[test]
fn cancel_prevents_a_scheduled_rewrite() {
    let (mut session, repo, clock) = seeded_session(&["Buy milk"]);
    let writes_after_start = repo.write_count();

    session.run_analysis();
    assert!(session.cancel_analysis());
    clock.advance(10_000);

    assert!(!session.tick());
    assert_eq!(session.tasks()[0].title, "Buy milk");
    assert_eq!(repo.write_count(), writes_after_start);
}

#[test]
fn analysis_delay_is_configurable() {
    let repo = MemorySlotRepository::new();
    let clock = ManualClock::default();
    let seeds = StaticSeedSource::new(vec![Task::new(1, "fast")]);
    let config = SessionConfig {
        analysis_delay_ms: 50,
        ..SessionConfig::default()
    };
    let mut session = TaskSession::start(repo, &seeds, clock.clone(), config);

    session.run_analysis();
    clock.advance(49);
    assert!(!session.tick());

    clock.advance(1);
    assert!(session.tick());
}

#[test]
fn completion_flags_pass_through_the_rewrite() {
    let (mut session, _repo, clock) = seeded_session(&["Buy milk", "Call mom"]);
    let first_id = session.tasks()[0].id;
    session.toggle_completed(first_id);

    session.run_analysis();
    clock.advance(1_000);
    session.tick();

    assert!(session.tasks()[0].completed);
    assert!(!session.tasks()[1].completed);
    assert_eq!(session.tasks()[0].id, first_id);
}
