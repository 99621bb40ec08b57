//! Integration tests for playback coordination
//!
//! Exercises the single-active-slot guarantees with stub providers:
//! toggle semantics, provider fallback, and natural completion.

use newsrush::article::ArticleId;
use newsrush::language::Language;
use newsrush::speech::{PlaybackCoordinator, PlaybackHandle, SpeechProvider, ToggleOutcome};
use newsrush::{NewsrushError, Result};
use std::cell::RefCell;
use std::rc::Rc;

type Events = Rc<RefCell<Vec<String>>>;
type Flag = Rc<RefCell<bool>>;

/// Handle that records stop calls and exposes a controllable finish flag
struct StubHandle {
    label: String,
    events: Events,
    finished: Flag,
    stopped: bool,
}

impl PlaybackHandle for StubHandle {
    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.events.borrow_mut().push(format!("stop {}", self.label));
    }

    fn is_finished(&self) -> bool {
        *self.finished.borrow()
    }
}

/// Provider that succeeds or fails according to a shared switch
struct StubProvider {
    name: &'static str,
    fail: Flag,
    events: Events,
    /// Finish flag of the most recently created handle, for tests that
    /// simulate natural completion
    last_finished: Rc<RefCell<Option<Flag>>>,
}

impl SpeechProvider for StubProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn synthesize(&mut self, text: &str, _language: Language) -> Result<Box<dyn PlaybackHandle>> {
        if *self.fail.borrow() {
            self.events.borrow_mut().push(format!("fail {}", self.name));
            return Err(NewsrushError::Speech("stub provider down".to_string()));
        }

        // Label handles by the utterance's leading title
        let label = text.split('.').next().unwrap_or(text).to_string();
        self.events
            .borrow_mut()
            .push(format!("start {} {}", self.name, label));

        let finished: Flag = Rc::new(RefCell::new(false));
        *self.last_finished.borrow_mut() = Some(finished.clone());
        Ok(Box::new(StubHandle {
            label,
            events: self.events.clone(),
            finished,
            stopped: false,
        }))
    }
}

struct Rig {
    coordinator: PlaybackCoordinator,
    events: Events,
    primary_fail: Flag,
    secondary_fail: Flag,
    last_finished: Rc<RefCell<Option<Flag>>>,
}

fn rig() -> Rig {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let primary_fail: Flag = Rc::new(RefCell::new(false));
    let secondary_fail: Flag = Rc::new(RefCell::new(false));
    let last_finished: Rc<RefCell<Option<Flag>>> = Rc::new(RefCell::new(None));

    let providers: Vec<Box<dyn SpeechProvider>> = vec![
        Box::new(StubProvider {
            name: "primary",
            fail: primary_fail.clone(),
            events: events.clone(),
            last_finished: last_finished.clone(),
        }),
        Box::new(StubProvider {
            name: "secondary",
            fail: secondary_fail.clone(),
            events: events.clone(),
            last_finished: last_finished.clone(),
        }),
    ];

    Rig {
        coordinator: PlaybackCoordinator::new(providers),
        events,
        primary_fail,
        secondary_fail,
        last_finished,
    }
}

fn events(rig: &Rig) -> Vec<String> {
    rig.events.borrow().clone()
}

#[test]
fn test_toggle_starts_then_stops() {
    let mut rig = rig();

    let outcome = rig
        .coordinator
        .toggle_speak(ArticleId(1), "first", "body", Language::English)
        .unwrap();
    assert_eq!(outcome, ToggleOutcome::Started { provider: "primary" });
    assert_eq!(rig.coordinator.active_article(), Some(ArticleId(1)));

    // Same article again is a toggle-off
    let outcome = rig
        .coordinator
        .toggle_speak(ArticleId(1), "first", "body", Language::English)
        .unwrap();
    assert_eq!(outcome, ToggleOutcome::Stopped);
    assert_eq!(rig.coordinator.active_article(), None);

    assert_eq!(
        events(&rig),
        vec!["start primary first", "stop first"]
    );
}

#[test]
fn test_toggle_cycle_can_restart() {
    let mut rig = rig();
    let id = ArticleId(7);

    rig.coordinator
        .toggle_speak(id, "again", "", Language::English)
        .unwrap();
    rig.coordinator
        .toggle_speak(id, "again", "", Language::English)
        .unwrap();
    let outcome = rig
        .coordinator
        .toggle_speak(id, "again", "", Language::English)
        .unwrap();

    assert_eq!(outcome, ToggleOutcome::Started { provider: "primary" });
    assert_eq!(rig.coordinator.active_article(), Some(id));
}

#[test]
fn test_handover_stops_previous_before_starting_next() {
    let mut rig = rig();

    rig.coordinator
        .toggle_speak(ArticleId(1), "first", "", Language::English)
        .unwrap();
    rig.coordinator
        .toggle_speak(ArticleId(2), "second", "", Language::English)
        .unwrap();

    assert_eq!(rig.coordinator.active_article(), Some(ArticleId(2)));

    let log = events(&rig);
    let stop_first = log.iter().position(|e| e == "stop first").unwrap();
    let start_second = log.iter().position(|e| e == "start primary second").unwrap();
    assert!(
        stop_first < start_second,
        "previous playback must stop before the next starts: {:?}",
        log
    );

    // Stopping the new active article leaves nothing speaking and no
    // second stop for the first article
    rig.coordinator.stop();
    assert_eq!(rig.coordinator.active_article(), None);
    assert_eq!(
        events(&rig).iter().filter(|e| *e == "stop first").count(),
        1
    );
}

#[test]
fn test_primary_failure_falls_back_to_secondary() {
    let mut rig = rig();
    *rig.primary_fail.borrow_mut() = true;

    let outcome = rig
        .coordinator
        .toggle_speak(ArticleId(1), "headline", "body", Language::Hindi)
        .unwrap();

    assert_eq!(outcome, ToggleOutcome::Started { provider: "secondary" });
    assert_eq!(rig.coordinator.active_article(), Some(ArticleId(1)));
    assert_eq!(
        events(&rig),
        vec!["fail primary", "start secondary headline"]
    );
}

#[test]
fn test_all_providers_failing_is_an_error() {
    let mut rig = rig();
    *rig.primary_fail.borrow_mut() = true;
    *rig.secondary_fail.borrow_mut() = true;

    let result = rig
        .coordinator
        .toggle_speak(ArticleId(1), "headline", "", Language::English);

    assert!(result.is_err());
    assert_eq!(rig.coordinator.active_article(), None);
}

#[test]
fn test_failed_request_still_tears_down_previous_playback() {
    let mut rig = rig();

    rig.coordinator
        .toggle_speak(ArticleId(1), "first", "", Language::English)
        .unwrap();

    // Providers go away before the next request
    *rig.primary_fail.borrow_mut() = true;
    *rig.secondary_fail.borrow_mut() = true;

    let result = rig
        .coordinator
        .toggle_speak(ArticleId(2), "second", "", Language::English);

    assert!(result.is_err());
    // The old handle was stopped and nothing took its place
    assert_eq!(rig.coordinator.active_article(), None);
    assert!(events(&rig).contains(&"stop first".to_string()));
}

#[test]
fn test_natural_completion_clears_the_slot() {
    let mut rig = rig();
    let id = ArticleId(3);

    rig.coordinator
        .toggle_speak(id, "done", "", Language::English)
        .unwrap();
    assert_eq!(rig.coordinator.poll_finished(), None);

    // The utterance finishes on its own
    let finished = rig.last_finished.borrow().clone().unwrap();
    *finished.borrow_mut() = true;

    assert_eq!(rig.coordinator.poll_finished(), Some(id));
    assert_eq!(rig.coordinator.active_article(), None);
    assert_eq!(rig.coordinator.poll_finished(), None);

    // Completion already released the handle; stop is a no-op and the
    // next toggle starts fresh playback rather than toggling off
    let before = events(&rig).len();
    rig.coordinator.stop();
    assert_eq!(events(&rig).len(), before);

    let outcome = rig
        .coordinator
        .toggle_speak(id, "done", "", Language::English)
        .unwrap();
    assert_eq!(outcome, ToggleOutcome::Started { provider: "primary" });
}

#[test]
fn test_at_most_one_active_across_many_toggles() {
    let mut rig = rig();

    for step in 0..10u64 {
        let id = ArticleId(step % 3);
        let _ = rig
            .coordinator
            .toggle_speak(id, &format!("article{}", step % 3), "", Language::English);

        // Observation point: the slot never holds more than one article
        let active = rig.coordinator.active_article();
        let starts = events(&rig)
            .iter()
            .filter(|e| e.starts_with("start"))
            .count();
        let stops = events(&rig)
            .iter()
            .filter(|e| e.starts_with("stop"))
            .count();
        let live = starts - stops;
        assert!(live <= 1, "more than one live handle after step {}", step);
        assert_eq!(live == 1, active.is_some());
    }
}
