//! Behavioural tests for the timer registry
//!
//! These cover the observable contract: log messages, the enable flag, and the
//! quirks that are kept deliberately (restart on double start, stale start times,
//! stranded timers after a panic).

use proptest::prelude::*;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use timetracker_core::constants::logging::LOG_TAG;
use timetracker_core::test_utils::RecordingSink;
use timetracker_core::{FnSink, TimeTracker};

fn recording_tracker() -> (TimeTracker, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    (TimeTracker::with_sink(sink.clone()), sink)
}

#[test]
fn test_load_scenario() {
    let (tracker, sink) = recording_tracker();

    tracker.start("load");
    thread::sleep(Duration::from_millis(50));
    tracker.stop("load");

    let duration = tracker.duration("load").expect("load should have a duration");
    assert!((50..250).contains(&duration), "duration was {duration}");

    sink.clear();
    tracker.print_all_durations();

    let events = sink.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, LOG_TAG);
    assert!(events[0].1.contains("load took "));
    assert!(events[0].1.contains(&duration.to_string()));
}

#[test]
fn test_double_start_measures_from_second_start() {
    let tracker = TimeTracker::silent();

    tracker.start("restart");
    thread::sleep(Duration::from_millis(80));
    tracker.start("restart");
    tracker.stop("restart");

    let duration = tracker.duration("restart").unwrap();
    assert!(duration < 80, "measured from the first start: {duration}");
}

#[test]
fn test_second_stop_reuses_stale_start() {
    let tracker = TimeTracker::silent();

    tracker.start("stale");
    tracker.stop("stale");
    let first = tracker.duration("stale").unwrap();

    thread::sleep(Duration::from_millis(30));
    tracker.stop("stale");
    let second = tracker.duration("stale").unwrap();

    assert!(second >= first + 30, "first {first}, second {second}");
}

#[test]
fn test_restart_overwrites_previous_duration() {
    let tracker = TimeTracker::silent();

    tracker.start("cycle");
    thread::sleep(Duration::from_millis(40));
    tracker.stop("cycle");
    let long = tracker.duration("cycle").unwrap();

    tracker.start("cycle");
    tracker.stop("cycle");
    let short = tracker.duration("cycle").unwrap();

    assert!(long >= 40);
    assert!(short < long);
    assert_eq!(tracker.durations().len(), 1);
}

#[test]
fn test_panicking_block_strands_the_timer() {
    let (tracker, sink) = recording_tracker();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        tracker.measure("boom", || -> u32 { panic!("block failed") })
    }));

    assert!(outcome.is_err());
    assert_eq!(tracker.duration("boom"), None);
    assert_eq!(sink.messages(), vec!["Started time for boom"]);

    // The start time is still there, so a bare stop records a duration.
    tracker.stop("boom");
    assert!(tracker.duration("boom").is_some());
}

#[test]
fn test_scope_stops_even_when_unwinding() {
    let tracker = TimeTracker::silent();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let _scope = tracker.scope("guarded");
        panic!("scope body failed");
    }));

    assert!(outcome.is_err());
    assert!(tracker.duration("guarded").is_some());
}

#[test]
fn test_callback_sink_receives_every_event() {
    let lines = Arc::new(std::sync::Mutex::new(Vec::new()));
    let captured = Arc::clone(&lines);
    let tracker = TimeTracker::with_sink(Arc::new(FnSink::new(move |tag: &str, message: &str| {
        captured.lock().unwrap().push(format!("{tag}: {message}"));
    })));

    tracker.start("cb");
    tracker.stop("cb");
    tracker.stop("missing");
    tracker.reset();

    let lines = lines.lock().unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "TIMETRACKER: Started time for cb");
    assert!(lines[1].starts_with("TIMETRACKER: Stopped timer for cb, duration :"));
    assert!(lines[1].ends_with(" ms"));
    assert_eq!(lines[2], "TIMETRACKER: No timer initiated for this tag");
    assert_eq!(lines[3], "TIMETRACKER: All times are cleared");
}

#[test]
fn test_disabled_start_does_not_arm_timer() {
    let tracker = TimeTracker::silent();

    tracker.set_enabled(false);
    tracker.start("late");
    tracker.set_enabled(true);
    tracker.stop("late");

    assert_eq!(tracker.duration("late"), None);
}

proptest! {
    #[test]
    fn prop_unstarted_tags_have_no_duration(tag in ".*", other in ".*") {
        let tracker = TimeTracker::silent();
        prop_assume!(tag != other);

        tracker.start(&other);
        tracker.stop(&other);
        tracker.stop(&tag);

        prop_assert_eq!(tracker.duration(&tag), None);
        prop_assert!(tracker.duration(&other).is_some());
    }

    #[test]
    fn prop_reset_clears_all_tags(
        tags in proptest::collection::vec("[a-z]{1,8}", 1..10),
        enabled in any::<bool>()
    ) {
        let tracker = TimeTracker::silent();
        for tag in &tags {
            tracker.start(tag);
            tracker.stop(tag);
        }

        tracker.set_enabled(enabled);
        tracker.reset();
        tracker.set_enabled(true);

        for tag in &tags {
            prop_assert_eq!(tracker.duration(tag), None);
        }
    }
}
