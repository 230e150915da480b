use std::time::Duration;

use reader::{FRAGMENT_DELAY, Phase, ReaderEvent, ReaderState};
use tracing::Level;
use tts_testkit::{Call, capture};

mod support;
use support::{FakeDocument, Harness};

fn article() -> FakeDocument {
    FakeDocument::new()
        .with("#a", "  First paragraph. ")
        .with("#b", "")
        .with("#c", "Third paragraph.")
        .with("#blank", " \n\t ")
}

#[test]
fn blank_fragments_are_never_spoken() {
    let mut h = Harness::new(article());
    h.reader.read_from_selectors(&["#b", "#blank", "#c"]);

    assert_eq!(h.engine.spoken(), vec!["Third paragraph."]);
    assert_eq!(h.reader.current_text(), Some("Third paragraph."));
}

#[test]
fn first_fragment_is_trimmed_and_spoken_immediately() {
    let mut h = Harness::new(article());
    h.reader.read_from_selectors(&["#a", "#c"]);

    assert_eq!(h.engine.spoken(), vec!["First paragraph."]);
    assert_eq!(h.reader.phase(), Phase::Delivering { index: 0 });
    assert_eq!(h.reader.state(), ReaderState::Reading);
    assert_eq!(h.timer.pending(), 0);
}

#[test]
fn empty_middle_fragment_is_skipped_after_delay() {
    let mut h = Harness::new(article());
    h.reader.read_from_selectors(&["#a", "#b", "#c"]);
    assert_eq!(h.engine.spoken().len(), 1);

    h.finish_utterance();
    assert_eq!(h.timer.delays(), vec![FRAGMENT_DELAY]);
    assert_eq!(h.reader.phase(), Phase::Waiting { index: 1 });
    assert_eq!(h.engine.spoken().len(), 1);

    h.elapse();
    assert_eq!(h.engine.spoken(), vec!["First paragraph.", "Third paragraph."]);
    assert_eq!(h.reader.phase(), Phase::Delivering { index: 2 });
}

#[test]
fn nothing_is_submitted_after_the_last_fragment() {
    let mut h = Harness::new(article());
    h.reader.read_from_selectors(&["#a", "#c"]);
    h.finish_utterance();
    h.elapse();
    h.finish_utterance();
    h.elapse();

    assert_eq!(h.engine.spoken().len(), 2);
    assert_eq!(h.timer.pending(), 0);
    assert_eq!(h.reader.phase(), Phase::Idle);
    assert_eq!(h.reader.state(), ReaderState::Idle);
}

#[test]
fn invalid_and_unmatched_selectors_are_skipped() {
    let mut h = Harness::new(article());
    let (_, logs) = capture(|| h.reader.read_from_selectors(&["!!nope", "#missing", "#c"]));

    assert_eq!(h.engine.spoken(), vec!["Third paragraph."]);
    assert_eq!(logs.count(Level::WARN), 1);
}

#[test]
fn no_resolvable_selectors_is_a_quiet_no_op() {
    let mut h = Harness::new(article());
    h.reader.read_from_selectors::<&str>(&[]);
    h.reader.read_from_selectors(&["#missing", "#b"]);

    assert!(h.engine.calls().is_empty());
    assert_eq!(h.reader.phase(), Phase::Idle);
    assert_eq!(h.reader.current_text(), None);
}

#[test]
fn reading_while_speaking_cancels_first() {
    let mut h = Harness::new(article());
    h.reader.read_from_selectors(&["#a"]);
    h.reader.read_from_selectors(&["#c"]);

    let calls = h.engine.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[1], Call::Cancel);
    assert!(matches!(&calls[2], Call::Speak(u) if u.text == "Third paragraph."));
}

#[test]
fn superseded_completion_does_not_advance() {
    let mut h = Harness::new(article());
    h.reader.read_from_selectors(&["#a", "#c"]);
    h.reader.play();

    h.reader.handle(ReaderEvent::UtteranceEnded { ticket: 1 });
    assert_eq!(h.timer.pending(), 0);
    assert_eq!(h.reader.phase(), Phase::Delivering { index: 0 });

    h.finish_utterance();
    assert_eq!(h.timer.pending(), 1);
}

#[test]
fn delay_from_replaced_session_is_dropped() {
    let mut h = Harness::new(article());
    h.reader.read_from_selectors(&["#a", "#c"]);
    h.finish_utterance();
    h.reader.read_from_selectors(&["#a"]);

    h.elapse();
    assert_eq!(h.engine.spoken(), vec!["First paragraph.", "First paragraph."]);
}

#[test]
fn stop_during_delay_prevents_next_fragment() {
    let mut h = Harness::new(article());
    h.reader.read_from_selectors(&["#a", "#c"]);
    h.finish_utterance();
    h.reader.stop().unwrap();

    h.elapse();
    assert_eq!(h.engine.spoken(), vec!["First paragraph."]);
    assert_eq!(h.reader.phase(), Phase::Idle);
}

#[test]
fn play_after_stop_restarts_fragment_and_continues() {
    let mut h = Harness::new(article());
    h.reader.read_from_selectors(&["#a", "#c"]);
    h.reader.stop().unwrap();
    h.reader.play();

    assert_eq!(h.engine.spoken(), vec!["First paragraph.", "First paragraph."]);
    h.finish_utterance();
    h.elapse();
    assert_eq!(
        h.engine.spoken(),
        vec!["First paragraph.", "First paragraph.", "Third paragraph."]
    );
}

#[test]
fn play_during_delay_replays_current_fragment() {
    let mut h = Harness::new(article());
    h.reader.read_from_selectors(&["#a", "#c"]);
    h.finish_utterance();
    h.reader.play();
    h.elapse();

    assert_eq!(h.engine.spoken(), vec!["First paragraph.", "First paragraph."]);
    assert_eq!(h.reader.phase(), Phase::Delivering { index: 0 });
}

#[test]
fn custom_delay_is_used_between_fragments() {
    let h = Harness::new(article());
    let Harness {
        reader,
        mut events,
        engine,
        timer,
    } = h;
    let mut reader = reader.with_delay(Duration::from_millis(750));
    reader.read_from_selectors(&["#a", "#c"]);
    engine.finish();
    reader.drain(&mut events);

    assert_eq!(timer.delays(), vec![Duration::from_millis(750)]);
}

#[test]
fn failed_submission_leaves_session_waiting_on_engine() {
    let mut h = Harness::new(article());
    h.engine.fail_speak();
    let (_, logs) = capture(|| h.reader.read_from_selectors(&["#a", "#c"]));

    assert!(h.engine.spoken().is_empty());
    assert_eq!(logs.count(Level::ERROR), 1);
    assert_eq!(h.reader.phase(), Phase::Delivering { index: 0 });
    assert_eq!(h.timer.pending(), 0);
}
