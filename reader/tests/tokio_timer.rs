use reader::{FRAGMENT_DELAY, ReaderEvent, ReaderOptions, TextReader, TokioTimer};
use tokio::runtime::Handle;
use tokio::time::Instant;
use tts_testkit::MockEngine;

mod support;
use support::FakeDocument;

#[tokio::test(start_paused = true)]
async fn delay_is_paced_by_tokio() {
    let engine = MockEngine::default();
    let document = FakeDocument::new()
        .with("#title", "Título")
        .with("#body", "Corpo do texto");
    let (mut reader, mut events) = TextReader::new(
        engine.boxed(),
        Box::new(document),
        Box::new(TokioTimer::new(Handle::current())),
        ReaderOptions::unset(),
    );

    reader.read_from_selectors(&["#title", "#body"]);
    engine.finish();
    assert_eq!(events.recv().await, Some(ReaderEvent::UtteranceEnded { ticket: 1 }));

    let started = Instant::now();
    reader.handle(ReaderEvent::UtteranceEnded { ticket: 1 });
    let event = events.recv().await.unwrap();
    assert!(started.elapsed() >= FRAGMENT_DELAY);
    assert_eq!(event, ReaderEvent::DelayElapsed { session: 1, index: 1 });

    reader.handle(event);
    assert_eq!(engine.spoken(), vec!["Título", "Corpo do texto"]);
}
