#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reader::{
    Document, ReaderEvents, ReaderOptions, SelectorError, TextNode, TextReader, Timer, TimerTask,
};

use tts_testkit::MockEngine;

struct FakeNode(String);

impl TextNode for FakeNode {
    fn text_content(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Selector → text lookup. Selectors starting with `!` are rejected as invalid.
#[derive(Default)]
pub struct FakeDocument {
    nodes: HashMap<String, String>,
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, selector: &str, text: &str) -> Self {
        self.nodes.insert(selector.into(), text.into());
        self
    }
}

impl Document for FakeDocument {
    fn query_selector(&self, selector: &str) -> Result<Option<Box<dyn TextNode>>, SelectorError> {
        if selector.starts_with('!') {
            return Err(SelectorError::Invalid {
                selector: selector.into(),
                reason: "not a valid selector".into(),
            });
        }
        Ok(self
            .nodes
            .get(selector)
            .map(|text| Box::new(FakeNode(text.clone())) as Box<dyn TextNode>))
    }
}

/// Timer whose tasks only run when the test says so.
#[derive(Clone, Default)]
pub struct ManualTimer {
    tasks: Arc<Mutex<Vec<(Duration, TimerTask)>>>,
}

impl ManualTimer {
    pub fn pending(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.tasks.lock().unwrap().iter().map(|(d, _)| *d).collect()
    }

    pub fn fire_all(&self) -> usize {
        let tasks: Vec<_> = self.tasks.lock().unwrap().drain(..).collect();
        let fired = tasks.len();
        for (_, task) in tasks {
            task();
        }
        fired
    }
}

impl Timer for ManualTimer {
    fn after(&self, delay: Duration, task: TimerTask) {
        self.tasks.lock().unwrap().push((delay, task));
    }
}

pub struct Harness {
    pub reader: TextReader,
    pub events: ReaderEvents,
    pub engine: MockEngine,
    pub timer: ManualTimer,
}

impl Harness {
    pub fn new(document: FakeDocument) -> Self {
        Self::with_engine(document, MockEngine::default(), ReaderOptions::unset())
    }

    pub fn with_engine(document: FakeDocument, engine: MockEngine, options: ReaderOptions) -> Self {
        let timer = ManualTimer::default();
        let (reader, events) = TextReader::new(
            engine.boxed(),
            Box::new(document),
            Box::new(timer.clone()),
            options,
        );
        Self {
            reader,
            events,
            engine,
            timer,
        }
    }

    /// Let the engine report completion and route the notification.
    pub fn finish_utterance(&mut self) {
        assert!(self.engine.finish(), "no utterance in flight");
        self.pump();
    }

    /// Run every pending delay and route the resulting events.
    pub fn elapse(&mut self) {
        self.timer.fire_all();
        self.pump();
    }

    pub fn pump(&mut self) -> usize {
        self.reader.drain(&mut self.events)
    }
}
