use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tts::{SpeechAdapter, SpeechEngine, Utterance, Voice};

use crate::{
    Document, ReaderError, ReaderEvent, ReaderEvents, ReaderOptions, Session, Timer,
    session::Phase,
};

/// Pause between two consecutive fragments.
pub const FRAGMENT_DELAY: Duration = Duration::from_millis(100);

/// Coarse playback state as seen by a caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReaderState {
    Idle,
    Reading,
    Paused,
}

/// Sequential text reader.
///
/// All state lives here and every mutation happens on the caller's thread;
/// host callbacks only push [`ReaderEvent`]s onto the channel returned by
/// [`TextReader::new`].
pub struct TextReader {
    speech: SpeechAdapter,
    document: Box<dyn Document>,
    timer: Box<dyn Timer>,
    options: ReaderOptions,
    delay: Duration,
    session: Option<Session>,
    sessions: u64,
    current_text: Option<String>,
    ticket: u64,
    events: mpsc::UnboundedSender<ReaderEvent>,
}

impl TextReader {
    /// Create a reader whose options are the defaults overlaid with `overrides`.
    pub fn new(
        engine: Box<dyn SpeechEngine>,
        document: Box<dyn Document>,
        timer: Box<dyn Timer>,
        overrides: ReaderOptions,
    ) -> (Self, ReaderEvents) {
        let (events, rx) = ReaderEvents::channel();
        let reader = Self {
            speech: SpeechAdapter::new(engine),
            document,
            timer,
            options: ReaderOptions::default().merged(overrides),
            delay: FRAGMENT_DELAY,
            session: None,
            sessions: 0,
            current_text: None,
            ticket: 0,
            events,
        };
        (reader, rx)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Subscribe to voice changes, load voices once and run `on_ready`.
    ///
    /// `on_ready` runs whether or not any voice is available yet; its result
    /// is returned unchanged.
    pub fn initialize<R>(&mut self, on_ready: impl FnOnce(&mut Self) -> R) -> R {
        let tx = self.events.clone();
        self.speech.on_voices_changed(Some(Box::new(move || {
            let _ = tx.send(ReaderEvent::VoicesChanged);
        })));
        self.load_voices();
        on_ready(self)
    }

    fn load_voices(&mut self) {
        let first = self.speech.refresh_voices().first().cloned();
        debug!(count = self.speech.list_voices().len(), "voices loaded");
        if self.speech.utterance().voice.is_some() {
            return;
        }
        if let Some(voice) = first {
            self.speech.utterance_mut().set_voice(Some(voice));
            let options = self.options.clone();
            self.apply_options(&options);
        }
    }

    /// Merge `overrides` into the stored options and apply the result.
    pub fn configure(&mut self, overrides: ReaderOptions) {
        self.options = self.options.clone().merged(overrides);
        let options = self.options.clone();
        self.apply_options(&options);
    }

    fn apply_options(&mut self, options: &ReaderOptions) {
        self.set_voice_by_name();
        if let Some(lang) = options.lang.as_deref().filter(|l| !l.is_empty()) {
            self.set_lang(lang);
        }
        if let Some(rate) = options.rate {
            self.set_rate(rate);
        }
        if let Some(pitch) = options.pitch {
            self.set_pitch(pitch);
        }
        if let Some(volume) = options.volume {
            self.set_volume(volume);
        }
    }

    /// Route a host notification. Call this for every event received from [`ReaderEvents`].
    pub fn handle(&mut self, event: ReaderEvent) {
        match event {
            ReaderEvent::VoicesChanged => self.load_voices(),
            ReaderEvent::UtteranceEnded { ticket } => self.on_utterance_end(ticket),
            ReaderEvent::DelayElapsed { session, index } => self.on_delay_elapsed(session, index),
        }
    }

    /// Handle every event already queued. Returns how many were handled.
    pub fn drain(&mut self, events: &mut ReaderEvents) -> usize {
        let mut handled = 0;
        while let Some(event) = events.try_recv() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    fn on_utterance_end(&mut self, ticket: u64) {
        if ticket != self.ticket {
            debug!(ticket, latest = self.ticket, "ignoring superseded utterance");
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if let Some(index) = session.complete() {
            let id = session.id();
            let tx = self.events.clone();
            self.timer.after(
                self.delay,
                Box::new(move || {
                    let _ = tx.send(ReaderEvent::DelayElapsed { session: id, index });
                }),
            );
        }
    }

    fn on_delay_elapsed(&mut self, id: u64, index: usize) {
        let Some(session) = self.session.as_mut().filter(|s| s.id() == id) else {
            debug!(session = id, "dropping delay of a replaced session");
            return;
        };
        if session.resume_after_delay(index) {
            self.deliver();
        } else {
            debug!(session = id, index, "reading stopped during delay");
        }
    }

    /// Start reading the first element matched by each selector, in order.
    ///
    /// Invalid or unmatched selectors are logged and skipped. Replaces any
    /// session in progress.
    pub fn read_from_selectors<S: AsRef<str>>(&mut self, selectors: &[S]) {
        let fragments: Vec<_> = selectors
            .iter()
            .map(|s| s.as_ref())
            .filter_map(|selector| match self.document.query_selector(selector) {
                Ok(Some(node)) => Some(node),
                Ok(None) => {
                    debug!(selector, "selector matched nothing");
                    None
                }
                Err(err) => {
                    warn!(%err, "skipping selector");
                    None
                }
            })
            .collect();
        self.sessions += 1;
        info!(
            session = self.sessions,
            fragments = fragments.len(),
            "reading session started"
        );
        self.session = Some(Session::new(self.sessions, fragments));
        self.deliver();
    }

    fn deliver(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let id = session.id();
        match session.next_text() {
            Some(text) => {
                self.current_text = Some(text.clone());
                self.submit(&text);
            }
            None => debug!(session = id, "reading session finished"),
        }
    }

    fn submit(&mut self, text: &str) {
        self.ticket += 1;
        let ticket = self.ticket;
        let tx = self.events.clone();
        let submitted = self.speech.speak(
            text,
            Box::new(move || {
                let _ = tx.send(ReaderEvent::UtteranceEnded { ticket });
            }),
        );
        if !submitted {
            debug!(ticket, "fragment not submitted");
        }
    }

    /// Speak the current fragment again from its beginning.
    pub fn play(&mut self) {
        let Some(text) = self.current_text.clone() else {
            warn!("no text loaded; call read_from_selectors first");
            return;
        };
        if let Some(session) = self.session.as_mut() {
            session.replay();
        }
        self.submit(&text);
    }

    pub fn pause(&mut self) -> Result<(), ReaderError> {
        self.speech.pause_if_active()?;
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), ReaderError> {
        self.speech.resume_if_paused()?;
        Ok(())
    }

    /// Cancel speech and end the session; a pending delay will deliver nothing.
    pub fn stop(&mut self) -> Result<(), ReaderError> {
        if let Some(session) = self.session.as_mut() {
            session.stop();
        }
        self.speech.cancel()?;
        Ok(())
    }

    pub fn set_lang(&mut self, lang: &str) {
        self.speech.utterance_mut().set_lang(lang);
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.speech.utterance_mut().set_rate(rate);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.speech.utterance_mut().set_pitch(pitch);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.speech.utterance_mut().set_volume(volume);
    }

    /// Pick the default voice with the preferred-name heuristic.
    pub fn set_voice_by_name(&mut self) -> Option<&Voice> {
        self.speech.select_voice_by_name()
    }

    pub fn list_voices(&self) -> &[Voice] {
        self.speech.list_voices()
    }

    pub fn selected_voice(&self) -> Option<&Voice> {
        self.speech.utterance().voice.as_ref()
    }

    pub fn utterance(&self) -> &Utterance {
        self.speech.utterance()
    }

    pub fn options(&self) -> &ReaderOptions {
        &self.options
    }

    pub fn current_text(&self) -> Option<&str> {
        self.current_text.as_deref()
    }

    pub fn phase(&self) -> Phase {
        self.session.as_ref().map_or(Phase::Idle, Session::phase)
    }

    pub fn state(&self) -> ReaderState {
        if self.phase() == Phase::Idle {
            ReaderState::Idle
        } else if self.speech.status().paused {
            ReaderState::Paused
        } else {
            ReaderState::Reading
        }
    }

    pub fn is_supported(&self) -> bool {
        self.speech.is_supported()
    }
}
