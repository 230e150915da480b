use tracing::{debug, error, warn};

use crate::selection::{select_voice, VoiceChoice, LOCALE_MARKER, PREFERRED_VOICES};
use crate::{EndCallback, EngineStatus, Result, SpeechEngine, Utterance, Voice, VoicesChangedHandler};

/// Guards and bookkeeping around a [`SpeechEngine`].
///
/// Owns the shared [`Utterance`] and the last voice list read from the host.
pub struct SpeechAdapter {
    engine: Box<dyn SpeechEngine>,
    utterance: Utterance,
    voices: Vec<Voice>,
}

impl SpeechAdapter {
    pub fn new(engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            engine,
            utterance: Utterance::new(),
            voices: Vec::new(),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.engine.is_supported()
    }

    pub fn status(&self) -> EngineStatus {
        self.engine.status()
    }

    /// Voices from the most recent [`refresh_voices`](Self::refresh_voices).
    pub fn list_voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Re-read the host voice list. A failing host yields an empty list.
    pub fn refresh_voices(&mut self) -> &[Voice] {
        self.voices = match self.engine.voices() {
            Ok(voices) => voices,
            Err(e) => {
                warn!(%e, "failed to load voices");
                Vec::new()
            }
        };
        &self.voices
    }

    pub fn on_voices_changed(&mut self, handler: Option<VoicesChangedHandler>) {
        self.engine.set_voices_changed(handler);
    }

    pub fn utterance(&self) -> &Utterance {
        &self.utterance
    }

    pub fn utterance_mut(&mut self) -> &mut Utterance {
        &mut self.utterance
    }

    /// Apply the preferred-name heuristic to the cached voices.
    ///
    /// On a miss the current voice is kept and a warning is logged.
    pub fn select_voice_by_name(&mut self) -> Option<&Voice> {
        match select_voice(&self.voices, &PREFERRED_VOICES, LOCALE_MARKER) {
            VoiceChoice::Preferred(voice) | VoiceChoice::Locale(voice) => {
                debug!(voice = %voice.name, "voice selected");
                self.utterance.voice = Some(voice.clone());
            }
            VoiceChoice::NoMatch => warn!("no pt-BR voice found"),
        }
        self.utterance.voice.as_ref()
    }

    /// Speak `text` with the shared utterance, cancelling anything in flight.
    ///
    /// Never fails: host errors are logged and `false` is returned, in which
    /// case `on_end` is dropped without being called.
    pub fn speak(&mut self, text: &str, on_end: EndCallback) -> bool {
        if !self.engine.is_supported() {
            warn!("speech synthesis not supported");
            return false;
        }
        match self.submit(text, on_end) {
            Ok(()) => true,
            Err(e) => {
                error!(%e, "speech synthesis failed");
                false
            }
        }
    }

    fn submit(&mut self, text: &str, on_end: EndCallback) -> Result<()> {
        if self.engine.status().speaking {
            self.engine.cancel()?;
        }
        let prepared = self.utterance.prepare(text);
        self.engine.speak(prepared, on_end)
    }

    pub fn cancel(&mut self) -> Result<()> {
        self.engine.cancel()
    }

    /// Pause only while speaking and not already paused. Returns whether the host was called.
    pub fn pause_if_active(&mut self) -> Result<bool> {
        let status = self.engine.status();
        if status.speaking && !status.paused {
            self.engine.pause()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Resume only while paused. Returns whether the host was called.
    pub fn resume_if_paused(&mut self) -> Result<bool> {
        if self.engine.status().paused {
            self.engine.resume()?;
            return Ok(true);
        }
        Ok(false)
    }
}
