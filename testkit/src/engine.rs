use std::sync::{Arc, Mutex};

use tts::{
    EndCallback, EngineStatus, PreparedUtterance, Result, SpeechEngine, TTSError, Utterance,
    Voice, VoicesChangedHandler,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Speak(Utterance),
    Cancel,
    Pause,
    Resume,
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    status: EngineStatus,
    voices: Vec<Voice>,
    unsupported: bool,
    fail_voices: bool,
    fail_speak: bool,
    fail_cancel: bool,
    fail_pause: bool,
    fail_resume: bool,
    pending: Vec<EndCallback>,
    voices_changed: Option<VoicesChangedHandler>,
}

/// Engine double that records every host call. Clones share state.
#[derive(Clone, Default)]
pub struct MockEngine {
    state: Arc<Mutex<State>>,
}

impl MockEngine {
    pub fn with_voices(voices: Vec<Voice>) -> Self {
        let engine = Self::default();
        engine.state.lock().unwrap().voices = voices;
        engine
    }

    pub fn boxed(&self) -> Box<dyn SpeechEngine> {
        Box::new(self.clone())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Speak(u) => Some(u.text),
                _ => None,
            })
            .collect()
    }

    pub fn set_status(&self, speaking: bool, paused: bool) {
        self.state.lock().unwrap().status = EngineStatus { speaking, paused };
    }

    pub fn set_voices(&self, voices: Vec<Voice>) {
        self.state.lock().unwrap().voices = voices;
    }

    pub fn set_unsupported(&self) {
        self.state.lock().unwrap().unsupported = true;
    }

    pub fn fail_voices(&self) {
        self.state.lock().unwrap().fail_voices = true;
    }

    pub fn fail_speak(&self) {
        self.state.lock().unwrap().fail_speak = true;
    }

    pub fn fail_cancel(&self) {
        self.state.lock().unwrap().fail_cancel = true;
    }

    pub fn fail_pause(&self) {
        self.state.lock().unwrap().fail_pause = true;
    }

    pub fn fail_resume(&self) {
        self.state.lock().unwrap().fail_resume = true;
    }

    pub fn has_voices_handler(&self) -> bool {
        self.state.lock().unwrap().voices_changed.is_some()
    }

    /// Report completion of the most recent utterance.
    pub fn finish(&self) -> bool {
        let callback = {
            let mut state = self.state.lock().unwrap();
            state.status = EngineStatus::default();
            state.pending.pop()
        };
        match callback {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }

    /// Fire the voices-changed notification as the host would.
    pub fn announce_voices(&self, voices: Vec<Voice>) {
        let handler = {
            let mut state = self.state.lock().unwrap();
            state.voices = voices;
            state.voices_changed.take()
        };
        if let Some(mut handler) = handler {
            handler();
            let mut state = self.state.lock().unwrap();
            if state.voices_changed.is_none() {
                state.voices_changed = Some(handler);
            }
        }
    }
}

impl SpeechEngine for MockEngine {
    fn is_supported(&self) -> bool {
        !self.state.lock().unwrap().unsupported
    }

    fn voices(&self) -> Result<Vec<Voice>> {
        let state = self.state.lock().unwrap();
        if state.fail_voices {
            return Err(TTSError::Platform("getVoices exploded".into()));
        }
        Ok(state.voices.clone())
    }

    fn status(&self) -> EngineStatus {
        self.state.lock().unwrap().status
    }

    fn speak(&mut self, utterance: PreparedUtterance<'_>, on_end: EndCallback) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_speak {
            return Err(TTSError::Platform("speak exploded".into()));
        }
        state.calls.push(Call::Speak((*utterance).clone()));
        state.status = EngineStatus {
            speaking: true,
            paused: false,
        };
        state.pending.push(on_end);
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_cancel {
            return Err(TTSError::Platform("cancel exploded".into()));
        }
        state.calls.push(Call::Cancel);
        state.status = EngineStatus::default();
        state.pending.clear();
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_pause {
            return Err(TTSError::Platform("pause exploded".into()));
        }
        state.calls.push(Call::Pause);
        state.status.paused = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_resume {
            return Err(TTSError::Platform("resume exploded".into()));
        }
        state.calls.push(Call::Resume);
        state.status.paused = false;
        Ok(())
    }

    fn set_voices_changed(&mut self, handler: Option<VoicesChangedHandler>) {
        self.state.lock().unwrap().voices_changed = handler;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(engine: &mut MockEngine, text: &str) {
        let mut utterance = Utterance::default();
        engine
            .speak(utterance.prepare(text), Box::new(|| {}))
            .unwrap();
    }

    #[test]
    fn cancel_drops_pending_completions() {
        let mut engine = MockEngine::default();
        submit(&mut engine, "one");
        engine.cancel().unwrap();
        assert!(!engine.finish());
        assert_eq!(engine.calls().len(), 2);
    }

    #[test]
    fn clones_share_recorded_calls() {
        let engine = MockEngine::default();
        let mut handle = engine.clone();
        submit(&mut handle, "shared");
        assert_eq!(engine.spoken(), vec!["shared".to_string()]);
        assert!(engine.finish());
        assert_eq!(engine.status(), EngineStatus::default());
    }
}
