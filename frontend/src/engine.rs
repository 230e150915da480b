//! [`SpeechEngine`] over the browser's Web Speech API.
//!
//! Host calls go through `Reflect` so that exceptions surface as errors
//! instead of aborting the module.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use tracing::debug;
use tts::{
    EndCallback, EngineStatus, PreparedUtterance, Result, SpeechEngine, TTSError, Voice,
    VoicesChangedHandler,
};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{SpeechSynthesis, SpeechSynthesisUtterance, SpeechSynthesisVoice, Window};

/// Completion callback shared by an utterance's `end` and `error` handlers.
///
/// Whichever handler runs first takes the callback; later calls do nothing.
#[derive(Clone)]
struct EndSlot(Rc<RefCell<Option<EndCallback>>>);

impl EndSlot {
    fn new(on_end: EndCallback) -> Self {
        Self(Rc::new(RefCell::new(Some(on_end))))
    }

    /// Run the callback if it is still pending.
    fn fire(&self) -> bool {
        let pending = self.0.borrow_mut().take();
        match pending {
            Some(on_end) => {
                on_end();
                true
            }
            None => false,
        }
    }

    /// Drop the callback without running it.
    fn release(&self) -> bool {
        self.0.borrow_mut().take().is_some()
    }
}

/// The most recent host utterance and the handlers attached to it.
struct Submission {
    utterance: SpeechSynthesisUtterance,
    _on_end: Closure<dyn FnMut()>,
    _on_error: Closure<dyn FnMut()>,
}

impl Submission {
    fn attach(utterance: SpeechSynthesisUtterance, on_end: EndCallback) -> Self {
        let slot = EndSlot::new(on_end);
        let ended = slot.clone();
        let on_end = Closure::<dyn FnMut()>::new(move || {
            ended.fire();
        });
        let on_error = Closure::<dyn FnMut()>::new(move || {
            if slot.release() {
                debug!("utterance ended with an error");
            }
        });
        utterance.set_onend(Some(on_end.as_ref().unchecked_ref()));
        utterance.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        Self {
            utterance,
            _on_end: on_end,
            _on_error: on_error,
        }
    }
}

impl Drop for Submission {
    fn drop(&mut self) {
        // Late host events for a replaced utterance must not reach freed closures.
        self.utterance.set_onend(None);
        self.utterance.set_onerror(None);
    }
}

pub struct WebSpeechEngine {
    window: Window,
    synth: Option<SpeechSynthesis>,
    voices_changed: Option<Closure<dyn FnMut()>>,
    submission: Option<Submission>,
}

impl WebSpeechEngine {
    pub fn new(window: Window) -> Self {
        let synth = Reflect::get(&window, &JsValue::from_str("speechSynthesis"))
            .ok()
            .and_then(|value| value.dyn_into::<SpeechSynthesis>().ok());
        Self {
            window,
            synth,
            voices_changed: None,
            submission: None,
        }
    }

    fn synth(&self) -> Result<&SpeechSynthesis> {
        self.synth.as_ref().ok_or(TTSError::Unsupported)
    }

    fn platform_voices(synth: &SpeechSynthesis) -> Result<Vec<SpeechSynthesisVoice>> {
        let list: Array = invoke(synth, "getVoices", &Array::new())
            .and_then(|list| list.dyn_into::<Array>())
            .map_err(platform_error)?;
        Ok(list
            .iter()
            .filter_map(|v| v.dyn_into::<SpeechSynthesisVoice>().ok())
            .collect())
    }
}

impl SpeechEngine for WebSpeechEngine {
    fn is_supported(&self) -> bool {
        let window: &JsValue = &self.window;
        ["speechSynthesis", "SpeechSynthesisUtterance"]
            .iter()
            .all(|name| Reflect::has(window, &JsValue::from_str(name)).unwrap_or(false))
    }

    fn voices(&self) -> Result<Vec<Voice>> {
        let voices = Self::platform_voices(self.synth()?)?;
        Ok(voices.iter().map(to_voice).collect())
    }

    fn status(&self) -> EngineStatus {
        self.synth
            .as_ref()
            .map(|s| EngineStatus {
                speaking: s.speaking(),
                paused: s.paused(),
            })
            .unwrap_or_default()
    }

    fn speak(&mut self, utterance: PreparedUtterance<'_>, on_end: EndCallback) -> Result<()> {
        let synth = self.synth()?.clone();
        // One host object per submission so a cancelled utterance's end event
        // cannot reach the next submission's callback.
        let platform = SpeechSynthesisUtterance::new().map_err(platform_error)?;
        platform.set_text(&utterance.text);
        if let Some(lang) = &utterance.lang {
            platform.set_lang(lang);
        }
        if let Some(rate) = utterance.rate {
            platform.set_rate(rate);
        }
        if let Some(pitch) = utterance.pitch {
            platform.set_pitch(pitch);
        }
        if let Some(volume) = utterance.volume {
            platform.set_volume(volume);
        }
        if let Some(voice) = &utterance.voice {
            let matched = Self::platform_voices(&synth)?
                .into_iter()
                .find(|v| v.voice_uri() == voice.voice_uri && v.name() == voice.name);
            platform.set_voice(matched.as_ref());
        }
        let args = Array::of1(&platform);
        self.submission = Some(Submission::attach(platform, on_end));
        invoke(&synth, "speak", &args).map_err(platform_error)?;
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        call0(self.synth()?, "cancel")
    }

    fn pause(&mut self) -> Result<()> {
        call0(self.synth()?, "pause")
    }

    fn resume(&mut self) -> Result<()> {
        call0(self.synth()?, "resume")
    }

    fn set_voices_changed(&mut self, handler: Option<VoicesChangedHandler>) {
        let Some(synth) = &self.synth else {
            return;
        };
        match handler {
            Some(mut handler) => {
                let closure = Closure::<dyn FnMut()>::new(move || handler());
                synth.set_onvoiceschanged(Some(closure.as_ref().unchecked_ref()));
                self.voices_changed = Some(closure);
            }
            None => {
                synth.set_onvoiceschanged(None);
                self.voices_changed = None;
            }
        }
    }
}

fn to_voice(voice: &SpeechSynthesisVoice) -> Voice {
    Voice {
        name: voice.name(),
        lang: voice.lang(),
        voice_uri: voice.voice_uri(),
        default: voice.default(),
        local_service: voice.local_service(),
    }
}

fn invoke(target: &JsValue, method: &str, args: &Array) -> std::result::Result<JsValue, JsValue> {
    let function: Function = Reflect::get(target, &JsValue::from_str(method))?.dyn_into()?;
    function.apply(target, args)
}

fn call0(target: &JsValue, method: &str) -> Result<()> {
    invoke(target, method, &Array::new())
        .map(|_| ())
        .map_err(platform_error)
}

pub(crate) fn js_message(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

fn platform_error(err: JsValue) -> TTSError {
    TTSError::Platform(js_message(&err))
}
