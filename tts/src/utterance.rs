//! The one configurable speech request shared by every submission.
//!
//! Fields left as `None` are not sent to the host, which then uses its own
//! default. Values are never validated or clamped here.

use std::ops::Deref;

use crate::Voice;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: Option<String>,
    pub rate: Option<f32>,
    pub pitch: Option<f32>,
    pub volume: Option<f32>,
    pub voice: Option<Voice>,
}

impl Utterance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_lang(&mut self, lang: impl Into<String>) {
        self.lang = Some(lang.into());
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = Some(rate);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = Some(pitch);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = Some(volume);
    }

    pub fn set_voice(&mut self, voice: Option<Voice>) {
        self.voice = voice;
    }

    /// Finish configuration by setting `text` and freeze the record for submission.
    ///
    /// The returned view borrows the utterance, so nothing can change it between
    /// preparation and the engine reading its fields.
    pub fn prepare(&mut self, text: impl Into<String>) -> PreparedUtterance<'_> {
        self.text = text.into();
        PreparedUtterance { inner: self }
    }
}

/// A fully configured [`Utterance`] ready to hand to a [`crate::SpeechEngine`].
#[derive(Clone, Copy, Debug)]
pub struct PreparedUtterance<'a> {
    inner: &'a Utterance,
}

impl Deref for PreparedUtterance<'_> {
    type Target = Utterance;

    fn deref(&self) -> &Utterance {
        self.inner
    }
}
