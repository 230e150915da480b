//! Drive a host speech-synthesis engine through a small capability surface.
//!
//! The host (a browser, a test double) implements [`SpeechEngine`]. Everything
//! above it talks to [`SpeechAdapter`], which owns the single reusable
//! [`Utterance`] and applies the state guards around pause and resume.

pub mod adapter;
pub mod engine;
pub mod selection;
pub mod utterance;
pub mod voice;

pub use adapter::SpeechAdapter;
pub use engine::{EndCallback, EngineStatus, SpeechEngine, VoicesChangedHandler};
pub use selection::{select_voice, VoiceChoice, LOCALE_MARKER, PREFERRED_VOICES};
pub use utterance::{PreparedUtterance, Utterance};
pub use voice::Voice;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TTSError {
    /// The host exposes no speech synthesis or no way to build utterances.
    #[error("speech synthesis is not supported by this host")]
    Unsupported,
    /// The host raised an exception while handling a request.
    #[error("speech engine error: {0}")]
    Platform(String),
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, TTSError>;
