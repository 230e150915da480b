use crate::{PreparedUtterance, Result, Voice};

/// Invoked once when the submitted utterance finishes speaking.
pub type EndCallback = Box<dyn FnOnce() + Send + 'static>;

/// Invoked every time the host reports that its voice list changed.
pub type VoicesChangedHandler = Box<dyn FnMut() + Send + 'static>;

/// Playback flags as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineStatus {
    pub speaking: bool,
    pub paused: bool,
}

/// Host speech-synthesis capability.
///
/// Implementations are thin: each method maps onto one host call and reports
/// host exceptions as [`crate::TTSError::Platform`]. State guards live in
/// [`crate::SpeechAdapter`], never here.
pub trait SpeechEngine {
    /// Whether the host exposes both speech synthesis and utterance construction.
    fn is_supported(&self) -> bool;

    /// Enumerate the voices the host currently knows about.
    fn voices(&self) -> Result<Vec<Voice>>;

    fn status(&self) -> EngineStatus;

    /// Queue `utterance` for speaking. `on_end` fires when the host reports completion.
    fn speak(&mut self, utterance: PreparedUtterance<'_>, on_end: EndCallback) -> Result<()>;

    fn cancel(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    fn resume(&mut self) -> Result<()>;

    /// Install the single voices-changed handler, replacing any previous one.
    fn set_voices_changed(&mut self, handler: Option<VoicesChangedHandler>);
}
