use thiserror::Error;
use tts::TTSError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("invalid selector `{selector}`: {reason}")]
    Invalid { selector: String, reason: String },
}

/// Failure of an explicit transport control (`stop`, `pause`, `resume`).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReaderError {
    #[error(transparent)]
    Engine(#[from] TTSError),
}
