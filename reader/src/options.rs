use serde::{Deserialize, Serialize};

/// Prosody and locale settings for the shared utterance.
///
/// A `None` field is left to the host default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    pub lang: Option<String>,
    pub rate: Option<f32>,
    pub pitch: Option<f32>,
    pub volume: Option<f32>,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            lang: Some("pt-BR".into()),
            rate: Some(1.0),
            pitch: None,
            volume: Some(1.0),
        }
    }
}

impl ReaderOptions {
    /// Options with every field unset, for building partial overrides.
    pub fn unset() -> Self {
        Self {
            lang: None,
            rate: None,
            pitch: None,
            volume: None,
        }
    }

    /// Shallow merge: every field set in `overrides` replaces the one in `self`.
    pub fn merged(self, overrides: ReaderOptions) -> Self {
        Self {
            lang: overrides.lang.or(self.lang),
            rate: overrides.rate.or(self.rate),
            pitch: overrides.pitch.or(self.pitch),
            volume: overrides.volume.or(self.volume),
        }
    }
}
