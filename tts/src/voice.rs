use serde::{Deserialize, Serialize};

/// A synthetic speaker persona exposed by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag such as `pt-BR`.
    pub lang: String,
    #[serde(rename = "voiceURI")]
    pub voice_uri: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub local_service: bool,
}

impl Voice {
    /// Build a voice with only a name and a language; the URI mirrors the name.
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            voice_uri: name.clone(),
            name,
            lang: lang.into(),
            default: false,
            local_service: true,
        }
    }
}
