//! Deterministic default-voice choice.
//!
//! Preferred names are tried in order and the first one that appears as a
//! substring of any voice name wins, even if a later name would match an
//! earlier voice. Without a name match the first voice whose language tag
//! contains the locale marker is used.

use crate::Voice;

/// Well-known Brazilian Portuguese voices, most preferred first.
pub const PREFERRED_VOICES: [&str; 3] = [
    "Google português do Brasil",
    "Microsoft Daniel - Portuguese (Brazil)",
    "Luciana (Portuguese - Brazil)",
];

/// Region marker searched for in a voice's language tag.
pub const LOCALE_MARKER: &str = "BR";

/// Outcome of [`select_voice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoiceChoice<'a> {
    Preferred(&'a Voice),
    Locale(&'a Voice),
    NoMatch,
}

impl<'a> VoiceChoice<'a> {
    pub fn voice(self) -> Option<&'a Voice> {
        match self {
            VoiceChoice::Preferred(v) | VoiceChoice::Locale(v) => Some(v),
            VoiceChoice::NoMatch => None,
        }
    }
}

pub fn select_voice<'a, S: AsRef<str>>(
    voices: &'a [Voice],
    preferred: &[S],
    locale_marker: &str,
) -> VoiceChoice<'a> {
    let by_name = preferred.iter().find_map(|name| {
        let name = name.as_ref();
        voices.iter().find(|v| !v.name.is_empty() && v.name.contains(name))
    });
    if let Some(voice) = by_name {
        return VoiceChoice::Preferred(voice);
    }
    voices
        .iter()
        .find(|v| !v.lang.is_empty() && v.lang.contains(locale_marker))
        .map_or(VoiceChoice::NoMatch, VoiceChoice::Locale)
}
