//! Cyrillic/Latin script classification.
//!
//! The trainer only distinguishes Russian from English, and only to pick
//! translation direction and TTS voices. The heuristic is character-range
//! based and deliberately kept in one place rather than inlined at call
//! sites.

use serde::{Deserialize, Serialize};

/// Detected script of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Script {
    Russian,
    English,
    /// Mixed scripts, or no alphabetic characters at all.
    Ambiguous,
}

impl Script {
    /// Voice code for pronouncing text in this script.
    pub fn voice_lang(self) -> &'static str {
        match self {
            Self::Russian => "ru",
            Self::English | Self::Ambiguous => "en",
        }
    }

    /// Voice code for pronouncing the translation of text in this script.
    pub fn translation_voice_lang(self) -> &'static str {
        match self {
            Self::Russian => "en",
            Self::English | Self::Ambiguous => "ru",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Russian => "russian",
            Self::English => "english",
            Self::Ambiguous => "ambiguous",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "russian" => Some(Self::Russian),
            "english" => Some(Self::English),
            "ambiguous" => Some(Self::Ambiguous),
            _ => None,
        }
    }
}

fn is_cyrillic(c: char) -> bool {
    matches!(c, 'а'..='я' | 'ё')
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Classify text as Russian (Cyrillic only), English (Latin only), or
/// Ambiguous (both or neither).
pub fn classify_script(text: &str) -> Script {
    let lowered = text.to_lowercase();
    let cyrillic = lowered.chars().any(is_cyrillic);
    let latin = lowered.chars().any(is_latin);

    match (cyrillic, latin) {
        (true, false) => Script::Russian,
        (false, true) => Script::English,
        _ => Script::Ambiguous,
    }
}
