//! Response-language enumeration.
//!
//! The widget supports a closed set of response languages. Each code maps to
//! a display name (shown in the language selector and embedded in prompts),
//! a localized greeting, and a localized completion-failure apology. Unknown
//! codes are rejected at the boundary — there is no silent fallthrough.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A supported response language.
///
/// Serialized as its two-letter code (`"en"`, `"hi"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ta")]
    Tamil,
    #[serde(rename = "te")]
    Telugu,
    #[serde(rename = "bn")]
    Bengali,
    #[serde(rename = "mr")]
    Marathi,
}

impl Language {
    /// All supported languages, in selector order.
    pub const ALL: [Language; 6] = [
        Language::English,
        Language::Hindi,
        Language::Tamil,
        Language::Telugu,
        Language::Bengali,
        Language::Marathi,
    ];

    /// The two-letter language code.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Bengali => "bn",
            Language::Marathi => "mr",
        }
    }

    /// The human-readable name, in the language itself.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिंदी",
            Language::Tamil => "தமிழ்",
            Language::Telugu => "తెలుగు",
            Language::Bengali => "বাংলা",
            Language::Marathi => "मराठी",
        }
    }

    /// The greeting synthesized when the message log is empty or cleared.
    pub fn greeting(&self) -> &'static str {
        match self {
            Language::English => {
                "Hello! I can help you with your questions. Ask me anything!"
            }
            Language::Hindi => {
                "नमस्ते! मैं आपके प्रश्नों में आपकी मदद कर सकता हूं। मुझसे कुछ भी पूछें!"
            }
            Language::Tamil => {
                "வணக்கம்! உங்கள் கேள்விகளில் நான் உங்களுக்கு உதவ முடியும். என்னிடம் எதையும் கேளுங்கள்!"
            }
            Language::Telugu => {
                "నమస్కారం! మీ ప్రశ్నలలో నేను మీకు సహాయం చేయగలను. నన్ను ఏదైనా అడగండి!"
            }
            Language::Bengali => {
                "হ্যালো! আমি আপনার প্রশ্নে আপনাকে সাহায্য করতে পারি। আমাকে কিছু জিজ্ঞাসা করুন!"
            }
            Language::Marathi => {
                "नमस्कार! मी तुमच्या प्रश्नांमध्ये तुम्हाला मदत करू शकतो. मला काहीही विचारा!"
            }
        }
    }

    /// The fixed apology used when the completion endpoint fails.
    ///
    /// One variant per language; there is no per-error-kind differentiation.
    pub fn apology(&self) -> &'static str {
        match self {
            Language::English => "Sorry, I encountered an error. Please try again.",
            Language::Hindi => {
                "क्षमा करें, मुझे एक त्रुटि का सामना करना पड़ा। कृपया पुन: प्रयास करें।"
            }
            Language::Tamil => {
                "மன்னிக்கவும், ஒரு பிழை ஏற்பட்டது. மீண்டும் முயற்சிக்கவும்."
            }
            Language::Telugu => {
                "క్షమించండి, ఒక లోపం సంభవించింది. దయచేసి మళ్లీ ప్రయత్నించండి."
            }
            Language::Bengali => {
                "দুঃখিত, একটি ত্রুটি ঘটেছে। অনুগ্রহ করে আবার চেষ্টা করুন।"
            }
            Language::Marathi => {
                "क्षमस्व, एक त्रुटी आली. कृपया पुन्हा प्रयत्न करा."
            }
        }
    }

    /// Parse a language code, rejecting anything outside the closed set.
    pub fn from_code(code: &str) -> crate::Result<Language> {
        Language::ALL
            .iter()
            .copied()
            .find(|l| l.code() == code)
            .ok_or_else(|| Error::Config {
                message: format!("Unknown language code: {code:?}"),
            })
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::English
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_code() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()).unwrap(), lang);
        }
    }

    #[test]
    fn rejects_unknown_code() {
        assert!(Language::from_code("fr").is_err());
        assert!(Language::from_code("").is_err());
        assert!(Language::from_code("EN").is_err());
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&Language::Tamil).unwrap();
        assert_eq!(json, "\"ta\"");
        let back: Language = serde_json::from_str("\"bn\"").unwrap();
        assert_eq!(back, Language::Bengali);
    }

    #[test]
    fn every_language_has_distinct_strings() {
        for lang in Language::ALL {
            assert!(!lang.greeting().is_empty());
            assert!(!lang.apology().is_empty());
            assert!(!lang.display_name().is_empty());
        }
        // Greetings are localized, not shared
        assert_ne!(Language::English.greeting(), Language::Hindi.greeting());
    }
}
