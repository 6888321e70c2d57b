//! The fixed set of languages supported by all three service adapters.
//!
//! Every selector in the UI draws from [`Language::ALL`]; no other language
//! identifiers ever reach the network layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five supported languages.
///
/// Each language carries two service identifiers:
///
/// * [`code`](Language::code) — the ISO-639-1 code the synthesis service
///   expects (`"en"`, `"hi"`, …).
/// * [`translation_id`](Language::translation_id) — the lower-cased display
///   name the translation service accepts (`"english"`, `"hindi"`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
    French,
    Spanish,
    Japanese,
}

impl Language {
    /// All supported languages, in UI display order.
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Hindi,
        Language::French,
        Language::Spanish,
        Language::Japanese,
    ];

    /// ISO-639-1 code used by the speech-synthesis service.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Japanese => "ja",
        }
    }

    /// Display name shown in language selectors.
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::French => "French",
            Language::Spanish => "Spanish",
            Language::Japanese => "Japanese",
        }
    }

    /// Identifier sent to the translation service.
    ///
    /// The service accepts lower-cased display names rather than ISO codes;
    /// this mirrors the wire contract, it is not a convenience alias.
    pub fn translation_id(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::French => "french",
            Language::Spanish => "spanish",
            Language::Japanese => "japanese",
        }
    }

    /// Parse an ISO-639-1 code back into a `Language`.
    ///
    /// Matching is case-insensitive. Returns `None` for anything outside the
    /// supported set.
    pub fn from_code(code: &str) -> Option<Language> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Language::English),
            "hi" => Some(Language::Hindi),
            "fr" => Some(Language::French),
            "es" => Some(Language::Spanish),
            "ja" => Some(Language::Japanese),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Every supported language must map to its fixed synthesis code.
    #[test]
    fn all_languages_map_to_correct_codes() {
        let expected = [
            (Language::English, "en"),
            (Language::Hindi, "hi"),
            (Language::French, "fr"),
            (Language::Spanish, "es"),
            (Language::Japanese, "ja"),
        ];
        for (lang, code) in expected {
            assert_eq!(lang.code(), code, "wrong code for {lang}");
        }
    }

    #[test]
    fn translation_ids_are_lowercased_names() {
        for lang in Language::ALL {
            assert_eq!(lang.translation_id(), lang.name().to_lowercase());
        }
    }

    #[test]
    fn from_code_round_trips() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn from_code_is_case_insensitive() {
        assert_eq!(Language::from_code("EN"), Some(Language::English));
        assert_eq!(Language::from_code("Ja"), Some(Language::Japanese));
    }

    #[test]
    fn from_code_rejects_unknown() {
        assert_eq!(Language::from_code("de"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn all_has_five_distinct_entries() {
        for (i, a) in Language::ALL.iter().enumerate() {
            for b in &Language::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
