//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::language::Language;

use super::AppPaths;

// ---------------------------------------------------------------------------
// RecognitionConfig
// ---------------------------------------------------------------------------

/// Settings for the remote speech-recognition service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Base URL of the recognition endpoint.
    pub base_url: String,
    /// Maximum seconds to wait for a recognition response.
    pub timeout_secs: u64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".into(),
            timeout_secs: 15,
        }
    }
}

// ---------------------------------------------------------------------------
// SynthesisConfig
// ---------------------------------------------------------------------------

/// Settings for the remote text-to-speech service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Base URL of the synthesis endpoint.
    pub base_url: String,
    /// Maximum seconds to wait for the MP3 response.
    pub timeout_secs: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".into(),
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// TranslationConfig
// ---------------------------------------------------------------------------

/// Settings for the remote translation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Base URL of the translation endpoint.
    pub base_url: String,
    /// Maximum seconds to wait for a translation response.
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082".into(),
            timeout_secs: 15,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window appearance and default selector values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Initial window size `(width, height)` in logical pixels.
    pub window_size: (f32, f32),
    /// Default language for the Text to Speech tab.
    pub synthesis_language: Language,
    /// Default source language for the Translation tab.
    pub source_language: Language,
    /// Default target language for the Translation tab.
    pub target_language: Language,
    /// Default speed-slider position.
    pub speed: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: (720.0, 520.0),
            synthesis_language: Language::English,
            source_language: Language::English,
            // Hindi is first in the target selector.
            target_language: Language::Hindi,
            speed: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use polyglot_speech::config::AppConfig;
///
/// // Load (returns Default when the file is missing)
/// let config = AppConfig::load().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Speech-recognition service settings.
    pub recognition: RecognitionConfig,
    /// Text-to-speech service settings.
    pub synthesis: SynthesisConfig,
    /// Translation service settings.
    pub translation: TranslationConfig,
    /// Window / selector defaults.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// A default `AppConfig` must survive a TOML round trip without loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.recognition.base_url, loaded.recognition.base_url);
        assert_eq!(
            original.recognition.timeout_secs,
            loaded.recognition.timeout_secs
        );
        assert_eq!(original.synthesis.base_url, loaded.synthesis.base_url);
        assert_eq!(original.translation.base_url, loaded.translation.base_url);
        assert_eq!(original.ui.window_size, loaded.ui.window_size);
        assert_eq!(
            original.ui.synthesis_language,
            loaded.ui.synthesis_language
        );
        assert_eq!(original.ui.target_language, loaded.ui.target_language);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.recognition.base_url, default.recognition.base_url);
        assert_eq!(config.synthesis.base_url, default.synthesis.base_url);
        assert_eq!(config.translation.base_url, default.translation.base_url);
    }

    /// First-run defaults: English source, Hindi target, speed 1.0.
    #[test]
    fn default_selector_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.ui.synthesis_language, Language::English);
        assert_eq!(cfg.ui.source_language, Language::English);
        assert_eq!(cfg.ui.target_language, Language::Hindi);
        assert!((cfg.ui.speed - 1.0).abs() < f32::EPSILON);
    }

    /// Modified non-default values must survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.recognition.base_url = "https://speech.example.com".into();
        cfg.recognition.timeout_secs = 60;
        cfg.synthesis.base_url = "https://tts.example.com".into();
        cfg.translation.base_url = "https://translate.example.com".into();
        cfg.ui.synthesis_language = Language::Japanese;
        cfg.ui.target_language = Language::French;
        cfg.ui.speed = 0.6;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.recognition.base_url, "https://speech.example.com");
        assert_eq!(loaded.recognition.timeout_secs, 60);
        assert_eq!(loaded.synthesis.base_url, "https://tts.example.com");
        assert_eq!(
            loaded.translation.base_url,
            "https://translate.example.com"
        );
        assert_eq!(loaded.ui.synthesis_language, Language::Japanese);
        assert_eq!(loaded.ui.target_language, Language::French);
        assert!((loaded.ui.speed - 0.6).abs() < f32::EPSILON);
    }
}
