//! `SpeechSynthesizer` trait and the HTTP-backed implementation.
//!
//! The synthesis service only accepts a boolean slow flag, not a continuous
//! rate, so the UI's speed slider is thresholded at [`SLOW_SPEED_CUTOFF`].
//! This is a known fidelity gap inherited from the service contract; it is
//! surfaced in the UI rather than silently reinterpreted.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SynthesisConfig;
use crate::language::Language;

/// Speed-slider values below this cutoff select the slow synthesis flag.
pub const SLOW_SPEED_CUTOFF: f32 = 0.8;

/// Collapse a continuous speed value into the service's boolean slow flag.
pub fn is_slow(speed: f32) -> bool {
    speed < SLOW_SPEED_CUTOFF
}

// ---------------------------------------------------------------------------
// SynthesizeError
// ---------------------------------------------------------------------------

/// Errors that can occur during speech synthesis.
#[derive(Debug, Error)]
pub enum SynthesizeError {
    /// HTTP transport failure or a non-success status from the service.
    #[error("synthesis failed: {0}")]
    Service(String),

    /// The request did not complete within the configured timeout.
    #[error("synthesis request timed out")]
    Timeout,

    /// The service answered with an empty audio body.
    #[error("synthesis service returned no audio")]
    EmptyAudio,
}

impl From<reqwest::Error> for SynthesizeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SynthesizeError::Timeout
        } else {
            SynthesizeError::Service(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Async trait for text-to-speech backends.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn SpeechSynthesizer>`.
///
/// # Arguments
/// * `text`     – text to speak; callers validate non-emptiness before the
///                call ever reaches the network.
/// * `language` – one of the five supported languages; its ISO code is what
///                goes on the wire.
/// * `slow`     – the service's boolean pacing flag (see [`is_slow`]).
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` and return a complete MP3 file as bytes.
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        slow: bool,
    ) -> Result<Vec<u8>, SynthesizeError>;
}

// ---------------------------------------------------------------------------
// HttpSynthesizer
// ---------------------------------------------------------------------------

/// Calls a remote synthesis endpoint: `POST {base_url}/v1/synthesize` with
/// `{"text", "lang", "slow"}`, expecting MP3 bytes in the response body.
pub struct HttpSynthesizer {
    client: reqwest::Client,
    config: SynthesisConfig,
}

impl HttpSynthesizer {
    /// Build an `HttpSynthesizer` from application config.
    pub fn from_config(config: &SynthesisConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        slow: bool,
    ) -> Result<Vec<u8>, SynthesizeError> {
        let url = format!("{}/v1/synthesize", self.config.base_url);

        let body = serde_json::json!({
            "text": text,
            "lang": language.code(),
            "slow": slow,
        });

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SynthesizeError::Service(format!(
                "synthesis service returned {status}"
            )));
        }

        let audio = response.bytes().await?.to_vec();
        if audio.is_empty() {
            return Err(SynthesizeError::EmptyAudio);
        }

        Ok(audio)
    }
}

// ---------------------------------------------------------------------------
// MockSynthesizer  (test-only)
// ---------------------------------------------------------------------------

/// Test double that records the arguments it was called with.
#[cfg(test)]
pub struct MockSynthesizer {
    fail: bool,
    calls: std::sync::Mutex<Vec<(String, Language, bool)>>,
}

#[cfg(test)]
impl MockSynthesizer {
    /// Create a mock that returns a small fake MP3 body.
    pub fn ok() -> Self {
        Self {
            fail: false,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always fails with a service error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Arguments of every `synthesize` call so far.
    pub fn calls(&self) -> Vec<(String, Language, bool)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times `synthesize` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        slow: bool,
    ) -> Result<Vec<u8>, SynthesizeError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), language, slow));
        if self.fail {
            Err(SynthesizeError::Service("connection refused".into()))
        } else {
            Ok(b"ID3 fake mp3 body".to_vec())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
