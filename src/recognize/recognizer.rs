//! `SpeechRecognizer` trait and the HTTP-backed implementation.
//!
//! Recognition is a single blocking round trip over the whole clip — no
//! retry, no streaming, no partial transcription. The clip is sent exactly
//! as captured or uploaded; the service interprets whatever sample rate and
//! encoding the source provided.

use async_trait::async_trait;
use thiserror::Error;

use crate::audio::AudioClip;
use crate::config::RecognitionConfig;

// ---------------------------------------------------------------------------
// RecognizeError
// ---------------------------------------------------------------------------

/// Errors that can occur during speech recognition.
///
/// `NoMatch` and the rest are surfaced as distinct user-visible messages:
/// the user re-records on `NoMatch` and retries manually on service errors.
#[derive(Debug, Error)]
pub enum RecognizeError {
    /// The service could not match the audio to any words.
    #[error("Could not understand audio")]
    NoMatch,

    /// HTTP transport failure or a non-success status from the service.
    #[error("Service error: {0}")]
    Service(String),

    /// The request did not complete within the configured timeout.
    #[error("Service error: recognition request timed out")]
    Timeout,

    /// The response body was not the expected JSON shape.
    #[error("Service error: unexpected response ({0})")]
    Parse(String),
}

impl From<reqwest::Error> for RecognizeError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RecognizeError::Timeout
        } else {
            RecognizeError::Service(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechRecognizer trait
// ---------------------------------------------------------------------------

/// Async trait for speech-to-text backends.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn SpeechRecognizer>` between the UI thread and the orchestrator.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe `clip` and return the recognized text.
    async fn recognize(&self, clip: &AudioClip) -> Result<String, RecognizeError>;
}

// ---------------------------------------------------------------------------
// HttpRecognizer
// ---------------------------------------------------------------------------

/// Calls a remote recognition endpoint: `POST {base_url}/v1/recognize` with
/// the clip as a multipart file part, expecting `{"transcript": "..."}`.
///
/// The service signals "audio not understood" with HTTP 422, which maps to
/// [`RecognizeError::NoMatch`]; an empty transcript is treated the same way.
pub struct HttpRecognizer {
    client: reqwest::Client,
    config: RecognitionConfig,
}

impl HttpRecognizer {
    /// Build an `HttpRecognizer` from application config.
    ///
    /// The HTTP client carries the per-request timeout from
    /// `config.timeout_secs`; a default client is the last-resort fallback
    /// if the builder fails.
    pub fn from_config(config: &RecognitionConfig) -> Self {
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
impl SpeechRecognizer for HttpRecognizer {
    async fn recognize(&self, clip: &AudioClip) -> Result<String, RecognizeError> {
        let url = format!("{}/v1/recognize", self.config.base_url);

        let part = reqwest::multipart::Part::bytes(clip.bytes.clone())
            .file_name(clip.file_name())
            .mime_str(clip.format.mime())
            .map_err(|e| RecognizeError::Service(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("audio", part);

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Err(RecognizeError::NoMatch);
        }
        if !status.is_success() {
            return Err(RecognizeError::Service(format!(
                "recognition service returned {status}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RecognizeError::Parse(e.to_string()))?;

        let transcript = json["transcript"]
            .as_str()
            .ok_or_else(|| RecognizeError::Parse("missing \"transcript\" field".into()))?
            .trim()
            .to_string();

        if transcript.is_empty() {
            return Err(RecognizeError::NoMatch);
        }

        Ok(transcript)
    }
}

// ---------------------------------------------------------------------------
// MockRecognizer  (test-only)
// ---------------------------------------------------------------------------

/// Test double that returns a pre-configured response and counts calls.
#[cfg(test)]
pub struct MockRecognizer {
    response: Result<String, MockFailure>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
#[derive(Debug, Clone, Copy)]
enum MockFailure {
    NoMatch,
    Service,
}

#[cfg(test)]
impl MockRecognizer {
    /// Create a mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Create a mock that always fails with `NoMatch`.
    pub fn no_match() -> Self {
        Self {
            response: Err(MockFailure::NoMatch),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Create a mock that always fails with a service error.
    pub fn service_error() -> Self {
        Self {
            response: Err(MockFailure::Service),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Number of times `recognize` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    async fn recognize(&self, _clip: &AudioClip) -> Result<String, RecognizeError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(MockFailure::NoMatch) => Err(RecognizeError::NoMatch),
            Err(MockFailure::Service) => {
                Err(RecognizeError::Service("connection refused".into()))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioFormat;

    fn make_config() -> RecognitionConfig {
        RecognitionConfig {
            base_url: "http://localhost:8080".into(),
            timeout_secs: 15,
        }
    }

    fn make_clip() -> AudioClip {
        AudioClip {
            bytes: b"RIFF fake".to_vec(),
            format: AudioFormat::Wav,
        }
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _recognizer = HttpRecognizer::from_config(&make_config());
    }

    /// Verify that `HttpRecognizer` is usable as `dyn SpeechRecognizer`.
    #[test]
    fn recognizer_is_object_safe() {
        let recognizer: Box<dyn SpeechRecognizer> =
            Box::new(HttpRecognizer::from_config(&make_config()));
        drop(recognizer);
    }

    #[tokio::test]
    async fn mock_ok_returns_configured_text() {
        let mock = MockRecognizer::ok("hello world");
        let text = mock.recognize(&make_clip()).await.unwrap();
        assert_eq!(text, "hello world");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn mock_no_match_maps_to_no_match_error() {
        let mock = MockRecognizer::no_match();
        let err = mock.recognize(&make_clip()).await.unwrap_err();
        assert!(matches!(err, RecognizeError::NoMatch));
    }

    #[tokio::test]
    async fn mock_service_error_maps_to_service_error() {
        let mock = MockRecognizer::service_error();
        let err = mock.recognize(&make_clip()).await.unwrap_err();
        assert!(matches!(err, RecognizeError::Service(_)));
    }

    /// The two recoverable failure kinds must render as distinct messages.
    #[test]
    fn error_messages_are_distinct() {
        assert_eq!(RecognizeError::NoMatch.to_string(), "Could not understand audio");
        let service = RecognizeError::Service("boom".into()).to_string();
        assert!(service.starts_with("Service error:"));
        assert_ne!(service, RecognizeError::NoMatch.to_string());
    }
}
