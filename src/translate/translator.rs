//! `Translator` trait and the HTTP-backed implementation.
//!
//! The translation service identifies languages by lower-cased display
//! names (`"english"`, `"hindi"`, …) rather than ISO codes — see
//! [`Language::translation_id`]. Source and target are allowed to be the
//! same language; the service simply echoes the text back in that case.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TranslationConfig;
use crate::language::Language;

// ---------------------------------------------------------------------------
// TranslateError
// ---------------------------------------------------------------------------

/// Errors that can occur during translation.
///
/// Each variant carries enough context for the UI to show a specific
/// message instead of one generic "translation error".
#[derive(Debug, Error)]
pub enum TranslateError {
    /// HTTP transport failure or an unexpected status from the service.
    #[error("translation request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("translation request timed out")]
    Timeout,

    /// The response body was not the expected JSON shape.
    #[error("failed to parse translation response: {0}")]
    Parse(String),

    /// The service rejected a language identifier.
    #[error("language pair not supported: {source_lang} -> {target_lang}")]
    UnsupportedLanguage {
        source_lang: String,
        target_lang: String,
    },

    /// The service answered with an empty translation.
    #[error("translation service returned an empty response")]
    EmptyResponse,
}

impl From<reqwest::Error> for TranslateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TranslateError::Timeout
        } else {
            TranslateError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Translation
// ---------------------------------------------------------------------------

/// A successful translation: the text plus the language it was translated
/// into, kept together so the synthesis follow-up uses the right voice.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// Translated text.
    pub text: String,
    /// Language the text was translated into.
    pub target: Language,
}

// ---------------------------------------------------------------------------
// Translator trait
// ---------------------------------------------------------------------------

/// Async trait for translation backends.
///
/// Implementors must be `Send + Sync` so they can be shared as
/// `Arc<dyn Translator>`.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` to `target`.
    ///
    /// Callers validate non-empty text before the call; `source == target`
    /// is deliberately not rejected here.
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Translation, TranslateError>;
}

// ---------------------------------------------------------------------------
// HttpTranslator
// ---------------------------------------------------------------------------

/// Calls a remote translation endpoint: `POST {base_url}/v1/translate` with
/// `{"text", "source", "target"}`, expecting `{"translation": "..."}`.
///
/// HTTP 400 from the service maps to
/// [`TranslateError::UnsupportedLanguage`] — the identifiers are lower-cased
/// display names and are not validated against the service's accepted set
/// before the call.
pub struct HttpTranslator {
    client: reqwest::Client,
    config: TranslationConfig,
}

impl HttpTranslator {
    /// Build an `HttpTranslator` from application config.
    pub fn from_config(config: &TranslationConfig) -> Self {
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
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Translation, TranslateError> {
        let url = format!("{}/v1/translate", self.config.base_url);

        let body = serde_json::json!({
            "text": text,
            "source": source.translation_id(),
            "target": target.translation_id(),
        });

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(TranslateError::UnsupportedLanguage {
                source_lang: source.translation_id().into(),
                target_lang: target.translation_id().into(),
            });
        }
        if !status.is_success() {
            return Err(TranslateError::Request(format!(
                "translation service returned {status}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::Parse(e.to_string()))?;

        let translated = json["translation"]
            .as_str()
            .ok_or_else(|| TranslateError::Parse("missing \"translation\" field".into()))?
            .trim()
            .to_string();

        if translated.is_empty() {
            return Err(TranslateError::EmptyResponse);
        }

        Ok(Translation {
            text: translated,
            target,
        })
    }
}

// ---------------------------------------------------------------------------
// MockTranslator  (test-only)
// ---------------------------------------------------------------------------

/// Test double that returns a fixed translation and records call arguments.
#[cfg(test)]
pub struct MockTranslator {
    response: Option<String>,
    calls: std::sync::Mutex<Vec<(String, Language, Language)>>,
}

#[cfg(test)]
impl MockTranslator {
    /// Create a mock that translates everything into `text`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always fails with a request error.
    pub fn failing() -> Self {
        Self {
            response: None,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Arguments of every `translate` call so far.
    pub fn calls(&self) -> Vec<(String, Language, Language)> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of times `translate` was invoked.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source: Language,
        target: Language,
    ) -> Result<Translation, TranslateError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source, target));
        match &self.response {
            Some(translated) => Ok(Translation {
                text: translated.clone(),
                target,
            }),
            None => Err(TranslateError::Request("connection refused".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config() -> TranslationConfig {
        TranslationConfig {
            base_url: "http://localhost:8082".into(),
            timeout_secs: 15,
        }
    }

    #[test]
    fn from_config_builds_without_panic() {
        let _translator = HttpTranslator::from_config(&make_config());
    }

    #[test]
    fn translator_is_object_safe() {
        let translator: Box<dyn Translator> =
            Box::new(HttpTranslator::from_config(&make_config()));
        drop(translator);
    }

    #[tokio::test]
    async fn mock_pairs_text_with_target_language() {
        let mock = MockTranslator::ok("नमस्ते");
        let result = mock
            .translate("Hello", Language::English, Language::Hindi)
            .await
            .unwrap();

        assert_eq!(result.text, "नमस्ते");
        assert_eq!(result.target, Language::Hindi);
    }

    #[tokio::test]
    async fn mock_records_lowercased_identifiers() {
        let mock = MockTranslator::ok("hola");
        mock.translate("hello", Language::English, Language::Spanish)
            .await
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls[0].1.translation_id(), "english");
        assert_eq!(calls[0].2.translation_id(), "spanish");
    }

    /// Source == target must pass through without validation.
    #[tokio::test]
    async fn same_source_and_target_is_allowed() {
        let mock = MockTranslator::ok("hello");
        let result = mock
            .translate("hello", Language::English, Language::English)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn mock_failing_returns_request_error() {
        let mock = MockTranslator::failing();
        let err = mock
            .translate("hello", Language::English, Language::Hindi)
            .await
            .unwrap_err();
        assert!(matches!(err, TranslateError::Request(_)));
    }

    #[test]
    fn unsupported_language_error_names_the_pair() {
        let err = TranslateError::UnsupportedLanguage {
            source_lang: "english".into(),
            target_lang: "hindi".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("english"));
        assert!(msg.contains("hindi"));
    }
}
