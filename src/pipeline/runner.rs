//! Pipeline orchestrator — one user action in, one result out.
//!
//! [`Orchestrator`] owns the three service adapters and the
//! [`SessionContext`], and responds to [`PipelineCommand`]s received over a
//! `tokio::sync::mpsc` channel. Each command is a single network round trip;
//! there is no queueing beyond the channel, no caching and no retry.
//!
//! # Flow
//!
//! ```text
//! Recognize { clip }
//!   └─▶ recognizer.recognize(clip)
//!         ├─ Ok  → session slot ← transcript, RecognitionComplete
//!         └─ Err → Error (session slot untouched)
//!
//! Synthesize { text, language, speed }
//!   └─▶ blank text → Warning (no network call)
//!       else synthesizer.synthesize(text, language, is_slow(speed))
//!         ├─ Ok  → MP3 bytes → temp artifact → SynthesisComplete
//!         └─ Err → Error
//!
//! Translate { text, source, target }
//!   └─▶ blank text → Warning (no network call)
//!       else translator.translate(text, source, target)
//!         ├─ Ok  → TranslationComplete (feeds the synthesis follow-up)
//!         └─ Err → Error
//! ```

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::audio::AudioClip;
use crate::language::Language;
use crate::recognize::SpeechRecognizer;
use crate::session::SessionContext;
use crate::synthesize::{is_slow, SpeechSynthesizer};
use crate::translate::Translator;

// ---------------------------------------------------------------------------
// PipelineCommand
// ---------------------------------------------------------------------------

/// Commands sent from the UI thread to the orchestrator.
///
/// Each command corresponds to exactly one button press in one tab.
#[derive(Debug)]
pub enum PipelineCommand {
    /// Transcribe a recorded or uploaded clip.
    Recognize { clip: AudioClip },
    /// Convert text to spoken audio.
    Synthesize {
        text: String,
        language: Language,
        speed: f32,
    },
    /// Translate text between two supported languages.
    Translate {
        text: String,
        source: Language,
        target: Language,
    },
}

// ---------------------------------------------------------------------------
// PipelineResult
// ---------------------------------------------------------------------------

/// Results delivered from the orchestrator back to the UI.
#[derive(Debug, Clone)]
pub enum PipelineResult {
    /// Recognition succeeded; the session slot now holds `transcript`.
    RecognitionComplete { transcript: String },
    /// Synthesis succeeded; the MP3 artifact lives at `path`.
    SynthesisComplete { path: PathBuf, language: Language },
    /// Translation succeeded.
    TranslationComplete { text: String, target: Language },
    /// Input was rejected before any network call (e.g. blank text).
    Warning { message: String },
    /// A service call failed; `message` is the user-visible description.
    Error { message: String },
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives the three request/response flows sequentially.
///
/// Create with [`Orchestrator::new`], then spawn [`run`](Self::run) as a
/// tokio task. Commands are processed one at a time — the UI disables its
/// action buttons while a round trip is in flight, so there is never more
/// than one active action per session.
pub struct Orchestrator {
    recognizer: Arc<dyn SpeechRecognizer>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    translator: Arc<dyn Translator>,
    session: SessionContext,
    result_tx: mpsc::Sender<PipelineResult>,
}

impl Orchestrator {
    /// Create a new orchestrator.
    ///
    /// * `recognizer` / `synthesizer` / `translator` — the three service
    ///   adapters, usually the HTTP implementations built from config.
    /// * `result_tx` — sender half of the result channel polled by the UI.
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        translator: Arc<dyn Translator>,
        result_tx: mpsc::Sender<PipelineResult>,
    ) -> Self {
        Self {
            recognizer,
            synthesizer,
            translator,
            session: SessionContext::new(),
            result_tx,
        }
    }

    /// The shared session slot (most recent recognized text).
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the orchestrator until `command_rx` is closed.
    ///
    /// Spawn this as a tokio task from `main()`; it never returns while the
    /// channel is open.
    pub async fn run(mut self, mut command_rx: mpsc::Receiver<PipelineCommand>) {
        while let Some(command) = command_rx.recv().await {
            match command {
                PipelineCommand::Recognize { clip } => {
                    self.handle_recognize(clip).await;
                }
                PipelineCommand::Synthesize {
                    text,
                    language,
                    speed,
                } => {
                    self.handle_synthesize(&text, language, speed).await;
                }
                PipelineCommand::Translate {
                    text,
                    source,
                    target,
                } => {
                    self.handle_translate(&text, source, target).await;
                }
            }
        }

        log::info!("pipeline: command channel closed, orchestrator shutting down");
    }

    // -----------------------------------------------------------------------
    // Command handlers
    // -----------------------------------------------------------------------

    /// Recognize a clip and, on success, overwrite the session slot.
    ///
    /// On failure the slot is left unchanged so the other tabs keep the last
    /// good transcript.
    pub async fn handle_recognize(&mut self, clip: AudioClip) {
        log::debug!(
            "pipeline: recognizing {} bytes ({})",
            clip.bytes.len(),
            clip.format.mime()
        );

        match self.recognizer.recognize(&clip).await {
            Ok(transcript) => {
                self.session.set_text(transcript.clone());
                self.send(PipelineResult::RecognitionComplete { transcript })
                    .await;
            }
            Err(e) => {
                log::warn!("pipeline: recognition failed: {e}");
                self.send(PipelineResult::Error {
                    message: e.to_string(),
                })
                .await;
            }
        }
    }

    /// Synthesize text into an MP3 artifact.
    ///
    /// Blank text never reaches the network — it is reported as a warning.
    pub async fn handle_synthesize(&mut self, text: &str, language: Language, speed: f32) {
        if text.trim().is_empty() {
            self.send(PipelineResult::Warning {
                message: "Please enter some text first".into(),
            })
            .await;
            return;
        }

        let slow = is_slow(speed);
        log::debug!(
            "pipeline: synthesizing {} chars, lang={}, slow={slow}",
            text.len(),
            language.code()
        );

        match self.synthesizer.synthesize(text, language, slow).await {
            Ok(audio) => match write_artifact(&audio) {
                Ok(path) => {
                    self.send(PipelineResult::SynthesisComplete { path, language })
                        .await;
                }
                Err(e) => {
                    log::warn!("pipeline: failed to write MP3 artifact: {e}");
                    self.send(PipelineResult::Error {
                        message: format!("failed to write audio file: {e}"),
                    })
                    .await;
                }
            },
            Err(e) => {
                log::warn!("pipeline: synthesis failed: {e}");
                self.send(PipelineResult::Error {
                    message: e.to_string(),
                })
                .await;
            }
        }
    }

    /// Translate text between two supported languages.
    ///
    /// Blank text never reaches the network; source == target passes through.
    pub async fn handle_translate(&mut self, text: &str, source: Language, target: Language) {
        if text.trim().is_empty() {
            self.send(PipelineResult::Warning {
                message: "Please enter text to translate".into(),
            })
            .await;
            return;
        }

        log::debug!(
            "pipeline: translating {} chars, {} -> {}",
            text.len(),
            source.translation_id(),
            target.translation_id()
        );

        match self.translator.translate(text, source, target).await {
            Ok(translation) => {
                self.send(PipelineResult::TranslationComplete {
                    text: translation.text,
                    target: translation.target,
                })
                .await;
            }
            Err(e) => {
                log::warn!("pipeline: translation failed: {e}");
                self.send(PipelineResult::Error {
                    message: e.to_string(),
                })
                .await;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn send(&self, result: PipelineResult) {
        // Send errors mean the UI is gone; nothing useful left to do.
        let _ = self.result_tx.send(result).await;
    }
}

/// Write synthesized MP3 bytes to a named temp file that outlives the call.
///
/// The file is deliberately kept (not deleted on drop) so the system player
/// can open it; the OS reclaims the temp dir eventually.
fn write_artifact(audio: &[u8]) -> std::io::Result<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix("polyglot-speech-")
        .suffix(".mp3")
        .tempfile()?;

    let (mut handle, path) = file.keep()?;
    handle.write_all(audio)?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioFormat;
    use crate::recognize::MockRecognizer;
    use crate::synthesize::MockSynthesizer;
    use crate::translate::MockTranslator;

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn make_clip() -> AudioClip {
        AudioClip {
            bytes: b"RIFF fake".to_vec(),
            format: AudioFormat::Wav,
        }
    }

    struct Fixture {
        orchestrator: Orchestrator,
        synthesizer: Arc<MockSynthesizer>,
        translator: Arc<MockTranslator>,
        result_rx: mpsc::Receiver<PipelineResult>,
    }

    fn make_fixture(
        recognizer: MockRecognizer,
        synthesizer: MockSynthesizer,
        translator: MockTranslator,
    ) -> Fixture {
        let synthesizer = Arc::new(synthesizer);
        let translator = Arc::new(translator);
        let (result_tx, result_rx) = mpsc::channel(16);

        let orchestrator = Orchestrator::new(
            Arc::new(recognizer),
            Arc::clone(&synthesizer) as Arc<dyn SpeechSynthesizer>,
            Arc::clone(&translator) as Arc<dyn Translator>,
            result_tx,
        );

        Fixture {
            orchestrator,
            synthesizer,
            translator,
            result_rx,
        }
    }

    // -----------------------------------------------------------------------
    // Recognition
    // -----------------------------------------------------------------------

    /// A successful recognition must populate the session slot and emit the
    /// exact transcript.
    #[tokio::test]
    async fn recognition_success_populates_session_slot() {
        let mut fx = make_fixture(
            MockRecognizer::ok("hello from the mic"),
            MockSynthesizer::ok(),
            MockTranslator::ok("unused"),
        );

        fx.orchestrator.handle_recognize(make_clip()).await;

        assert_eq!(
            fx.orchestrator.session().last_text(),
            Some("hello from the mic")
        );
        match fx.result_rx.try_recv().unwrap() {
            PipelineResult::RecognitionComplete { transcript } => {
                assert_eq!(transcript, "hello from the mic");
            }
            other => panic!("expected RecognitionComplete, got {other:?}"),
        }
    }

    /// "Audio not understood" must surface the fixed message and leave the
    /// session slot untouched.
    #[tokio::test]
    async fn recognition_no_match_leaves_session_unchanged() {
        let mut fx = make_fixture(
            MockRecognizer::no_match(),
            MockSynthesizer::ok(),
            MockTranslator::ok("unused"),
        );

        fx.orchestrator.handle_recognize(make_clip()).await;

        assert!(fx.orchestrator.session().last_text().is_none());
        match fx.result_rx.try_recv().unwrap() {
            PipelineResult::Error { message } => {
                assert_eq!(message, "Could not understand audio");
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    /// A failure after a good transcript must keep the old slot value.
    #[tokio::test]
    async fn recognition_failure_keeps_previous_transcript() {
        use crate::recognize::RecognizeError;

        /// Succeeds on the first call, returns NoMatch afterwards.
        struct OnceThenFails {
            calls: std::sync::atomic::AtomicUsize,
        }

        #[async_trait::async_trait]
        impl SpeechRecognizer for OnceThenFails {
            async fn recognize(&self, _clip: &AudioClip) -> Result<String, RecognizeError> {
                let n = self
                    .calls
                    .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                if n == 0 {
                    Ok("first transcript".into())
                } else {
                    Err(RecognizeError::NoMatch)
                }
            }
        }

        let (result_tx, mut result_rx) = mpsc::channel(16);
        let mut orchestrator = Orchestrator::new(
            Arc::new(OnceThenFails {
                calls: std::sync::atomic::AtomicUsize::new(0),
            }),
            Arc::new(MockSynthesizer::ok()),
            Arc::new(MockTranslator::ok("unused")),
            result_tx,
        );

        orchestrator.handle_recognize(make_clip()).await;
        let _ = result_rx.try_recv();

        orchestrator.handle_recognize(make_clip()).await;

        assert_eq!(
            orchestrator.session().last_text(),
            Some("first transcript")
        );
        assert!(matches!(
            result_rx.try_recv().unwrap(),
            PipelineResult::Error { .. }
        ));
    }

    /// Distinct service errors must render with the "Service error" prefix.
    #[tokio::test]
    async fn recognition_service_error_is_distinct_from_no_match() {
        let mut fx = make_fixture(
            MockRecognizer::service_error(),
            MockSynthesizer::ok(),
            MockTranslator::ok("unused"),
        );

        fx.orchestrator.handle_recognize(make_clip()).await;

        match fx.result_rx.try_recv().unwrap() {
            PipelineResult::Error { message } => {
                assert!(message.starts_with("Service error:"));
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Synthesis
    // -----------------------------------------------------------------------

    /// Blank text must produce a warning and never touch the network.
    #[tokio::test]
    async fn blank_text_synthesis_warns_without_network_call() {
        let mut fx = make_fixture(
            MockRecognizer::ok("unused"),
            MockSynthesizer::ok(),
            MockTranslator::ok("unused"),
        );

        fx.orchestrator
            .handle_synthesize("   \t\n", Language::English, 1.0)
            .await;

        assert_eq!(fx.synthesizer.call_count(), 0);
        assert!(matches!(
            fx.result_rx.try_recv().unwrap(),
            PipelineResult::Warning { .. }
        ));
    }

    /// A speed below the cutoff must select the slow flag on the wire.
    #[tokio::test]
    async fn slow_speed_selects_slow_flag() {
        let mut fx = make_fixture(
            MockRecognizer::ok("unused"),
            MockSynthesizer::ok(),
            MockTranslator::ok("unused"),
        );

        fx.orchestrator
            .handle_synthesize("bonjour", Language::French, 0.7)
            .await;

        let calls = fx.synthesizer.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].2, "0.7 must map to slow");
    }

    /// A speed at or above the cutoff must select normal pacing.
    #[tokio::test]
    async fn normal_speed_selects_normal_flag() {
        let mut fx = make_fixture(
            MockRecognizer::ok("unused"),
            MockSynthesizer::ok(),
            MockTranslator::ok("unused"),
        );

        fx.orchestrator
            .handle_synthesize("bonjour", Language::French, 1.2)
            .await;

        let calls = fx.synthesizer.calls();
        assert!(!calls[0].2, "1.2 must map to normal speed");
    }

    /// Successful synthesis must produce a readable MP3 artifact on disk.
    #[tokio::test]
    async fn synthesis_success_writes_artifact() {
        let mut fx = make_fixture(
            MockRecognizer::ok("unused"),
            MockSynthesizer::ok(),
            MockTranslator::ok("unused"),
        );

        fx.orchestrator
            .handle_synthesize("hello", Language::English, 1.0)
            .await;

        match fx.result_rx.try_recv().unwrap() {
            PipelineResult::SynthesisComplete { path, language } => {
                assert_eq!(language, Language::English);
                let contents = std::fs::read(&path).unwrap();
                assert_eq!(contents, b"ID3 fake mp3 body");
                let _ = std::fs::remove_file(path);
            }
            other => panic!("expected SynthesisComplete, got {other:?}"),
        }
    }

    /// A synthesis service failure must surface as an error, not a panic.
    #[tokio::test]
    async fn synthesis_failure_surfaces_error() {
        let mut fx = make_fixture(
            MockRecognizer::ok("unused"),
            MockSynthesizer::failing(),
            MockTranslator::ok("unused"),
        );

        fx.orchestrator
            .handle_synthesize("hello", Language::English, 1.0)
            .await;

        assert!(matches!(
            fx.result_rx.try_recv().unwrap(),
            PipelineResult::Error { .. }
        ));
    }

    // -----------------------------------------------------------------------
    // Translation
    // -----------------------------------------------------------------------

    /// Blank text must produce a warning and never touch the network.
    #[tokio::test]
    async fn blank_text_translation_warns_without_network_call() {
        let mut fx = make_fixture(
            MockRecognizer::ok("unused"),
            MockSynthesizer::ok(),
            MockTranslator::ok("unused"),
        );

        fx.orchestrator
            .handle_translate("", Language::English, Language::Hindi)
            .await;

        assert_eq!(fx.translator.call_count(), 0);
        assert!(matches!(
            fx.result_rx.try_recv().unwrap(),
            PipelineResult::Warning { .. }
        ));
    }

    /// English → Hindi must deliver the translated text paired with the
    /// target language so the UI can offer the synthesis follow-up.
    #[tokio::test]
    async fn translation_success_carries_target_language() {
        let mut fx = make_fixture(
            MockRecognizer::ok("unused"),
            MockSynthesizer::ok(),
            MockTranslator::ok("नमस्ते"),
        );

        fx.orchestrator
            .handle_translate("Hello", Language::English, Language::Hindi)
            .await;

        match fx.result_rx.try_recv().unwrap() {
            PipelineResult::TranslationComplete { text, target } => {
                assert_eq!(text, "नमस्ते");
                assert_eq!(target, Language::Hindi);
            }
            other => panic!("expected TranslationComplete, got {other:?}"),
        }
    }

    /// A translation failure must surface the specific error message.
    #[tokio::test]
    async fn translation_failure_surfaces_error() {
        let mut fx = make_fixture(
            MockRecognizer::ok("unused"),
            MockSynthesizer::ok(),
            MockTranslator::failing(),
        );

        fx.orchestrator
            .handle_translate("Hello", Language::English, Language::Hindi)
            .await;

        match fx.result_rx.try_recv().unwrap() {
            PipelineResult::Error { message } => {
                assert!(message.contains("translation request failed"));
            }
            other => panic!("expected Error, got {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // run() loop
    // -----------------------------------------------------------------------

    /// The run loop must process commands in order and exit when the channel
    /// closes.
    #[tokio::test]
    async fn run_processes_commands_until_channel_closes() {
        let fx = make_fixture(
            MockRecognizer::ok("transcribed"),
            MockSynthesizer::ok(),
            MockTranslator::ok("translated"),
        );
        let Fixture {
            orchestrator,
            mut result_rx,
            ..
        } = fx;

        let (command_tx, command_rx) = mpsc::channel(8);
        command_tx
            .send(PipelineCommand::Recognize { clip: make_clip() })
            .await
            .unwrap();
        command_tx
            .send(PipelineCommand::Translate {
                text: "Hello".into(),
                source: Language::English,
                target: Language::Hindi,
            })
            .await
            .unwrap();
        drop(command_tx);

        orchestrator.run(command_rx).await;

        assert!(matches!(
            result_rx.try_recv().unwrap(),
            PipelineResult::RecognitionComplete { .. }
        ));
        assert!(matches!(
            result_rx.try_recv().unwrap(),
            PipelineResult::TranslationComplete { .. }
        ));
    }
}
