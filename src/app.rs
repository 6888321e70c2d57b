//! Multilingual speech & translation window — egui/eframe application.
//!
//! # Architecture
//!
//! [`PolyglotApp`] is the top-level [`eframe::App`]. It owns the UI state
//! and two channel endpoints:
//!
//! * `command_tx` — sends [`PipelineCommand`] to the background orchestrator.
//! * `result_rx`  — receives [`PipelineResult`] from the orchestrator.
//!
//! The window renders three tabs: Speech to Text, Text to Speech and
//! Translation. Each tab's button is a one-shot transition from idle to
//! "result displayed" or "error displayed"; a busy flag disables the action
//! buttons while the single in-flight round trip completes, so there is
//! never more than one active action per session.
//!
//! A successful recognition pre-fills the text inputs of the other two tabs
//! with the exact transcript (the shared session slot, surfaced to the UI
//! through [`PipelineResult::RecognitionComplete`]).

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use eframe::egui;
use tokio::sync::mpsc;

use crate::audio::AudioClip;
use crate::config::AppConfig;
use crate::language::Language;
use crate::pipeline::{PipelineCommand, PipelineResult};
use crate::synthesize::{is_slow, SLOW_SPEED_CUTOFF};

// ---------------------------------------------------------------------------
// CaptureBuffer
// ---------------------------------------------------------------------------

/// Thread-shared buffer that accumulates audio samples while the record
/// toggle is active. The cpal drain thread and the UI both access this via
/// `Arc<Mutex<…>>`.
pub type CaptureBuffer = Arc<Mutex<(Vec<f32>, bool)>>;
//                                  ^^^^^^^  ^^^^
//                               samples   is_recording

/// Construct an empty, non-recording [`CaptureBuffer`].
pub fn new_capture_buffer() -> CaptureBuffer {
    Arc::new(Mutex::new((Vec::new(), false)))
}

// ---------------------------------------------------------------------------
// Tab / input-method selectors
// ---------------------------------------------------------------------------

/// The three function tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    SpeechToText,
    TextToSpeech,
    Translation,
}

impl Tab {
    fn label(self) -> &'static str {
        match self {
            Tab::SpeechToText => "Speech to Text",
            Tab::TextToSpeech => "Text to Speech",
            Tab::Translation => "Translation",
        }
    }
}

/// How the Speech to Text tab obtains its audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMethod {
    Record,
    Upload,
}

// ---------------------------------------------------------------------------
// Outcome — per-tab one-shot result display
// ---------------------------------------------------------------------------

/// What a tab shows after its one-shot action completed.
#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Success(String),
    Warning(String),
    Error(String),
}

impl Outcome {
    fn color(&self) -> egui::Color32 {
        match self {
            Outcome::Success(_) => egui::Color32::from_rgb(80, 200, 120),
            Outcome::Warning(_) => egui::Color32::from_rgb(230, 190, 80),
            Outcome::Error(_) => egui::Color32::from_rgb(255, 136, 68),
        }
    }

    fn text(&self) -> &str {
        match self {
            Outcome::Success(t) | Outcome::Warning(t) | Outcome::Error(t) => t,
        }
    }
}

// ---------------------------------------------------------------------------
// PolyglotApp
// ---------------------------------------------------------------------------

/// eframe application — the three-tab speech & translation window.
pub struct PolyglotApp {
    // ── Tab selection / in-flight tracking ───────────────────────────────
    active_tab: Tab,
    /// Tab that issued the command currently in flight, if any. Results and
    /// warnings are routed back to it.
    in_flight: Option<Tab>,

    // ── Speech to Text tab ───────────────────────────────────────────────
    input_method: InputMethod,
    /// Whether the record toggle is currently on.
    recording: bool,
    /// Clip captured by the last record cycle, with its duration in seconds.
    recorded: Option<(AudioClip, f32)>,
    recognition: Option<Outcome>,

    // ── Text to Speech tab ───────────────────────────────────────────────
    tts_text: String,
    tts_language: Language,
    speed: f32,
    synthesis: Option<Outcome>,
    /// Last synthesized artifact (path + language), playable via the system
    /// player.
    artifact: Option<(PathBuf, Language)>,

    // ── Translation tab ──────────────────────────────────────────────────
    translate_text: String,
    source_language: Language,
    target_language: Language,
    translation: Option<Outcome>,
    /// Last successful translation (text + target), kept for the synthesis
    /// follow-up button.
    translated: Option<(String, Language)>,

    // ── Channels ─────────────────────────────────────────────────────────
    command_tx: mpsc::Sender<PipelineCommand>,
    result_rx: mpsc::Receiver<PipelineResult>,

    // ── Capture ──────────────────────────────────────────────────────────
    capture_buf: CaptureBuffer,
    capture_rate: u32,
    capture_channels: u16,
    /// False when no input device could be opened; the record option is
    /// hidden and only upload remains.
    capture_available: bool,
}

impl PolyglotApp {
    /// Create a new [`PolyglotApp`].
    ///
    /// * `command_tx`   — sender end of the pipeline command channel.
    /// * `result_rx`    — receiver end of the pipeline result channel.
    /// * `capture_buf`  — shared accumulation buffer fed by the cpal drain
    ///   thread; `capture_rate`/`capture_channels` describe its contents.
    /// * `config`       — loaded application configuration (selector
    ///   defaults).
    pub fn new(
        command_tx: mpsc::Sender<PipelineCommand>,
        result_rx: mpsc::Receiver<PipelineResult>,
        capture_buf: CaptureBuffer,
        capture_rate: u32,
        capture_channels: u16,
        capture_available: bool,
        config: &AppConfig,
    ) -> Self {
        Self {
            active_tab: Tab::SpeechToText,
            in_flight: None,
            input_method: if capture_available {
                InputMethod::Record
            } else {
                InputMethod::Upload
            },
            recording: false,
            recorded: None,
            recognition: None,
            tts_text: String::new(),
            tts_language: config.ui.synthesis_language,
            speed: config.ui.speed,
            synthesis: None,
            artifact: None,
            translate_text: String::new(),
            source_language: config.ui.source_language,
            target_language: config.ui.target_language,
            translation: None,
            translated: None,
            command_tx,
            result_rx,
            capture_buf,
            capture_rate,
            capture_channels,
            capture_available,
        }
    }

    fn busy(&self) -> bool {
        self.in_flight.is_some()
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain all pending pipeline results (non-blocking) and route them to
    /// the tab that issued the in-flight command.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            let tab = self.in_flight.take().unwrap_or(self.active_tab);
            match result {
                PipelineResult::RecognitionComplete { transcript } => {
                    self.recognition =
                        Some(Outcome::Success(format!("Recognized text: {transcript}")));
                    // Pre-fill the other two tabs with the exact transcript.
                    self.tts_text = transcript.clone();
                    self.translate_text = transcript;
                }
                PipelineResult::SynthesisComplete { path, language } => {
                    let outcome = Outcome::Success(format!("{language} audio generated"));
                    match tab {
                        Tab::Translation => self.translation = Some(outcome),
                        _ => self.synthesis = Some(outcome),
                    }
                    self.artifact = Some((path, language));
                }
                PipelineResult::TranslationComplete { text, target } => {
                    self.translation =
                        Some(Outcome::Success(format!("Translated text ({target}):")));
                    self.translated = Some((text, target));
                }
                PipelineResult::Warning { message } => {
                    self.set_outcome(tab, Outcome::Warning(message));
                }
                PipelineResult::Error { message } => {
                    self.set_outcome(tab, Outcome::Error(message));
                }
            }
        }
    }

    fn set_outcome(&mut self, tab: Tab, outcome: Outcome) {
        match tab {
            Tab::SpeechToText => self.recognition = Some(outcome),
            Tab::TextToSpeech => self.synthesis = Some(outcome),
            Tab::Translation => self.translation = Some(outcome),
        }
    }

    /// Send a command and remember which tab it belongs to.
    fn send_command(&mut self, tab: Tab, command: PipelineCommand) {
        if self.command_tx.try_send(command).is_ok() {
            self.in_flight = Some(tab);
        } else {
            self.set_outcome(
                tab,
                Outcome::Error("background worker is unavailable".into()),
            );
        }
    }

    // ── Recording ────────────────────────────────────────────────────────

    /// Toggle the capture flag; on stop, encode the accumulated samples into
    /// a WAV clip for preview/transcription.
    fn toggle_recording(&mut self) {
        if self.recording {
            // Stop: drain buffer and encode.
            let samples: Vec<f32> = {
                let mut buf = self.capture_buf.lock().unwrap();
                buf.1 = false;
                std::mem::take(&mut buf.0)
            };
            self.recording = false;

            let frame_count = samples.len() / self.capture_channels.max(1) as usize;
            let duration = frame_count as f32 / self.capture_rate.max(1) as f32;

            match AudioClip::from_samples(&samples, self.capture_rate, self.capture_channels) {
                Ok(clip) => {
                    self.recorded = Some((clip, duration));
                    self.recognition = None;
                }
                Err(e) => {
                    self.recognition = Some(Outcome::Error(e.to_string()));
                }
            }
        } else {
            // Start: clear leftovers and raise the flag.
            let mut buf = self.capture_buf.lock().unwrap();
            buf.0.clear();
            buf.1 = true;
            drop(buf);
            self.recording = true;
            self.recorded = None;
            self.recognition = None;
        }
    }

    // ── Tab renderers ────────────────────────────────────────────────────

    fn draw_speech_to_text(&mut self, ui: &mut egui::Ui) {
        ui.heading("Speech to Text Conversion");
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            ui.label("Choose input method:");
            ui.add_enabled_ui(self.capture_available, |ui| {
                ui.selectable_value(&mut self.input_method, InputMethod::Record, "Record Audio");
            });
            ui.selectable_value(
                &mut self.input_method,
                InputMethod::Upload,
                "Upload Audio File",
            );
        });
        if !self.capture_available {
            ui.label(
                egui::RichText::new("No microphone available — upload a file instead")
                    .color(egui::Color32::from_rgb(150, 150, 150))
                    .size(11.0),
            );
        }
        ui.add_space(8.0);

        match self.input_method {
            InputMethod::Record => self.draw_recorder(ui),
            InputMethod::Upload => self.draw_uploader(ui),
        }

        ui.add_space(8.0);
        if let Some(outcome) = self.recognition.clone() {
            ui.label(egui::RichText::new(outcome.text()).color(outcome.color()));
        }
        if self.busy() && self.active_tab == Tab::SpeechToText {
            ui.spinner();
        }
    }

    fn draw_recorder(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = if self.recording {
                "Stop recording"
            } else {
                "Click to record"
            };
            if ui
                .add_enabled(!self.busy(), egui::Button::new(label))
                .clicked()
            {
                self.toggle_recording();
            }

            if self.recording {
                ui.label(
                    egui::RichText::new("recording…")
                        .color(egui::Color32::from_rgb(255, 80, 80)),
                );
            }
        });

        if let Some((clip, duration)) = self.recorded.clone() {
            ui.add_space(4.0);
            ui.label(format!(
                "Recorded clip: {duration:.1} s ({} KiB WAV)",
                clip.bytes.len() / 1024
            ));
            if ui
                .add_enabled(!self.busy(), egui::Button::new("Transcribe"))
                .clicked()
            {
                self.recognition = None;
                self.send_command(Tab::SpeechToText, PipelineCommand::Recognize { clip });
            }
        }
    }

    fn draw_uploader(&mut self, ui: &mut egui::Ui) {
        if ui
            .add_enabled(!self.busy(), egui::Button::new("Upload audio file"))
            .clicked()
        {
            let picked = rfd::FileDialog::new()
                .add_filter("audio", &["wav", "mp3"])
                .pick_file();

            if let Some(path) = picked {
                match AudioClip::from_file(&path) {
                    Ok(clip) => {
                        self.recognition = None;
                        self.send_command(Tab::SpeechToText, PipelineCommand::Recognize { clip });
                    }
                    Err(e) => {
                        self.recognition = Some(Outcome::Error(e.to_string()));
                    }
                }
            }
        }
    }

    fn draw_text_to_speech(&mut self, ui: &mut egui::Ui) {
        ui.heading("Text to Speech Conversion");
        ui.add_space(6.0);

        ui.label("Enter text to convert:");
        ui.add(
            egui::TextEdit::multiline(&mut self.tts_text)
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            language_selector(ui, "Select language:", "tts_lang", &mut self.tts_language);

            ui.separator();
            ui.label("Select speed:");
            ui.add(egui::Slider::new(&mut self.speed, 0.5..=2.0).step_by(0.1))
                .on_hover_text(format!(
                    "The synthesis service only distinguishes slow (< {SLOW_SPEED_CUTOFF}) \
                     from normal pacing; intermediate values have no further effect"
                ));
            let pace = if is_slow(self.speed) { "slow" } else { "normal" };
            ui.label(
                egui::RichText::new(pace)
                    .color(egui::Color32::from_rgb(150, 150, 150))
                    .size(11.0),
            );
        });

        ui.add_space(6.0);
        if ui
            .add_enabled(!self.busy(), egui::Button::new("Generate Audio"))
            .clicked()
        {
            self.synthesis = None;
            self.artifact = None;
            self.send_command(
                Tab::TextToSpeech,
                PipelineCommand::Synthesize {
                    text: self.tts_text.clone(),
                    language: self.tts_language,
                    speed: self.speed,
                },
            );
        }

        ui.add_space(8.0);
        if let Some(outcome) = self.synthesis.clone() {
            ui.label(egui::RichText::new(outcome.text()).color(outcome.color()));
        }
        self.draw_artifact(ui);
        if self.busy() && self.active_tab == Tab::TextToSpeech {
            ui.spinner();
        }
    }

    /// Show the last synthesized MP3 with a Play button (system player).
    fn draw_artifact(&mut self, ui: &mut egui::Ui) {
        if let Some((path, _)) = self.artifact.clone() {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(path.display().to_string())
                        .color(egui::Color32::from_rgb(150, 150, 150))
                        .size(11.0),
                );
                if ui.button("Play").clicked() {
                    if let Err(e) = open::that(&path) {
                        log::warn!("failed to open audio player: {e}");
                    }
                }
            });
        }
    }

    fn draw_translation(&mut self, ui: &mut egui::Ui) {
        ui.heading("Text Translation");
        ui.add_space(6.0);

        ui.label("Enter text to translate:");
        ui.add(
            egui::TextEdit::multiline(&mut self.translate_text)
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            language_selector(
                ui,
                "Source language:",
                "src_lang",
                &mut self.source_language,
            );
            ui.separator();
            language_selector(
                ui,
                "Target language:",
                "dst_lang",
                &mut self.target_language,
            );
        });

        ui.add_space(6.0);
        if ui
            .add_enabled(!self.busy(), egui::Button::new("Translate"))
            .clicked()
        {
            self.translation = None;
            self.translated = None;
            self.send_command(
                Tab::Translation,
                PipelineCommand::Translate {
                    text: self.translate_text.clone(),
                    source: self.source_language,
                    target: self.target_language,
                },
            );
        }

        ui.add_space(8.0);
        if let Some(outcome) = self.translation.clone() {
            ui.label(egui::RichText::new(outcome.text()).color(outcome.color()));
        }

        if let Some((text, target)) = self.translated.clone() {
            // Result container.
            egui::Frame::group(ui.style())
                .fill(egui::Color32::from_rgb(25, 25, 25))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(text.as_str()).size(14.0));
                });

            ui.add_space(4.0);
            if ui
                .add_enabled(
                    !self.busy(),
                    egui::Button::new("Convert Translation to Speech"),
                )
                .clicked()
            {
                // Follow-up synthesis uses the target language; the speed
                // slider belongs to the other tab and is not applied here.
                self.send_command(
                    Tab::Translation,
                    PipelineCommand::Synthesize {
                        text,
                        language: target,
                        speed: 1.0,
                    },
                );
            }
            if matches!(self.artifact, Some((_, lang)) if lang == target) {
                self.draw_artifact(ui);
            }
        }

        if self.busy() && self.active_tab == Tab::Translation {
            ui.spinner();
        }
    }
}

// ---------------------------------------------------------------------------
// Language selector helper
// ---------------------------------------------------------------------------

/// A labelled combo box over [`Language::ALL`].
fn language_selector(ui: &mut egui::Ui, label: &str, id: &str, selected: &mut Language) {
    ui.label(label);
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.name())
        .show_ui(ui, |ui| {
            for lang in Language::ALL {
                ui.selectable_value(selected, lang, lang.name());
            }
        });
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for PolyglotApp {
    /// Called every frame by eframe. Polls the result channel, then renders
    /// the active tab.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();

        // Keep polling while a round trip is in flight or audio is being
        // captured.
        if self.busy() || self.recording {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Multilingual Speech & Translation Tool");
            ui.label(
                egui::RichText::new(
                    "Convert speech to text, text to speech, and translate between languages",
                )
                .color(egui::Color32::from_rgb(150, 150, 150)),
            );
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                for tab in [Tab::SpeechToText, Tab::TextToSpeech, Tab::Translation] {
                    ui.selectable_value(&mut self.active_tab, tab, tab.label());
                }
            });
            ui.add_space(2.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(6.0);
            match self.active_tab {
                Tab::SpeechToText => self.draw_speech_to_text(ui),
                Tab::TextToSpeech => self.draw_text_to_speech(ui),
                Tab::Translation => self.draw_translation(ui),
            }
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("speech & translation window closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
