//! Application entry point — Multilingual Speech & Translation Tool.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the three HTTP service adapters from config.
//! 5. Create pipeline channels (`command`, `result`).
//! 6. Spawn the pipeline orchestrator on the tokio runtime.
//! 7. Start the cpal audio capture stream and its drain thread.
//! 8. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use tokio::sync::mpsc;

use polyglot_speech::{
    app::{new_capture_buffer, CaptureBuffer, PolyglotApp},
    audio::{AudioCapture, AudioChunk},
    config::AppConfig,
    pipeline::{Orchestrator, PipelineCommand, PipelineResult},
    recognize::HttpRecognizer,
    synthesize::HttpSynthesizer,
    translate::HttpTranslator,
};

use eframe::egui;

// ---------------------------------------------------------------------------
// Native options builder
// ---------------------------------------------------------------------------

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let vp = egui::ViewportBuilder::default()
        .with_inner_size([width, height])
        .with_min_inner_size([560.0, 400.0]);

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Multilingual Speech & Translation Tool starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime (2 worker threads — one command in flight plus the
    //    HTTP client internals)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. HTTP service adapters
    let recognizer = Arc::new(HttpRecognizer::from_config(&config.recognition));
    let synthesizer = Arc::new(HttpSynthesizer::from_config(&config.synthesis));
    let translator = Arc::new(HttpTranslator::from_config(&config.translation));

    // 5. Channel setup
    let (command_tx, command_rx) = mpsc::channel::<PipelineCommand>(16);
    let (result_tx, result_rx) = mpsc::channel::<PipelineResult>(32);

    // 6. Spawn pipeline orchestrator onto the tokio runtime
    let orchestrator = Orchestrator::new(recognizer, synthesizer, translator, result_tx);
    rt.spawn(orchestrator.run(command_rx));

    // 7. cpal audio capture — pushes device-native samples into the shared
    //    buffer while the UI record toggle is on. Clips keep the device's
    //    sample rate and channel count; the recognition service accepts them
    //    as-is.
    let capture_buf: CaptureBuffer = new_capture_buffer();
    let drain_buf = Arc::clone(&capture_buf);

    let mut capture_rate = 0u32;
    let mut capture_channels = 0u16;

    let _stream_handle: Option<polyglot_speech::audio::StreamHandle> = match AudioCapture::new() {
        Ok(capture) => {
            capture_rate = capture.sample_rate();
            capture_channels = capture.channels();
            let (chunk_tx, chunk_rx) = std::sync::mpsc::channel::<AudioChunk>();

            // Drain cpal chunks into the shared buffer, but only while the
            // record flag is raised.
            std::thread::Builder::new()
                .name("audio-accumulate".into())
                .spawn(move || {
                    while let Ok(chunk) = chunk_rx.recv() {
                        let mut buf = drain_buf.lock().unwrap();
                        if buf.1 {
                            buf.0.extend_from_slice(&chunk.samples);
                        }
                    }
                })
                .expect("failed to spawn audio-accumulate thread");

            match capture.start(chunk_tx) {
                Ok(handle) => {
                    log::info!(
                        "Audio capture started ({} Hz, {} ch)",
                        capture_rate,
                        capture_channels
                    );
                    Some(handle)
                }
                Err(e) => {
                    log::warn!("Failed to start audio stream: {e}");
                    None
                }
            }
        }
        Err(e) => {
            log::warn!("Audio capture unavailable: {e}");
            None
        }
    };

    let capture_available = _stream_handle.is_some();

    // 8. Build the egui app and run it (blocks until the window is closed)
    let app = PolyglotApp::new(
        command_tx,
        result_rx,
        capture_buf,
        capture_rate,
        capture_channels,
        capture_available,
        &config,
    );
    let options = native_options(&config);

    eframe::run_native(
        "Multilingual Speech & Translation Tool",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}
