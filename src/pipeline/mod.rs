//! Pipeline module — the command/result protocol between the UI and the
//! background orchestrator, plus the orchestrator itself.
//!
//! # Architecture
//!
//! ```text
//! PipelineCommand (mpsc)
//!        │
//!        ▼
//! Orchestrator::run()  ← async tokio task, one command at a time
//!        │
//!        ├─ Recognize  → SpeechRecognizer::recognize → session slot updated
//!        ├─ Synthesize → SpeechSynthesizer::synthesize → temp MP3 artifact
//!        └─ Translate  → Translator::translate
//!        │
//!        ▼
//! PipelineResult (mpsc) ←─── polled by the egui update() loop each frame
//! ```
//!
//! Empty or whitespace-only text is rejected with a
//! [`PipelineResult::Warning`] before any network call is issued.

pub mod runner;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{Orchestrator, PipelineCommand, PipelineResult};
