//! Multilingual speech & translation tool.
//!
//! A single-window desktop application that talks to three remote services:
//!
//! * speech recognition — recorded or uploaded audio in, transcript out
//! * text-to-speech — text + language + pacing in, MP3 bytes out
//! * translation — text + source/target language in, translated text out
//!
//! The UI ([`app`]) sends [`pipeline::PipelineCommand`]s over a channel to a
//! background [`pipeline::Orchestrator`] running on a tokio runtime, which
//! drives the service adapters and reports [`pipeline::PipelineResult`]s
//! back. A successful recognition fills a shared session text slot that
//! pre-fills the synthesis and translation inputs.

pub mod app;
pub mod audio;
pub mod config;
pub mod language;
pub mod pipeline;
pub mod recognize;
pub mod session;
pub mod synthesize;
pub mod translate;
