//! Audio input — microphone capture and in-memory clips.
//!
//! # Flow
//!
//! ```text
//! Microphone → cpal callback → AudioChunk (mpsc) → accumulation buffer
//!           → AudioClip::from_samples (WAV)       → recognition adapter
//!
//! File upload → AudioClip::from_file (wav/mp3)    → recognition adapter
//! ```
//!
//! Captured audio keeps the device's native sample rate and channel count;
//! the recognition service interprets the clip however the source provided
//! it, so no resampling happens on this side.

pub mod capture;
pub mod clip;

pub use capture::{AudioCapture, AudioChunk, CaptureError, StreamHandle};
pub use clip::{AudioClip, AudioFormat, ClipError};
