//! Speech-to-text adapter — one blocking round trip per clip.
//!
//! * [`SpeechRecognizer`] — async trait implemented by all recognizer
//!   backends.
//! * [`HttpRecognizer`] — posts the whole clip to a remote recognition
//!   endpoint and returns the transcript.
//! * [`RecognizeError`] — distinguishes "audio not understood" from
//!   service/network failures, as the UI reports them differently.

pub mod recognizer;

pub use recognizer::{HttpRecognizer, RecognizeError, SpeechRecognizer};

#[cfg(test)]
pub use recognizer::MockRecognizer;
