//! Text-to-speech adapter.
//!
//! * [`SpeechSynthesizer`] — async trait implemented by synthesis backends.
//! * [`HttpSynthesizer`] — posts text + language code + slow flag to a
//!   remote endpoint and returns MP3 bytes.
//! * [`is_slow`] / [`SLOW_SPEED_CUTOFF`] — the threshold that collapses the
//!   continuous speed slider into the service's boolean slow flag.

pub mod synthesizer;

pub use synthesizer::{
    is_slow, HttpSynthesizer, SpeechSynthesizer, SynthesizeError, SLOW_SPEED_CUTOFF,
};

#[cfg(test)]
pub use synthesizer::MockSynthesizer;
