//! Translation adapter.
//!
//! * [`Translator`] — async trait implemented by translation backends.
//! * [`HttpTranslator`] — posts text + source/target identifiers to a
//!   remote endpoint.
//! * [`Translation`] — translated text paired with the target language, so
//!   the synthesis follow-up knows which voice to use.
//! * [`TranslateError`] — explicit failure taxonomy (network, unsupported
//!   language, empty response) instead of one catch-all message.

pub mod translator;

pub use translator::{HttpTranslator, TranslateError, Translation, Translator};

#[cfg(test)]
pub use translator::MockTranslator;
