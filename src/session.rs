//! Shared session state — the single text slot passed between tabs.
//!
//! An explicit [`SessionContext`] owned by the pipeline orchestrator rather
//! than ambient global state, so the coupling between the three flows is
//! visible at the call sites.

/// The one piece of state shared across the three tabs: the most recent
/// recognized (or entered) text.
///
/// Semantics are last-write-wins — whichever flow most recently produced a
/// transcript overwrites the slot. There is exactly one active action per
/// session, so no locking is needed as long as one owner mutates it.
#[derive(Debug, Default, Clone)]
pub struct SessionContext {
    last_text: Option<String>,
}

impl SessionContext {
    /// Create an empty context (no text recognized yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent recognized text, if any.
    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    /// Overwrite the slot with a newly recognized transcript.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.last_text = Some(text.into());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let ctx = SessionContext::new();
        assert!(ctx.last_text().is_none());
    }

    #[test]
    fn set_text_populates_slot() {
        let mut ctx = SessionContext::new();
        ctx.set_text("hello world");
        assert_eq!(ctx.last_text(), Some("hello world"));
    }

    #[test]
    fn last_write_wins() {
        let mut ctx = SessionContext::new();
        ctx.set_text("first");
        ctx.set_text("second");
        assert_eq!(ctx.last_text(), Some("second"));
    }
}
