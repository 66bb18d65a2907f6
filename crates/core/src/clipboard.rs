use fluid_clamp_protocol::Metric;
use thiserror::Error;

use crate::model::Session;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// A platform clipboard that can receive text.
///
/// Injected by front-ends; the core never requires one to be present.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// What happened when the user asked to copy an expression.
///
/// Every variant carries the text so callers can still show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(String),
    /// No clipboard was injected.
    Unavailable(String),
    Failed { text: String, reason: String },
}

impl CopyOutcome {
    pub fn text(&self) -> &str {
        match self {
            CopyOutcome::Copied(text)
            | CopyOutcome::Unavailable(text)
            | CopyOutcome::Failed { text, .. } => text,
        }
    }

    /// Short user-facing status line.
    pub fn message(&self) -> String {
        match self {
            CopyOutcome::Copied(_) => "Copied to clipboard!".to_owned(),
            CopyOutcome::Unavailable(_) => "Clipboard not available".to_owned(),
            CopyOutcome::Failed { reason, .. } => format!("Copy failed: {reason}"),
        }
    }
}

/// Copy a metric's current expression to the clipboard, if one is available.
///
/// Returns `None` only when the session has no group for `metric`.
pub fn copy_expression(
    session: &Session,
    metric: Metric,
    sink: Option<&mut dyn ClipboardSink>,
) -> Option<CopyOutcome> {
    let text = session.clamp_expression(metric)?;
    let outcome = match sink {
        None => CopyOutcome::Unavailable(text),
        Some(sink) => match sink.write_text(&text) {
            Ok(()) => CopyOutcome::Copied(text),
            Err(e) => CopyOutcome::Failed {
                text,
                reason: e.to_string(),
            },
        },
    };
    tracing::debug!(%metric, ?outcome, "copy requested");
    Some(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Option<String>,
    }

    impl ClipboardSink for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.contents = Some(text.to_owned());
            Ok(())
        }
    }

    struct BrokenClipboard;

    impl ClipboardSink for BrokenClipboard {
        fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Write("denied".into()))
        }
    }

    #[test]
    fn copies_current_expression() {
        let session = Session::new();
        let mut clipboard = MemoryClipboard::default();
        let outcome = copy_expression(&session, Metric::FontSize, Some(&mut clipboard)).unwrap();
        assert_eq!(
            outcome,
            CopyOutcome::Copied("clamp(1rem, -0.8750rem + 8.3333vw, 3.5rem)".into())
        );
        assert_eq!(clipboard.contents.as_deref(), Some(outcome.text()));
        assert_eq!(outcome.message(), "Copied to clipboard!");
    }

    #[test]
    fn missing_clipboard_is_not_an_error() {
        let session = Session::new();
        let outcome = copy_expression(&session, Metric::LineHeight, None).unwrap();
        assert!(matches!(outcome, CopyOutcome::Unavailable(_)));
        assert!(outcome.text().starts_with("clamp("));
    }

    #[test]
    fn sink_failure_is_reported() {
        let mut session = Session::new();
        session.take_dirty();
        let mut clipboard = BrokenClipboard;
        let outcome = copy_expression(&session, Metric::FontSize, Some(&mut clipboard)).unwrap();
        assert_eq!(outcome.message(), "Copy failed: clipboard write failed: denied");
        assert!(!session.take_dirty());
    }
}
