//! Session history of classification results.
//!
//! Append-only, insertion-ordered, and owned by whoever drives the session
//! (the interactive shell loop or the web server state). Storage is not
//! capped; views decide how many entries to show via [`SessionHistory::recent`].

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::model::Label;

/// Marker appended to truncated message previews.
pub const ELLIPSIS: &str = "...";

/// One past classification. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    timestamp: DateTime<Local>,
    message: String,
    label: Label,
    confidence: f64,
}

impl ClassificationResult {
    /// Build an entry, truncating `message` to `preview_chars` characters.
    ///
    /// `confidence` is a percentage and is clamped into `[0, 100]`.
    pub fn new(
        timestamp: DateTime<Local>,
        message: &str,
        preview_chars: usize,
        label: Label,
        confidence: f64,
    ) -> Self {
        Self {
            timestamp,
            message: preview(message, preview_chars),
            label,
            confidence: confidence.clamp(0.0, 100.0),
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Timestamp in the `YYYY-MM-DD HH:MM:SS` form shown in the panel.
    pub fn display_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// The (possibly truncated) message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn label(&self) -> Label {
        self.label
    }

    /// Confidence of the predicted class, as a percentage.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Keep the first `max_chars` characters, appending `...` when anything was cut.
pub fn preview(message: &str, max_chars: usize) -> String {
    match message.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &message[..byte_idx]),
        None => message.to_string(),
    }
}

/// Ordered log of classification results for one session.
#[derive(Debug, Default)]
pub struct SessionHistory {
    entries: Vec<ClassificationResult>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a result.
    pub fn record(&mut self, result: ClassificationResult) {
        self.entries.push(result);
    }

    /// The last `n` results, most recent first.
    pub fn recent(&self, n: usize) -> Vec<&ClassificationResult> {
        self.entries.iter().rev().take(n).collect()
    }

    /// Remove every entry. Calling it on an empty history is a no-op.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str, label: Label) -> ClassificationResult {
        ClassificationResult::new(Local::now(), message, 50, label, 90.0)
    }

    #[test]
    fn preview_keeps_short_messages() {
        assert_eq!(preview("hello", 50), "hello");
        assert_eq!(preview(&"x".repeat(50), 50), "x".repeat(50));
        assert_eq!(preview("", 50), "");
    }

    #[test]
    fn preview_truncates_long_messages() {
        let long = "y".repeat(51);
        assert_eq!(preview(&long, 50), format!("{}...", "y".repeat(50)));
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let msg = "é".repeat(60);
        let p = preview(&msg, 50);
        assert_eq!(p.chars().count(), 53);
        assert!(p.starts_with(&"é".repeat(50)));
    }

    #[test]
    fn confidence_is_clamped() {
        let high = ClassificationResult::new(Local::now(), "m", 50, Label::Spam, 100.0000001);
        assert_eq!(high.confidence(), 100.0);
        let low = ClassificationResult::new(Local::now(), "m", 50, Label::Ham, -0.5);
        assert_eq!(low.confidence(), 0.0);
    }

    #[test]
    fn recent_returns_newest_first() {
        let mut history = SessionHistory::new();
        for i in 0..7 {
            history.record(entry(&format!("message {i}"), Label::Ham));
        }

        let recent: Vec<&str> = history.recent(5).iter().map(|e| e.message()).collect();
        assert_eq!(
            recent,
            vec!["message 6", "message 5", "message 4", "message 3", "message 2"]
        );
        assert_eq!(history.len(), 7);
    }

    #[test]
    fn recent_with_fewer_entries_returns_all() {
        let mut history = SessionHistory::new();
        history.record(entry("first", Label::Ham));
        history.record(entry("second", Label::Spam));

        let recent = history.recent(5);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].message(), "second");
        assert!(history.recent(0).is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut history = SessionHistory::new();
        history.record(entry("first", Label::Ham));
        history.clear();
        assert!(history.recent(5).is_empty());
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut history = SessionHistory::new();
        history.record(entry("same", Label::Spam));
        history.record(entry("same", Label::Spam));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn display_timestamp_format() {
        let ts = Local::now();
        let e = ClassificationResult::new(ts, "m", 50, Label::Ham, 50.0);
        assert_eq!(e.display_timestamp(), ts.format("%Y-%m-%d %H:%M:%S").to_string());
        assert_eq!(e.display_timestamp().len(), 19);
    }
}
