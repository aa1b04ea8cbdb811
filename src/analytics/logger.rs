use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::model::Label;

// ---------------------------------------------------------------------------
// Prediction log entry (JSONL)
// ---------------------------------------------------------------------------

/// A single entry in the prediction log (`~/.spamscope/predictions.jsonl`).
///
/// Each entry records one successful classification. Only the message preview
/// is stored, never the full text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionLogEntry {
    pub timestamp: String,
    /// Surface that requested the classification: `"cli"`, `"shell"`, or `"web"`.
    pub source: String,
    pub preview: String,
    pub label: Label,
    /// Confidence of the predicted class (percentage).
    pub confidence: f64,
    /// Spam probability (percentage), kept for calibration checks.
    #[serde(default)]
    pub spam_probability: f64,
}

impl PredictionLogEntry {
    pub fn new(
        source: &str,
        preview: &str,
        label: Label,
        confidence: f64,
        spam_probability: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            source: source.to_string(),
            preview: preview.to_string(),
            label,
            confidence,
            spam_probability,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append an entry to the log at `path`.
///
/// Best-effort: failures are silently ignored.
pub fn log_prediction(path: &Path, entry: &PredictionLogEntry) {
    let _ = append_log_entry(path, entry);
}

fn append_log_entry(path: &Path, entry: &PredictionLogEntry) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Reading log entries
// ---------------------------------------------------------------------------

/// Read all entries from the log at `path`.
///
/// Silently skips malformed lines. Returns an empty vec if the file does not
/// exist or cannot be read.
pub fn read_all_entries(path: &Path) -> Vec<PredictionLogEntry> {
    let Ok(file) = fs::File::open(path) else {
        return Vec::new();
    };

    let reader = BufReader::new(file);
    reader
        .lines()
        .map_while(Result::ok)
        .filter_map(|line| serde_json::from_str::<PredictionLogEntry>(&line).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_and_reads_back_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("predictions.jsonl");

        log_prediction(&path, &PredictionLogEntry::new("cli", "WINNER!", Label::Spam, 99.1, 99.1));
        log_prediction(&path, &PredictionLogEntry::new("web", "coffee?", Label::Ham, 97.0, 3.0));

        let entries = read_all_entries(&path);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source, "cli");
        assert_eq!(entries[0].label, Label::Spam);
        assert_eq!(entries[1].preview, "coffee?");
    }

    #[test]
    fn skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.jsonl");
        let good = serde_json::to_string(&PredictionLogEntry::new(
            "shell",
            "hi",
            Label::Ham,
            80.0,
            20.0,
        ))
        .unwrap();
        fs::write(&path, format!("{{broken\n{good}\n\n")).unwrap();

        let entries = read_all_entries(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source, "shell");
    }

    #[test]
    fn missing_file_reads_as_empty() {
        assert!(read_all_entries(Path::new("/nonexistent/predictions.jsonl")).is_empty());
    }
}
