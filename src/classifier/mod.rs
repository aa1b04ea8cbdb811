//! Classification adapter: raw text in, labelled result out.
//!
//! Wraps an immutable [`ModelBundle`] and records every successful
//! classification into the caller's [`SessionHistory`]. Blank input is not an
//! error; it simply produces nothing.

use std::path::PathBuf;

use chrono::Local;
use serde::Serialize;

use crate::analytics::logger::{self, PredictionLogEntry};
use crate::history::{ClassificationResult, SessionHistory};
use crate::model::{Label, ModelBundle};

/// Canned legitimate message offered by the UIs.
pub const HAM_EXAMPLE: &str = "Hey, are we still meeting for coffee tomorrow at 3pm?";

/// Canned spam message offered by the UIs.
pub const SPAM_EXAMPLE: &str =
    "WINNER! You've won $1000000! Click here NOW to claim your prize! Limited time offer!";

/// Full probability breakdown for one message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub label: Label,
    /// Probability of ham, in `[0, 1]`.
    pub ham_probability: f64,
    /// Probability of spam, in `[0, 1]`.
    pub spam_probability: f64,
}

impl Classification {
    /// Probability of the more likely class, as a percentage.
    pub fn confidence(&self) -> f64 {
        (self.ham_probability.max(self.spam_probability) * 100.0).clamp(0.0, 100.0)
    }

    pub fn ham_pct(&self) -> f64 {
        self.ham_probability * 100.0
    }

    pub fn spam_pct(&self) -> f64 {
        self.spam_probability * 100.0
    }
}

/// What a successful `classify` call produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub classification: Classification,
    /// The entry that was appended to the session history.
    pub entry: ClassificationResult,
}

/// Where prediction log lines go and which surface they are attributed to.
#[derive(Debug, Clone)]
struct LogTarget {
    path: PathBuf,
    source: &'static str,
}

pub struct Classifier<'m> {
    model: &'m ModelBundle,
    preview_chars: usize,
    log: Option<LogTarget>,
}

impl<'m> Classifier<'m> {
    pub fn new(model: &'m ModelBundle, preview_chars: usize) -> Self {
        Self {
            model,
            preview_chars,
            log: None,
        }
    }

    /// Also append each classification to the JSONL prediction log at `path`.
    pub fn with_log(mut self, path: PathBuf, source: &'static str) -> Self {
        self.log = Some(LogTarget { path, source });
        self
    }

    /// Predict without touching any history.
    pub fn predict(&self, text: &str) -> Option<Classification> {
        if text.trim().is_empty() {
            return None;
        }

        let prediction = self.model.predict(text);
        Some(Classification {
            label: prediction.label,
            ham_probability: prediction.ham_probability,
            spam_probability: prediction.spam_probability,
        })
    }

    /// Classify `text` and append the result to `history`.
    ///
    /// Returns `None` (and records nothing) when `text` is empty or only
    /// whitespace.
    pub fn classify(&self, text: &str, history: &mut SessionHistory) -> Option<Outcome> {
        let classification = self.predict(text)?;

        let entry = ClassificationResult::new(
            Local::now(),
            text,
            self.preview_chars,
            classification.label,
            classification.confidence(),
        );
        history.record(entry.clone());

        if let Some(target) = &self.log {
            logger::log_prediction(
                &target.path,
                &PredictionLogEntry::new(
                    target.source,
                    entry.message(),
                    classification.label,
                    entry.confidence(),
                    classification.spam_pct(),
                ),
            );
        }

        Some(Outcome {
            classification,
            entry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> ModelBundle {
        ModelBundle::from_json(
            r#"{
                "accuracy": 0.95,
                "feature_count": 4,
                "vectorizer": {
                    "vocabulary": { "winner": 0, "prize": 1, "coffee": 2, "tomorrow": 3 }
                },
                "model": {
                    "class_log_prior": [-0.15, -1.97],
                    "feature_log_prob": [
                        [-5.0, -5.0, -1.0, -1.0],
                        [-1.0, -1.0, -5.0, -5.0]
                    ]
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn blank_input_records_nothing() {
        let model = bundle();
        let classifier = Classifier::new(&model, 50);
        let mut history = SessionHistory::new();

        assert!(classifier.classify("", &mut history).is_none());
        assert!(classifier.classify("   \n\t ", &mut history).is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn canned_examples_classify_as_expected() {
        let model = bundle();
        let classifier = Classifier::new(&model, 50);
        let mut history = SessionHistory::new();

        let spam = classifier.classify(SPAM_EXAMPLE, &mut history).unwrap();
        assert_eq!(spam.classification.label, Label::Spam);

        let ham = classifier.classify(HAM_EXAMPLE, &mut history).unwrap();
        assert_eq!(ham.classification.label, Label::Ham);

        assert_eq!(history.len(), 2);
        assert_eq!(history.recent(1)[0].label(), Label::Ham);
    }

    #[test]
    fn confidence_is_max_probability_percentage() {
        let model = bundle();
        let classifier = Classifier::new(&model, 50);
        let c = classifier.predict("coffee tomorrow").unwrap();

        let expected = c.ham_probability.max(c.spam_probability) * 100.0;
        assert!((c.confidence() - expected).abs() < 1e-9);
        assert!((0.0..=100.0).contains(&c.confidence()));
        assert!((c.ham_pct() + c.spam_pct() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn history_entry_uses_preview() {
        let model = bundle();
        let classifier = Classifier::new(&model, 50);
        let mut history = SessionHistory::new();

        let outcome = classifier.classify(SPAM_EXAMPLE, &mut history).unwrap();
        assert_eq!(outcome.entry.message().chars().count(), 53);
        assert!(outcome.entry.message().ends_with("..."));
        assert_eq!(
            outcome.entry.confidence(),
            outcome.classification.confidence()
        );
    }

    #[test]
    fn with_log_appends_prediction_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.jsonl");
        let model = bundle();
        let classifier = Classifier::new(&model, 50).with_log(path.clone(), "cli");
        let mut history = SessionHistory::new();

        classifier.classify(HAM_EXAMPLE, &mut history).unwrap();
        classifier.classify("  ", &mut history);

        let entries = logger::read_all_entries(&path);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source, "cli");
        assert_eq!(entries[0].label, Label::Ham);
    }
}
