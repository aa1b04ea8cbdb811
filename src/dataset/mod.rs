//! Labelled message dataset used for dashboard statistics.
//!
//! Reads a CSV with a header row. The message and category columns are found
//! by header name; a row is spam when its category equals the configured spam
//! marker exactly, and ham otherwise.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::schema::DatasetConfig;
use crate::model::Label;

/// One labelled message. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord {
    pub message: String,
    pub category: String,
    label: Label,
}

impl DatasetRecord {
    pub fn new(message: impl Into<String>, category: impl Into<String>, spam_marker: &str) -> Self {
        let category = category.into();
        let label = if category == spam_marker {
            Label::Spam
        } else {
            Label::Ham
        };
        Self {
            message: message.into(),
            category,
            label,
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn is_spam(&self) -> bool {
        self.label.is_spam()
    }
}

/// The full dataset, in file order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<DatasetRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<DatasetRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DatasetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load the dataset CSV at `path`.
///
/// Fields are decoded lossily, so corpora saved in legacy encodings still
/// load. Rows missing either column are skipped.
pub fn load(path: impl AsRef<Path>, config: &DatasetConfig) -> Result<Dataset> {
    let path = path.as_ref();

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;

    let headers = reader
        .byte_headers()
        .with_context(|| format!("failed to read dataset headers from {}", path.display()))?
        .clone();

    let find_column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| String::from_utf8_lossy(h).trim() == name)
            .with_context(|| {
                let available: Vec<_> = headers.iter().map(String::from_utf8_lossy).collect();
                format!("dataset has no '{name}' column (available: {available:?})")
            })
    };
    let message_idx = find_column(&config.message_column)?;
    let category_idx = find_column(&config.category_column)?;

    let mut records = Vec::new();
    for (row, result) in reader.byte_records().enumerate() {
        let record =
            result.with_context(|| format!("malformed dataset row {} in {}", row + 2, path.display()))?;

        let (Some(message), Some(category)) = (record.get(message_idx), record.get(category_idx))
        else {
            continue;
        };

        records.push(DatasetRecord::new(
            String::from_utf8_lossy(message),
            String::from_utf8_lossy(category),
            &config.spam_marker,
        ));
    }

    Ok(Dataset { records })
}
