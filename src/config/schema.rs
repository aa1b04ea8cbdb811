/// Configuration schema and defaults for spamscope.
///
/// Defines the TOML-serializable configuration structure with all sections:
/// `[model]`, `[dataset]`, `[history]`, `[dashboard]`, `[web]`, and
/// `[logging]`.
///
/// Every field has a sensible built-in default. Users only need to set the
/// values they want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level spamscope configuration.
///
/// Maps directly to the `~/.spamscope/config.toml` and `.spamscope.toml`
/// file schemas. All sections and fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpamscopeConfig {
    pub model: ModelConfig,
    pub dataset: DatasetConfig,
    pub history: HistoryConfig,
    pub dashboard: DashboardConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [model]
// ---------------------------------------------------------------------------

/// Location of the exported model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Path to the JSON model bundle. Relative paths resolve against the
    /// current working directory.
    pub path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: "spam_detector.json".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [dataset]
// ---------------------------------------------------------------------------

/// Labelled dataset used by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: String,
    /// Header of the column holding the message text.
    pub message_column: String,
    /// Header of the column holding the category label.
    pub category_column: String,
    /// Category value marking a row as spam. Anything else is ham.
    pub spam_marker: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: "spam.csv".to_string(),
            message_column: "Message".to_string(),
            category_column: "Category".to_string(),
            spam_marker: "spam".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [history]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of entries shown in the "recent predictions" panel.
    pub display_limit: usize,
    /// Characters of the message kept in a history entry before `...`.
    pub preview_chars: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            display_limit: 5,
            preview_chars: 50,
        }
    }
}

// ---------------------------------------------------------------------------
// [dashboard]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Maximum number of sample messages drawn per class.
    pub sample_size: usize,
    /// Upper bound on the number of message-length histogram bins.
    pub histogram_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            sample_size: 5,
            histogram_bins: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `spamscope web`.
    pub addr: String,
    /// Open the dashboard in the default browser on startup.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8501".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Prediction log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// JSONL file receiving one line per classification. `~` expands to the
    /// home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.spamscope/predictions.jsonl".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Annotated default TOML
// ---------------------------------------------------------------------------

impl SpamscopeConfig {
    /// The commented default config written by `spamscope config init`.
    pub fn default_toml() -> String {
        r#"# spamscope configuration
# Values here override built-in defaults. Project-local `.spamscope.toml`
# overrides this file, and SPAMSCOPE_* environment variables override both.

[model]
path = "spam_detector.json"           # Exported classifier + vectorizer bundle

[dataset]
path = "spam.csv"                     # Labelled messages for the dashboard
message_column = "Message"
category_column = "Category"
spam_marker = "spam"                  # Category value that marks spam

[history]
display_limit = 5                     # Entries in the recent predictions panel
preview_chars = 50                    # Message characters kept per entry

[dashboard]
sample_size = 5                       # Sample messages per class
histogram_bins = 30

[web]
addr = "127.0.0.1:8501"
open_browser = true

[logging]
enabled = true
path = "~/.spamscope/predictions.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
