//! Bag-of-words term counting over a fitted vocabulary.

use std::collections::{BTreeMap, HashMap};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Deserialize;

/// Default token rule: runs of two or more word characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Sparse term-count vector: `(feature index, count)` pairs sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(usize, u32)>,
}

impl FeatureVector {
    pub fn entries(&self) -> &[(usize, u32)] {
        &self.entries
    }

    /// Number of distinct vocabulary terms present.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Exported vectorizer parameters as they appear in the model artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorizerParams {
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    pub vocabulary: HashMap<String, usize>,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// A fitted count vectorizer. Immutable after construction.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    lowercase: bool,
    token_pattern: Regex,
    ngram_range: (usize, usize),
    vocabulary: HashMap<String, usize>,
}

impl CountVectorizer {
    /// Validate exported parameters against the declared feature count.
    pub fn from_params(params: VectorizerParams, feature_count: usize) -> Result<Self> {
        let (min_n, max_n) = params.ngram_range;
        if min_n == 0 || min_n > max_n {
            anyhow::bail!("invalid ngram_range ({min_n}, {max_n})");
        }

        if params.vocabulary.len() != feature_count {
            anyhow::bail!(
                "vocabulary has {} terms but feature_count is {feature_count}",
                params.vocabulary.len()
            );
        }

        let mut seen = vec![false; feature_count];
        for (term, &index) in &params.vocabulary {
            if index >= feature_count {
                anyhow::bail!("vocabulary term '{term}' has out-of-range index {index}");
            }
            if std::mem::replace(&mut seen[index], true) {
                anyhow::bail!("vocabulary index {index} is assigned to more than one term");
            }
        }

        // Rust regexes are Unicode-aware by default; the exported pattern may
        // still carry the inline flag.
        let pattern = params
            .token_pattern
            .strip_prefix("(?u)")
            .unwrap_or(&params.token_pattern);
        let token_pattern = Regex::new(pattern)
            .with_context(|| format!("invalid token_pattern '{}'", params.token_pattern))?;
        if token_pattern.captures_len() > 2 {
            anyhow::bail!(
                "token_pattern '{}' has more than one capture group",
                params.token_pattern
            );
        }

        Ok(Self {
            lowercase: params.lowercase,
            token_pattern,
            ngram_range: (min_n, max_n),
            vocabulary: params.vocabulary,
        })
    }

    pub fn feature_count(&self) -> usize {
        self.vocabulary.len()
    }

    /// Split text into terms (n-grams joined by a single space).
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        // A pattern with one capture group yields that group, not the whole
        // match. A group that did not participate yields an empty token.
        let tokens: Vec<&str> = if self.token_pattern.captures_len() == 2 {
            self.token_pattern
                .captures_iter(&text)
                .map(|c| c.get(1).map_or("", |m| m.as_str()))
                .collect()
        } else {
            self.token_pattern
                .find_iter(&text)
                .map(|m| m.as_str())
                .collect()
        };

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    /// Count vocabulary terms in `text`. Unknown terms are dropped.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for term in self.analyze(text) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0) += 1;
            }
        }
        FeatureVector {
            entries: counts.into_iter().collect(),
        }
    }
}
