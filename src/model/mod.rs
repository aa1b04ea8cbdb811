//! Model bundle: the exported spam classifier and its text vectorizer.
//!
//! The bundle is a JSON document with four named entries:
//!
//! - `accuracy`: held-out accuracy reported at training time, in `[0, 1]`
//! - `feature_count`: vocabulary size
//! - `vectorizer`: token rules and the fitted vocabulary
//! - `model`: multinomial Naive Bayes class log priors and per-feature log
//!   probabilities
//!
//! Everything is validated once in [`load`]; a [`ModelBundle`] that exists is
//! always internally consistent and is never mutated afterwards.

pub mod naive_bayes;
pub mod vectorizer;

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use naive_bayes::{MultinomialNaiveBayes, NaiveBayesParams};
pub use vectorizer::{CountVectorizer, FeatureVector, VectorizerParams};

/// Human-readable algorithm name shown in model info views.
pub const ALGORITHM: &str = "Multinomial Naive Bayes";

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// Binary message class. Ham is class index 0, spam is class index 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Ham,
    Spam,
}

impl Label {
    pub fn is_spam(self) -> bool {
        self == Self::Spam
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ham => write!(f, "Ham"),
            Self::Spam => write!(f, "Spam"),
        }
    }
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

/// Raw artifact layout, before validation.
#[derive(Debug, Deserialize)]
struct ModelArtifact {
    accuracy: f64,
    feature_count: usize,
    vectorizer: VectorizerParams,
    model: NaiveBayesParams,
}

/// A loaded, validated model bundle.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    vectorizer: CountVectorizer,
    classifier: MultinomialNaiveBayes,
    accuracy: f64,
    feature_count: usize,
}

/// Summary shown in the sidebar / `spamscope model`.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub accuracy: f64,
    pub feature_count: usize,
    pub algorithm: &'static str,
}

/// Output of a single prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    pub ham_probability: f64,
    pub spam_probability: f64,
}

impl ModelBundle {
    /// Build a bundle from already-parsed parameters, applying the same
    /// validation as [`load`].
    pub fn from_parts(
        vectorizer: VectorizerParams,
        model: NaiveBayesParams,
        accuracy: f64,
        feature_count: usize,
    ) -> Result<Self> {
        if !accuracy.is_finite() || !(0.0..=1.0).contains(&accuracy) {
            anyhow::bail!("accuracy must be within [0, 1], got {accuracy}");
        }

        let vectorizer =
            CountVectorizer::from_params(vectorizer, feature_count).context("invalid vectorizer")?;
        let classifier = MultinomialNaiveBayes::from_params(model, feature_count)
            .context("invalid classifier")?;

        Ok(Self {
            vectorizer,
            classifier,
            accuracy,
            feature_count,
        })
    }

    /// Parse and validate a bundle from its JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ModelArtifact =
            serde_json::from_str(json).context("malformed model artifact")?;
        Self::from_parts(
            artifact.vectorizer,
            artifact.model,
            artifact.accuracy,
            artifact.feature_count,
        )
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            accuracy: self.accuracy,
            feature_count: self.feature_count,
            algorithm: ALGORITHM,
        }
    }

    pub fn vectorize(&self, text: &str) -> FeatureVector {
        self.vectorizer.transform(text)
    }

    /// Vectorize and predict in one step.
    pub fn predict(&self, text: &str) -> Prediction {
        let features = self.vectorize(text);
        let [ham_probability, spam_probability] = self.classifier.predict_proba(&features);
        Prediction {
            label: self.classifier.predict(&features),
            ham_probability,
            spam_probability,
        }
    }
}

/// Load and validate the model bundle at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<ModelBundle> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read model file {}", path.display()))?;
    ModelBundle::from_json(&json)
        .with_context(|| format!("failed to load model from {}", path.display()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
