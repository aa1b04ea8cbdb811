//! Multinomial Naive Bayes evaluation over exported fitted parameters.
//!
//! P(y=c|x) ∝ P(y=c) · ∏ P(w_i|y=c)^x_i, computed in log space and
//! normalized with the log-sum-exp trick.

use anyhow::Result;
use serde::Deserialize;

use super::vectorizer::FeatureVector;
use super::Label;

/// Exported classifier parameters as they appear in the model artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct NaiveBayesParams {
    /// Log prior per class, `[ham, spam]`.
    pub class_log_prior: Vec<f64>,
    /// Log P(feature | class), one row of `feature_count` values per class.
    pub feature_log_prob: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct MultinomialNaiveBayes {
    class_log_prior: [f64; 2],
    feature_log_prob: [Vec<f64>; 2],
}

impl MultinomialNaiveBayes {
    /// Validate exported parameters against the declared feature count.
    pub fn from_params(params: NaiveBayesParams, feature_count: usize) -> Result<Self> {
        let &[ham_prior, spam_prior] = params.class_log_prior.as_slice() else {
            anyhow::bail!(
                "expected 2 classes in class_log_prior, found {}",
                params.class_log_prior.len()
            );
        };
        if !ham_prior.is_finite() || !spam_prior.is_finite() {
            anyhow::bail!("class_log_prior contains a non-finite value");
        }

        let Ok([ham_row, spam_row]) = <[Vec<f64>; 2]>::try_from(params.feature_log_prob) else {
            anyhow::bail!("expected 2 rows in feature_log_prob");
        };
        for (name, row) in [("ham", &ham_row), ("spam", &spam_row)] {
            if row.len() != feature_count {
                anyhow::bail!(
                    "feature_log_prob row for {name} has {} values, expected {feature_count}",
                    row.len()
                );
            }
            if row.iter().any(|v| !v.is_finite()) {
                anyhow::bail!("feature_log_prob row for {name} contains a non-finite value");
            }
        }

        Ok(Self {
            class_log_prior: [ham_prior, spam_prior],
            feature_log_prob: [ham_row, spam_row],
        })
    }

    /// Unnormalized log posterior per class.
    fn joint_log_likelihood(&self, features: &FeatureVector) -> [f64; 2] {
        let mut jll = self.class_log_prior;
        for (class_idx, log_probs) in self.feature_log_prob.iter().enumerate() {
            for &(index, count) in features.entries() {
                jll[class_idx] += f64::from(count) * log_probs[index];
            }
        }
        jll
    }

    /// Class probabilities `[ham, spam]`, summing to 1.
    pub fn predict_proba(&self, features: &FeatureVector) -> [f64; 2] {
        let jll = self.joint_log_likelihood(features);
        let max = jll[0].max(jll[1]);
        let exp = [(jll[0] - max).exp(), (jll[1] - max).exp()];
        let sum = exp[0] + exp[1];
        [exp[0] / sum, exp[1] / sum]
    }

    /// Most probable class. Ties go to ham.
    pub fn predict(&self, features: &FeatureVector) -> Label {
        let jll = self.joint_log_likelihood(features);
        if jll[1] > jll[0] { Label::Spam } else { Label::Ham }
    }
}
