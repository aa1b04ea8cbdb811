//! Dashboard aggregator: counts, spam rate, length distributions, samples.
//!
//! Computes everything the dashboard view shows from a loaded [`Dataset`]:
//! - **Overview**: total / spam / ham counts and spam rate
//! - **Lengths**: per-class character lengths plus a shared-bin histogram
//! - **Samples**: a few random messages per class for illustration

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::config::schema::DashboardConfig;
use crate::dataset::{Dataset, DatasetRecord};
use crate::model::Label;

// ---------------------------------------------------------------------------
// Aggregated stats
// ---------------------------------------------------------------------------

/// Everything the dashboard view renders.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub spam_count: usize,
    pub ham_count: usize,
    /// Spam share in percent; `None` when the dataset is empty.
    pub spam_rate: Option<f64>,
    pub lengths: LengthDistributions,
    pub histogram: Histogram,
    pub samples: Samples,
}

impl DashboardStats {
    /// Spam rate for display: `"30.0%"`, or `"unavailable"` for an empty dataset.
    pub fn spam_rate_display(&self) -> String {
        format_rate(self.spam_rate)
    }
}

/// Character length of every message, grouped by class.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LengthDistributions {
    pub ham: Vec<usize>,
    pub spam: Vec<usize>,
}

/// Overlay histogram with one bin layout shared by both classes.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Histogram {
    pub bin_width: usize,
    pub bins: Vec<HistogramBin>,
}

/// Half-open length range `[start, end)` with per-class counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    pub start: usize,
    pub end: usize,
    pub ham: usize,
    pub spam: usize,
}

/// Illustrative random messages per class.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Samples {
    pub ham: Vec<String>,
    pub spam: Vec<String>,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute dashboard stats, drawing samples from the thread RNG.
///
/// Samples differ between calls; they are illustrative only.
pub fn compute(dataset: &Dataset, config: &DashboardConfig) -> DashboardStats {
    compute_with_rng(dataset, config, &mut rand::rng())
}

/// Compute dashboard stats with a caller-supplied RNG.
pub fn compute_with_rng<R: Rng + ?Sized>(
    dataset: &Dataset,
    config: &DashboardConfig,
    rng: &mut R,
) -> DashboardStats {
    let records = dataset.records();
    let total = records.len();
    let spam_count = records.iter().filter(|r| r.is_spam()).count();
    let ham_count = total - spam_count;

    let lengths = length_distributions(records);
    let histogram = histogram(&lengths, config.histogram_bins);

    let samples = Samples {
        ham: sample_messages(records, Label::Ham, config.sample_size, rng),
        spam: sample_messages(records, Label::Spam, config.sample_size, rng),
    };

    DashboardStats {
        total,
        spam_count,
        ham_count,
        spam_rate: spam_rate(spam_count, total),
        lengths,
        histogram,
        samples,
    }
}

/// `spam / total` as a percentage, or `None` when `total` is zero.
pub fn spam_rate(spam_count: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some((spam_count as f64 / total as f64) * 100.0)
    }
}

/// Format a rate with one decimal, or `"unavailable"`.
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(pct) => format!("{pct:.1}%"),
        None => "unavailable".to_string(),
    }
}

/// Character lengths of every message, split by class, in dataset order.
pub fn length_distributions(records: &[DatasetRecord]) -> LengthDistributions {
    let mut dist = LengthDistributions::default();
    for record in records {
        let len = record.message.chars().count();
        match record.label() {
            Label::Ham => dist.ham.push(len),
            Label::Spam => dist.spam.push(len),
        }
    }
    dist
}

/// Bin both distributions over the combined `min..=max` length range.
///
/// Bins have equal integer width, chosen so that at most `max_bins` bins
/// cover the range. Empty input (or `max_bins == 0`) yields no bins.
pub fn histogram(lengths: &LengthDistributions, max_bins: usize) -> Histogram {
    let all = lengths.ham.iter().chain(&lengths.spam);
    let (Some(&min), Some(&max)) = (all.clone().min(), all.max()) else {
        return Histogram::default();
    };
    if max_bins == 0 {
        return Histogram::default();
    }

    let span = max - min + 1;
    let bin_width = span.div_ceil(max_bins);
    let bin_count = span.div_ceil(bin_width);

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            start: min + i * bin_width,
            end: min + (i + 1) * bin_width,
            ham: 0,
            spam: 0,
        })
        .collect();

    for &len in &lengths.ham {
        bins[(len - min) / bin_width].ham += 1;
    }
    for &len in &lengths.spam {
        bins[(len - min) / bin_width].spam += 1;
    }

    Histogram { bin_width, bins }
}

/// Draw up to `n` distinct messages of one class, without replacement.
///
/// Returns exactly `min(n, class count)` messages.
pub fn sample_messages<R: Rng + ?Sized>(
    records: &[DatasetRecord],
    label: Label,
    n: usize,
    rng: &mut R,
) -> Vec<String> {
    let pool: Vec<&DatasetRecord> = records.iter().filter(|r| r.label() == label).collect();
    pool.choose_multiple(rng, n)
        .map(|r| r.message.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn record(message: &str, spam: bool) -> DatasetRecord {
        DatasetRecord::new(message, if spam { "spam" } else { "ham" }, "spam")
    }

    #[test]
    fn spam_rate_handles_zero_total() {
        assert_eq!(spam_rate(0, 0), None);
        assert_eq!(format_rate(None), "unavailable");
        assert_eq!(spam_rate(3, 10), Some(30.0));
        assert_eq!(format_rate(Some(30.0)), "30.0%");
        assert_eq!(format_rate(Some(13.406)), "13.4%");
    }

    #[test]
    fn length_distributions_split_by_class() {
        let records = vec![record("abc", false), record("héllo", true), record("", false)];
        let dist = length_distributions(&records);
        assert_eq!(dist.ham, vec![3, 0]);
        assert_eq!(dist.spam, vec![5]);
    }

    #[test]
    fn histogram_covers_every_message() {
        let lengths = LengthDistributions {
            ham: vec![10, 12, 40, 95],
            spam: vec![100, 150, 160],
        };
        let hist = histogram(&lengths, 30);

        assert!(hist.bins.len() <= 30);
        assert_eq!(hist.bins[0].start, 10);
        let last = hist.bins.last().unwrap();
        assert!(last.end > 160);
        assert_eq!(hist.bins.iter().map(|b| b.ham).sum::<usize>(), 4);
        assert_eq!(hist.bins.iter().map(|b| b.spam).sum::<usize>(), 3);
        for pair in hist.bins.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn histogram_single_length() {
        let lengths = LengthDistributions {
            ham: vec![7, 7],
            spam: vec![],
        };
        let hist = histogram(&lengths, 30);
        assert_eq!(hist.bin_width, 1);
        assert_eq!(
            hist.bins,
            vec![HistogramBin {
                start: 7,
                end: 8,
                ham: 2,
                spam: 0
            }]
        );
    }

    #[test]
    fn histogram_empty_input() {
        let hist = histogram(&LengthDistributions::default(), 30);
        assert!(hist.bins.is_empty());
        assert_eq!(hist.bin_width, 0);
    }

    #[test]
    fn sample_is_bounded_by_class_size() {
        let records = vec![
            record("spam one", true),
            record("spam two", true),
            record("ham one", false),
        ];
        let mut rng = StdRng::seed_from_u64(7);

        let spam = sample_messages(&records, Label::Spam, 5, &mut rng);
        assert_eq!(spam.len(), 2);
        assert!(spam.contains(&"spam one".to_string()));
        assert!(spam.contains(&"spam two".to_string()));

        let ham = sample_messages(&records, Label::Ham, 5, &mut rng);
        assert_eq!(ham, vec!["ham one".to_string()]);
    }

    #[test]
    fn sample_draws_without_replacement() {
        let records: Vec<_> = (0..20).map(|i| record(&format!("ham {i}"), false)).collect();
        let mut rng = StdRng::seed_from_u64(42);

        let mut sample = sample_messages(&records, Label::Ham, 5, &mut rng);
        assert_eq!(sample.len(), 5);
        sample.sort();
        sample.dedup();
        assert_eq!(sample.len(), 5);
    }

    #[test]
    fn compute_counts_and_rate() {
        let records: Vec<_> = (0..10)
            .map(|i| record(&format!("message {i}"), i < 3))
            .collect();
        let dataset = Dataset::from_records(records);
        let stats = compute(&dataset, &DashboardConfig::default());

        assert_eq!(stats.total, 10);
        assert_eq!(stats.spam_count, 3);
        assert_eq!(stats.ham_count, 7);
        assert_eq!(stats.spam_rate_display(), "30.0%");
        assert_eq!(stats.samples.spam.len(), 3);
        assert_eq!(stats.samples.ham.len(), 5);
        assert_eq!(stats.lengths.ham.len(), 7);
    }

    #[test]
    fn compute_empty_dataset() {
        let stats = compute(&Dataset::default(), &DashboardConfig::default());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.spam_rate, None);
        assert_eq!(stats.spam_rate_display(), "unavailable");
        assert!(stats.samples.ham.is_empty());
        assert!(stats.histogram.bins.is_empty());
    }
}
