/// Dashboard aggregation tests over datasets loaded from CSV.
use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;

use spamscope::config::schema::{DashboardConfig, DatasetConfig};
use spamscope::dashboard::{self, sample_messages};
use spamscope::dataset::{self, Dataset, DatasetRecord};
use spamscope::model::Label;

fn load_csv(contents: &str) -> Dataset {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spam.csv");
    fs::write(&path, contents).unwrap();
    dataset::load(&path, &DatasetConfig::default()).unwrap()
}

fn ten_messages_three_spam() -> String {
    let mut csv = String::from("Category,Message\n");
    for i in 0..10 {
        let category = if i % 3 == 0 && i < 9 { "spam" } else { "ham" };
        csv.push_str(&format!("{category},message number {i}\n"));
    }
    csv
}

#[test]
fn counts_and_rate_for_ten_messages() {
    let dataset = load_csv(&ten_messages_three_spam());
    let stats = dashboard::compute(&dataset, &DashboardConfig::default());

    assert_eq!(stats.total, 10);
    assert_eq!(stats.spam_count, 3);
    assert_eq!(stats.ham_count, 7);
    assert!((stats.spam_rate.unwrap() - 30.0).abs() < 1e-9);
    assert_eq!(stats.spam_rate_display(), "30.0%");
}

#[test]
fn empty_dataset_reports_unavailable_rate() {
    let dataset = load_csv("Category,Message\n");
    let stats = dashboard::compute(&dataset, &DashboardConfig::default());

    assert_eq!(stats.total, 0);
    assert!(stats.spam_rate.is_none());
    assert_eq!(stats.spam_rate_display(), "unavailable");
}

#[test]
fn length_distributions_follow_labels() {
    let dataset = load_csv("Category,Message\nham,hi\nspam,WIN CASH\nham,see you\n");
    let stats = dashboard::compute(&dataset, &DashboardConfig::default());

    assert_eq!(stats.lengths.ham, vec![2, 7]);
    assert_eq!(stats.lengths.spam, vec![8]);

    let binned: usize = stats.histogram.bins.iter().map(|b| b.ham + b.spam).sum();
    assert_eq!(binned, 3);
}

#[test]
fn sample_never_exceeds_class_size() {
    let records = vec![
        DatasetRecord::new("Claim now", "spam", "spam"),
        DatasetRecord::new("Free tickets", "spam", "spam"),
        DatasetRecord::new("ok", "ham", "spam"),
    ];
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..20 {
        let spam = sample_messages(&records, Label::Spam, 5, &mut rng);
        assert_eq!(spam.len(), 2);
    }
}

#[test]
fn sample_size_is_configurable() {
    let dataset = load_csv(&ten_messages_three_spam());
    let config = DashboardConfig {
        sample_size: 2,
        ..DashboardConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(99);
    let stats = dashboard::compute_with_rng(&dataset, &config, &mut rng);

    assert_eq!(stats.samples.ham.len(), 2);
    assert_eq!(stats.samples.spam.len(), 2);
    for msg in &stats.samples.spam {
        assert!(dataset
            .records()
            .iter()
            .any(|r| r.is_spam() && &r.message == msg));
    }
}

#[test]
fn missing_dataset_fails_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let result = dataset::load(dir.path().join("spam.csv"), &DatasetConfig::default());
    assert!(result.is_err());
}
