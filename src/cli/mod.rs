//! CLI command implementations for spamscope.
//!
//! Provides subcommand handlers for:
//! - `spamscope classify "text"`: classify one message
//! - `spamscope shell`: interactive session with a recent-predictions panel
//! - `spamscope stats`: dataset overview, length histogram, sample messages
//! - `spamscope model`: model accuracy / vocabulary size
//! - `spamscope health`: check model, dataset, config, log
//! - `spamscope config show|init|set|reset`: configuration management

use std::io::{self, BufRead, Read, Write};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::analytics::logger;
use crate::classifier::{Classification, Classifier, HAM_EXAMPLE, SPAM_EXAMPLE};
use crate::config::{self, SpamscopeConfig};
use crate::dashboard::{self, DashboardStats};
use crate::dataset;
use crate::history::{ClassificationResult, SessionHistory};
use crate::model::{self, Label, ModelBundle};

/// Output format for CLI reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Load the model bundle named by the config.
fn load_model(cfg: &SpamscopeConfig) -> Result<ModelBundle> {
    model::load(config::expand_home(&cfg.model.path)).with_context(|| {
        format!(
            "model unavailable; set model.path or SPAMSCOPE_MODEL (currently '{}')",
            cfg.model.path
        )
    })
}

/// Build the classification adapter, wiring in the prediction log if enabled.
fn classifier_for<'m>(
    cfg: &SpamscopeConfig,
    bundle: &'m ModelBundle,
    source: &'static str,
) -> Classifier<'m> {
    let classifier = Classifier::new(bundle, cfg.history.preview_chars);
    if cfg.logging.enabled {
        classifier.with_log(config::expand_home(&cfg.logging.path), source)
    } else {
        classifier
    }
}

// ---------------------------------------------------------------------------
// spamscope classify
// ---------------------------------------------------------------------------

/// Classify a single message. Reads stdin when `text` is empty.
pub fn run_classify(text: &str, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let bundle = load_model(&cfg)?;

    let message = if text.is_empty() {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read message from stdin")?;
        buf
    } else {
        text.to_string()
    };

    let mut history = SessionHistory::new();
    let classifier = classifier_for(&cfg, &bundle, "cli");

    let Some(outcome) = classifier.classify(&message, &mut history) else {
        println!("{}", "Nothing to classify. Enter a message.".yellow());
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "label": outcome.classification.label,
                "confidence": outcome.classification.confidence(),
                "ham_probability": outcome.classification.ham_probability,
                "spam_probability": outcome.classification.spam_probability,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => print!("{}", classification_csv(&outcome.classification)),
        OutputFormat::Table => print_classification(&outcome.classification),
    }

    Ok(())
}

/// One header line plus one data row for a classification.
fn classification_csv(c: &Classification) -> String {
    format!(
        "label,confidence,ham_probability,spam_probability\n{},{:.2},{:.6},{:.6}\n",
        c.label,
        c.confidence(),
        c.ham_probability,
        c.spam_probability
    )
}

fn print_classification(c: &Classification) {
    println!();
    match c.label {
        Label::Spam => println!("  {}", "⚠ SPAM DETECTED".red().bold()),
        Label::Ham => println!("  {}", "✓ LEGITIMATE MESSAGE".green().bold()),
    }
    println!(
        "  {} {:.2}%    {} {:.2}%",
        "Ham:".bold(),
        c.ham_pct(),
        "Spam:".bold(),
        c.spam_pct()
    );
    println!("  {}", gauge(c.spam_pct(), 40));
    println!();
}

/// Text gauge of the spam probability with a marker at the 50% threshold.
fn gauge(spam_pct: f64, width: usize) -> String {
    let filled = ((spam_pct.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let threshold = width / 2;
    let bar: String = (0..width)
        .map(|i| {
            if i == threshold {
                '|'
            } else if i < filled {
                '█'
            } else {
                '·'
            }
        })
        .collect();
    format!("[{bar}] spam {spam_pct:.1}%")
}

// ---------------------------------------------------------------------------
// spamscope shell
// ---------------------------------------------------------------------------

/// Interactive classification session.
///
/// Each line is classified and recorded; `:history` shows the recent panel.
pub fn run_shell() -> Result<()> {
    let cfg = config::load();
    let bundle = load_model(&cfg)?;
    let classifier = classifier_for(&cfg, &bundle, "shell");
    let mut history = SessionHistory::new();

    println!("{}", "spamscope interactive session".bold().cyan());
    print_model_summary(&bundle);
    println!("  {}", "Type a message, or :help for commands.".dimmed());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{} ", ">".cyan().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read input")?;

        match ShellCommand::parse(&line) {
            ShellCommand::Quit => break,
            ShellCommand::Help => print_shell_help(),
            ShellCommand::History => {
                print_recent(&history.recent(cfg.history.display_limit));
            }
            ShellCommand::Clear => {
                history.clear();
                println!("  {}", "History cleared.".dimmed());
            }
            ShellCommand::Unknown(cmd) => {
                println!("  {} {}", "Unknown command:".yellow(), cmd);
            }
            ShellCommand::Classify(text) => {
                // Blank lines classify to nothing and are skipped quietly.
                if let Some(outcome) = classifier.classify(text, &mut history) {
                    print_classification(&outcome.classification);
                }
            }
        }
    }

    Ok(())
}

/// One parsed line of shell input.
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand<'a> {
    Classify(&'a str),
    History,
    Clear,
    Help,
    Quit,
    Unknown(&'a str),
}

impl<'a> ShellCommand<'a> {
    fn parse(line: &'a str) -> Self {
        let trimmed = line.trim();
        let Some(cmd) = trimmed.strip_prefix(':') else {
            return Self::Classify(line);
        };
        match cmd {
            "history" | "h" => Self::History,
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            "ham" => Self::Classify(HAM_EXAMPLE),
            "spam" => Self::Classify(SPAM_EXAMPLE),
            _ => Self::Unknown(trimmed),
        }
    }
}

fn print_shell_help() {
    println!("  {:<10} {}", ":history", "show recent predictions".dimmed());
    println!("  {:<10} {}", ":clear", "clear prediction history".dimmed());
    println!("  {:<10} {}", ":ham", "classify the legitimate example".dimmed());
    println!("  {:<10} {}", ":spam", "classify the spam example".dimmed());
    println!("  {:<10} {}", ":quit", "leave the session".dimmed());
}

fn print_recent(entries: &[&ClassificationResult]) {
    if entries.is_empty() {
        println!(
            "  {}",
            "No predictions yet. Classify a message to see history!".dimmed()
        );
        return;
    }

    println!("{}", "Recent Predictions".bold().cyan());
    for entry in entries {
        let label = match entry.label() {
            Label::Spam => format!("⚠ {}", entry.label()).red(),
            Label::Ham => format!("✓ {}", entry.label()).green(),
        };
        println!(
            "  {:<8} {:>6.1}%  {}  {}",
            label,
            entry.confidence(),
            entry.display_timestamp().dimmed(),
            entry.message()
        );
    }
}

// ---------------------------------------------------------------------------
// spamscope stats
// ---------------------------------------------------------------------------

/// Show dataset statistics.
pub fn run_stats(format: OutputFormat) -> Result<()> {
    let cfg = config::load();

    let dataset = match dataset::load(config::expand_home(&cfg.dataset.path), &cfg.dataset) {
        Ok(dataset) => dataset,
        Err(e) => {
            println!(
                "{}",
                "Dataset not found. Dashboard statistics are unavailable.".yellow()
            );
            println!("  {}", format!("{e:#}").dimmed());
            return Ok(());
        }
    };

    let stats = dashboard::compute(&dataset, &cfg.dashboard);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
        OutputFormat::Csv => print!("{}", stats_csv(&stats)),
        OutputFormat::Table => {
            let bundle = load_model(&cfg).ok();
            print_stats_table(&stats, bundle.as_ref());
        }
    }

    Ok(())
}

fn print_stats_table(stats: &DashboardStats, bundle: Option<&ModelBundle>) {
    println!("{}", "Dataset Overview".bold().cyan());
    println!("{}", "=".repeat(60));
    println!("  {} {}", "Total messages:".bold(), format_number(stats.total));
    println!(
        "  {} {}",
        "Spam messages: ".bold(),
        format_number(stats.spam_count).red()
    );
    println!(
        "  {} {}",
        "Ham messages:  ".bold(),
        format_number(stats.ham_count).green()
    );
    println!("  {} {}", "Spam rate:     ".bold(), stats.spam_rate_display());
    println!();

    if !stats.histogram.bins.is_empty() {
        println!("{}", "Message Length (characters)".bold().cyan());
        let peak = stats
            .histogram
            .bins
            .iter()
            .map(|b| b.ham.max(b.spam))
            .max()
            .unwrap_or(0)
            .max(1);
        for bin in &stats.histogram.bins {
            let ham_bar = "█".repeat(bin.ham * 30 / peak);
            let spam_bar = "█".repeat(bin.spam * 30 / peak);
            println!(
                "  {:>5}-{:<5} {:<30} {}",
                bin.start,
                bin.end - 1,
                ham_bar.green(),
                spam_bar.red()
            );
        }
        println!("  {}", "green = ham, red = spam".dimmed());
        println!();
    }

    if let Some(bundle) = bundle {
        println!("{}", "Model Performance".bold().cyan());
        print_model_summary(bundle);
        println!();
    }

    print_samples("Ham Examples", &stats.samples.ham, Label::Ham);
    print_samples("Spam Examples", &stats.samples.spam, Label::Spam);
}

fn print_samples(title: &str, samples: &[String], label: Label) {
    if samples.is_empty() {
        return;
    }
    println!("{}", title.bold().cyan());
    for (i, msg) in samples.iter().enumerate() {
        let tag = format!("Example {}:", i + 1);
        let tag = match label {
            Label::Spam => tag.red(),
            Label::Ham => tag.green(),
        };
        println!("  {} {}", tag, truncate(msg, 100));
    }
    println!();
}

/// Overview block, a blank line, then the histogram bins.
///
/// `spam_rate` is left empty when the dataset has no messages.
fn stats_csv(stats: &DashboardStats) -> String {
    let rate = stats
        .spam_rate
        .map(|r| format!("{r:.1}"))
        .unwrap_or_default();
    let mut out = format!(
        "total,spam_count,ham_count,spam_rate\n{},{},{},{}\n\nbin_start,bin_end,ham,spam\n",
        stats.total, stats.spam_count, stats.ham_count, rate
    );
    for bin in &stats.histogram.bins {
        out.push_str(&format!("{},{},{},{}\n", bin.start, bin.end, bin.ham, bin.spam));
    }
    out
}

// ---------------------------------------------------------------------------
// spamscope model
// ---------------------------------------------------------------------------

/// Show model metadata.
pub fn run_model(format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let bundle = load_model(&cfg)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&bundle.info())?),
        OutputFormat::Csv => {
            let info = bundle.info();
            println!("accuracy,feature_count,algorithm");
            println!("{},{},{}", info.accuracy, info.feature_count, info.algorithm);
        }
        OutputFormat::Table => {
            println!("{}", "Model Info".bold().cyan());
            println!("{}", "=".repeat(40));
            print_model_summary(&bundle);
        }
    }
    Ok(())
}

fn print_model_summary(bundle: &ModelBundle) {
    let info = bundle.info();
    println!("  {} {:.2}%", "Accuracy:".bold(), info.accuracy * 100.0);
    println!(
        "  {} {}",
        "Features:".bold(),
        format_number(info.feature_count)
    );
    println!("  {} {}", "Algorithm:".bold(), info.algorithm);
}

// ---------------------------------------------------------------------------
// spamscope health
// ---------------------------------------------------------------------------

/// Check model, dataset, config files and prediction log.
pub fn run_health() -> Result<()> {
    println!("{}", "spamscope Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();

    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.spamscope/config.toml found"
        } else {
            "not found (run `spamscope config init` to create)"
        },
    );
    print_health_item(
        "Project config",
        project_exists,
        if project_exists {
            ".spamscope.toml found"
        } else {
            "none (optional)"
        },
    );

    match load_model(&cfg) {
        Ok(bundle) => print_health_item(
            "Model",
            true,
            &format!(
                "{} ({} features, {:.2}% accuracy)",
                cfg.model.path,
                format_number(bundle.feature_count()),
                bundle.accuracy() * 100.0
            ),
        ),
        Err(e) => print_health_item("Model", false, &format!("{e:#}")),
    }

    match dataset::load(config::expand_home(&cfg.dataset.path), &cfg.dataset) {
        Ok(dataset) => print_health_item(
            "Dataset",
            true,
            &format!("{} ({} messages)", cfg.dataset.path, format_number(dataset.len())),
        ),
        Err(e) => print_health_item("Dataset", false, &format!("{e:#}: dashboard disabled")),
    }

    let log_path = config::expand_home(&cfg.logging.path);
    let log_exists = log_path.exists();
    print_health_item(
        "Prediction log",
        cfg.logging.enabled,
        &if !cfg.logging.enabled {
            "disabled".to_string()
        } else if log_exists {
            format!("{} entries", logger::read_all_entries(&log_path).len())
        } else {
            "no log file yet".to_string()
        },
    );

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<16} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// spamscope config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective spamscope Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.spamscope/config.toml", global_exists);
    print_source(".spamscope.toml", project_exists);
    println!(
        "  {} {}",
        "·".dimmed(),
        "SPAMSCOPE_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(name: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.spamscope/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format a number with comma separators for readability.
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
