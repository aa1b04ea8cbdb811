use anyhow::Result;
use clap::{Parser, Subcommand};

use spamscope::{cli, web};

#[derive(Debug, Parser)]
#[command(name = "spamscope")]
#[command(about = "Spam/ham message classifier with a statistics dashboard")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Classify a message (reads stdin when no text is given)
    Classify {
        /// The message to classify
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Interactive classification session with recent-prediction history
    Shell,
    /// Show dataset statistics: counts, spam rate, length histogram, samples
    Stats {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show model accuracy, vocabulary size, and algorithm
    Model {
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Start the web dashboard
    Web {
        /// Listen address (overrides web.addr)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser window
        #[arg(long)]
        no_browser: bool,
    },
    /// Check model, dataset, config, and prediction log
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective (merged) configuration
    Show,
    /// Write the default config to ~/.spamscope/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `history.display_limit 10`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Classify { text, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_classify(&text.join(" "), fmt)
        }
        Commands::Shell => cli::run_shell(),
        Commands::Stats { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_stats(fmt)
        }
        Commands::Model { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_model(fmt)
        }
        Commands::Web { addr, no_browser } => web::serve(addr.as_deref(), !no_browser),
        Commands::Health => cli::run_health(),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
