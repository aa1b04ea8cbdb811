/// Configuration system for spamscope.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: hardcoded in [`schema::SpamscopeConfig::default()`]
/// 2. **User global config**: `~/.spamscope/config.toml`
/// 3. **Project local config**: `.spamscope.toml` in the current working directory
/// 4. **Environment variables**: `SPAMSCOPE_*` overrides (highest precedence)
///
/// # Usage
///
/// ```rust,ignore
/// use spamscope::config;
///
/// let cfg = config::load();
/// let bundle = spamscope::model::load(config::expand_home(&cfg.model.path))?;
/// ```
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::SpamscopeConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved spamscope configuration.
///
/// Merges all layers in order: defaults → global TOML → project TOML → env
/// vars.
pub fn load() -> SpamscopeConfig {
    let mut config = load_layers(&[global_config_path(), project_config_path()]);

    // Layer 4: environment variable overrides
    apply_env_overrides(&mut config);

    config
}

/// Merge the TOML files at `paths` (lowest precedence first) over the
/// built-in defaults.
///
/// Keys are merged table by table, so a later file only overrides the keys
/// it actually sets.
fn load_layers(paths: &[Option<PathBuf>]) -> SpamscopeConfig {
    let mut merged = toml::Table::new();
    for layer in paths.iter().filter_map(|p| load_toml_file(p.as_deref())) {
        merge_tables(&mut merged, layer);
    }
    toml::Value::Table(merged)
        .try_into()
        .unwrap_or_default()
}

/// Load a TOML config file from the given path (if it exists).
///
/// Returns `None` if the path is `None`, the file doesn't exist, or the
/// content is malformed. Malformed files are ignored so a typo never keeps
/// the classifier from starting. A file counts as malformed when it does not
/// deserialize into [`SpamscopeConfig`] on its own.
fn load_toml_file(path: Option<&Path>) -> Option<toml::Table> {
    let content = fs::read_to_string(path?).ok()?;
    let table: toml::Table = content.parse().ok()?;
    toml::Value::Table(table.clone())
        .try_into::<SpamscopeConfig>()
        .ok()?;
    Some(table)
}

/// Deep-merge `overlay` into `base`. Nested tables merge key by key; any
/// other value in `overlay` replaces the one in `base`.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

/// Path to the user global config: `~/.spamscope/config.toml`.
fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".spamscope").join("config.toml"))
}

/// Path to the project local config: `.spamscope.toml` in the current directory.
fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".spamscope.toml"))
}

/// Return the path to the global config file for display/init purposes.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Return the path to the project config file for display purposes.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

/// Expand a leading `~` to the home directory.
///
/// Paths without a tilde (or when the home directory is unknown) are
/// returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `SPAMSCOPE_MODEL`: model artifact path
/// - `SPAMSCOPE_DATASET`: dataset CSV path
/// - `SPAMSCOPE_ADDR`: web dashboard listen address
/// - `SPAMSCOPE_LOGGING`: prediction log on/off (`1`/`true`/`yes`/`on`)
fn apply_env_overrides(config: &mut SpamscopeConfig) {
    if let Ok(val) = std::env::var("SPAMSCOPE_MODEL")
        && !val.is_empty()
    {
        config.model.path = val;
    }
    if let Ok(val) = std::env::var("SPAMSCOPE_DATASET")
        && !val.is_empty()
    {
        config.dataset.path = val;
    }
    if let Ok(val) = std::env::var("SPAMSCOPE_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
    if let Ok(val) = std::env::var("SPAMSCOPE_LOGGING") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the default annotated config to `~/.spamscope/config.toml`.
///
/// Returns an error if the file already exists (use `force = true` to
/// overwrite).
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create ~/.spamscope/ directory")?;
    }

    fs::write(&path, SpamscopeConfig::default_toml()).context("failed to write config file")?;

    Ok(path)
}

/// Set a single config key to a value in the global config file.
///
/// Starts from the existing global file, or from serialized defaults when
/// there is none. Supports dotted keys like `history.display_limit`.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let source = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&SpamscopeConfig::default())
            .context("failed to serialize default config")?
    };

    let mut value_table: toml::Value =
        toml::from_str(&source).context("failed to parse config as TOML value")?;
    set_toml_value(&mut value_table, key, value)?;

    let output =
        toml::to_string_pretty(&value_table).context("failed to serialize updated config")?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(&path, output).context("failed to write config file")?;

    Ok(())
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The existing value's type decides how `raw_value` is parsed.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        anyhow::bail!("invalid config key: '{key}'");
    }

    let mut current = root;
    for &part in &parts[..parts.len() - 1] {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let leaf = parts[parts.len() - 1];

    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    let new_value = match table.get(leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            if n < 0 {
                anyhow::bail!("expected a non-negative integer for '{key}', got '{raw_value}'");
            }
            toml::Value::Integer(n)
        }
        Some(toml::Value::Float(_)) => {
            let f: f64 = raw_value
                .parse()
                .with_context(|| format!("expected float for '{key}', got '{raw_value}'"))?;
            toml::Value::Float(f)
        }
        Some(_) => toml::Value::String(raw_value.to_string()),
        None => anyhow::bail!("unknown config key: '{key}'"),
    };

    table.insert(leaf.to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// Show the effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("true"));
        assert!(is_truthy("YES"));
        assert!(is_truthy("On"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn expand_home_handles_tilde() {
        let Some(home) = dirs::home_dir() else {
            return;
        };
        assert_eq!(expand_home("~"), home);
        assert_eq!(
            expand_home("~/.spamscope/predictions.jsonl"),
            home.join(".spamscope/predictions.jsonl")
        );
    }

    #[test]
    fn expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("spam.csv"), PathBuf::from("spam.csv"));
        assert_eq!(expand_home("/srv/model.json"), PathBuf::from("/srv/model.json"));
        assert_eq!(expand_home("~user/file"), PathBuf::from("~user/file"));
    }

    #[test]
    fn set_toml_value_updates_string() {
        let toml_str = r#"
[model]
path = "spam_detector.json"
"#;
        let mut root: toml::Value = toml::from_str(toml_str).unwrap();
        set_toml_value(&mut root, "model.path", "other.json").unwrap();

        let model = root["model"].as_table().unwrap();
        assert_eq!(model["path"].as_str(), Some("other.json"));
    }

    #[test]
    fn set_toml_value_updates_bool() {
        let toml_str = r#"
[web]
open_browser = true
"#;
        let mut root: toml::Value = toml::from_str(toml_str).unwrap();
        set_toml_value(&mut root, "web.open_browser", "off").unwrap();

        let web = root["web"].as_table().unwrap();
        assert_eq!(web["open_browser"].as_bool(), Some(false));
    }

    #[test]
    fn set_toml_value_updates_integer() {
        let toml_str = r#"
[history]
display_limit = 5
"#;
        let mut root: toml::Value = toml::from_str(toml_str).unwrap();
        set_toml_value(&mut root, "history.display_limit", "8").unwrap();

        let history = root["history"].as_table().unwrap();
        assert_eq!(history["display_limit"].as_integer(), Some(8));
    }

    #[test]
    fn set_toml_value_rejects_negative_integer() {
        let toml_str = r#"
[dashboard]
sample_size = 5
"#;
        let mut root: toml::Value = toml::from_str(toml_str).unwrap();
        assert!(set_toml_value(&mut root, "dashboard.sample_size", "-1").is_err());
        assert!(set_toml_value(&mut root, "dashboard.sample_size", "many").is_err());
    }

    #[test]
    fn set_toml_value_rejects_unknown_keys() {
        let toml_str = r#"
[model]
path = "spam_detector.json"
"#;
        let mut root: toml::Value = toml::from_str(toml_str).unwrap();
        assert!(set_toml_value(&mut root, "nonexistent.key", "value").is_err());
        assert!(set_toml_value(&mut root, "model.typo", "value").is_err());
        assert!(set_toml_value(&mut root, "model.", "value").is_err());
    }

    #[test]
    fn project_layer_keeps_unrelated_global_keys() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("config.toml");
        let project = dir.path().join(".spamscope.toml");
        fs::write(&global, "[model]\npath = \"/models/global.json\"\n").unwrap();
        fs::write(&project, "[web]\naddr = \"127.0.0.1:9000\"\n").unwrap();

        let cfg = load_layers(&[Some(global), Some(project)]);

        assert_eq!(cfg.model.path, "/models/global.json");
        assert_eq!(cfg.web.addr, "127.0.0.1:9000");
        assert!(cfg.web.open_browser);
        assert_eq!(cfg.history.display_limit, 5);
    }

    #[test]
    fn project_layer_overrides_same_key_only() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("config.toml");
        let project = dir.path().join(".spamscope.toml");
        fs::write(
            &global,
            "[history]\ndisplay_limit = 10\npreview_chars = 80\n",
        )
        .unwrap();
        fs::write(&project, "[history]\ndisplay_limit = 3\n").unwrap();

        let cfg = load_layers(&[Some(global), Some(project)]);

        assert_eq!(cfg.history.display_limit, 3);
        assert_eq!(cfg.history.preview_chars, 80);
    }

    #[test]
    fn malformed_layer_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("config.toml");
        let project = dir.path().join(".spamscope.toml");
        fs::write(&global, "[dataset]\npath = \"/data/spam.csv\"\n").unwrap();
        fs::write(&project, "[history]\ndisplay_limit = \"lots\"\n").unwrap();

        let cfg = load_layers(&[Some(global), Some(project), None]);

        assert_eq!(cfg.dataset.path, "/data/spam.csv");
        assert_eq!(cfg.history.display_limit, 5);
    }

    #[test]
    fn no_layers_yields_defaults() {
        let cfg = load_layers(&[None, Some(PathBuf::from("/nonexistent/.spamscope.toml"))]);
        assert_eq!(cfg.model.path, "spam_detector.json");
        assert_eq!(cfg.web.addr, "127.0.0.1:8501");
    }

    #[test]
    fn show_effective_config_returns_toml() {
        let toml_str = show_effective_config().unwrap();
        let _: SpamscopeConfig = toml::from_str(&toml_str).unwrap();
    }
}
