//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Default number of query files kept in the history cache.
pub const DEFAULT_MAX_HISTORICAL_QUERIES: u16 = 10;

/// Exclusive upper bound for the history limit.
pub const MAX_HISTORICAL_QUERIES_BOUND: i64 = 32767;

/// Profile used when neither config nor CLI name one.
pub const DEFAULT_PROFILE: &str = "databricks";

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Profiles file name inside the config directory.
pub const PROFILES_FILE_NAME: &str = "profiles.toml";

const APP_DIR: &str = "termquery";

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# termquery configuration
#
# Every key is optional. Environment variables override these values and
# command-line flags override both.

# Query files kept in the history cache (1..32767).
# TERMQUERY_HISTORICAL_QUERY_LIMIT overrides this.
max_historical_queries = 10

# Open queries in nvim regardless of $EDITOR.
# TERMQUERY_FORCE_USE_NEOVIM=true overrides this.
force_use_neovim = false

# Profile from profiles.toml used for connections.
default_profile = "databricks"

# editor = "nvim -u NONE"
# cache_dir = "/path/to/query/history"
# log_file_path = "/path/to/termquery.log"
# page_size = 20
# column_width = 20
"#;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Failed to create the config directory or a default file.
    #[error("Failed to write {path}: {reason}")]
    WriteError {
        /// Path that failed to write.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/termquery/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Number of query files kept in the history cache.
    #[serde(default)]
    pub max_historical_queries: Option<i64>,

    /// Prefer nvim over `$EDITOR`.
    #[serde(default)]
    pub force_use_neovim: Option<bool>,

    /// Editor command, split on whitespace.
    #[serde(default)]
    pub editor: Option<String>,

    /// Profile name looked up in `profiles.toml`.
    #[serde(default)]
    pub default_profile: Option<String>,

    /// Directory holding the query history files.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Rows per table page.
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Table column width in cells.
    #[serde(default)]
    pub column_width: Option<u16>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// History cache capacity, always in `1..32767`.
    pub max_historical_queries: u16,
    /// Prefer nvim over `$EDITOR`.
    pub force_use_neovim: bool,
    /// Explicit editor command, if any.
    pub editor: Option<String>,
    /// Connection profile name.
    pub profile: String,
    /// History cache directory.
    pub cache_dir: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Rows per table page.
    pub page_size: usize,
    /// Table column width in cells.
    pub column_width: u16,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            max_historical_queries: DEFAULT_MAX_HISTORICAL_QUERIES,
            force_use_neovim: false,
            editor: None,
            profile: DEFAULT_PROFILE.to_string(),
            cache_dir: default_cache_dir(),
            log_file_path: default_log_path(),
            page_size: 20,
            column_width: 20,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/termquery/termquery.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join(APP_DIR).join("termquery.log")
    } else {
        PathBuf::from("termquery.log")
    }
}

/// Resolve default history cache directory.
///
/// `dirs::cache_dir` honours `XDG_CACHE_HOME`, so this is
/// `$XDG_CACHE_HOME/termquery` or `~/.cache/termquery` on Linux.
pub fn default_cache_dir() -> PathBuf {
    if let Some(cache_dir) = dirs::cache_dir() {
        cache_dir.join(APP_DIR)
    } else {
        PathBuf::from(".termquery-cache")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/termquery/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}

/// Pick the config file path.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `TERMQUERY_CONFIG` environment variable
/// 3. Default path `~/.config/termquery/config.toml`
pub fn resolve_config_path(config_path: Option<PathBuf>) -> Option<PathBuf> {
    config_path
        .or_else(|| std::env::var("TERMQUERY_CONFIG").ok().map(PathBuf::from))
        .or_else(default_config_path)
}

/// Log file named by `config_file`, or the default log path.
///
/// Agrees with the `log_file_path` that [`merge_config`] resolves, so logging
/// can start before the merge.
pub fn log_file_path(config_file: Option<&ConfigFile>) -> PathBuf {
    config_file
        .and_then(|config| config.log_file_path.clone())
        .unwrap_or_else(default_log_path)
}

/// Path of `profiles.toml` next to the given config file.
pub fn profiles_path_for(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|dir| dir.join(PROFILES_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(PROFILES_FILE_NAME))
}

/// Create the config directory with a commented default `config.toml` and
/// an empty `profiles.toml` when they do not exist yet.
///
/// Existing files are never touched. Returns `true` when the config file
/// was created.
///
/// # Errors
///
/// Returns [`ConfigError::WriteError`] if the directory or a file cannot be written.
pub fn ensure_default_config(config_path: &Path) -> Result<bool, ConfigError> {
    let write_error = |path: &Path, e: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    if let Some(dir) = config_path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| write_error(dir, e))?;
        }
    }

    let profiles_path = profiles_path_for(config_path);
    if !profiles_path.exists() {
        std::fs::write(&profiles_path, "").map_err(|e| write_error(&profiles_path, e))?;
    }

    if config_path.exists() {
        return Ok(false);
    }

    std::fs::write(config_path, DEFAULT_CONFIG_TEMPLATE)
        .map_err(|e| write_error(config_path, e))?;
    Ok(true)
}

/// Accept a history limit only inside `1..32767`.
fn valid_history_limit(value: i64) -> Option<u16> {
    if (1..MAX_HISTORICAL_QUERIES_BOUND).contains(&value) {
        u16::try_from(value).ok()
    } else {
        None
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `TERMQUERY_HISTORICAL_QUERY_LIMIT`: history limit, ignored unless it
///   parses to an integer in `1..32767`
/// - `TERMQUERY_FORCE_USE_NEOVIM`: `"true"` enables, anything else is ignored
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var("TERMQUERY_HISTORICAL_QUERY_LIMIT") {
        match raw.trim().parse::<i64>().ok().and_then(valid_history_limit) {
            Some(limit) => config.max_historical_queries = limit,
            None => warn!(value = %raw, "Ignoring invalid TERMQUERY_HISTORICAL_QUERY_LIMIT"),
        }
    }

    if let Ok(raw) = std::env::var("TERMQUERY_FORCE_USE_NEOVIM") {
        if raw.trim() == "true" {
            config.force_use_neovim = true;
        }
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
/// Out-of-range numbers fall back to the default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let max_historical_queries = match config.max_historical_queries {
        Some(value) => valid_history_limit(value).unwrap_or_else(|| {
            warn!(value, "Ignoring out-of-range max_historical_queries");
            defaults.max_historical_queries
        }),
        None => defaults.max_historical_queries,
    };

    ResolvedConfig {
        max_historical_queries,
        force_use_neovim: config.force_use_neovim.unwrap_or(defaults.force_use_neovim),
        editor: config.editor.or(defaults.editor),
        profile: config.default_profile.unwrap_or(defaults.profile),
        cache_dir: config.cache_dir.unwrap_or(defaults.cache_dir),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        page_size: config
            .page_size
            .filter(|&n| n > 0)
            .unwrap_or(defaults.page_size),
        column_width: config
            .column_width
            .filter(|&n| n > 0)
            .unwrap_or(defaults.column_width),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    profile_override: Option<String>,
    editor_override: Option<String>,
) -> ResolvedConfig {
    if let Some(profile) = profile_override {
        config.profile = profile;
    }

    if let Some(editor) = editor_override {
        config.editor = Some(editor);
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
