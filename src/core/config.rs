//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.parley/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::catalog::{DEFAULT_MODEL, find_model};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_model: Option<String>,
    pub reply_delay_ms: Option<u64>,
    pub reply_timeout_secs: Option<u64>,
    pub reduced_motion: Option<bool>,
    pub sidebar_open: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PreferencesConfig {
    /// Path relative to `~/.parley/` (absolute paths are used as-is).
    pub path: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1000;
pub const DEFAULT_REPLY_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PREFERENCES_FILE: &str = "preferences.toml";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub model_name: String,
    pub reply_delay: Duration,
    pub reply_timeout: Duration,
    pub reduced_motion: bool,
    pub sidebar_open: bool,
    /// `None` keeps preferences in memory only.
    pub preferences_path: Option<PathBuf>,
}

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub model: Option<String>,
    pub reply_delay_ms: Option<u64>,
    pub memory_prefs: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.parley/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parley"))
}

/// Returns the path to `~/.parley/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.parley/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ParleyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ParleyConfig::default());
        }
    };
    load_config_from(&path)
}

/// Load config from an explicit path (generating a default if missing).
pub fn load_config_from(path: &Path) -> Result<ParleyConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ParleyConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ParleyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Parley Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_model = "GPT-5-Nano"      # "GPT-5-Nano" or "GPT-5-Mini" (env PARLEY_MODEL)
# reply_delay_ms = 1000             # Simulated reply latency (env PARLEY_REPLY_DELAY_MS)
# reply_timeout_secs = 30           # Replies slower than this are marked failed
# reduced_motion = false            # Static thinking indicator (env PARLEY_REDUCED_MOTION=1)
# sidebar_open = true               # Start with the sidebar expanded

# [preferences]
# path = "preferences.toml"         # Relative to ~/.parley/
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ParleyConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env<F>(config: &ParleyConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Model: CLI → env → config → default, restricted to the catalog
    let requested = cli
        .model
        .clone()
        .or_else(|| env("PARLEY_MODEL"))
        .or_else(|| config.general.default_model.clone());
    let model_name = match requested {
        Some(name) => match find_model(&name) {
            Some(model) => model.to_string(),
            None => {
                warn!("Unknown model '{}', using {}", name, DEFAULT_MODEL);
                DEFAULT_MODEL.to_string()
            }
        },
        None => DEFAULT_MODEL.to_string(),
    };

    // Reply delay: CLI → env → config → default
    let reply_delay_ms = cli
        .reply_delay_ms
        .or_else(|| env("PARLEY_REPLY_DELAY_MS").and_then(|v| parse_env_u64("PARLEY_REPLY_DELAY_MS", &v)))
        .or(config.general.reply_delay_ms)
        .unwrap_or(DEFAULT_REPLY_DELAY_MS);

    // Reduced motion: env → config → default
    let reduced_motion = env("PARLEY_REDUCED_MOTION")
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .or(config.general.reduced_motion)
        .unwrap_or(false);

    let preferences_path = if cli.memory_prefs {
        None
    } else {
        resolve_preferences_path(config)
    };

    ResolvedConfig {
        model_name,
        reply_delay: Duration::from_millis(reply_delay_ms),
        reply_timeout: Duration::from_secs(
            config
                .general
                .reply_timeout_secs
                .unwrap_or(DEFAULT_REPLY_TIMEOUT_SECS),
        ),
        reduced_motion,
        sidebar_open: config.general.sidebar_open.unwrap_or(true),
        preferences_path,
    }
}

fn parse_env_u64(key: &str, value: &str) -> Option<u64> {
    match value.trim().parse() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, value, e);
            None
        }
    }
}

/// Preferences file: absolute path as-is, relative paths under `~/.parley/`.
fn resolve_preferences_path(config: &ParleyConfig) -> Option<PathBuf> {
    let file = config
        .preferences
        .path
        .as_deref()
        .unwrap_or(DEFAULT_PREFERENCES_FILE);
    let path = PathBuf::from(file);
    if path.is_absolute() {
        return Some(path);
    }
    match config_dir() {
        Some(dir) => Some(dir.join(path)),
        None => {
            warn!("Could not determine home directory, preferences will not persist");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = ParleyConfig::default();
        assert!(config.general.default_model.is_none());
        assert!(config.preferences.path.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&ParleyConfig::default(), &CliOverrides::default(), no_env);
        assert_eq!(resolved.model_name, DEFAULT_MODEL);
        assert_eq!(resolved.reply_delay, Duration::from_millis(DEFAULT_REPLY_DELAY_MS));
        assert_eq!(resolved.reply_timeout, Duration::from_secs(DEFAULT_REPLY_TIMEOUT_SECS));
        assert!(!resolved.reduced_motion);
        assert!(resolved.sidebar_open);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ParleyConfig {
            general: GeneralConfig {
                default_model: Some("GPT-5-Mini".to_string()),
                reply_delay_ms: Some(250),
                reply_timeout_secs: Some(5),
                reduced_motion: Some(true),
                sidebar_open: Some(false),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.model_name, "GPT-5-Mini");
        assert_eq!(resolved.reply_delay, Duration::from_millis(250));
        assert_eq!(resolved.reply_timeout, Duration::from_secs(5));
        assert!(resolved.reduced_motion);
        assert!(!resolved.sidebar_open);
    }

    #[test]
    fn test_env_beats_config_and_cli_beats_env() {
        let config = ParleyConfig {
            general: GeneralConfig {
                default_model: Some("GPT-5-Nano".to_string()),
                reply_delay_ms: Some(250),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "PARLEY_MODEL" => Some("GPT-5-Mini".to_string()),
            "PARLEY_REPLY_DELAY_MS" => Some("50".to_string()),
            "PARLEY_REDUCED_MOTION" => Some("1".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.model_name, "GPT-5-Mini");
        assert_eq!(resolved.reply_delay, Duration::from_millis(50));
        assert!(resolved.reduced_motion);

        let cli = CliOverrides {
            model: Some("GPT-5-Nano".to_string()),
            reply_delay_ms: Some(10),
            memory_prefs: false,
        };
        let resolved = resolve_with_env(&config, &cli, env);
        assert_eq!(resolved.model_name, "GPT-5-Nano");
        assert_eq!(resolved.reply_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_unknown_model_falls_back_to_default() {
        let cli = CliOverrides {
            model: Some("gpt-9000".to_string()),
            ..Default::default()
        };
        let resolved = resolve_with_env(&ParleyConfig::default(), &cli, no_env);
        assert_eq!(resolved.model_name, DEFAULT_MODEL);
    }

    #[test]
    fn test_bad_env_delay_is_ignored() {
        let config = ParleyConfig {
            general: GeneralConfig {
                reply_delay_ms: Some(300),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "PARLEY_REPLY_DELAY_MS").then(|| "soon".to_string());
        let resolved = resolve_with_env(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.reply_delay, Duration::from_millis(300));
    }

    #[test]
    fn test_memory_prefs_disables_path() {
        let cli = CliOverrides {
            memory_prefs: true,
            ..Default::default()
        };
        let resolved = resolve_with_env(&ParleyConfig::default(), &cli, no_env);
        assert_eq!(resolved.preferences_path, None);
    }

    #[test]
    fn test_absolute_preferences_path_kept() {
        let config = ParleyConfig {
            preferences: PreferencesConfig {
                path: Some("/tmp/parley-prefs.toml".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve_with_env(&config, &CliOverrides::default(), no_env);
        assert_eq!(
            resolved.preferences_path,
            Some(PathBuf::from("/tmp/parley-prefs.toml"))
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[general]
default_model = "GPT-5-Mini"
"#;
        let config: ParleyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_model.as_deref(), Some("GPT-5-Mini"));
        assert!(config.general.reply_delay_ms.is_none());
        assert!(config.preferences.path.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[general]
default_model = "GPT-5-Nano"
reply_delay_ms = 1500
reply_timeout_secs = 10
reduced_motion = true
sidebar_open = false

[preferences]
path = "prefs/ui.toml"
"#;
        let config: ParleyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.reply_delay_ms, Some(1500));
        assert_eq!(config.general.reply_timeout_secs, Some(10));
        assert_eq!(config.general.reduced_motion, Some(true));
        assert_eq!(config.general.sidebar_open, Some(false));
        assert_eq!(config.preferences.path.as_deref(), Some("prefs/ui.toml"));
    }

    #[test]
    fn test_missing_config_generates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.general.default_model.is_none());
        assert!(path.exists());

        // The generated file is all comments, so it parses back to defaults.
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.general.reply_delay_ms.is_none());
    }

    #[test]
    fn test_malformed_config_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\nreply_delay_ms = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
