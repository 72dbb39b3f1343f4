use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::JotterError;

pub const DEFAULT_SCRIPT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_LIMIT: usize = 50;
pub const MAX_LIMIT: usize = 200;
pub const DEFAULT_MAX_BODY_LENGTH: usize = 50_000;

/// Environment variable pointing at an alternate config file.
pub const CONFIG_ENV: &str = "JOTTER_CONFIG";

/// Runtime settings shared by the MCP server and the CLI.
///
/// Loaded from `~/.config/jotter/config.toml` (Unix) or the platform config
/// dir elsewhere; every field is optional in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Per-script timeout in milliseconds (default: 30000)
    #[serde(default = "default_script_timeout_ms")]
    pub script_timeout_ms: u64,

    /// Default number of notes returned by list/search (default: 50)
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Hard cap on list/search limits (default: 200)
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Default cap on note body length for get_note (default: 50000 chars)
    #[serde(default = "default_max_body_length")]
    pub max_body_length: usize,

    /// Folder used by create_note when the caller names none.
    /// When unset, Notes puts the note in its own default folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_folder: Option<String>,

    /// Override for the automation interpreter (default: /usr/bin/osascript)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osascript_path: Option<PathBuf>,
}

fn default_script_timeout_ms() -> u64 {
    DEFAULT_SCRIPT_TIMEOUT_MS
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_max_limit() -> usize {
    MAX_LIMIT
}

fn default_max_body_length() -> usize {
    DEFAULT_MAX_BODY_LENGTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            script_timeout_ms: DEFAULT_SCRIPT_TIMEOUT_MS,
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
            max_body_length: DEFAULT_MAX_BODY_LENGTH,
            default_folder: None,
            osascript_path: None,
        }
    }
}

impl Config {
    /// Load from `$JOTTER_CONFIG`, or the default location, or fall back to
    /// defaults when no file exists.
    ///
    /// An explicitly-set `$JOTTER_CONFIG` that cannot be read is an error; a
    /// missing file at the default path is not.
    pub fn load() -> Result<Self, JotterError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let text = std::fs::read_to_string(&path).map_err(|e| {
                JotterError::Config(format!("cannot read {} ({}): {}", path, CONFIG_ENV, e))
            })?;
            return Self::from_toml_str(&text);
        }

        let path = Self::default_path();
        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(_) => Ok(Self::default()),
        }
    }

    /// `~/.config/jotter/config.toml` (Unix) or the platform equivalent.
    pub fn default_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|p| p.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("jotter").join("config.toml")
    }

    pub fn from_toml_str(text: &str) -> Result<Self, JotterError> {
        let config: Config =
            toml::from_str(text).map_err(|e| JotterError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), JotterError> {
        if self.script_timeout_ms == 0 {
            return Err(JotterError::Config(
                "script_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.default_limit == 0 || self.max_limit == 0 {
            return Err(JotterError::Config(
                "default_limit and max_limit must be greater than zero".to_string(),
            ));
        }
        if self.default_limit > self.max_limit {
            return Err(JotterError::Config(format!(
                "default_limit ({}) exceeds max_limit ({})",
                self.default_limit, self.max_limit
            )));
        }
        if self.max_body_length == 0 {
            return Err(JotterError::Config(
                "max_body_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn script_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.script_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.script_timeout_ms, DEFAULT_SCRIPT_TIMEOUT_MS);
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
        assert_eq!(config.max_limit, MAX_LIMIT);
        assert_eq!(config.max_body_length, DEFAULT_MAX_BODY_LENGTH);
        assert!(config.default_folder.is_none());
        assert!(config.osascript_path.is_none());
    }

    #[test]
    fn partial_file_overlays_defaults() {
        let config = Config::from_toml_str(
            r#"
script_timeout_ms = 5000
default_folder = "Inbox"
"#,
        )
        .unwrap();
        assert_eq!(config.script_timeout_ms, 5000);
        assert_eq!(config.default_folder.as_deref(), Some("Inbox"));
        assert_eq!(config.default_limit, DEFAULT_LIMIT);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::from_toml_str("script_timeout_ms = 0").unwrap_err();
        assert!(matches!(err, JotterError::Config(_)));
    }

    #[test]
    fn default_limit_cannot_exceed_max() {
        let err = Config::from_toml_str("default_limit = 500\nmax_limit = 100").unwrap_err();
        assert!(matches!(err, JotterError::Config(_)));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = Config::from_toml_str("script_timeout_ms = [").unwrap_err();
        assert!(matches!(err, JotterError::Config(_)));
    }
}
