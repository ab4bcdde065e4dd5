//! Configuration file loading and resolution.
//!
//! Resolution order: `--config` argument → `CONFIG_FILE` environment variable →
//! XDG config (`~/.config/outlier/config.toml`) → built-in defaults.
//!
//! An explicitly named file (CLI or environment) must exist. The XDG file is
//! only used when present.

use crate::logging::LogConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a config file.
pub const ENV_CONFIG_FILE: &str = "CONFIG_FILE";

/// Application name for XDG directories.
const APP_NAME: &str = "outlier";

/// Standard config file name.
const CONFIG_FILENAME: &str = "config.toml";

/// Percentile used when neither the caller nor the config names one.
pub const DEFAULT_PERCENTILE: f64 = 95.0;

/// Default HTTP request body ceiling (100 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 100 * 1024 * 1024;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path} (from {source_kind})")]
    NotFound {
        path: PathBuf,
        source_kind: ConfigSource,
    },

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Where the configuration was taken from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly provided via `--config`.
    CliArgument,

    /// Set via `CONFIG_FILE`.
    Environment,

    /// Found in the XDG config directory.
    XdgConfig,

    /// No file; built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LogConfig,
    pub server: ServerConfig,
    pub calculation: CalculationConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_ip: String,
    /// TCP port.
    pub port: u16,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_ip: "0.0.0.0".to_string(),
            port: 3000,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// `[calculation]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationConfig {
    /// Percentile used when a request or command does not name one.
    pub default_percentile: f64,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            default_percentile: DEFAULT_PERCENTILE,
        }
    }
}

impl Config {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Check semantic constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_ip.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "server.bind_ip",
                message: "must not be empty".to_string(),
            });
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid {
                field: "server.port",
                message: "must be between 1 and 65535".to_string(),
            });
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "server.max_body_bytes",
                message: "must be greater than zero".to_string(),
            });
        }
        let p = self.calculation.default_percentile;
        if !(outlier_math::percentile::MIN_PERCENTILE..=outlier_math::percentile::MAX_PERCENTILE)
            .contains(&p)
        {
            return Err(ConfigError::Invalid {
                field: "calculation.default_percentile",
                message: format!("must be between 0 and 100, got {p}"),
            });
        }
        Ok(())
    }
}

/// Pick the config file to load, without touching the environment.
///
/// Returns `None` when defaults should be used.
pub fn resolve_config_path(
    cli_path: Option<&Path>,
    env_path: Option<&str>,
    xdg_dir: Option<&Path>,
) -> Option<(PathBuf, ConfigSource)> {
    if let Some(path) = cli_path {
        return Some((path.to_path_buf(), ConfigSource::CliArgument));
    }
    if let Some(path) = env_path.filter(|p| !p.trim().is_empty()) {
        return Some((PathBuf::from(path), ConfigSource::Environment));
    }
    let candidate = xdg_dir?.join(APP_NAME).join(CONFIG_FILENAME);
    candidate
        .is_file()
        .then_some((candidate, ConfigSource::XdgConfig))
}

/// Resolve, load, and validate the configuration.
pub fn load_config(cli_path: Option<&Path>) -> Result<(Config, ConfigSource), ConfigError> {
    let env_path = std::env::var(ENV_CONFIG_FILE).ok();
    let xdg_dir = dirs::config_dir();

    let config = match resolve_config_path(cli_path, env_path.as_deref(), xdg_dir.as_deref()) {
        Some((path, source)) => {
            if !path.exists() {
                return Err(ConfigError::NotFound {
                    path,
                    source_kind: source,
                });
            }
            (Config::from_file(&path)?, source)
        }
        None => (Config::default(), ConfigSource::BuiltinDefault),
    };

    config.0.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogFormat, LogLevel, LogOutput};
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind_ip, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.max_body_bytes, 104_857_600);
        assert_eq!(config.calculation.default_percentile, 95.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn full_document() {
        let text = r#"
[logging]
level = "debug"
output = "stdout"
format = "json"

[server]
bind_ip = "127.0.0.1"
port = 8080
max_body_bytes = 1024

[calculation]
default_percentile = 99.0
"#;
        let config = Config::from_toml_str(text, Path::new("inline.toml")).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.output, LogOutput::Stdout);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.server.bind_ip, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.max_body_bytes, 1024);
        assert_eq!(config.calculation.default_percentile, 99.0);
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config = Config::from_toml_str("[server]\nport = 9000\n", Path::new("p.toml")).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_ip, "0.0.0.0");
        assert_eq!(config.calculation.default_percentile, 95.0);
        assert_eq!(config.logging, LogConfig::default());
    }

    #[test]
    fn empty_document_is_default() {
        let config = Config::from_toml_str("", Path::new("e.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn bad_toml_is_parse_error() {
        let err = Config::from_toml_str("[server\nport = ", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err = Config::from_toml_str("[server]\nport = \"http\"\n", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn validate_rejects_port_zero() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "server.port", .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_body_limit() {
        let mut config = Config::default();
        config.server.max_body_bytes = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "server.max_body_bytes", .. })
        ));
    }

    #[test]
    fn validate_rejects_percentile_out_of_range() {
        let mut config = Config::default();
        config.calculation.default_percentile = 150.0;
        assert!(config.validate().is_err());
        config.calculation.default_percentile = f64::NAN;
        assert!(config.validate().is_err());
        config.calculation.default_percentile = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn resolve_prefers_cli() {
        let (path, source) = resolve_config_path(
            Some(Path::new("/a/cli.toml")),
            Some("/b/env.toml"),
            Some(Path::new("/c")),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/a/cli.toml"));
        assert_eq!(source, ConfigSource::CliArgument);
    }

    #[test]
    fn resolve_falls_back_to_env() {
        let (path, source) =
            resolve_config_path(None, Some("/b/env.toml"), Some(Path::new("/c"))).unwrap();
        assert_eq!(path, PathBuf::from("/b/env.toml"));
        assert_eq!(source, ConfigSource::Environment);
    }

    #[test]
    fn resolve_uses_xdg_only_when_present() {
        let dir = tempfile::tempdir().unwrap();
        assert!(resolve_config_path(None, None, Some(dir.path())).is_none());
        assert!(resolve_config_path(None, Some("  "), Some(dir.path())).is_none());

        let app_dir = dir.path().join(APP_NAME);
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join(CONFIG_FILENAME), "").unwrap();

        let (path, source) = resolve_config_path(None, None, Some(dir.path())).unwrap();
        assert_eq!(path, app_dir.join(CONFIG_FILENAME));
        assert_eq!(source, ConfigSource::XdgConfig);
    }

    #[test]
    fn load_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[calculation]\ndefault_percentile = 50.0\n").unwrap();
        let (config, source) = load_config(Some(file.path())).unwrap();
        assert_eq!(config.calculation.default_percentile, 50.0);
        assert_eq!(source, ConfigSource::CliArgument);
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let err = load_config(Some(Path::new("/nonexistent/outlier.toml"))).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NotFound {
                source_kind: ConfigSource::CliArgument,
                ..
            }
        ));
    }

    #[test]
    fn load_invalid_values_fails() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[server]\nport = 0\n").unwrap();
        assert!(matches!(
            load_config(Some(file.path())),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
