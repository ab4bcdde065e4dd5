//! Logging configuration.
//!
//! Supports configuration via:
//! - The `[logging]` section of the config file
//! - Environment variables (OUTLIER_LOG, OUTLIER_LOG_FORMAT, RUST_LOG)
//! - CLI flags (-v/-q, --log-format)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human-readable output (default).
    #[default]
    Compact,
    /// Multi-line human-readable output.
    Pretty,
    /// Machine-parseable JSON lines.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" | "human" | "console" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" | "jsonl" | "structured" => Ok(LogFormat::Json),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Log level filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose.
    Trace,
    /// Debug information.
    Debug,
    /// Standard operational info (default).
    #[default]
    Info,
    /// Warnings only.
    Warn,
    /// Errors only.
    Error,
    /// Completely silent.
    Off,
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" | "quiet" => Ok(LogLevel::Off),
            _ => Err(format!("unknown log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
            LogLevel::Off => write!(f, "off"),
        }
    }
}

/// Where log lines are written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogOutput {
    /// Standard output.
    Stdout,
    /// Standard error (default). Keeps stdout free for command payloads.
    #[default]
    Stderr,
    /// Append to a file.
    File(PathBuf),
}

impl std::str::FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("log output must not be empty".to_string()),
            "stdout" => Ok(LogOutput::Stdout),
            "stderr" => Ok(LogOutput::Stderr),
            path => Ok(LogOutput::File(PathBuf::from(path))),
        }
    }
}

impl TryFrom<String> for LogOutput {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LogOutput> for String {
    fn from(output: LogOutput) -> Self {
        output.to_string()
    }
}

impl std::fmt::Display for LogOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogOutput::Stdout => write!(f, "stdout"),
            LogOutput::Stderr => write!(f, "stderr"),
            LogOutput::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum log level.
    pub level: LogLevel,
    /// Output destination.
    pub output: LogOutput,
    /// Output format.
    pub format: LogFormat,
}

impl LogConfig {
    /// Layer environment and CLI overrides on top of `self`.
    ///
    /// Precedence, lowest to highest: config file, OUTLIER_LOG / RUST_LOG,
    /// OUTLIER_LOG_FORMAT, CLI flags.
    pub fn with_overrides(self, cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        self.with_env_overrides(
            std::env::var("OUTLIER_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
            std::env::var("OUTLIER_LOG_FORMAT").ok(),
        )
        .with_cli_overrides(cli_level, cli_format)
    }

    fn with_env_overrides(
        mut self,
        outlier_log: Option<String>,
        rust_log: Option<String>,
        log_format: Option<String>,
    ) -> Self {
        // OUTLIER_LOG takes precedence over RUST_LOG
        if let Some(val) = outlier_log {
            if let Ok(level) = val.parse::<LogLevel>() {
                self.level = level;
            }
        } else if let Some(val) = rust_log {
            // Coarse match only; RUST_LOG directives are applied verbatim by the filter.
            if val.contains("trace") {
                self.level = LogLevel::Trace;
            } else if val.contains("debug") {
                self.level = LogLevel::Debug;
            } else if val.contains("warn") {
                self.level = LogLevel::Warn;
            } else if val.contains("error") {
                self.level = LogLevel::Error;
            }
        }

        if let Some(val) = log_format {
            if let Ok(format) = val.parse::<LogFormat>() {
                self.format = format;
            }
        }
        self
    }

    fn with_cli_overrides(mut self, cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        if let Some(level) = cli_level {
            self.level = level;
        }
        if let Some(format) = cli_format {
            self.format = format;
        }
        self
    }

    /// Filter directive applied when RUST_LOG is not set.
    pub fn filter_directive(&self) -> String {
        match self.level {
            LogLevel::Off => "off".to_string(),
            level => format!("outlier={level},outlier_core={level},actix_web={level},actix_server={level}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSONL".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!("quiet".parse::<LogLevel>().unwrap(), LogLevel::Off);
    }

    #[test]
    fn test_log_output_parse() {
        assert_eq!("stdout".parse::<LogOutput>().unwrap(), LogOutput::Stdout);
        assert_eq!("stderr".parse::<LogOutput>().unwrap(), LogOutput::Stderr);
        assert_eq!(
            "/var/log/outlier.log".parse::<LogOutput>().unwrap(),
            LogOutput::File(PathBuf::from("/var/log/outlier.log"))
        );
        assert!("  ".parse::<LogOutput>().is_err());
    }

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.output, LogOutput::Stderr);
    }

    #[test]
    fn test_log_config_from_toml() {
        let config: LogConfig =
            toml::from_str("level = \"debug\"\noutput = \"stdout\"\nformat = \"json\"\n").unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.output, LogOutput::Stdout);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_env_overrides() {
        let config = LogConfig::default().with_env_overrides(
            Some("warn".into()),
            Some("trace".into()),
            Some("pretty".into()),
        );
        assert_eq!(config.level, LogLevel::Warn);
        assert_eq!(config.format, LogFormat::Pretty);

        let config = LogConfig::default().with_env_overrides(None, Some("actix_web=debug".into()), None);
        assert_eq!(config.level, LogLevel::Debug);
    }

    #[test]
    fn test_cli_overrides_win() {
        let config = LogConfig::default()
            .with_env_overrides(Some("warn".into()), None, Some("json".into()))
            .with_cli_overrides(Some(LogLevel::Trace), Some(LogFormat::Compact));
        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Compact);
    }

    #[test]
    fn test_filter_directive() {
        let config = LogConfig {
            level: LogLevel::Debug,
            ..LogConfig::default()
        };
        assert!(config.filter_directive().starts_with("outlier=debug,"));

        let config = LogConfig {
            level: LogLevel::Off,
            ..LogConfig::default()
        };
        assert_eq!(config.filter_directive(), "off");
    }
}
