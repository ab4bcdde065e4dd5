//! Structured logging for the `outlier` binary.
//!
//! # Design Notes
//!
//! - stdout is reserved for command payloads (results, JSON errors)
//! - log lines go to stderr unless the config names stdout or a file
//! - `log` records from actix-web's request logger are bridged into tracing

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel, LogOutput};

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs. `RUST_LOG`,
/// when set, replaces the level-derived filter directive.
///
/// Fails only when a log file cannot be opened.
pub fn init_logging(config: &LogConfig) -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    let (writer, use_ansi) = match &config.output {
        LogOutput::Stdout => (
            BoxMakeWriter::new(std::io::stdout),
            std::io::stdout().is_terminal(),
        ),
        LogOutput::Stderr => (
            BoxMakeWriter::new(std::io::stderr),
            std::io::stderr().is_terminal(),
        ),
        LogOutput::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
    };

    let layer = fmt::layer().with_writer(writer).with_ansi(use_ansi);

    // try_init: a second call (tests, embedding) keeps the first subscriber.
    let result = match config.format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(layer.pretty())
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json().with_current_span(false))
            .try_init(),
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "logging already initialized");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_output_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outlier.log");
        let config = LogConfig {
            output: LogOutput::File(path.clone()),
            format: LogFormat::Json,
            ..LogConfig::default()
        };
        init_logging(&config).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_file_output_fails() {
        let config = LogConfig {
            output: LogOutput::File("/nonexistent/dir/outlier.log".into()),
            ..LogConfig::default()
        };
        assert!(init_logging(&config).is_err());
    }
}
