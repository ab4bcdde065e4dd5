//! Outlier core library.
//!
//! Everything the `outlier` binary needs beyond the percentile engine:
//! - [`ingest`]: JSON/CSV bytes and CLI value lists to observations
//! - [`config`]: TOML configuration resolution and validation
//! - [`logging`]: tracing subscriber setup
//! - [`server`]: the actix-web HTTP API
//! - [`exit_codes`], [`render`], [`version`]: CLI plumbing

pub mod config;
pub mod exit_codes;
pub mod ingest;
pub mod logging;
pub mod render;
pub mod server;
pub mod version;

pub use config::{load_config, Config, ConfigError, ConfigSource};
pub use exit_codes::ExitCode;
pub use ingest::{ingest, ingest_named, parse_value_list, read_values_from_file, SourceFormat};
