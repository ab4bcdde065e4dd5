//! outlier - percentile calculator CLI and HTTP server.

use clap::{ArgGroup, Args, Parser, Subcommand};
use outlier_common::error::format_error_human;
use outlier_common::{Error, ErrorResponse, OutputFormat, PercentileSummary};
use outlier_core::config::{load_config, Config, ConfigError};
use outlier_core::exit_codes::ExitCode;
use outlier_core::logging::{init_logging, LogFormat, LogLevel};
use outlier_core::render::render_summary;
use outlier_core::{ingest, server, version};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Outlier: percentile calculator for numeric datasets
#[derive(Parser)]
#[command(name = "outlier")]
#[command(author, version = version::VERSION, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Config file (defaults to $CONFIG_FILE, then ~/.config/outlier/config.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format: compact, pretty, json
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

impl GlobalOpts {
    /// Level requested on the command line, if any.
    fn log_level(&self) -> Option<LogLevel> {
        if self.quiet {
            return Some(LogLevel::Error);
        }
        match self.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate a percentile from a value list or a JSON/CSV file
    Calculate(CalculateArgs),

    /// Run the HTTP API server
    Serve(ServeArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["values", "file"])))]
struct CalculateArgs {
    /// Comma-separated values, e.g. "1,2,3.5"
    #[arg(long, allow_hyphen_values = true)]
    values: Option<String>,

    /// JSON (array of numbers) or CSV (with a 'value' column) file
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Percentile to calculate, 0-100 [default: from config, 95]
    #[arg(short = 'p', long, allow_negative_numbers = true)]
    percentile: Option<f64>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Port to listen on [default: from config, 3000]
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    port: Option<u16>,

    /// Address to bind [default: from config, 0.0.0.0]
    #[arg(long)]
    bind: Option<String>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    ExitCode::Clean
                }
                _ => ExitCode::ArgsError,
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let config = match load_config(cli.global.config.as_deref()) {
        Ok((config, source)) => {
            let logging = config
                .logging
                .clone()
                .with_overrides(cli.global.log_level(), cli.global.log_format);
            if let Err(e) = init_logging(&logging) {
                eprintln!("outlier: failed to open log output {}: {}", logging.output, e);
                std::process::exit(ExitCode::ConfigError.as_i32());
            }
            tracing::debug!(source = %source, "configuration loaded");
            config
        }
        Err(e) => {
            report_config_error(&cli.global, &e);
            std::process::exit(ExitCode::ConfigError.as_i32());
        }
    };

    let exit_code = match cli.command {
        Commands::Calculate(args) => run_calculate(&cli.global, &args, &config),
        Commands::Serve(args) => run_serve(&args, config),
        Commands::Version => {
            print_version(&cli.global);
            ExitCode::Clean
        }
    };

    std::process::exit(exit_code.as_i32());
}

fn run_calculate(global: &GlobalOpts, args: &CalculateArgs, config: &Config) -> ExitCode {
    let percentile = args
        .percentile
        .unwrap_or(config.calculation.default_percentile);

    let summary = match calculate(args, percentile) {
        Ok(summary) => summary,
        Err(e) => {
            tracing::debug!(error = %e, code = e.code(), "calculation failed");
            report_error(global, &e);
            return ExitCode::from(&e);
        }
    };

    match render_summary(&summary, global.format) {
        Ok(out) => {
            println!("{out}");
            ExitCode::Clean
        }
        Err(e) => {
            eprintln!("outlier: failed to render result: {e}");
            ExitCode::InternalError
        }
    }
}

fn calculate(args: &CalculateArgs, percentile: f64) -> Result<PercentileSummary, Error> {
    let values = match (&args.values, &args.file) {
        (Some(list), _) => ingest::parse_value_list(list)?,
        (None, Some(path)) => ingest::read_values_from_file(path)?,
        (None, None) => return Err(Error::EmptyInput),
    };
    Ok(outlier_math::summarize(&values, percentile)?)
}

fn run_serve(args: &ServeArgs, mut config: Config) -> ExitCode {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind) = &args.bind {
        config.server.bind_ip = bind.clone();
    }

    match actix_web::rt::System::new().block_on(server::run(&config)) {
        Ok(()) => ExitCode::Clean,
        Err(e) => {
            eprintln!(
                "outlier: server error on {}:{}: {}",
                config.server.bind_ip, config.server.port, e
            );
            ExitCode::IoError
        }
    }
}

fn report_error(global: &GlobalOpts, err: &Error) {
    match global.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&ErrorResponse::from(err)) {
            Ok(json) => println!("{json}"),
            Err(_) => eprintln!("{err}"),
        },
        OutputFormat::Text => {
            eprintln!("{}", format_error_human(err, std::io::stderr().is_terminal()));
        }
    }
}

fn report_config_error(global: &GlobalOpts, err: &ConfigError) {
    match global.format {
        OutputFormat::Json => {
            let body = ErrorResponse::message(err.to_string());
            match serde_json::to_string_pretty(&body) {
                Ok(json) => println!("{json}"),
                Err(_) => eprintln!("{err}"),
            }
        }
        OutputFormat::Text => eprintln!("outlier: {err}"),
    }
}

fn print_version(global: &GlobalOpts) {
    match global.format {
        OutputFormat::Json => {
            let version_info = serde_json::json!({
                "version": version::VERSION,
                "git_commit": version::git_commit(),
                "build_date": version::build_date(),
            });
            match serde_json::to_string_pretty(&version_info) {
                Ok(json) => println!("{json}"),
                Err(_) => println!("outlier {}", version::full_version()),
            }
        }
        OutputFormat::Text => println!("outlier {}", version::full_version()),
    }
}
