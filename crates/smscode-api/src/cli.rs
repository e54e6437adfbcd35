//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// Serve recent SMS verification codes to authenticated browsers.
#[derive(Parser, Debug)]
#[command(name = "smscode", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (.json or .toml)
    #[arg(short = 'f', long = "config", env = "SMSCODE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on (overrides the configuration file)
    #[arg(short = 'p', long)]
    pub port: Option<u16>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter)
    #[arg(long)]
    pub otel: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Default log filter for the chosen verbosity. `RUST_LOG` overrides it.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,smscode=debug,smscode_core=debug,smscode_infra=debug,tower_http=debug",
            _ => "trace",
        }
    }
}
