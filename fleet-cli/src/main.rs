mod commands;
mod error;
mod output;
mod paths;
mod settings;

use std::fs::{self, File, OpenOptions};
use std::process::ExitCode;

use clap::Parser;
use fleet_forms::fallback::{self, BuildMode};
use fleet_lib::FleetClient;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::commands::Command;
use crate::error::CliError;
use crate::settings::{CliSettings, Overrides};

#[derive(Debug, Parser)]
#[command(name = "fleet")]
#[command(version, about = "Fleet vehicle booking client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the booking API
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match fallback::contain(BuildMode::current(), || run(cli)) {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
        Err(report) => {
            output::fallback(&report);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = CliSettings::load_default()?;
    init_logging(settings.log_level(cli.verbose)?)?;

    let overrides = Overrides {
        api_url: cli.api_url,
        timeout_secs: cli.timeout,
    };
    let config = settings::resolve_config(&settings, &overrides);
    log::info!("using API at {}", config.base_url);
    let client = FleetClient::builder().config(config).build()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(commands::run(cli.command, &client))
}

/// Rotates old logs and installs the file logger. Without a cache
/// directory the run is not logged. If the previous log cannot be
/// archived the new run is appended to it.
fn init_logging(level: LevelFilter) -> Result<(), CliError> {
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = match paths::rotate_logs() {
        Ok(()) => File::create(&path)?,
        Err(e) => {
            eprintln!("Warning: could not rotate logs ({}); appending to {}", e, path.display());
            OpenOptions::new().create(true).append(true).open(&path)?
        }
    };
    WriteLogger::init(level, Config::default(), file).map_err(|e| CliError::Logger(e.to_string()))
}
