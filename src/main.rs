use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use proto_check::config::{load_config, validate_config, ConfigError, DemoConfig, LogFormat};
use proto_check::observability::init_logging;
use proto_check::{CheckMode, RunReport};

#[derive(Parser)]
#[command(name = "proto-check")]
#[command(about = "Serve a styles document, fetch it back and check it for __proto__", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Producer bind address, overrides server.bind_address
    #[arg(short, long)]
    bind: Option<String>,

    /// Key to look up on the styles object
    #[arg(short, long)]
    key: Option<String>,

    /// Predicate to run; repeat to run several
    #[arg(short, long, value_enum)]
    mode: Vec<CheckMode>,

    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl Cli {
    fn into_config(self) -> Result<DemoConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => DemoConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.server.bind_address = bind;
        }
        if let Some(key) = self.key {
            config.check.key = key;
        }
        if !self.mode.is_empty() {
            config.check.modes = self.mode;
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match execute(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.into_config()?;
    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.server.bind_address,
        key = %config.check.key,
        modes = ?config.check.modes,
        "Configuration loaded"
    );

    let report = proto_check::run(&config).await?;
    for line in report_lines(&report) {
        println!("{line}");
    }

    tracing::info!(diverged = report.diverged(), "Run complete");
    Ok(())
}

/// Stdout lines: one per check, then the typed lookup.
fn report_lines(report: &RunReport) -> Vec<String> {
    let mut lines: Vec<String> = report.outcomes.iter().map(ToString::to_string).collect();
    lines.push(match report.typed_value() {
        Some(value) => format!("[typed] {}: {value}", report.key),
        None => format!("[typed] {}: no such key", report.key),
    });
    lines
}
