use crate::{
    importer::{
        fetch::Transport,
        run::{collect_sources, run_import},
    },
    utils::{
        config::{CliOverrides, ImporterConfig},
        logger::{LogLevel, Logger},
    },
};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

mod importer;
mod types;
mod utils;

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(name = "addon-import")]
#[command(author)]
#[command(version)]
#[command(about = "Import addon manifests into localStorage.json -> profile -> addons")]
struct Cli {
    /// Manifest sources: http(s):// URLs, file:// URLs or local paths
    sources: Vec<String>,

    /// Store file to update (default: localStorage.json)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Timeout in seconds for remote fetches (default: 10)
    #[arg(long)]
    timeout: Option<u64>,

    /// Require the full addon descriptor (id, version, name, description, logo, resources, types)
    #[arg(long, default_value_t = false, overrides_with = "no_strict")]
    strict: bool,

    /// Turn off strict validation enabled in addon-import.toml
    #[arg(long, default_value_t = false, overrides_with = "strict")]
    no_strict: bool,

    /// Print the import report as JSON on stdout
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let logger = Logger::new();

    let sources = collect_sources(&cli.sources);
    if sources.is_empty() {
        logger.log_message(LogLevel::Error, "No addon URL provided. Provide as CLI args");
        logger.log_message(
            LogLevel::Info,
            "Example: addon-import https://example.com/manifest.json",
        );
        return ExitCode::from(EXIT_USAGE);
    }

    match execute(cli, sources, logger.clone()).await {
        Ok(code) => code,
        Err(e) => {
            logger.log_message(LogLevel::Error, &format!("{:#}", e));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

async fn execute(cli: Cli, sources: Vec<String>, logger: Logger) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current dir")?;
    let overrides = CliOverrides {
        store: cli.store,
        timeout_secs: cli.timeout,
        strict: match (cli.strict, cli.no_strict) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
    };
    let config = ImporterConfig::resolve(&cwd, &overrides).map_err(anyhow::Error::msg)?;
    let print_json = cli.json;

    let outcome = tokio::task::spawn_blocking(move || -> anyhow::Result<_> {
        let transport = Transport::new(Duration::from_secs(config.timeout_secs))
            .context("Failed to build HTTP client")?;
        Ok(run_import(&config, &sources, &transport, &logger))
    })
    .await
    .context("Import task failed")??;

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            Logger::new().log_message(LogLevel::Error, &format!("{}: {}", e.kind(), e));
            return Ok(ExitCode::from(EXIT_FAILURE));
        }
    };

    if print_json {
        let text = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", text);
    }

    if report.success_count() > 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_FAILURE))
    }
}
