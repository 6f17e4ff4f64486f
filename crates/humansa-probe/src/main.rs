//! Command-line entry point: runs every endpoint check once and exits with
//! 0 if all passed, 1 otherwise.
//!
//! Configuration comes from `HUMANSA_BASE_URL`, `HUMANSA_USER_ID`,
//! `HUMANSA_CONVERSATION_ID` and `HUMANSA_PACING_MS` (also read from `.env`).

use std::process::ExitCode;

use anyhow::{Context, Result};
use humansa_core::ProbeConfig;
use humansa_runner::{ConsoleReporter, Runner};
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .compact()
        .init();

    match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("humansa-probe: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    let config = ProbeConfig::from_env().context("invalid configuration")?;
    info!("Probing {} as {}/{}", config.base_url, config.user_id, config.conversation_id);

    let runner = Runner::with_default_checks(config).context("failed to build HTTP client")?;
    let mut reporter = ConsoleReporter::stdout();
    let summary = runner.run(&mut reporter).await;

    info!("{} passed, {} failed", summary.passed(), summary.failed());
    Ok(ExitCode::from(summary.exit_code() as u8))
}
