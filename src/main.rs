//! albumcheck: recommend albums from your Last.fm history that your Subsonic
//! library is missing.
//!
//! Configuration comes from the environment (`LASTFM_API_KEY`, `LASTFM_USER`,
//! `SUBSONIC_SERVER`, `SUBSONIC_USER`, `SUBSONIC_PASSWORD`, optional
//! `IGNORE_FILE`, `VERBOSE`, `LOG_FORMAT`, `INSECURE_SKIP_VERIFY`,
//! `RUN_TIMEOUT_SECS`).

mod report;

use anyhow::{Context, Result};
use bridge_desktop::{load_ignore_list, TerminalProgress};
use core_runtime::logging::init_logging;
use core_runtime::AppConfig;
use std::process::ExitCode;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env().context("Invalid configuration")?;
    init_logging(config.logging_config()).context("Failed to initialize logging")?;
    info!(?config, "Configuration loaded");

    let ignore = load_ignore_list(config.ignore_file.as_deref()).await;
    let service =
        core_service::bootstrap_desktop(&config).context("Failed to initialize HTTP client")?;

    let cancel = CancellationToken::new();
    let watchdog = tokio::spawn(cancel_on_deadline_or_interrupt(
        cancel.clone(),
        config.run_timeout,
    ));

    let display = TerminalProgress::stdout();
    let result = service.run(&ignore, &display, &cancel).await;
    watchdog.abort();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) if e.is_cancelled() => {
            anyhow::bail!("Run cancelled before completion")
        }
        Err(e) => return Err(e.into()),
    };

    print!("{}", report::render_report(&outcome, config.verbose));
    Ok(())
}

/// Print `error` and any cause whose text it does not already include
fn report_error(error: &anyhow::Error) {
    eprintln!("Error: {error}");
    let mut shown = error.to_string();
    for cause in error.chain().skip(1) {
        let text = cause.to_string();
        if !shown.contains(&text) {
            eprintln!("  caused by: {text}");
        }
        shown = text;
    }
}

/// Cancel `token` when the run deadline passes or Ctrl-C is pressed
async fn cancel_on_deadline_or_interrupt(token: CancellationToken, deadline: Duration) {
    let timer = tokio::time::sleep(deadline);
    tokio::pin!(timer);

    tokio::select! {
        _ = &mut timer => {
            warn!(deadline_secs = deadline.as_secs(), "Run deadline exceeded, cancelling");
        }
        signal = tokio::signal::ctrl_c() => match signal {
            Ok(()) => warn!("Interrupted, cancelling"),
            Err(e) => {
                // Without a signal handler only the deadline can cancel
                warn!(error = %e, "Unable to listen for interrupt");
                (&mut timer).await;
                warn!(deadline_secs = deadline.as_secs(), "Run deadline exceeded, cancelling");
            }
        },
    }
    token.cancel();
}
