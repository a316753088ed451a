//! Process boundary for the readiness verifier: loads configuration once,
//! runs a check or a wait loop, prints the report and turns the outcome
//! into an exit code.

pub mod cli;

use cli::{Cli, Commands};
use std::process::ExitCode;
use tokio::signal;
use verifier_core::observability::init_tracing;
use verifier_core::report::{render_human, render_json};
use verifier_core::verifier::CONFIGURATION_EXIT_CODE;
use verifier_core::{
    wait_until_ready, Mode, Probe, ReadinessVerifier, RetryPolicy, VerificationResult,
    VerifierConfig, VerifierError,
};

/// Exit code when a wait is interrupted between attempts.
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

pub async fn run(cli: Cli) -> ExitCode {
    let config = match VerifierConfig::load_with_endpoint(cli.endpoint.as_deref()) {
        Ok(config) => config,
        Err(e) => return configuration_failure(&e),
    };

    init_tracing("readiness-verifier", &config.log_level);

    let verifier = match ReadinessVerifier::new(&config) {
        Ok(verifier) => verifier,
        Err(e) => return configuration_failure(&e),
    };

    let mode = cli.mode();
    match cli.command {
        None => {
            let result = verifier.check_health(mode).await;
            finish(&verifier, &result, mode, None)
        }
        Some(Commands::Wait { attempts, delay }) => {
            let policy = match RetryPolicy::new(
                attempts.unwrap_or(config.retry.max_attempts),
                delay.unwrap_or(config.retry.delay_seconds),
            ) {
                Ok(policy) => policy,
                Err(e) => return configuration_failure(&e),
            };

            tokio::select! {
                outcome = wait_until_ready(&verifier, &policy) => {
                    finish(&verifier, &outcome.last, mode, Some(outcome.attempts))
                }
                _ = shutdown_signal() => {
                    eprintln!("interrupted while waiting for the conversion service");
                    ExitCode::from(INTERRUPTED_EXIT_CODE)
                }
            }
        }
    }
}

fn configuration_failure(err: &VerifierError) -> ExitCode {
    eprintln!("{}", err);
    ExitCode::from(CONFIGURATION_EXIT_CODE)
}

fn finish(
    verifier: &ReadinessVerifier,
    result: &VerificationResult,
    mode: Mode,
    attempts: Option<u32>,
) -> ExitCode {
    if let Err(e) = print_result(verifier, result, mode, attempts) {
        tracing::error!(error = %e, "Failed to write report");
    }
    ExitCode::from(result.exit_code())
}

/// `mode` picks the output format; a wait always probes in basic mode but
/// still honors `--json`.
fn print_result(
    verifier: &ReadinessVerifier,
    result: &VerificationResult,
    mode: Mode,
    attempts: Option<u32>,
) -> anyhow::Result<()> {
    if mode == Mode::Json {
        println!("{}", render_json(result)?);
        return Ok(());
    }

    println!("{}", render_human(result, verifier.base_url().as_str()));
    if let Some(attempts) = attempts {
        let verdict = if result.is_ready() {
            "ready"
        } else {
            "not ready"
        };
        println!("{} after {} attempt(s)", verdict, attempts);
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
