//! Setup-flow polling loop.
//!
//! Probes the service in [`Mode::Basic`] until it is healthy or the
//! attempt budget runs out, sleeping a fixed delay between attempts. A
//! failed wait means the deploy must not go on to install the service unit.

use crate::config::RetryPolicy;
use crate::verifier::{Mode, Probe, VerificationResult};
use tokio::time::sleep;
use tracing::{info, warn};

/// Result of a wait: how many probes ran and what the last one said.
#[derive(Debug, Clone)]
pub struct WaitOutcome {
    pub attempts: u32,
    pub last: VerificationResult,
}

impl WaitOutcome {
    pub fn is_ready(&self) -> bool {
        self.last.is_ready()
    }

    pub fn exit_code(&self) -> u8 {
        self.last.exit_code()
    }
}

/// Sequential, constant-delay retry. Never issues two probes at once and
/// never sleeps after the final attempt.
pub async fn wait_until_ready<P>(probe: &P, policy: &RetryPolicy) -> WaitOutcome
where
    P: Probe + ?Sized,
{
    let mut attempt = 1;

    loop {
        let result = probe.check_health(Mode::Basic).await;

        if result.is_ready() {
            info!(
                attempt,
                max_attempts = policy.max_attempts,
                "Conversion service is ready"
            );
            return WaitOutcome {
                attempts: attempt,
                last: result,
            };
        }

        if attempt >= policy.max_attempts {
            warn!(
                attempt,
                max_attempts = policy.max_attempts,
                reason = %result.outcome,
                "Conversion service not ready after max attempts"
            );
            return WaitOutcome {
                attempts: attempt,
                last: result,
            };
        }

        warn!(
            attempt,
            max_attempts = policy.max_attempts,
            delay_secs = policy.delay_seconds,
            reason = %result.outcome,
            "Conversion service not ready, retrying after delay"
        );

        sleep(policy.delay()).await;
        attempt += 1;
    }
}
