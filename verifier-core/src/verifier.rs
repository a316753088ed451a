//! Readiness verifier for the conversion service.
//!
//! One invocation walks `Start → Probing → {Healthy, Degraded, Down}`. In
//! [`Mode::Full`] a healthy status is followed by a sample conversion, and a
//! failed conversion downgrades the reported state to degraded. Nothing is
//! retried here; see [`crate::retry`] for the setup-flow loop.

use crate::config::{Credentials, VerifierConfig};
use crate::error::VerifierError;
use crate::health::{HealthReport, HealthStatus, Overall};
use crate::roundtrip::{sample_form, CONVERT_HTML_PATH};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Unauthenticated liveness route of the conversion service.
pub const STATUS_PATH: &str = "/health";

/// Exit code for configuration and usage errors.
pub const CONFIGURATION_EXIT_CODE: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Status probe, human-readable output.
    Basic,
    /// Status probe, machine-readable output.
    Json,
    /// Status probe plus a sample conversion.
    Full,
}

/// What one invocation concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Healthy,
    /// Reachable, but the named backends report down.
    Degraded { down: Vec<&'static str> },
    /// Status endpoint unreachable, non-2xx or unparseable.
    Down { reason: String },
    /// Status endpoint healthy, sample conversion failed or came back empty.
    RoundtripFailed { reason: String },
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Healthy => 0,
            Outcome::Degraded { .. } | Outcome::RoundtripFailed { .. } => 1,
            Outcome::Down { .. } => 2,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Outcome::Healthy => "all subsystems up".to_string(),
            Outcome::Degraded { down } => format!("{} down", down.join(", ")),
            Outcome::Down { reason } => format!("unreachable: {}", reason),
            Outcome::RoundtripFailed { reason } => format!(
                "status endpoint healthy, conversion roundtrip failed: {}",
                reason
            ),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Outcome of one verifier invocation. Built fresh each time, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationResult {
    pub mode: Mode,
    pub status: HealthStatus,
    /// Set only when the full check produced a non-empty document.
    pub roundtrip_verified: bool,
    pub outcome: Outcome,
}

impl VerificationResult {
    fn from_status(mode: Mode, status: HealthStatus) -> Self {
        let outcome = match status.overall() {
            Overall::Healthy => Outcome::Healthy,
            Overall::Degraded => Outcome::Degraded {
                down: status.down_subsystems(),
            },
            Overall::Down => Outcome::Down {
                reason: "no response".to_string(),
            },
        };
        Self {
            mode,
            status,
            roundtrip_verified: false,
            outcome,
        }
    }

    fn down(mode: Mode, reason: String) -> Self {
        Self {
            mode,
            status: HealthStatus::unreachable(),
            roundtrip_verified: false,
            outcome: Outcome::Down { reason },
        }
    }

    /// Reported state. A failed roundtrip reports degraded even though the
    /// status endpoint itself was healthy.
    pub fn overall(&self) -> Overall {
        match self.outcome {
            Outcome::Healthy => Overall::Healthy,
            Outcome::Degraded { .. } | Outcome::RoundtripFailed { .. } => Overall::Degraded,
            Outcome::Down { .. } => Overall::Down,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.outcome.exit_code()
    }

    pub fn is_ready(&self) -> bool {
        self.exit_code() == 0
    }
}

/// Anything that can answer a readiness question. The retry loop is
/// written against this so it can be driven without a live service.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn check_health(&self, mode: Mode) -> VerificationResult;
}

pub struct ReadinessVerifier {
    client: Client,
    base_url: Url,
    credentials: Option<Credentials>,
    status_timeout: Duration,
    roundtrip_timeout: Duration,
}

impl ReadinessVerifier {
    /// Builds a verifier from a validated config. Fails on configuration
    /// problems only; no request is sent here.
    pub fn new(config: &VerifierConfig) -> Result<Self, VerifierError> {
        let base_url = config.base_url()?;
        let client = Client::builder()
            .user_agent(concat!("readiness-verifier/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VerifierError::Configuration(anyhow::Error::new(e)))?;

        Ok(Self {
            client,
            base_url,
            credentials: config.credentials(),
            status_timeout: config.status_timeout(),
            roundtrip_timeout: config.roundtrip_timeout(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Joins `path` onto the base URL, keeping any proxy prefix.
    fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}{}", prefix, path));
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(creds) => request.basic_auth(&creds.username, Some(creds.password())),
            None => request,
        }
    }

    /// Single GET against the status route.
    pub async fn fetch_status(&self) -> Result<HealthStatus, VerifierError> {
        let url = self.url(STATUS_PATH);
        debug!(url = %url, "Probing status endpoint");

        let response = self
            .authorize(self.client.get(url).timeout(self.status_timeout))
            .send()
            .await?
            .error_for_status()?;

        let report: HealthReport = response.json().await?;
        Ok(report.into_status())
    }

    /// Submits the sample document and returns the converted bytes.
    pub async fn convert_sample(&self) -> Result<Vec<u8>, VerifierError> {
        let url = self.url(CONVERT_HTML_PATH);
        debug!(url = %url, "Submitting sample conversion");

        let form = sample_form().map_err(|e| VerifierError::Transport(e.to_string()))?;
        let response = self
            .authorize(
                self.client
                    .post(url)
                    .timeout(self.roundtrip_timeout)
                    .multipart(form),
            )
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?.to_vec())
    }

    async fn verify_roundtrip(&self, mut result: VerificationResult) -> VerificationResult {
        let start = Instant::now();
        match self.convert_sample().await {
            Ok(bytes) if !bytes.is_empty() => {
                info!(
                    bytes = bytes.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Conversion roundtrip verified"
                );
                result.roundtrip_verified = true;
            }
            Ok(_) => {
                warn!("Conversion roundtrip returned an empty body");
                result.outcome = Outcome::RoundtripFailed {
                    reason: "roundtrip empty".to_string(),
                };
            }
            Err(e) => {
                warn!(error = %e, "Conversion roundtrip failed");
                result.outcome = Outcome::RoundtripFailed {
                    reason: e.to_string(),
                };
            }
        }
        result
    }
}

#[async_trait]
impl Probe for ReadinessVerifier {
    async fn check_health(&self, mode: Mode) -> VerificationResult {
        let start = Instant::now();

        let result = match self.fetch_status().await {
            Ok(status) => VerificationResult::from_status(mode, status),
            Err(e) => {
                warn!(endpoint = %self.base_url, error = %e, "Status probe failed");
                VerificationResult::down(mode, e.to_string())
            }
        };

        info!(
            endpoint = %self.base_url,
            status = %result.overall(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Status probe finished"
        );

        if mode == Mode::Full && result.outcome == Outcome::Healthy {
            return self.verify_roundtrip(result).await;
        }
        result
    }
}

/// Validates `config`, then runs one check. Configuration errors are
/// returned before any request is made; every runtime outcome, including
/// an unreachable service, comes back as a [`VerificationResult`].
pub async fn check_health(
    config: &VerifierConfig,
    mode: Mode,
) -> Result<VerificationResult, VerifierError> {
    let config = config.clone().validated()?;
    let verifier = ReadinessVerifier::new(&config)?;
    Ok(verifier.check_health(mode).await)
}
