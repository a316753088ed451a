//! verifier-core: readiness checks for the document-conversion service.
pub mod config;
pub mod error;
pub mod health;
pub mod observability;
pub mod report;
pub mod retry;
pub mod roundtrip;
pub mod verifier;

pub use crate::config::{RetryPolicy, VerifierConfig};
pub use crate::error::VerifierError;
pub use crate::health::{HealthStatus, Overall};
pub use crate::retry::{wait_until_ready, WaitOutcome};
pub use crate::verifier::{Mode, Outcome, Probe, ReadinessVerifier, VerificationResult};

pub use reqwest;
pub use tokio;
pub use tracing;
