//! Rendering of a [`VerificationResult`] for operators and for scripts.

use crate::verifier::{Mode, Outcome, VerificationResult};
use serde::Serialize;

/// Machine-readable form. These four keys and nothing else.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub status: &'static str,
    pub chromium: &'static str,
    pub libreoffice: &'static str,
    pub timestamp: &'a str,
}

fn up_down(up: bool) -> &'static str {
    if up {
        "up"
    } else {
        "down"
    }
}

impl<'a> From<&'a VerificationResult> for JsonReport<'a> {
    fn from(result: &'a VerificationResult) -> Self {
        Self {
            status: result.overall().as_str(),
            chromium: up_down(result.status.chromium_up),
            libreoffice: up_down(result.status.libreoffice_up),
            timestamp: &result.status.timestamp,
        }
    }
}

pub fn render_json(result: &VerificationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string(&JsonReport::from(result))
}

pub fn render_human(result: &VerificationResult, endpoint: &str) -> String {
    let mut lines = Vec::with_capacity(5);

    match &result.outcome {
        Outcome::Healthy => lines.push(format!(
            "conversion service at {}: {}",
            endpoint,
            result.overall()
        )),
        other => lines.push(format!(
            "conversion service at {}: {} ({})",
            endpoint,
            result.overall(),
            other
        )),
    }

    if result.status.reachable {
        lines.push(format!("  chromium:    {}", up_down(result.status.chromium_up)));
        lines.push(format!(
            "  libreoffice: {}",
            up_down(result.status.libreoffice_up)
        ));
    }

    if result.mode == Mode::Full && result.status.reachable {
        let roundtrip = match &result.outcome {
            _ if result.roundtrip_verified => "verified",
            Outcome::RoundtripFailed { .. } => "failed",
            _ => "skipped",
        };
        lines.push(format!("  roundtrip:   {}", roundtrip));
    }

    lines.push(format!("  checked at:  {}", result.status.timestamp));
    lines.join("\n")
}
