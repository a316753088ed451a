//! Conversion service health model.
//!
//! The service reports one status per backend (Chromium for HTML/URL
//! conversion, LibreOffice for office formats). The derived [`Overall`]
//! state is computed from those two flags and from whether the probe
//! reached the service at all; it is never cached between probes.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate state of the conversion service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overall {
    /// Reachable and both backends report up.
    Healthy,
    /// Reachable, but at least one backend reports down.
    Degraded,
    /// Unreachable, non-2xx, or an unparseable body.
    Down,
}

impl Overall {
    pub fn as_str(&self) -> &'static str {
        match self {
            Overall::Healthy => "healthy",
            Overall::Degraded => "degraded",
            Overall::Down => "down",
        }
    }
}

impl std::fmt::Display for Overall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one status-endpoint probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub reachable: bool,
    pub chromium_up: bool,
    pub libreoffice_up: bool,
    /// ISO-8601 UTC time the probe completed.
    pub timestamp: String,
}

impl HealthStatus {
    pub fn reachable(chromium_up: bool, libreoffice_up: bool) -> Self {
        Self {
            reachable: true,
            chromium_up,
            libreoffice_up,
            timestamp: now_iso8601(),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            chromium_up: false,
            libreoffice_up: false,
            timestamp: now_iso8601(),
        }
    }

    pub fn overall(&self) -> Overall {
        if !self.reachable {
            Overall::Down
        } else if self.chromium_up && self.libreoffice_up {
            Overall::Healthy
        } else {
            Overall::Degraded
        }
    }

    /// Names of the backends reporting down, in a stable order.
    pub fn down_subsystems(&self) -> Vec<&'static str> {
        let mut down = Vec::new();
        if !self.chromium_up {
            down.push("chromium");
        }
        if !self.libreoffice_up {
            down.push("libreoffice");
        }
        down
    }
}

pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Body of `GET /health` as served by the conversion service.
#[derive(Debug, Deserialize)]
pub struct HealthReport {
    #[serde(default)]
    pub status: Option<String>,
    pub details: HealthDetails,
}

#[derive(Debug, Deserialize)]
pub struct HealthDetails {
    pub chromium: ModuleStatus,
    pub libreoffice: ModuleStatus,
}

#[derive(Debug, Deserialize)]
pub struct ModuleStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ModuleStatus {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

impl HealthReport {
    pub fn into_status(self) -> HealthStatus {
        HealthStatus::reachable(
            self.details.chromium.is_up(),
            self.details.libreoffice.is_up(),
        )
    }
}
