use crate::error::VerifierError;
use config::{Config as Cfg, Environment, File};
use reqwest::Url;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;
use validator::Validate;

/// Settings for one verifier run. Read once at startup and passed down;
/// nothing below this layer looks at the process environment.
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct VerifierConfig {
    /// Base URL of the conversion service, e.g. `http://127.0.0.1:3000`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Basic-auth user, needed when the service sits behind the proxy.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
    /// Refuse to run without credentials.
    #[serde(default)]
    pub require_auth: bool,
    #[validate(range(min = 1))]
    #[serde(default = "default_status_timeout_secs")]
    pub status_timeout_secs: u64,
    #[validate(range(min = 1))]
    #[serde(default = "default_roundtrip_timeout_secs")]
    pub roundtrip_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[validate(nested)]
    #[serde(default)]
    pub retry: RetryPolicy,
}

/// How a setup flow polls the service before declaring the deploy failed.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Validate)]
pub struct RetryPolicy {
    #[validate(range(min = 1))]
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[validate(range(min = 1))]
    #[serde(default = "default_delay_seconds")]
    pub delay_seconds: u64,
}

/// Basic-auth pair presented to the reverse proxy.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: Secret<String>,
}

impl Credentials {
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_status_timeout_secs() -> u64 {
    5
}

fn default_roundtrip_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_max_attempts() -> u32 {
    5
}

fn default_delay_seconds() -> u64 {
    5
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            username: None,
            password: None,
            require_auth: false,
            status_timeout_secs: default_status_timeout_secs(),
            roundtrip_timeout_secs: default_roundtrip_timeout_secs(),
            log_level: default_log_level(),
            retry: RetryPolicy::default(),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_seconds: default_delay_seconds(),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay_seconds: u64) -> Result<Self, VerifierError> {
        let policy = Self {
            max_attempts,
            delay_seconds,
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_seconds)
    }
}

impl VerifierConfig {
    /// Loads `.env`, an optional `verifier.{toml,yaml,json}` file and
    /// `VERIFIER__*` environment variables, then validates the result.
    pub fn load() -> Result<Self, VerifierError> {
        Self::load_with_endpoint(None)
    }

    /// Same as [`VerifierConfig::load`], with a command-line endpoint taking
    /// precedence over every other source.
    pub fn load_with_endpoint(endpoint: Option<&str>) -> Result<Self, VerifierError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .add_source(File::with_name("verifier").required(false))
            .add_source(Environment::with_prefix("VERIFIER").separator("__"))
            .set_override_option("endpoint", endpoint)?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validated()
    }

    /// Checks everything that can be checked without touching the network.
    pub fn validated(self) -> Result<Self, VerifierError> {
        self.validate()?;
        self.base_url()?;

        match (&self.username, &self.password) {
            (Some(_), None) => {
                return Err(VerifierError::configuration(
                    "username is set but password is missing",
                ))
            }
            (None, Some(_)) => {
                return Err(VerifierError::configuration(
                    "password is set but username is missing",
                ))
            }
            (None, None) if self.require_auth => {
                return Err(VerifierError::configuration(
                    "endpoint requires basic auth but no credentials are configured",
                ))
            }
            _ => {}
        }

        Ok(self)
    }

    /// Parsed base URL. Must be http(s) with a host and a port.
    pub fn base_url(&self) -> Result<Url, VerifierError> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            VerifierError::configuration(format!("invalid endpoint '{}': {}", self.endpoint, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(VerifierError::configuration(format!(
                "endpoint '{}' must use http or https",
                self.endpoint
            )));
        }
        if url.host_str().is_none() || url.port_or_known_default().is_none() {
            return Err(VerifierError::configuration(format!(
                "endpoint '{}' must include a host and port",
                self.endpoint
            )));
        }

        Ok(url)
    }

    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials {
                username: username.clone(),
                password: password.clone(),
            }),
            _ => None,
        }
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }

    pub fn roundtrip_timeout(&self) -> Duration {
        Duration::from_secs(self.roundtrip_timeout_secs)
    }
}
