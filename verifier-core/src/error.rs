use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("Configuration error: {0}")]
    Configuration(anyhow::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Transport(String),

    #[error("Unexpected HTTP status {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl VerifierError {
    pub fn configuration(message: impl Into<String>) -> Self {
        VerifierError::Configuration(anyhow::anyhow!(message.into()))
    }

    /// Configuration problems surface before any request is sent.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            VerifierError::Configuration(_) | VerifierError::Validation(_)
        )
    }
}

impl From<config::ConfigError> for VerifierError {
    fn from(err: config::ConfigError) -> Self {
        VerifierError::Configuration(anyhow::Error::new(err))
    }
}

impl From<reqwest::Error> for VerifierError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return VerifierError::Http {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        if err.is_decode() {
            return VerifierError::MalformedResponse(err.to_string());
        }
        let reason = if err.is_timeout() {
            "request timed out"
        } else if err.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        VerifierError::Transport(format!("{}: {}", reason, err))
    }
}
