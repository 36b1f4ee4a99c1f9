use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("verification service unreachable: {0}")]
    Transport(String),
    #[error("verification service returned {status}: {detail}")]
    Http { status: u16, detail: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("invalid api base url '{0}'")]
    InvalidBaseUrl(String),
    #[error("a privacy audit is already running")]
    AuditInProgress,
}

impl VerifyError {
    /// One-line message suitable for showing next to the affected section.
    pub fn display_message(&self) -> String {
        match self {
            Self::Http { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for VerifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            VerifyError::Decode(err.to_string())
        } else {
            VerifyError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for VerifyError {
    fn from(err: serde_json::Error) -> Self {
        VerifyError::InvalidInput(err.to_string())
    }
}
