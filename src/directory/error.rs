use thiserror::Error;

use crate::benefit::BenefitError;

#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
    #[error("Benefit not found: {0}")]
    NotFound(i64),

    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// No response within the client timeout; the server may still have acted
    #[error("HTTP request timed out: {0}")]
    Timeout(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Directory rejected request with status {status}: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Rejected { status: u16, reason: Option<String> },

    #[error("Invalid benefit: {0}")]
    Invalid(#[from] BenefitError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DirectoryError {
    pub fn code(&self) -> &'static str {
        match self {
            DirectoryError::NotFound(_) => "NOT_FOUND",
            DirectoryError::Transport(_) => "TRANSPORT",
            DirectoryError::Timeout(_) => "TIMEOUT",
            DirectoryError::Decode(_) => "DECODE",
            DirectoryError::Rejected { .. } => "REJECTED",
            DirectoryError::Invalid(_) => "INVALID_BENEFIT",
            DirectoryError::Config(_) => "CONFIG",
        }
    }
}

impl From<reqwest::Error> for DirectoryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            DirectoryError::Timeout(e.to_string())
        } else if e.is_decode() {
            DirectoryError::Decode(e.to_string())
        } else {
            DirectoryError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DirectoryError::NotFound(42).to_string(), "Benefit not found: 42");
        assert_eq!(
            DirectoryError::Rejected {
                status: 409,
                reason: Some("Benefício de origem está inativo".into())
            }
            .to_string(),
            "Directory rejected request with status 409: Benefício de origem está inativo"
        );
    }

    #[test]
    fn test_from_benefit_error() {
        let err: DirectoryError = BenefitError::NameMissing.into();
        assert_eq!(err.code(), "INVALID_BENEFIT");
    }
}
