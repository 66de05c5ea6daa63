//! Transfer Error Types
//!
//! - `ResolutionError`: origin could not be obtained, fatal to the workflow
//! - `ValidationError`: local form problems, never reach the network
//! - `TransferError`: submitted transfer did not go through, recoverable

use thiserror::Error;

use super::violations::Violations;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Benefit not found: {0}")]
    NotFound(i64),

    #[error("No valid benefit id in location: {0}")]
    MalformedIdentifier(String),

    #[error("Origin hint rejected: {0}")]
    MalformedHint(String),

    #[error("Directory returned an unusable benefit: {0}")]
    MalformedRecord(String),

    #[error("Benefit lookup failed: {0}")]
    Unavailable(String),
}

impl ResolutionError {
    pub fn code(&self) -> &'static str {
        match self {
            ResolutionError::NotFound(_) => "NOT_FOUND",
            ResolutionError::MalformedIdentifier(_) => "MALFORMED_IDENTIFIER",
            ResolutionError::MalformedHint(_) => "MALFORMED_HINT",
            ResolutionError::MalformedRecord(_) => "MALFORMED_RECORD",
            ResolutionError::Unavailable(_) => "UNAVAILABLE",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field {field} is invalid: {violations}")]
    Violations {
        field: &'static str,
        violations: Violations,
    },

    #[error("Origin and destination cannot be the same benefit ({0})")]
    SameEntity(i64),
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Violations { .. } => "INVALID_FORM",
            ValidationError::SameEntity(_) => "SAME_ENTITY",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// Business-rule rejection; reason is the server text when it sent one
    #[error("Transfer rejected: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Rejected { reason: Option<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    /// No answer in time; the server may or may not have applied the transfer
    #[error("Transfer timed out, outcome unknown")]
    Timeout,
}

impl TransferError {
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::Rejected { .. } => "REJECTED",
            TransferError::Transport(_) => "TRANSPORT",
            TransferError::Timeout => "TIMEOUT",
        }
    }

    /// Server-supplied reason, if any
    pub fn reason(&self) -> Option<&str> {
        match self {
            TransferError::Rejected { reason } => reason.as_deref(),
            _ => None,
        }
    }
}
