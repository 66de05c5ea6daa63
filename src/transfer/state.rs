//! Transfer Workflow State Definitions
//!
//! ```text
//! RESOLVING ──▶ READY ──▶ SUBMITTING ──▶ SUCCEEDED
//!     │           ▲  │         │
//!     │           │  │         └── failure / timeout ──▶ READY
//!     ▼           │  └── cancel ──▶ CANCELLED
//!   FAILED
//! ```

use std::fmt;

use super::error::ResolutionError;

/// Transfer workflow states
///
/// Terminal states: SUCCEEDED, FAILED, CANCELLED
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    /// Origin benefit is being resolved (hint or lookup)
    Resolving,

    /// Form initialized, operator is editing
    Ready,

    /// Transfer call in flight - the only re-entrancy guard
    Submitting,

    /// Terminal: server acknowledged the transfer
    Succeeded,

    /// Terminal: origin could not be resolved
    Failed(ResolutionError),

    /// Terminal: operator left the screen
    Cancelled,
}

impl WorkflowState {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WorkflowState::Succeeded | WorkflowState::Failed(_) | WorkflowState::Cancelled
        )
    }

    /// Whether the submit action is currently enabled
    #[inline]
    pub fn can_submit(&self) -> bool {
        matches!(self, WorkflowState::Ready)
    }

    #[inline]
    pub fn can_cancel(&self) -> bool {
        !matches!(self, WorkflowState::Submitting)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Resolving => "RESOLVING",
            WorkflowState::Ready => "READY",
            WorkflowState::Submitting => "SUBMITTING",
            WorkflowState::Succeeded => "SUCCEEDED",
            WorkflowState::Failed(_) => "FAILED",
            WorkflowState::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(WorkflowState::Succeeded.is_terminal());
        assert!(WorkflowState::Failed(ResolutionError::NotFound(1)).is_terminal());
        assert!(WorkflowState::Cancelled.is_terminal());

        assert!(!WorkflowState::Resolving.is_terminal());
        assert!(!WorkflowState::Ready.is_terminal());
        assert!(!WorkflowState::Submitting.is_terminal());
    }

    #[test]
    fn test_submit_and_cancel_gates() {
        assert!(WorkflowState::Ready.can_submit());
        assert!(!WorkflowState::Submitting.can_submit());
        assert!(!WorkflowState::Resolving.can_submit());

        assert!(!WorkflowState::Submitting.can_cancel());
        assert!(WorkflowState::Ready.can_cancel());
        assert!(WorkflowState::Resolving.can_cancel());
    }

    #[test]
    fn test_display() {
        assert_eq!(WorkflowState::Ready.to_string(), "READY");
        assert_eq!(
            WorkflowState::Failed(ResolutionError::NotFound(42)).to_string(),
            "FAILED"
        );
    }
}
