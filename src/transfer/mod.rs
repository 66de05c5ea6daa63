//! Benefit Transfer Workflow
//!
//! Moves balance from one benefit (origin) to another (destination) through
//! the benefit directory, guarded by client-side validation.
//!
//! # State Machine
//!
//! ```text
//! RESOLVING → READY → SUBMITTING → SUCCEEDED
//!     ↓         ↑          ↓
//!   FAILED      └──────────┘ (rejected / transport error / timeout)
//! ```
//!
//! # Invariants before a transfer call
//!
//! 1. amount > 0 (at least one cent)
//! 2. amount ≤ origin balance as resolved
//! 3. destination ≠ origin
//! 4. origin resolved
//!
//! Validation failures never reach the network. At most one transfer call is
//! in flight per workflow.

pub mod error;
pub mod form;
pub mod host;
pub mod state;
pub mod types;
pub mod validator;
pub mod violations;
pub mod workflow;


// Re-exports for convenience
pub use error::{ResolutionError, TransferError, ValidationError};
pub use host::{Notice, NoticeLevel, Route, ScreenHost, TracingHost};
pub use state::WorkflowState;
pub use types::{TransferRequest, TransferResult, WorkflowId};
pub use violations::{Violation, Violations};
pub use workflow::{FormSnapshot, SubmitOutcome, TransferWorkflow};
