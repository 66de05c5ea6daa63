//! Benefit Transfer
//!
//! Client-side core of the benefit transfer screen: resolve the origin
//! benefit, validate the amount as it is edited, and submit the transfer to
//! the benefit directory at most once at a time.
//!
//! # Modules
//!
//! - [`benefit`] - Benefit record, field rules and the validated transfer origin
//! - [`directory`] - Benefit directory contract and its HTTP client
//! - [`transfer`] - Validator, form state and the transfer workflow controller
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

pub mod benefit;
pub mod config;
pub mod directory;
pub mod logging;
pub mod transfer;

// Convenient re-exports at crate root
pub use benefit::{Benefit, Origin};
pub use config::{AppConfig, DirectoryConfig, WorkflowConfig};
pub use directory::{BenefitDirectory, DirectoryError, HttpBenefitDirectory};
pub use transfer::{
    Notice, ResolutionError, Route, ScreenHost, SubmitOutcome, TransferError, TransferRequest,
    TransferResult, TransferWorkflow, Violation, Violations, WorkflowState,
};
