//! Benefit Directory
//!
//! The remote service that owns benefit records. The transfer workflow only
//! needs two calls from it, expressed by [`BenefitDirectory`]:
//!
//! - `lookup(id)`: fetch one record, `NotFound` when it does not exist
//! - `transfer(request)`: move balance between two records, atomically on the
//!   server side
//!
//! Implementations must not retry and must not touch balances locally; a
//! failure is handed back to the caller as-is.

pub mod error;
pub mod http;

pub use error::DirectoryError;
pub use http::HttpBenefitDirectory;

use async_trait::async_trait;

use crate::benefit::Benefit;
use crate::transfer::types::{TransferRequest, TransferResult};

#[async_trait]
pub trait BenefitDirectory: Send + Sync {
    /// Directory name for logging
    fn name(&self) -> &'static str;

    async fn lookup(&self, id: i64) -> Result<Benefit, DirectoryError>;

    /// Submit a transfer
    ///
    /// A business-rule rejection is `Ok(TransferResult::Failed { .. })`;
    /// `Err` is reserved for transport and decoding problems.
    async fn transfer(&self, request: &TransferRequest) -> Result<TransferResult, DirectoryError>;
}


#[cfg(test)]
pub use mock::MockDirectory;
