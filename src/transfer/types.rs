//! Transfer Core Types

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Workflow instance ID - ULID-based, used to correlate log lines of one screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkflowId(ulid::Ulid);

impl WorkflowId {
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for WorkflowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transfer request sent to the directory
///
/// Immutable once built. Only the workflow constructs one, from form state
/// that already passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferRequest {
    #[serde(rename = "benefitOriginId")]
    origin_id: i64,
    #[serde(rename = "benefitDestinationId")]
    destination_id: i64,
    #[serde(rename = "value", serialize_with = "rust_decimal::serde::float::serialize")]
    amount: Decimal,
}

impl TransferRequest {
    pub(crate) fn new(origin_id: i64, destination_id: i64, amount: Decimal) -> Self {
        Self {
            origin_id,
            destination_id,
            amount,
        }
    }

    pub fn origin_id(&self) -> i64 {
        self.origin_id
    }

    pub fn destination_id(&self) -> i64 {
        self.destination_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl fmt::Display for TransferRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({})",
            self.origin_id, self.destination_id, self.amount
        )
    }
}

/// Outcome of a submitted transfer as reported by the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferResult {
    /// Server acknowledged the transfer
    Success { message: Option<String> },
    /// Server rejected the transfer (stale balance, inactive benefit, ...)
    Failed { reason: Option<String> },
}

impl TransferResult {
    pub fn success() -> Self {
        TransferResult::Success { message: None }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        TransferResult::Failed {
            reason: Some(reason.into()),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, TransferResult::Success { .. })
    }
}

/// Success body of the transfer endpoint
#[derive(Debug, Default, Deserialize)]
pub(crate) struct TransferAck {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let req = TransferRequest::new(1, 7, Decimal::new(4000, 2));
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "benefitOriginId": 1,
                "benefitDestinationId": 7,
                "value": 40.0
            })
        );
    }

    #[test]
    fn test_request_display() {
        let req = TransferRequest::new(1, 2, Decimal::new(1050, 2));
        assert_eq!(req.to_string(), "1 -> 2 (10.50)");
    }

    #[test]
    fn test_workflow_ids_are_unique() {
        assert_ne!(WorkflowId::new(), WorkflowId::new());
    }

    #[test]
    fn test_result_helpers() {
        assert!(TransferResult::success().is_success());
        assert_eq!(
            TransferResult::failed("limite"),
            TransferResult::Failed {
                reason: Some("limite".to_string())
            }
        );
    }
}
