//! Benefit record and the validated origin view used by transfers

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{self, BenefitError};

/// Benefit record as exchanged with the directory service
///
/// `id` is absent until the record has been persisted. `value` is the
/// current balance and is sent as a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benefit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub value: Decimal,
    pub active: bool,
    /// Optimistic-lock version maintained by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl Benefit {
    pub fn new(name: impl Into<String>, value: Decimal) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            value,
            active: true,
            version: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Check name, description and value against the directory's field rules
    pub fn validate(&self) -> Result<(), BenefitError> {
        validation::validate_name(&self.name)?;
        validation::validate_description(self.description.as_deref())?;
        validation::validate_value(self.value)?;
        Ok(())
    }
}

/// Why a benefit cannot serve as a transfer origin
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OriginError {
    #[error("benefit has no id")]
    MissingId,

    #[error("benefit id must be positive, got {0}")]
    InvalidId(i64),

    #[error("benefit balance is negative: {0}")]
    NegativeBalance(Decimal),
}

/// Resolved transfer origin
///
/// Only the fields the transfer screen depends on, checked once when the
/// origin is resolved. The balance is a snapshot and may be stale by the
/// time the transfer reaches the server.
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    id: i64,
    name: String,
    balance: Decimal,
    active: bool,
}

impl Origin {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl TryFrom<Benefit> for Origin {
    type Error = OriginError;

    fn try_from(benefit: Benefit) -> Result<Self, Self::Error> {
        let id = benefit.id.ok_or(OriginError::MissingId)?;
        if id < 1 {
            return Err(OriginError::InvalidId(id));
        }
        if validation::validate_value(benefit.value).is_err() {
            return Err(OriginError::NegativeBalance(benefit.value));
        }

        Ok(Self {
            id,
            name: benefit.name,
            balance: benefit.value,
            active: benefit.active,
        })
    }
}
