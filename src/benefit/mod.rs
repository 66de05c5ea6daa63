//! Benefit records
//!
//! A benefit is a named, valued, activatable allocation. Transfers move
//! balance between two of them on the server side.

pub mod models;
pub mod validation;

pub use models::{Benefit, Origin, OriginError};
pub use validation::BenefitError;
