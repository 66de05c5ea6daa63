//! Transfer Validator
//!
//! Pure rules for the transfer form. Each rule only toggles its own
//! violation tag, so re-running any subset of them leaves unrelated
//! violations in place.
//!
//! | rule                | field       | present when                     |
//! |---------------------|-------------|----------------------------------|
//! | required            | both        | no value                         |
//! | min                 | amount      | amount < 0.01                    |
//! | min                 | destination | id < 1                           |
//! | insufficientBalance | amount      | amount > balance and amount > 0  |

use rust_decimal::Decimal;

use super::violations::{Violation, Violations};

/// Smallest positive unit an amount may take (one cent)
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Smallest valid benefit id
pub const MIN_DESTINATION_ID: i64 = 1;

/// required + min rules of the amount field
pub fn check_amount_bounds(amount: Option<Decimal>, violations: &mut Violations) {
    violations.set(Violation::Required, amount.is_none());
    violations.set(
        Violation::Minimum,
        matches!(amount, Some(a) if a < MIN_AMOUNT),
    );
}

/// insufficientBalance rule of the amount field
///
/// A zero or negative amount never triggers this rule; `min` reports it.
pub fn check_balance(balance: Decimal, amount: Option<Decimal>, violations: &mut Violations) {
    let amount = amount.unwrap_or(Decimal::ZERO);
    violations.set(
        Violation::InsufficientBalance,
        amount > balance && amount > Decimal::ZERO,
    );
}

/// required + min rules of the destination field
pub fn check_destination(destination: Option<i64>, violations: &mut Violations) {
    violations.set(Violation::Required, destination.is_none());
    violations.set(
        Violation::Minimum,
        matches!(destination, Some(id) if id < MIN_DESTINATION_ID),
    );
}
