//! Transfer form state
//!
//! Each [`Field`] owns its value, touched flag and violation set. Setting a
//! value re-runs the field's own rule and then every subscribed listener,
//! synchronously, so the violation set always reflects the latest input.

use rust_decimal::Decimal;

use super::validator;
use super::violations::Violations;

/// Built-in rule of a field (required/min style)
pub type Rule<T> = fn(Option<T>, &mut Violations);

/// Change listener, called after the field's own rule
pub type Listener<T> = Box<dyn Fn(Option<T>, &mut Violations) + Send>;

pub struct Field<T: Copy> {
    name: &'static str,
    value: Option<T>,
    touched: bool,
    violations: Violations,
    rule: Rule<T>,
    listeners: Vec<Listener<T>>,
}

impl<T: Copy> Field<T> {
    pub fn new(name: &'static str, rule: Rule<T>) -> Self {
        let mut field = Self {
            name,
            value: None,
            touched: false,
            violations: Violations::new(),
            rule,
            listeners: Vec::new(),
        };
        (field.rule)(None, &mut field.violations);
        field
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn value(&self) -> Option<T> {
        self.value
    }

    pub fn violations(&self) -> &Violations {
        &self.violations
    }

    /// Mutable access for violations set from outside the field's rules
    pub fn violations_mut(&mut self) -> &mut Violations {
        &mut self.violations
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    /// Register a listener fired on every subsequent value change
    pub fn subscribe(&mut self, listener: Listener<T>) {
        self.listeners.push(listener);
    }

    /// Change the value and notify listeners
    pub fn set_value(&mut self, value: Option<T>) {
        self.value = value;
        self.touched = true;
        self.revalidate();
    }

    /// Re-run the field rule and all listeners against the current value
    pub fn revalidate(&mut self) {
        (self.rule)(self.value, &mut self.violations);
        for listener in &self.listeners {
            listener(self.value, &mut self.violations);
        }
    }

    /// Drop value, touched flag and listeners
    pub fn reset(&mut self) {
        self.value = None;
        self.touched = false;
        self.listeners.clear();
        self.violations.clear();
        (self.rule)(None, &mut self.violations);
    }
}

impl<T: Copy + std::fmt::Debug> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value", &self.value)
            .field("touched", &self.touched)
            .field("violations", &self.violations)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Destination id + amount
#[derive(Debug)]
pub struct TransferForm {
    pub destination: Field<i64>,
    pub amount: Field<Decimal>,
}

impl TransferForm {
    pub fn new() -> Self {
        Self {
            destination: Field::new("destinationId", validator::check_destination),
            amount: Field::new("amount", validator::check_amount_bounds),
        }
    }

    /// Full-form check, including fields that never fired a change
    pub fn revalidate_all(&mut self) {
        self.destination.revalidate();
        self.amount.revalidate();
    }

    pub fn mark_all_touched(&mut self) {
        self.destination.mark_touched();
        self.amount.mark_touched();
    }

    /// First invalid field with its violations, in display order
    pub fn first_invalid(&self) -> Option<(&'static str, Violations)> {
        if !self.destination.is_valid() {
            return Some((self.destination.name(), self.destination.violations().clone()));
        }
        if !self.amount.is_valid() {
            return Some((self.amount.name(), self.amount.violations().clone()));
        }
        None
    }

    pub fn reset(&mut self) {
        self.destination.reset();
        self.amount.reset();
    }
}

impl Default for TransferForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::violations::Violation;

    #[test]
    fn test_new_form_is_invalid_and_untouched() {
        let form = TransferForm::new();
        assert!(form.first_invalid().is_some());
        assert!(form.amount.violations().contains(Violation::Required));
        assert!(form.destination.violations().contains(Violation::Required));
        assert!(!form.amount.is_touched());
        assert!(!form.destination.is_touched());
    }

    #[test]
    fn test_listener_runs_on_every_change() {
        let balance = Decimal::new(10000, 2);
        let mut form = TransferForm::new();
        form.amount.subscribe(Box::new(move |amount: Option<Decimal>, violations: &mut Violations| {
            validator::check_balance(balance, amount, violations);
        }));

        form.amount.set_value(Some(Decimal::new(15000, 2)));
        assert!(form.amount.violations().contains(Violation::InsufficientBalance));

        form.amount.set_value(Some(Decimal::new(5000, 2)));
        assert!(form.amount.is_valid());
        assert!(form.amount.is_touched());
    }

    #[test]
    fn test_external_violation_survives_balance_clear() {
        let balance = Decimal::new(10000, 2);
        let mut form = TransferForm::new();
        form.amount.subscribe(Box::new(move |amount: Option<Decimal>, violations: &mut Violations| {
            validator::check_balance(balance, amount, violations);
        }));

        form.amount.set_value(Some(Decimal::new(15000, 2)));
        form.amount.violations_mut().insert(Violation::Minimum);

        // Only the listener runs here; the field rule is not re-applied.
        validator::check_balance(balance, Some(Decimal::new(5000, 2)), form.amount.violations_mut());
        assert!(!form.amount.violations().contains(Violation::InsufficientBalance));
        assert!(form.amount.violations().contains(Violation::Minimum));
    }

    #[test]
    fn test_first_invalid_and_touch_all() {
        let mut form = TransferForm::new();
        form.destination.set_value(Some(3));

        let (field, violations) = form.first_invalid().unwrap();
        assert_eq!(field, "amount");
        assert!(violations.contains(Violation::Required));

        form.mark_all_touched();
        assert!(form.amount.is_touched());
    }

    #[test]
    fn test_reset_discards_edits_and_listeners() {
        let mut form = TransferForm::new();
        form.amount.subscribe(Box::new(|_: Option<Decimal>, violations: &mut Violations| {
            violations.insert(Violation::InsufficientBalance);
        }));
        form.amount.set_value(Some(Decimal::ONE));
        form.destination.set_value(Some(2));

        form.reset();
        assert_eq!(form.amount.value(), None);
        assert_eq!(form.destination.value(), None);
        assert!(!form.amount.is_touched());

        form.amount.set_value(Some(Decimal::ONE));
        assert!(form.amount.is_valid());
    }
}
