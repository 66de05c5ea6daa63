//! Named validation violations attached to a form field
//!
//! A field can carry several violations at once. Rules add or remove their
//! own tag only, so clearing one reason never drops an unrelated one.

use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Violation {
    /// Field has no value
    Required,
    /// Value is below the field minimum
    Minimum,
    /// Amount exceeds the origin balance
    InsufficientBalance,
}

impl Violation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Violation::Required => "required",
            Violation::Minimum => "min",
            Violation::InsufficientBalance => "insufficientBalance",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(BTreeSet<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or remove `violation` depending on `present`
    pub fn set(&mut self, violation: Violation, present: bool) {
        if present {
            self.insert(violation);
        } else {
            self.remove(violation);
        }
    }

    pub fn insert(&mut self, violation: Violation) -> bool {
        self.0.insert(violation)
    }

    pub fn remove(&mut self, violation: Violation) -> bool {
        self.0.remove(&violation)
    }

    pub fn contains(&self, violation: Violation) -> bool {
        self.0.contains(&violation)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Violation> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|v| v.as_str()).collect();
        write!(f, "{}", names.join(", "))
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
