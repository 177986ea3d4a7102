//! Field-level violations and the failure that carries them

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single field-level validation error
///
/// # Example
///
/// ```rust
/// use crud_pipeline::validation::Violation;
///
/// let violation = Violation::new("Name", "'Name' must not be empty.");
/// assert_eq!(violation.field, "Name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Path of the offending field (e.g. `Name`, `Address.City`)
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl Violation {
    /// Create a new violation
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// An ordered, non-empty collection of violations
///
/// Produced when a command or an entity fails its rules. The order is the
/// order in which rules were declared, which keeps test output stable.
///
/// # Example
///
/// ```rust
/// use crud_pipeline::validation::{ValidationFailure, Violation};
///
/// assert!(ValidationFailure::check(Vec::new()).is_ok());
///
/// let failure = ValidationFailure::check(vec![Violation::new("Name", "required")]).unwrap_err();
/// assert_eq!(failure.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    violations: Vec<Violation>,
}

impl ValidationFailure {
    /// Turn a rule pass into a result: `Ok` when nothing was violated
    pub fn check(violations: Vec<Violation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self { violations })
        }
    }

    /// Failure holding exactly one violation
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(field, message)],
        }
    }

    /// The violations, in declaration order
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations reported against one field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.field == field)
    }

    /// Number of violations
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Always false for a failure built through [`ValidationFailure::check`]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed")?;
        for (i, violation) in self.violations.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}

impl IntoIterator for ValidationFailure {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_empty_is_ok() {
        assert!(ValidationFailure::check(vec![]).is_ok());
    }

    #[test]
    fn test_check_keeps_order() {
        let failure = ValidationFailure::check(vec![
            Violation::new("Surname", "too long"),
            Violation::new("GivenName", "required"),
        ])
        .unwrap_err();

        let fields: Vec<_> = failure.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["Surname", "GivenName"]);
    }

    #[test]
    fn test_for_field() {
        let failure = ValidationFailure::check(vec![
            Violation::new("Name", "a"),
            Violation::new("Number", "b"),
            Violation::new("Name", "c"),
        ])
        .unwrap_err();

        assert_eq!(failure.for_field("Name").count(), 2);
        assert_eq!(failure.for_field("Missing").count(), 0);
    }

    #[test]
    fn test_consume_in_order() {
        let failure = ValidationFailure::check(vec![
            Violation::new("Number", "out of range"),
            Violation::new("Name", "required"),
        ])
        .unwrap_err();

        let owned: Vec<Violation> = failure.into_iter().collect();
        assert_eq!(owned.len(), 2);
        assert_eq!(owned[0].field, "Number");
        assert_eq!(owned[1].message, "required");
    }

    #[test]
    fn test_display() {
        let failure = ValidationFailure::check(vec![
            Violation::new("Name", "required"),
            Violation::new("Number", "out of range"),
        ])
        .unwrap_err();

        assert_eq!(
            failure.to_string(),
            "Validation failed: Name: required; Number: out of range"
        );
    }
}
