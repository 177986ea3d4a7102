//! Declarative field rules
//!
//! A [`RuleSet`] is an ordered list of field checks over one subject type.
//! Every rule runs on every pass; nothing short-circuits, so a caller sees
//! all problems with a request at once.
//!
//! # Example
//!
//! ```rust
//! use crud_pipeline::validation::RuleSet;
//!
//! struct Signup {
//!     handle: String,
//!     age: i64,
//! }
//!
//! let rules = RuleSet::new()
//!     .text("Handle", |s: &Signup| s.handle.as_str(), |r| r.not_empty().max_length(16))
//!     .number("Age", |s: &Signup| s.age, |r| r.between(13, 130));
//!
//! let violations = rules.check(&Signup { handle: String::new(), age: 7 });
//! assert_eq!(violations.len(), 2);
//! ```

use super::violation::Violation;

type Rule<T> = Box<dyn Fn(&T, &mut Vec<Violation>) + Send + Sync>;

/// Ordered set of field rules for a subject of type `T`
pub struct RuleSet<T> {
    rules: Vec<Rule<T>>,
}

impl<T: 'static> RuleSet<T> {
    /// Create an empty rule set (accepts everything)
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add string rules for a field
    #[must_use]
    pub fn text(
        mut self,
        field: &'static str,
        accessor: fn(&T) -> &str,
        build: impl FnOnce(TextRules) -> TextRules,
    ) -> Self {
        let checks = build(TextRules::default()).checks;
        self.rules.push(Box::new(move |subject, out| {
            let value = accessor(subject);
            for check in &checks {
                if let Some(message) = check.evaluate(field, value) {
                    out.push(Violation::new(field, message));
                }
            }
        }));
        self
    }

    /// Add integer rules for a field
    #[must_use]
    pub fn number(
        mut self,
        field: &'static str,
        accessor: fn(&T) -> i64,
        build: impl FnOnce(NumberRules) -> NumberRules,
    ) -> Self {
        let checks = build(NumberRules::default()).checks;
        self.rules.push(Box::new(move |subject, out| {
            let value = accessor(subject);
            for check in &checks {
                if let Some(message) = check.evaluate(field, value) {
                    out.push(Violation::new(field, message));
                }
            }
        }));
        self
    }

    /// Add a free-form predicate; `message` is reported when it returns false
    #[must_use]
    pub fn must(
        mut self,
        field: &'static str,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
        message: impl Into<String>,
    ) -> Self {
        let message = message.into();
        self.rules.push(Box::new(move |subject, out| {
            if !predicate(subject) {
                out.push(Violation::new(field, message.clone()));
            }
        }));
        self
    }

    /// Run every rule against `subject`
    pub fn check(&self, subject: &T) -> Vec<Violation> {
        let mut violations = Vec::new();
        for rule in &self.rules {
            rule(subject, &mut violations);
        }
        violations
    }

    /// Number of registered field rules
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rule has been registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: 'static> Default for RuleSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextCheck {
    NotEmpty,
    MinLength(usize),
    MaxLength(usize),
}

impl TextCheck {
    fn evaluate(self, field: &str, value: &str) -> Option<String> {
        let length = value.chars().count();
        match self {
            Self::NotEmpty if value.trim().is_empty() => {
                Some(format!("'{field}' must not be empty."))
            }
            Self::MinLength(min) if length < min => Some(format!(
                "The length of '{field}' must be at least {min} characters. You entered {length} characters."
            )),
            Self::MaxLength(max) if length > max => Some(format!(
                "The length of '{field}' must be {max} characters or fewer. You entered {length} characters."
            )),
            _ => None,
        }
    }
}

/// Rules applied to a string field
#[derive(Debug, Clone, Default)]
pub struct TextRules {
    checks: Vec<TextCheck>,
}

impl TextRules {
    /// Reject empty and whitespace-only values
    #[must_use]
    pub fn not_empty(mut self) -> Self {
        self.checks.push(TextCheck::NotEmpty);
        self
    }

    /// Require at least `min` characters
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.checks.push(TextCheck::MinLength(min));
        self
    }

    /// Allow at most `max` characters
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.checks.push(TextCheck::MaxLength(max));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberCheck {
    GreaterThan(i64),
    Between(i64, i64),
}

impl NumberCheck {
    fn evaluate(self, field: &str, value: i64) -> Option<String> {
        match self {
            Self::GreaterThan(bound) if value <= bound => {
                Some(format!("'{field}' must be greater than '{bound}'."))
            }
            Self::Between(from, to) if value < from || value > to => Some(format!(
                "'{field}' must be between {from} and {to}. You entered {value}."
            )),
            _ => None,
        }
    }
}

/// Rules applied to an integer field
#[derive(Debug, Clone, Default)]
pub struct NumberRules {
    checks: Vec<NumberCheck>,
}

impl NumberRules {
    /// Require a value strictly greater than `bound`
    #[must_use]
    pub fn greater_than(mut self, bound: i64) -> Self {
        self.checks.push(NumberCheck::GreaterThan(bound));
        self
    }

    /// Require `from <= value <= to`
    #[must_use]
    pub fn between(mut self, from: i64, to: i64) -> Self {
        self.checks.push(NumberCheck::Between(from, to));
        self
    }
}
