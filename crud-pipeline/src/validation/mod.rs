//! Validation: violations, field rules, and the validator contract
//!
//! Validation never short-circuits. A [`Validator`] returns every
//! [`Violation`] it finds, and [`ValidationFailure::check`] turns the result
//! into an error only when at least one was reported.
//!
//! - [`RuleSet`]: synchronous, declarative field rules
//! - [`Validator`]: async contract; may consult a repository read path
//! - [`AllOf`]: runs several validators and concatenates their output

mod rules;
mod validator;
mod violation;

pub use rules::{NumberRules, RuleSet, TextRules};
pub use validator::{AllOf, Validator};
pub use violation::{ValidationFailure, Violation};
