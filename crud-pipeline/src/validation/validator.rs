//! The validator contract and its compositions

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::rules::RuleSet;
use super::violation::Violation;
use crate::error::Result;

/// Inspects a subject and reports every violation it finds
///
/// An empty vector means the subject is valid. Validators only read: the
/// subject and, for rules such as uniqueness, the repository read path. An
/// `Err` is reserved for faults while consulting that read path; rule
/// failures are always returned as violations.
///
/// # Example
///
/// ```rust,ignore
/// struct NameIsFree<R> { teams: Arc<R> }
///
/// #[async_trait]
/// impl<R: Repository<Team> + 'static> Validator<RenameTeam> for NameIsFree<R> {
///     async fn validate(&self, cmd: &RenameTeam, cancel: &CancellationToken) -> Result<Vec<Violation>> {
///         let clashes = self.teams.query(&teams_by_name(&cmd.name), cancel).await?;
///         Ok(clashes
///             .iter()
///             .filter(|team| team.id() != Some(&cmd.id))
///             .map(|_| Violation::new("Name", "already taken"))
///             .collect())
///     }
/// }
/// ```
#[async_trait]
pub trait Validator<T: Sync + ?Sized>: Send + Sync {
    /// Validate `subject`, collecting all violations
    async fn validate(&self, subject: &T, cancel: &CancellationToken) -> Result<Vec<Violation>>;
}

#[async_trait]
impl<T: Sync + 'static> Validator<T> for RuleSet<T> {
    async fn validate(&self, subject: &T, _cancel: &CancellationToken) -> Result<Vec<Violation>> {
        Ok(self.check(subject))
    }
}

/// Runs several validators and concatenates their violations
///
/// Validators run in registration order and none short-circuits the others.
/// An empty `AllOf` accepts everything.
pub struct AllOf<T: Sync + ?Sized> {
    validators: Vec<Arc<dyn Validator<T>>>,
}

impl<T: Sync + ?Sized + 'static> AllOf<T> {
    /// Create an empty composite
    #[must_use]
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Append a validator
    #[must_use]
    pub fn with(mut self, validator: impl Validator<T> + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Number of validators in the composite
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// True when the composite holds no validator
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<T: Sync + ?Sized + 'static> Default for AllOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Sync + ?Sized + 'static> Validator<T> for AllOf<T> {
    async fn validate(&self, subject: &T, cancel: &CancellationToken) -> Result<Vec<Violation>> {
        let mut violations = Vec::new();
        for validator in &self.validators {
            violations.extend(validator.validate(subject, cancel).await?);
        }
        Ok(violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    struct Command {
        name: String,
    }

    struct Reserved;

    #[async_trait]
    impl Validator<Command> for Reserved {
        async fn validate(&self, subject: &Command, _cancel: &CancellationToken) -> Result<Vec<Violation>> {
            if subject.name.eq_ignore_ascii_case("admin") {
                Ok(vec![Violation::new("Name", "is reserved")])
            } else {
                Ok(vec![])
            }
        }
    }

    struct Broken;

    #[async_trait]
    impl Validator<Command> for Broken {
        async fn validate(&self, _subject: &Command, _cancel: &CancellationToken) -> Result<Vec<Violation>> {
            Err(Error::Mapping("lookup failed".to_string()))
        }
    }

    fn length_rules() -> RuleSet<Command> {
        RuleSet::new().text("Name", |c: &Command| c.name.as_str(), |r| r.max_length(3))
    }

    #[tokio::test]
    async fn test_rule_set_as_validator() {
        let cancel = CancellationToken::new();
        let violations = length_rules()
            .validate(&Command { name: "toolong".into() }, &cancel)
            .await
            .unwrap();
        assert_eq!(violations.len(), 1);
    }

    #[tokio::test]
    async fn test_all_of_does_not_short_circuit() {
        let cancel = CancellationToken::new();
        let validator = AllOf::<Command>::new().with(length_rules()).with(Reserved);
        assert_eq!(validator.len(), 2);

        let violations = validator
            .validate(&Command { name: "Admin".into() }, &cancel)
            .await
            .unwrap();

        assert_eq!(
            violations,
            vec![
                Violation::new(
                    "Name",
                    "The length of 'Name' must be 3 characters or fewer. You entered 5 characters."
                ),
                Violation::new("Name", "is reserved"),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_all_of_accepts() {
        let cancel = CancellationToken::new();
        let validator: AllOf<Command> = AllOf::default();
        assert!(validator.is_empty());
        assert!(validator
            .validate(&Command { name: String::new() }, &cancel)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_all_of_propagates_faults() {
        let cancel = CancellationToken::new();
        let validator = AllOf::<Command>::new().with(length_rules()).with(Broken);
        let result = validator.validate(&Command { name: "ok".into() }, &cancel).await;
        assert!(matches!(result, Err(Error::Mapping(_))));
    }
}
