//! Query specifications

use std::fmt;

/// A named predicate over entities
pub trait Specification<E>: Send + Sync {
    /// Whether `entity` matches
    fn is_satisfied_by(&self, entity: &E) -> bool;

    /// Short description used in trace output
    fn describe(&self) -> &str {
        "specification"
    }
}

type Predicate<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

/// A specification built from a closure
///
/// ```rust
/// use crud_pipeline::repository::{QuerySpecification, Specification};
///
/// let short = QuerySpecification::new("short", |s: &String| s.len() < 4);
/// assert!(short.is_satisfied_by(&"abc".to_string()));
/// assert!(!short.is_satisfied_by(&"abcd".to_string()));
/// ```
pub struct QuerySpecification<E> {
    name: String,
    predicate: Predicate<E>,
}

impl<E: 'static> QuerySpecification<E> {
    /// Create a specification from a name and predicate
    pub fn new(
        name: impl Into<String>,
        predicate: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Matches every entity
    #[must_use]
    pub fn all() -> Self {
        Self::new("all", |_| true)
    }

    /// Both this and `other` must match
    #[must_use]
    pub fn and(self, other: QuerySpecification<E>) -> Self {
        let name = format!("{} and {}", self.name, other.name);
        let (left, right) = (self.predicate, other.predicate);
        Self {
            name,
            predicate: Box::new(move |entity| left(entity) && right(entity)),
        }
    }
}

impl<E> Specification<E> for QuerySpecification<E> {
    fn is_satisfied_by(&self, entity: &E) -> bool {
        (self.predicate)(entity)
    }

    fn describe(&self) -> &str {
        &self.name
    }
}

impl<E> fmt::Debug for QuerySpecification<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuerySpecification")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and_requires_both() {
        let even = QuerySpecification::new("even", |n: &i32| n % 2 == 0);
        let positive = QuerySpecification::new("positive", |n: &i32| *n > 0);
        let spec = even.and(positive);
        assert_eq!(spec.describe(), "even and positive");
        assert!(spec.is_satisfied_by(&4));
        assert!(!spec.is_satisfied_by(&-4));
        assert!(!spec.is_satisfied_by(&3));
    }

    #[test]
    fn test_all_matches_everything() {
        let spec = QuerySpecification::<i32>::all();
        assert!(spec.is_satisfied_by(&0));
        assert!(spec.is_satisfied_by(&i32::MIN));
    }
}
