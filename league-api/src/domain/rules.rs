//! Field rules shared by entities and the commands that build them

use crud_pipeline::validation::RuleSet;

/// Longest accepted team or player name
pub const NAME_MAX_LENGTH: usize = 50;

/// Highest accepted shirt number
pub const NUMBER_MAX: i64 = 99;

/// Anything carrying a team name
pub trait TeamFields {
    /// Team name
    fn name(&self) -> &str;
}

/// Anything carrying player details
pub trait PlayerFields {
    /// First name
    fn given_name(&self) -> &str;
    /// Family name
    fn surname(&self) -> &str;
    /// Owning team
    fn team_id(&self) -> i64;
    /// Shirt number
    fn number(&self) -> i64;
}

/// Name must be present and at most [`NAME_MAX_LENGTH`] characters
pub fn team_rules<T: TeamFields + 'static>() -> RuleSet<T> {
    RuleSet::new().text("Name", |t: &T| t.name(), |r| {
        r.not_empty().max_length(NAME_MAX_LENGTH)
    })
}

/// Names present and bounded, team reference positive, number in range
pub fn player_rules<T: PlayerFields + 'static>() -> RuleSet<T> {
    RuleSet::new()
        .text("GivenName", |p: &T| p.given_name(), |r| {
            r.not_empty().max_length(NAME_MAX_LENGTH)
        })
        .text("Surname", |p: &T| p.surname(), |r| {
            r.not_empty().max_length(NAME_MAX_LENGTH)
        })
        .number("TeamId", |p: &T| p.team_id(), |r| r.greater_than(0))
        .number("Number", |p: &T| p.number(), |r| r.between(0, NUMBER_MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Name(String);

    impl TeamFields for Name {
        fn name(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn test_team_rules_collect_every_violation() {
        let subject = Name(" ".repeat(NAME_MAX_LENGTH + 1));

        let violations = team_rules::<Name>().check(&subject);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.field == "Name"));
    }

    #[test]
    fn test_team_rules_accept_boundary_length() {
        let subject = Name("a".repeat(NAME_MAX_LENGTH));
        assert!(team_rules::<Name>().check(&subject).is_empty());
    }
}
