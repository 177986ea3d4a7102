//! The player entity

use std::sync::LazyLock;

use crud_pipeline::entity::{self, Entity, EntityMeta};
use crud_pipeline::validation::{RuleSet, ValidationFailure, Violation};

use super::rules::{player_rules, PlayerFields};

static RULES: LazyLock<RuleSet<Player>> = LazyLock::new(player_rules);

/// A player registered with a team
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    meta: EntityMeta<i64>,
    given_name: String,
    surname: String,
    team_id: i64,
    number: i64,
}

impl Player {
    /// Build a valid, unpersisted player
    pub fn create(
        given_name: impl Into<String>,
        surname: impl Into<String>,
        team_id: i64,
        number: i64,
    ) -> Result<Self, ValidationFailure> {
        entity::create(Self {
            meta: EntityMeta::new(),
            given_name: given_name.into(),
            surname: surname.into(),
            team_id,
            number,
        })
    }

    /// Give the player a new shirt number
    pub fn change_number(&mut self, number: i64) -> Result<(), ValidationFailure> {
        entity::mutate(self, |player| player.number = number)
    }

    /// First name
    pub fn given_name(&self) -> &str {
        &self.given_name
    }

    /// Family name
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Owning team
    pub fn team_id(&self) -> i64 {
        self.team_id
    }

    /// Shirt number
    pub fn number(&self) -> i64 {
        self.number
    }
}

impl PlayerFields for Player {
    fn given_name(&self) -> &str {
        &self.given_name
    }

    fn surname(&self) -> &str {
        &self.surname
    }

    fn team_id(&self) -> i64 {
        self.team_id
    }

    fn number(&self) -> i64 {
        self.number
    }
}

impl Entity for Player {
    type Id = i64;
    const TYPE_NAME: &'static str = "Player";

    fn meta(&self) -> &EntityMeta<i64> {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta<i64> {
        &mut self.meta
    }

    fn validate(&self) -> Vec<Violation> {
        RULES.check(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_valid_player() {
        let player = Player::create("Ada", "Lovelace", 1, 10).unwrap();
        assert_eq!(player.given_name(), "Ada");
        assert_eq!(player.number(), 10);
    }

    #[test]
    fn test_create_collects_all_violations() {
        let failure = Player::create("", "", 0, 120).unwrap_err();
        let fields: Vec<_> = failure.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["GivenName", "Surname", "TeamId", "Number"]);
    }

    #[test]
    fn test_change_number_twice_with_same_value() {
        let mut player = Player::create("Ada", "Lovelace", 1, 10).unwrap();
        player.change_number(7).unwrap();
        player.change_number(7).unwrap();
        assert_eq!(player.number(), 7);
    }

    #[test]
    fn test_change_number_out_of_range() {
        let mut player = Player::create("Ada", "Lovelace", 1, 10).unwrap();
        let failure = player.change_number(100).unwrap_err();
        assert_eq!(
            failure.violations()[0].message,
            "'Number' must be between 0 and 99. You entered 100."
        );
    }
}
