//! The team entity

use std::sync::LazyLock;

use crud_pipeline::entity::{self, Entity, EntityMeta};
use crud_pipeline::validation::{RuleSet, ValidationFailure, Violation};

use super::rules::{team_rules, TeamFields};

static RULES: LazyLock<RuleSet<Team>> = LazyLock::new(team_rules);

/// A team in the league
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    meta: EntityMeta<i64>,
    name: String,
}

impl Team {
    /// Build a valid, unpersisted team
    pub fn create(name: impl Into<String>) -> Result<Self, ValidationFailure> {
        entity::create(Self {
            meta: EntityMeta::new(),
            name: name.into(),
        })
    }

    /// Rename the team
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationFailure> {
        let name = name.into();
        entity::mutate(self, |team| team.name = name)
    }

    /// Current name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TeamFields for Team {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Entity for Team {
    type Id = i64;
    const TYPE_NAME: &'static str = "Team";

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
