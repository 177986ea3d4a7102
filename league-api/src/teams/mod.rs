//! Team requests and their handlers

mod get_one;
mod post;
mod put;

use crud_pipeline::entity::Entity;
use serde::{Deserialize, Serialize};

use crate::domain::Team;

pub use get_one::{get_team_handler, GetTeamRequest};
pub use post::{create_team_handler, CreateTeamCommand};
pub use put::{update_team_handler, UpdateTeamBody, UpdateTeamCommand};

/// Team as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamResponse {
    /// Identity
    pub id: i64,
    /// Name
    pub name: String,
}

impl TeamResponse {
    /// Map a persisted team
    pub fn from_team(team: &Team) -> Self {
        Self {
            id: team.id().copied().unwrap_or_default(),
            name: team.name().to_string(),
        }
    }
}

/// Message reported when another team already uses `name`
pub(crate) fn name_taken(name: &str) -> String {
    format!("Team Name '{name}' is not unique")
}
