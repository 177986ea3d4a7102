//! Player requests and their handlers

mod get_one;
mod post;

use crud_pipeline::entity::Entity;
use serde::{Deserialize, Serialize};

use crate::domain::Player;

pub use get_one::{get_player_handler, GetPlayerRequest};
pub use post::{create_player_handler, CreatePlayerCommand, TeamExists};

/// Player as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerResponse {
    /// Player identity
    pub id: i64,
    /// First name
    pub given_name: String,
    /// Family name
    pub surname: String,
    /// Identity of the player's team
    pub team_id: i64,
    /// Shirt number
    pub number: i64,
}

impl PlayerResponse {
    /// Map a persisted player
    pub fn from_player(player: &Player) -> Self {
        Self {
            id: player.id().copied().unwrap_or_default(),
            given_name: player.given_name().to_string(),
            surname: player.surname().to_string(),
            team_id: player.team_id(),
            number: player.number(),
        }
    }
}
