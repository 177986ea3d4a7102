//! League domain: teams and players

mod player;
mod rules;
mod team;

pub use player::Player;
pub use rules::{player_rules, team_rules, PlayerFields, TeamFields, NAME_MAX_LENGTH, NUMBER_MAX};
pub use team::Team;
