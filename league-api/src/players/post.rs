//! `POST /api/v1/players`: register a player with an existing team

use std::sync::Arc;

use async_trait::async_trait;
use crud_pipeline::handlers::{CreateHandler, Handler};
use crud_pipeline::repository::Repository;
use crud_pipeline::request::{CreateCommand, Request};
use crud_pipeline::validation::{AllOf, Validator, Violation};
use crud_pipeline::Result;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::PlayerResponse;
use crate::domain::{player_rules, Player, PlayerFields, Team};

/// Register a player with a team
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayerCommand {
    /// First name
    pub given_name: String,
    /// Family name
    pub surname: String,
    /// Team to join; must already exist
    pub team_id: i64,
    /// Shirt number, 0 through 99
    pub number: i64,
}

impl Request for CreatePlayerCommand {
    type Response = PlayerResponse;
    const NAME: &'static str = "CreatePlayerCommand";
}

impl CreateCommand for CreatePlayerCommand {
    type Entity = Player;
}

impl PlayerFields for CreatePlayerCommand {
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

/// Rejects a player whose team does not exist
///
/// A non-positive team id is left to the field rules.
pub struct TeamExists<T> {
    teams: Arc<T>,
}

impl<T> TeamExists<T> {
    /// Look teams up in `teams`
    pub fn new(teams: Arc<T>) -> Self {
        Self { teams }
    }
}

#[async_trait]
impl<T> Validator<CreatePlayerCommand> for TeamExists<T>
where
    T: Repository<Team> + 'static,
{
    async fn validate(
        &self,
        command: &CreatePlayerCommand,
        cancel: &CancellationToken,
    ) -> Result<Vec<Violation>> {
        if command.team_id <= 0 {
            return Ok(Vec::new());
        }
        if self.teams.get_by_id(&command.team_id, cancel).await?.is_none() {
            return Ok(vec![Violation::new(
                "TeamId",
                format!("Team '{}' does not exist.", command.team_id),
            )]);
        }
        Ok(Vec::new())
    }
}

/// Handler registering players in `players`, checking teams in `teams`
pub fn create_player_handler<P, T>(
    players: Arc<P>,
    teams: Arc<T>,
) -> Result<impl Handler<CreatePlayerCommand>>
where
    P: Repository<Player> + 'static,
    T: Repository<Team> + 'static,
{
    let validator = AllOf::<CreatePlayerCommand>::new()
        .with(player_rules::<CreatePlayerCommand>())
        .with(TeamExists::new(teams));

    CreateHandler::<CreatePlayerCommand, P, _>::builder()
        .repository(players)
        .validator(validator)
        .generate(|command: CreatePlayerCommand, _cancel| async move {
            let player = Player::create(
                command.given_name,
                command.surname,
                command.team_id,
                command.number,
            )?;
            Ok::<_, crud_pipeline::Error>(player)
        })
        .mapper(PlayerResponse::from_player)
        .build()
}
