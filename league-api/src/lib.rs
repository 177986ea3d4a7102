//! League service: teams and players served through the request pipeline

pub mod domain;
pub mod players;
pub mod queries;
pub mod routes;
pub mod server;
pub mod teams;

use std::sync::Arc;

use crud_pipeline::handlers::HandlerRegistry;
use crud_pipeline::repository::{InMemoryRepository, Repository};
use crud_pipeline::Result;

use domain::{Player, Team};

/// Repositories backing the league
#[derive(Debug, Default, Clone)]
pub struct League {
    pub teams: Arc<InMemoryRepository<Team>>,
    pub players: Arc<InMemoryRepository<Player>>,
}

impl League {
    /// Empty in-memory league
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Registry bound to this league's repositories
    pub fn registry(&self) -> Result<HandlerRegistry> {
        build_registry(self.teams.clone(), self.players.clone())
    }
}

/// Bind one handler per league request type
pub fn build_registry<T, P>(teams: Arc<T>, players: Arc<P>) -> Result<HandlerRegistry>
where
    T: Repository<Team> + 'static,
    P: Repository<Player> + 'static,
{
    use players::{CreatePlayerCommand, GetPlayerRequest};
    use teams::{CreateTeamCommand, GetTeamRequest, UpdateTeamCommand};

    let mut registry = HandlerRegistry::new();
    registry.register::<GetTeamRequest>(teams::get_team_handler(teams.clone()))?;
    registry.register::<CreateTeamCommand>(teams::create_team_handler(teams.clone())?)?;
    registry.register::<UpdateTeamCommand>(teams::update_team_handler(teams.clone())?)?;
    registry.register::<GetPlayerRequest>(players::get_player_handler(players.clone()))?;
    registry.register::<CreatePlayerCommand>(players::create_player_handler(players, teams)?)?;
    Ok(registry)
}
