//! `POST /api/v1/teams`: create a team with a unique name

use std::sync::Arc;

use crud_pipeline::handlers::{CreateHandler, Handler};
use crud_pipeline::repository::Repository;
use crud_pipeline::request::{CreateCommand, Request};
use crud_pipeline::validation::ValidationFailure;
use crud_pipeline::Result;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::{name_taken, TeamResponse};
use crate::domain::{team_rules, Team, TeamFields};
use crate::queries::teams_by_name;

/// Create a team
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamCommand {
    /// Name of the new team
    pub name: String,
}

impl Request for CreateTeamCommand {
    type Response = TeamResponse;
    const NAME: &'static str = "CreateTeamCommand";
}

impl CreateCommand for CreateTeamCommand {
    type Entity = Team;
}

impl TeamFields for CreateTeamCommand {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Build the team, rejecting a name another team already uses
async fn generate_team<R>(
    teams: Arc<R>,
    command: CreateTeamCommand,
    cancel: CancellationToken,
) -> Result<Team>
where
    R: Repository<Team>,
{
    let existing = teams.query(&teams_by_name(&command.name), &cancel).await?;
    if !existing.is_empty() {
        return Err(ValidationFailure::single("Name", name_taken(&command.name)).into());
    }
    Ok(Team::create(command.name)?)
}

/// Handler creating teams in `teams`
pub fn create_team_handler<R>(teams: Arc<R>) -> Result<impl Handler<CreateTeamCommand>>
where
    R: Repository<Team> + 'static,
{
    let lookup = teams.clone();
    CreateHandler::<CreateTeamCommand, R, _>::builder()
        .repository(teams)
        .validator(team_rules::<CreateTeamCommand>())
        .generate(move |command, cancel| generate_team(lookup.clone(), command, cancel))
        .mapper(TeamResponse::from_team)
        .build()
}
