//! `PUT /api/v1/teams/{id}`: rename a team

use std::sync::Arc;

use crud_pipeline::entity::Entity;
use crud_pipeline::handlers::{Handler, UpdateHandler};
use crud_pipeline::repository::Repository;
use crud_pipeline::request::{Request, UpdateCommand};
use crud_pipeline::validation::ValidationFailure;
use crud_pipeline::Result;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use super::{name_taken, TeamResponse};
use crate::domain::{team_rules, Team, TeamFields};
use crate::queries::teams_by_name;

/// Rename a team
#[derive(Debug, Clone)]
pub struct UpdateTeamCommand {
    /// Team identity
    pub id: i64,
    /// New name
    pub name: String,
}

/// Body of `PUT /api/v1/teams/{id}`; the identity comes from the path
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTeamBody {
    /// New name
    pub name: String,
}

impl UpdateTeamBody {
    /// Combine with the path identity
    pub fn into_command(self, id: i64) -> UpdateTeamCommand {
        UpdateTeamCommand { id, name: self.name }
    }
}

impl Request for UpdateTeamCommand {
    type Response = TeamResponse;
    const NAME: &'static str = "UpdateTeamCommand";
}

impl UpdateCommand for UpdateTeamCommand {
    type Entity = Team;

    fn id(&self) -> &i64 {
        &self.id
    }
}

impl TeamFields for UpdateTeamCommand {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Rename `team`, rejecting a name another team already uses
///
/// Runs after the team is loaded, so a missing team is reported as not
/// found before any other team is consulted.
async fn rename_team<R>(
    teams: Arc<R>,
    mut team: Team,
    command: UpdateTeamCommand,
    cancel: CancellationToken,
) -> Result<Team>
where
    R: Repository<Team>,
{
    let clashes = teams.query(&teams_by_name(&command.name), &cancel).await?;
    if clashes.iter().any(|other| other.id() != team.id()) {
        return Err(ValidationFailure::single("Name", name_taken(&command.name)).into());
    }
    team.change_name(command.name)?;
    Ok(team)
}

/// Handler renaming teams in `teams`
pub fn update_team_handler<R>(teams: Arc<R>) -> Result<impl Handler<UpdateTeamCommand>>
where
    R: Repository<Team> + 'static,
{
    let lookup = teams.clone();
    UpdateHandler::<UpdateTeamCommand, R, _>::builder()
        .repository(teams)
        .validator(team_rules::<UpdateTeamCommand>())
        .apply(move |team, command, cancel| rename_team(lookup.clone(), team, command, cancel))
        .mapper(TeamResponse::from_team)
        .build()
}
