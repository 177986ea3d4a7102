//! `GET /api/v1/teams/{id}`: fetch one team

use std::sync::Arc;

use crud_pipeline::handlers::{GetOneHandler, Handler};
use crud_pipeline::repository::Repository;
use crud_pipeline::request::{PointQuery, Request};
use serde::Deserialize;

use super::TeamResponse;
use crate::domain::Team;

/// Fetch one team
#[derive(Debug, Clone, Deserialize)]
pub struct GetTeamRequest {
    /// Team identity
    pub id: i64,
}

impl Request for GetTeamRequest {
    type Response = TeamResponse;
    const NAME: &'static str = "GetTeamRequest";
}

impl PointQuery for GetTeamRequest {
    type Entity = Team;

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// Handler reading teams from `teams`
pub fn get_team_handler<R>(teams: Arc<R>) -> impl Handler<GetTeamRequest>
where
    R: Repository<Team> + 'static,
{
    GetOneHandler::<GetTeamRequest, _, _>::new(teams, TeamResponse::from_team)
}
