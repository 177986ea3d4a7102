//! `GET /api/v1/players/{id}`: fetch one player

use std::sync::Arc;

use crud_pipeline::handlers::{GetOneHandler, Handler};
use crud_pipeline::repository::Repository;
use crud_pipeline::request::{PointQuery, Request};
use serde::Deserialize;

use super::PlayerResponse;
use crate::domain::Player;

/// Fetch one player
#[derive(Debug, Clone, Deserialize)]
pub struct GetPlayerRequest {
    /// Player identity
    pub id: i64,
}

impl Request for GetPlayerRequest {
    type Response = PlayerResponse;
    const NAME: &'static str = "GetPlayerRequest";
}

impl PointQuery for GetPlayerRequest {
    type Entity = Player;

    fn id(&self) -> &i64 {
        &self.id
    }
}

/// Handler reading players from `players`
pub fn get_player_handler<R>(players: Arc<R>) -> impl Handler<GetPlayerRequest>
where
    R: Repository<Player> + 'static,
{
    GetOneHandler::<GetPlayerRequest, _, _>::new(players, PlayerResponse::from_player)
}
