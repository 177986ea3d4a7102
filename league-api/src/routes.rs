//! HTTP routes
//!
//! Each route builds a typed request, dispatches it through the registry
//! and lets [`crud_pipeline::Error`] render failures through the error
//! translator.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use crud_pipeline::handlers::HandlerRegistry;
use crud_pipeline::Result;
use tokio_util::sync::CancellationToken;

use crate::players::{CreatePlayerCommand, GetPlayerRequest, PlayerResponse};
use crate::teams::{CreateTeamCommand, GetTeamRequest, TeamResponse, UpdateTeamBody};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Request dispatcher
    pub registry: Arc<HandlerRegistry>,
    /// Cancelled when the server shuts down; each request gets a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    /// State over `registry` with a fresh shutdown token
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            shutdown: CancellationToken::new(),
        }
    }
}

/// All league routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/teams", axum::routing::post(create_team))
        .route("/api/v1/teams/{id}", get(get_team).put(update_team))
        .route("/api/v1/players", axum::routing::post(create_player))
        .route("/api/v1/players/{id}", get(get_player))
        .with_state(state)
}

/// Liveness probe
pub async fn health() -> &'static str {
    "ok"
}

async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TeamResponse>> {
    let cancel = state.shutdown.child_token();
    let team = state.registry.dispatch(GetTeamRequest { id }, &cancel).await?;
    Ok(Json(team))
}

async fn create_team(
    State(state): State<AppState>,
    Json(command): Json<CreateTeamCommand>,
) -> Result<(StatusCode, Json<TeamResponse>)> {
    let cancel = state.shutdown.child_token();
    let team = state.registry.dispatch(command, &cancel).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateTeamBody>,
) -> Result<Json<TeamResponse>> {
    let cancel = state.shutdown.child_token();
    let team = state.registry.dispatch(body.into_command(id), &cancel).await?;
    Ok(Json(team))
}

async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PlayerResponse>> {
    let cancel = state.shutdown.child_token();
    let player = state.registry.dispatch(GetPlayerRequest { id }, &cancel).await?;
    Ok(Json(player))
}

async fn create_player(
    State(state): State<AppState>,
    Json(command): Json<CreatePlayerCommand>,
) -> Result<(StatusCode, Json<PlayerResponse>)> {
    let cancel = state.shutdown.child_token();
    let player = state.registry.dispatch(command, &cancel).await?;
    Ok((StatusCode::CREATED, Json(player)))
}
