use crud_pipeline::config::Config;
use crud_pipeline::observability::init_tracing;
use league_api::routes::AppState;
use league_api::{server, League};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_for_service("league-api")?;
    init_tracing(&config);

    let league = League::in_memory();
    let state = AppState::new(league.registry()?);

    server::serve(&config, state).await?;
    Ok(())
}
