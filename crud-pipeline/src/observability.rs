//! Structured logging setup

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Install a JSON `tracing` subscriber and emit the startup event
///
/// The filter comes from `service.log_level`, falling back to `info` when
/// the directive does not parse. Calling this again after a subscriber is
/// installed leaves the existing one in place.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.service.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global subscriber already installed");
    }

    log_startup(config);
}

/// Emit the application-started event carrying name, environment and version
pub fn log_startup(config: &Config) {
    tracing::info!(
        application = %config.service.name,
        environment = %config.service.environment,
        version = %config.service.version,
        "===== {} Started =====",
        config.service.name
    );
}
