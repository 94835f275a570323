//! Log subscriber setup and structured error events.

use tessera_core::{render_chain, Describe};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{LogConfig, LogFormat};
use crate::error::{BootstrapError, BootstrapResult};

/// Install the global `tracing` subscriber described by `config`.
///
/// Fails if the level directive does not parse or a global subscriber is
/// already installed.
pub fn init(config: &LogConfig) -> BootstrapResult<()> {
    config.validate()?;
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| BootstrapError::invalid_config("log.level", e.to_string()))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target);

    match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    }
    .map_err(BootstrapError::logging)?;

    info!(name = %config.name, level = %config.level, "logging initialized");
    Ok(())
}

/// Emit an `error` event carrying the error's name, message, rendered cause
/// chain and details.
pub fn log_error<E: Describe + ?Sized>(err: &E) {
    error!(
        name = err.name(),
        message = %err,
        chain = %render_chain(err),
        details = ?err.details(),
        "{}",
        err.name()
    );
}
