pub mod action;
pub mod helm;
pub mod settings;
pub mod status;

use serde_json::{Map, Value};

pub use action::{ActionConfig, ConfigError, init_action_config};
pub use helm::HelmCli;
pub use settings::EnvSettings;
pub use status::{Release, ReleaseInfo, ReleaseStatus, StatusError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to initialize action configuration")]
    Config(#[from] ConfigError),
    #[error("failed to query release status")]
    Status(#[from] StatusError),
}

impl Error {
    #[must_use]
    pub fn is_release_not_found(&self) -> bool {
        matches!(self, Self::Status(StatusError::ReleaseNotFound { .. }))
    }
}

/// Values recorded for release `name` under an existing action configuration.
pub fn release_values<S>(
    config: &ActionConfig,
    name: &str,
    status: &S,
) -> Result<Map<String, Value>, StatusError>
where
    S: ReleaseStatus + ?Sized,
{
    let release = status.status(config, name)?;
    tracing::debug!(
        release = %release.name,
        revision = release.version,
        status = %release.info.status,
        keys = release.config.len(),
        "fetched release values"
    );
    Ok(release.config)
}

/// Fetch the values of the currently installed release `name` in `namespace`.
///
/// Runs a single status query. Errors, including a missing release, are
/// returned as is.
pub fn fetch_chart_values<S>(
    namespace: &str,
    name: &str,
    settings: &EnvSettings,
    status: &S,
) -> Result<Map<String, Value>, Error>
where
    S: ReleaseStatus + ?Sized,
{
    let config = init_action_config(namespace, settings)?;
    Ok(release_values(&config, name, status)?)
}
