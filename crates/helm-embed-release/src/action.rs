use std::path::PathBuf;

use crate::settings::EnvSettings;

pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("kubeconfig {0:?} does not exist")]
    MissingKubeconfig(PathBuf),
}

/// Everything a release action needs to reach the cluster for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    pub namespace: String,
    pub settings: EnvSettings,
}

/// Prepare an action configuration scoped to `namespace`.
///
/// An empty `namespace` falls back to the settings, then to `default`.
pub fn init_action_config(
    namespace: &str,
    settings: &EnvSettings,
) -> Result<ActionConfig, ConfigError> {
    let namespace = Some(namespace)
        .filter(|ns| !ns.is_empty())
        .or(settings.namespace.as_deref())
        .unwrap_or(DEFAULT_NAMESPACE)
        .to_string();

    if let Some(path) = &settings.kube_config
        && !path.exists()
    {
        return Err(ConfigError::MissingKubeconfig(path.clone()));
    }

    tracing::debug!(%namespace, "initialized action configuration");
    Ok(ActionConfig {
        namespace,
        settings: settings.clone(),
    })
}
