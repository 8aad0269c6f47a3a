use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::action::ActionConfig;

#[derive(thiserror::Error, Debug)]
pub enum StatusError {
    #[error("release {name:?} not found in namespace {namespace:?}")]
    ReleaseNotFound { name: String, namespace: String },
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {code:?}: {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("failed to decode release status")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReleaseInfo {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// An installed release as reported by the installer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Release {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    /// Revision number.
    #[serde(default)]
    pub version: u64,
    #[serde(default)]
    pub info: ReleaseInfo,
    /// User-supplied values the release was installed or upgraded with.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub config: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Looks up the current status of a named release.
pub trait ReleaseStatus {
    fn status(&self, config: &ActionConfig, name: &str) -> Result<Release, StatusError>;
}

impl<T: ReleaseStatus + ?Sized> ReleaseStatus for &T {
    fn status(&self, config: &ActionConfig, name: &str) -> Result<Release, StatusError> {
        (**self).status(config, name)
    }
}
