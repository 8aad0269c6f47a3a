use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::action::ActionConfig;
use crate::status::{Release, ReleaseStatus, StatusError};

/// Queries release status by running the helm binary.
#[derive(Debug, Clone, Default)]
pub struct HelmCli {
    binary: Option<PathBuf>,
}

impl HelmCli {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `binary` instead of the one named in the action settings.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = Some(binary.into());
        self
    }

    fn binary(&self, config: &ActionConfig) -> PathBuf {
        self.binary
            .clone()
            .unwrap_or_else(|| config.settings.helm_binary())
    }
}

pub(crate) fn status_args(config: &ActionConfig, name: &str) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "status".into(),
        name.into(),
        "--namespace".into(),
        config.namespace.as_str().into(),
        "--output".into(),
        "json".into(),
    ];
    let settings = &config.settings;
    if let Some(path) = &settings.kube_config {
        args.push("--kubeconfig".into());
        args.push(path.into());
    }
    if let Some(context) = &settings.kube_context {
        args.push("--kube-context".into());
        args.push(context.into());
    }
    if let Some(server) = &settings.kube_api_server {
        args.push("--kube-apiserver".into());
        args.push(server.into());
    }
    if let Some(token) = &settings.kube_token {
        args.push("--kube-token".into());
        args.push(token.into());
    }
    args
}

/// Helm's wording when the storage driver holds no such release.
const RELEASE_NOT_FOUND: &str = "release: not found";

pub(crate) fn parse_status(
    program: &str,
    config: &ActionConfig,
    name: &str,
    output: &Output,
) -> Result<Release, StatusError> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if stderr.contains(RELEASE_NOT_FOUND) {
            return Err(StatusError::ReleaseNotFound {
                name: name.to_string(),
                namespace: config.namespace.clone(),
            });
        }
        return Err(StatusError::CommandFailed {
            program: program.to_string(),
            code: output.status.code(),
            stderr,
        });
    }
    Ok(serde_json::from_slice(&output.stdout)?)
}

impl ReleaseStatus for HelmCli {
    fn status(&self, config: &ActionConfig, name: &str) -> Result<Release, StatusError> {
        let binary = self.binary(config);
        let program = binary.display().to_string();

        let mut cmd = Command::new(&binary);
        cmd.args(status_args(config, name));
        if let Some(driver) = &config.settings.driver {
            cmd.env("HELM_DRIVER", driver);
        }

        tracing::debug!(%program, release = name, namespace = %config.namespace, "running helm status");
        let output = cmd.output().map_err(|source| StatusError::Spawn {
            program: program.clone(),
            source,
        })?;
        parse_status(&program, config, name, &output)
    }
}
