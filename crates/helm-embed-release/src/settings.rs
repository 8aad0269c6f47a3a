use std::path::PathBuf;

pub const DEFAULT_HELM_BINARY: &str = "helm";

/// Connection settings for talking to a cluster through helm.
///
/// Mirrors the environment variables the helm CLI itself honours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    pub namespace: Option<String>,
    pub kube_config: Option<PathBuf>,
    pub kube_context: Option<String>,
    pub kube_api_server: Option<String>,
    pub kube_token: Option<String>,
    /// Release storage backend (`secret`, `configmap`, `memory`, ...).
    pub driver: Option<String>,
    pub helm_binary: Option<PathBuf>,
}

impl EnvSettings {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            namespace: get("HELM_NAMESPACE"),
            kube_config: get("KUBECONFIG").map(PathBuf::from),
            kube_context: get("HELM_KUBECONTEXT"),
            kube_api_server: get("HELM_KUBEAPISERVER"),
            kube_token: get("HELM_KUBETOKEN"),
            driver: get("HELM_DRIVER"),
            helm_binary: get("HELM_BIN").map(PathBuf::from),
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn with_kube_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.kube_config = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_kube_context(mut self, context: impl Into<String>) -> Self {
        self.kube_context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_kube_api_server(mut self, server: impl Into<String>) -> Self {
        self.kube_api_server = Some(server.into());
        self
    }

    #[must_use]
    pub fn with_kube_token(mut self, token: impl Into<String>) -> Self {
        self.kube_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    #[must_use]
    pub fn with_helm_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.helm_binary = Some(binary.into());
        self
    }

    #[must_use]
    pub fn helm_binary(&self) -> PathBuf {
        self.helm_binary
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HELM_BINARY))
    }
}
