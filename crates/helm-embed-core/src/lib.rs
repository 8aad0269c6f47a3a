use serde::{Deserialize, Serialize};

pub const CHART_FILE_NAME: &str = "Chart.yaml";
pub const VALUES_FILE_NAME: &str = "values.yaml";
pub const TEMPLATES_DIR_NAME: &str = "templates";

/// A single chart file held in memory.
///
/// `name` is relative to the chart root and always uses forward slashes,
/// e.g. `Chart.yaml` or `templates/service.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BufferedFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl BufferedFile {
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }

    #[must_use]
    pub fn is_template(&self) -> bool {
        self.name
            .strip_prefix(TEMPLATES_DIR_NAME)
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub app_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub chart_type: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<DependencySpec>,
}

impl ChartMetadata {
    #[must_use]
    pub fn is_library(&self) -> bool {
        self.chart_type
            .as_deref()
            .is_some_and(|t| t.eq_ignore_ascii_case("library"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    pub name: String,
    pub version: Option<String>,
    pub repository: Option<String>,
    pub alias: Option<String>,
    pub condition: Option<String>,
}
