use helm_embed_core::{BufferedFile, ChartMetadata};

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub metadata: ChartMetadata,
    /// Default values from `values.yaml`.
    pub values: serde_yaml::Mapping,
    pub templates: Vec<BufferedFile>,
    /// Everything that is neither metadata, values nor a template.
    pub files: Vec<BufferedFile>,
}

impl Chart {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn template(&self, name: &str) -> Option<&BufferedFile> {
        self.templates.iter().find(|t| t.name == name)
    }
}
