use helm_embed_core::{BufferedFile, CHART_FILE_NAME, ChartMetadata, VALUES_FILE_NAME};

use crate::collect::{self, collect_chart_files};
use crate::model::Chart;
use crate::source::ChartSource;

const DEFAULT_API_VERSION: &str = "v1";

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("Chart.yaml file is missing")]
    MissingChartYaml,
    #[error("failed to parse {name}")]
    Parse {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid chart metadata: {0}")]
    InvalidMetadata(&'static str),
    #[error("values.yaml must contain a mapping")]
    InvalidValues,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to collect chart files")]
    Collect(#[from] collect::Error),
    #[error("failed to load chart")]
    Load(#[from] LoadError),
}

fn parse_metadata(file: &BufferedFile) -> Result<ChartMetadata, LoadError> {
    let mut metadata: ChartMetadata =
        serde_yaml::from_slice(&file.data).map_err(|source| LoadError::Parse {
            name: file.name.clone(),
            source,
        })?;
    if metadata.name.trim().is_empty() {
        return Err(LoadError::InvalidMetadata("name is required"));
    }
    if metadata.version.trim().is_empty() {
        return Err(LoadError::InvalidMetadata("version is required"));
    }
    if metadata.api_version.as_deref().is_none_or(str::is_empty) {
        metadata.api_version = Some(DEFAULT_API_VERSION.to_string());
    }
    Ok(metadata)
}

fn parse_values(file: &BufferedFile) -> Result<serde_yaml::Mapping, LoadError> {
    let value: serde_yaml::Value =
        serde_yaml::from_slice(&file.data).map_err(|source| LoadError::Parse {
            name: file.name.clone(),
            source,
        })?;
    match value {
        serde_yaml::Value::Null => Ok(serde_yaml::Mapping::new()),
        serde_yaml::Value::Mapping(m) => Ok(m),
        _ => Err(LoadError::InvalidValues),
    }
}

/// Assemble a chart from buffered files.
///
/// `Chart.yaml` is required. `values.yaml` is optional and defaults to an
/// empty mapping. Files under `templates/` keep their input order.
pub fn load_files(files: Vec<BufferedFile>) -> Result<Chart, LoadError> {
    let mut metadata = None;
    let mut values = serde_yaml::Mapping::new();
    let mut templates = vec![];
    let mut other = vec![];

    for file in files {
        if file.name == CHART_FILE_NAME {
            metadata = Some(parse_metadata(&file)?);
        } else if file.name == VALUES_FILE_NAME {
            values = parse_values(&file)?;
        } else if file.is_template() {
            templates.push(file);
        } else {
            other.push(file);
        }
    }

    let metadata = metadata.ok_or(LoadError::MissingChartYaml)?;
    Ok(Chart {
        metadata,
        values,
        templates,
        files: other,
    })
}

/// Load the chart stored under `chart_dir` in `source`.
pub fn load_chart<S>(source: &S, chart_dir: &str) -> Result<Chart, Error>
where
    S: ChartSource + ?Sized,
{
    let files = collect_chart_files(source, chart_dir)?;
    let chart = load_files(files)?;
    tracing::debug!(
        name = %chart.metadata.name,
        version = %chart.metadata.version,
        templates = chart.templates.len(),
        "loaded chart"
    );
    Ok(chart)
}
