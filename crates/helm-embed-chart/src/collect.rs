use helm_embed_core::{BufferedFile, CHART_FILE_NAME, TEMPLATES_DIR_NAME, VALUES_FILE_NAME};

use crate::source::{ChartSource, SourceError};
use crate::util;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Missing {path:?}")]
    MissingFile {
        path: String,
        #[source]
        source: SourceError,
    },
    #[error("Missing templates directory {path:?}")]
    MissingTemplates {
        path: String,
        #[source]
        source: SourceError,
    },
    #[error("failed to read {path:?}")]
    Read {
        path: String,
        #[source]
        source: SourceError,
    },
    #[error("cannot express {path:?} relative to {base:?}")]
    Relativize { base: String, path: String },
    #[error("invalid chart path {0:?}")]
    InvalidPath(String),
}

impl Error {
    /// True if a required file or the templates directory is absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::MissingFile { .. } | Self::MissingTemplates { .. })
    }
}

fn join(base: &str, name: &str) -> Result<String, Error> {
    util::join(base, name).ok_or_else(|| Error::InvalidPath(format!("{base}/{name}")))
}

/// Read `path` from the source and name it relative to `prefix`.
fn read_file<S>(source: &S, path: &str, prefix: &str) -> Result<BufferedFile, Error>
where
    S: ChartSource + ?Sized,
{
    let data = source.read_file(path).map_err(|err| {
        if err.is_not_found() {
            Error::MissingFile {
                path: path.to_string(),
                source: err,
            }
        } else {
            Error::Read {
                path: path.to_string(),
                source: err,
            }
        }
    })?;

    let name = util::relative_to(prefix, path).ok_or_else(|| Error::Relativize {
        base: prefix.to_string(),
        path: path.to_string(),
    })?;

    Ok(BufferedFile { name, data })
}

/// Collect the files of the chart at `chart_dir` in the layout chart loaders
/// expect.
///
/// The result is `Chart.yaml`, `values.yaml` and then every regular file
/// directly below `templates/` in the order the source lists them. Names are
/// relative to `chart_dir`. Sub-directories of `templates/` are skipped.
///
/// # Errors
///
/// Fails if `Chart.yaml`, `values.yaml` or the `templates` directory is
/// missing, or if any file cannot be read.
pub fn collect_chart_files<S>(source: &S, chart_dir: &str) -> Result<Vec<BufferedFile>, Error>
where
    S: ChartSource + ?Sized,
{
    let mut chart_files = Vec::new();

    for name in [CHART_FILE_NAME, VALUES_FILE_NAME] {
        let path = join(chart_dir, name)?;
        let file = read_file(source, &path, chart_dir)?;
        tracing::debug!(name = %file.name, bytes = file.data.len(), "collected chart file");
        chart_files.push(file);
    }

    let templates_dir = join(chart_dir, TEMPLATES_DIR_NAME)?;
    let entries = source.read_dir(&templates_dir).map_err(|err| {
        if err.is_not_found() {
            Error::MissingTemplates {
                path: templates_dir.clone(),
                source: err,
            }
        } else {
            Error::Read {
                path: templates_dir.clone(),
                source: err,
            }
        }
    })?;

    for entry in entries {
        if entry.is_dir {
            tracing::trace!(dir = %entry.name, "skipping templates sub-directory");
            continue;
        }
        let path = join(&templates_dir, &entry.name)?;
        let file = read_file(source, &path, chart_dir)?;
        tracing::debug!(name = %file.name, bytes = file.data.len(), "collected template");
        chart_files.push(file);
    }

    Ok(chart_files)
}
