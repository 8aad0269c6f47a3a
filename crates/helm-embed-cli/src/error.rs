use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("chart root {0} is not a directory")]
    InvalidRoot(PathBuf),

    #[error("failed to collect chart files")]
    Collect(#[from] helm_embed::chart::Error),

    #[error("failed to load chart")]
    Load(#[from] helm_embed::chart::loader::Error),

    #[error("failed to fetch release values")]
    Release(#[from] helm_embed::release::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to create output directory {path}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output {path}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CliResult<T> = std::result::Result<T, CliError>;
