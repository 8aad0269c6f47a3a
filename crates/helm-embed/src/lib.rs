//! Load Helm charts bundled into a program and read back the values of
//! installed releases.
//!
//! ```
//! use helm_embed::{StaticTree, load_chart};
//!
//! static CHART: &[(&str, &[u8])] = &[
//!     ("consul/Chart.yaml", b"name: consul\nversion: 1.0.0\n"),
//!     ("consul/values.yaml", b"global: {}\n"),
//!     ("consul/templates/server.yaml", b"kind: StatefulSet\n"),
//! ];
//!
//! let chart = load_chart(&StaticTree::new(CHART.iter().copied()), "consul").unwrap();
//! assert_eq!(chart.templates[0].name, "templates/server.yaml");
//! ```

pub mod logging;

pub use helm_embed_chart::{
    BufferedFile, Chart, ChartSource, DirEntry, LoadError, SourceError, StaticTree,
    collect_chart_files, load_chart, load_files,
};
pub use helm_embed_core::{ChartMetadata, DependencySpec};
pub use helm_embed_release::{
    ActionConfig, EnvSettings, HelmCli, Release, ReleaseStatus, fetch_chart_values,
    init_action_config, release_values,
};

pub mod chart {
    pub use helm_embed_chart::{Error, loader, source};
}

pub mod release {
    pub use helm_embed_release::{ConfigError, Error, StatusError};
}
