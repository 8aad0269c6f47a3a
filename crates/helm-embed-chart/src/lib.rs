pub mod collect;
pub mod loader;
pub mod model;
pub mod source;
mod util;

pub use collect::{Error, collect_chart_files};
pub use helm_embed_core::BufferedFile;
pub use loader::{LoadError, load_chart, load_files};
pub use model::Chart;
pub use source::{ChartSource, DirEntry, SourceError, StaticTree};
