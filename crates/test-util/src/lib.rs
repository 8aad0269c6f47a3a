use std::io::Write;
use std::path::PathBuf;
use std::sync::Once;

use color_eyre::eyre;
use vfs::VfsPath;

pub mod prelude {
    pub use crate::matchers::*;
    pub use crate::write;
    pub use crate::{Builder, LogLevel};
    pub use googletest::{assert_that, matcher::MatcherBase, matchers::*};
    pub use similar_asserts::assert_eq as sim_assert_eq;
}

/// Returns the workspace root directory via the `CARGO_WORKSPACE_DIR` env var
/// set in `.cargo/config.toml`.
///
/// # Panics
///
/// Panics if `CARGO_WORKSPACE_DIR` is not set.
#[must_use]
pub fn workspace_root() -> PathBuf {
    PathBuf::from(
        std::env::var("CARGO_WORKSPACE_DIR")
            .expect("CARGO_WORKSPACE_DIR must be set in .cargo/config.toml"),
    )
}

/// Returns the path to the workspace `testdata/` directory.
#[must_use]
pub fn workspace_testdata() -> PathBuf {
    workspace_root().join("testdata")
}

/// A `PhysicalFS` rooted at the workspace `testdata/` directory.
#[must_use]
pub fn testdata_vfs() -> VfsPath {
    VfsPath::new(vfs::PhysicalFS::new(workspace_testdata()))
}

/// Write `data` into the virtual filesystem at `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write(path: &VfsPath, data: impl AsRef<[u8]>) -> eyre::Result<VfsPath> {
    let _ = path.parent().create_dir_all();
    let mut file = path.create_file()?;
    file.write_all(data.as_ref())?;
    Ok(path.clone())
}

pub type LogLevel = tracing::metadata::Level;

static INIT_EYRE: Once = Once::new();
static INIT_TRACING: Once = Once::new();

#[derive(Default)]
pub struct TestGuard {}

/// Per-test setup. `RUST_LOG` overrides the default `debug` level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Builder {}

impl Builder {
    /// Initialize test.
    ///
    /// This ensures `color_eyre` and the test tracing subscriber are set up once.
    ///
    /// # Panics
    ///
    /// Panics if `color_eyre` installation fails.
    pub fn build(self) -> TestGuard {
        INIT_EYRE.call_once(|| {
            color_eyre::install().expect("failed to install eyre");
        });
        INIT_TRACING.call_once(|| {
            let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(LogLevel::DEBUG.to_string().to_ascii_lowercase())
            });
            // another test harness may already own the global subscriber
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_test_writer()
                .without_time()
                .try_init();
        });

        TestGuard::default()
    }
}

pub mod matchers {
    use googletest::matchers::predicate;
    use helm_embed_core::BufferedFile;

    /// Matches a buffered file by its chart-relative name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> impl for<'a> googletest::matcher::Matcher<&'a BufferedFile> {
        let name = name.into();
        predicate(move |f: &BufferedFile| f.name == name)
    }

    /// Matches a buffered file by name and exact content.
    #[must_use]
    pub fn buffered(
        name: impl Into<String>,
        data: impl AsRef<[u8]>,
    ) -> impl for<'a> googletest::matcher::Matcher<&'a BufferedFile> {
        let name = name.into();
        let data = data.as_ref().to_vec();
        predicate(move |f: &BufferedFile| f.name == name && f.data == data)
    }
}
