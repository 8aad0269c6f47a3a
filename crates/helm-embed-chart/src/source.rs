use std::collections::BTreeMap;
use std::io::Read;

use vfs::VfsPath;

use crate::util;

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("not found: {path}")]
    NotFound { path: String },
    #[error("not a file: {path}")]
    NotAFile { path: String },
    #[error("not a directory: {path}")]
    NotADirectory { path: String },
    #[error("invalid path: {path}")]
    InvalidPath { path: String },
    #[error("vfs error at {path}")]
    Vfs {
        path: String,
        #[source]
        source: vfs::VfsError,
    },
    #[error("io error at {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::NotAFile { .. } | Self::NotADirectory { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name of the entry, without any leading directories.
    pub name: String,
    pub is_dir: bool,
}

/// A read-only file tree addressed by slash-separated paths.
///
/// Implementations must return directory entries in a stable order for an
/// unchanged tree. Callers do not re-sort the listing.
pub trait ChartSource {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, SourceError>;

    /// List the immediate children of `path`.
    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, SourceError>;
}

impl<T: ChartSource + ?Sized> ChartSource for &T {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        (**self).read_file(path)
    }

    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, SourceError> {
        (**self).read_dir(path)
    }
}

fn resolve(root: &VfsPath, path: &str) -> Result<VfsPath, SourceError> {
    let normalized = util::join("", path).ok_or_else(|| SourceError::InvalidPath {
        path: path.to_string(),
    })?;
    if normalized.is_empty() {
        return Ok(root.clone());
    }
    root.join(&normalized).map_err(|source| SourceError::Vfs {
        path: path.to_string(),
        source,
    })
}

/// Any `vfs` filesystem, rooted at this path.
impl ChartSource for VfsPath {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        let file = resolve(self, path)?;
        let vfs_err = |source| SourceError::Vfs {
            path: path.to_string(),
            source,
        };
        if !file.exists().map_err(vfs_err)? {
            return Err(SourceError::NotFound {
                path: path.to_string(),
            });
        }
        if !file.is_file().map_err(vfs_err)? {
            return Err(SourceError::NotAFile {
                path: path.to_string(),
            });
        }
        let mut buf = Vec::new();
        file.open_file()
            .map_err(vfs_err)?
            .read_to_end(&mut buf)
            .map_err(|source| SourceError::Io {
                path: path.to_string(),
                source,
            })?;
        Ok(buf)
    }

    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, SourceError> {
        let dir = resolve(self, path)?;
        let vfs_err = |source| SourceError::Vfs {
            path: path.to_string(),
            source,
        };
        if !dir.exists().map_err(vfs_err)? {
            return Err(SourceError::NotFound {
                path: path.to_string(),
            });
        }
        if !dir.is_dir().map_err(vfs_err)? {
            return Err(SourceError::NotADirectory {
                path: path.to_string(),
            });
        }
        let mut entries = Vec::new();
        for entry in dir.read_dir().map_err(vfs_err)? {
            entries.push(DirEntry {
                name: entry.filename(),
                is_dir: entry.is_dir().map_err(vfs_err)?,
            });
        }
        Ok(entries)
    }
}

/// A tree compiled into the binary as a table of `(path, bytes)` pairs.
///
/// ```
/// use helm_embed_chart::StaticTree;
///
/// static CHART: &[(&str, &[u8])] = &[
///     ("demo/Chart.yaml", b"name: demo\nversion: 0.1.0\n"),
///     ("demo/values.yaml", b"{}\n"),
/// ];
/// let tree = StaticTree::new(CHART.iter().copied());
/// assert!(tree.contains("demo/Chart.yaml"));
/// ```
///
/// Directories are implied by the file paths. Listings are in byte-wise
/// lexicographic order of the entry names, files and sub-directories alike.
#[derive(Debug, Clone, Default)]
pub struct StaticTree {
    files: BTreeMap<String, &'static [u8]>,
}

impl StaticTree {
    /// Build a tree from file entries. Paths are normalized; entries that
    /// escape the root are dropped.
    pub fn new(files: impl IntoIterator<Item = (&'static str, &'static [u8])>) -> Self {
        let files = files
            .into_iter()
            .filter_map(|(path, data)| {
                let path = util::join("", path)?;
                (!path.is_empty()).then_some((path, data))
            })
            .collect();
        Self { files }
    }

    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        util::join("", path).is_some_and(|p| self.files.contains_key(&p))
    }

    fn is_dir(&self, dir: &str) -> bool {
        if dir.is_empty() {
            return !self.files.is_empty();
        }
        let prefix = format!("{dir}/");
        self.files
            .range(prefix.clone()..)
            .next()
            .is_some_and(|(p, _)| p.starts_with(&prefix))
    }
}

impl ChartSource for StaticTree {
    fn read_file(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        let key = util::join("", path).ok_or_else(|| SourceError::InvalidPath {
            path: path.to_string(),
        })?;
        match self.files.get(&key) {
            Some(data) => Ok(data.to_vec()),
            None if self.is_dir(&key) => Err(SourceError::NotAFile {
                path: path.to_string(),
            }),
            None => Err(SourceError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    fn read_dir(&self, path: &str) -> Result<Vec<DirEntry>, SourceError> {
        let key = util::join("", path).ok_or_else(|| SourceError::InvalidPath {
            path: path.to_string(),
        })?;
        if self.files.contains_key(&key) {
            return Err(SourceError::NotADirectory {
                path: path.to_string(),
            });
        }
        if !self.is_dir(&key) {
            return Err(SourceError::NotFound {
                path: path.to_string(),
            });
        }

        let prefix = if key.is_empty() {
            String::new()
        } else {
            format!("{key}/")
        };
        let mut entries: Vec<DirEntry> = Vec::new();
        for p in self.files.keys().filter(|p| p.starts_with(&prefix)) {
            let rest = &p[prefix.len()..];
            let (name, is_dir) = match rest.split_once('/') {
                Some((dir, _)) => (dir, true),
                None => (rest, false),
            };
            // keys are sorted, so children of one sub-directory are adjacent
            if entries.last().is_some_and(|last| last.name == name) {
                continue;
            }
            entries.push(DirEntry {
                name: name.to_string(),
                is_dir,
            });
        }
        // by entry name; `a.yaml` precedes `a/x` as a stored path
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}
