//! Filesystem access used by the resolver and the suggester.
//!
//! Everything goes through [`DocFs`] so the same engine can serve a real
//! directory ([`LocalFs`]) or a virtual tree ([`MemoryFs`]).

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// What a path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, devices, dangling symlinks from `read_dir`, etc.
    Other,
}

impl EntryKind {
    fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else if file_type.is_file() {
            Self::File
        } else {
            Self::Other
        }
    }
}

/// A single directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// Read-only filesystem operations the engine depends on.
///
/// Implementations must report a missing path as [`io::ErrorKind::NotFound`]
/// so callers can tell "not found" apart from other failures.
pub trait DocFs: Clone + Send + Sync + 'static {
    /// Stat a path, following symlinks.
    fn stat(&self, path: &Path) -> impl Future<Output = io::Result<EntryKind>> + Send;

    /// List the immediate entries of a directory, in no particular order.
    fn read_dir(&self, path: &Path) -> impl Future<Output = io::Result<Vec<DirEntry>>> + Send;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> impl Future<Output = io::Result<String>> + Send;
}

/// The real filesystem, via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl DocFs for LocalFs {
    async fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(EntryKind::from_file_type(metadata.file_type()))
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut reader = tokio::fs::read_dir(path).await?;
        let mut entries = Vec::new();

        while let Some(entry) = reader.next_entry().await? {
            let kind = EntryKind::from_file_type(entry.file_type().await?);
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
            });
        }

        Ok(entries)
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }
}

#[derive(Debug, Clone, Default)]
struct MemoryTree {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
}

/// An immutable in-memory document tree.
///
/// Directories are implied by the files added under them. Cloning is cheap;
/// all clones share the same tree.
///
/// ```ignore
/// let fs = MemoryFs::new()
///     .with_file("/srv/docs/index.md", "# Welcome")
///     .with_dir("/srv/docs/empty");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    tree: Arc<MemoryTree>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (and all of its ancestor directories).
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        let tree = Arc::make_mut(&mut self.tree);
        if let Some(parent) = path.parent() {
            insert_ancestors(&mut tree.dirs, parent);
        }
        tree.files.insert(path, content.into());
        self
    }

    /// Add an empty directory (and all of its ancestors).
    #[must_use]
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        insert_ancestors(&mut Arc::make_mut(&mut self.tree).dirs, path.as_ref());
        self
    }

    /// Make reads of an existing path fail with `PermissionDenied`.
    ///
    /// `stat` still succeeds, which mimics a file whose permissions forbid
    /// reading.
    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        Arc::make_mut(&mut self.tree).unreadable.insert(path.into());
        self
    }

    fn check_readable(&self, path: &Path) -> io::Result<()> {
        if self.tree.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("permission denied: {}", path.display()),
            ));
        }
        Ok(())
    }
}

fn insert_ancestors(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        dirs.insert(ancestor.to_path_buf());
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

impl DocFs for MemoryFs {
    async fn stat(&self, path: &Path) -> io::Result<EntryKind> {
        if self.tree.files.contains_key(path) {
            Ok(EntryKind::File)
        } else if self.tree.dirs.contains(path) {
            Ok(EntryKind::Directory)
        } else {
            Err(not_found(path))
        }
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        if !self.tree.dirs.contains(path) {
            if self.tree.files.contains_key(path) {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {}", path.display()),
                ));
            }
            return Err(not_found(path));
        }
        self.check_readable(path)?;

        let child_name = |child: &Path| {
            (child.parent() == Some(path))
                .then(|| child.file_name())
                .flatten()
                .map(|name| name.to_string_lossy().into_owned())
        };

        let dirs = self.tree.dirs.iter().filter_map(|dir| {
            child_name(dir).map(|name| DirEntry {
                name,
                kind: EntryKind::Directory,
            })
        });
        let files = self.tree.files.keys().filter_map(|file| {
            child_name(file).map(|name| DirEntry {
                name,
                kind: EntryKind::File,
            })
        });

        Ok(dirs.chain(files).collect())
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.check_readable(path)?;
        self.tree
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path))
    }
}
