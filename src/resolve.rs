//! Mapping caller paths onto the document root.

use crate::config::DocRoot;
use crate::fs::{DocFs, EntryKind};
use crate::path::{has_traversal, join_segments, normalize_path};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error};

/// A caller path that was found under the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDocPath {
    pub absolute_path: PathBuf,
    /// Relative to the root; `.` is the root itself.
    pub relative_path: String,
    pub kind: EntryKind,
}

impl ResolvedDocPath {
    pub fn is_root(&self) -> bool {
        self.relative_path == "."
    }
}

/// Outcome of resolving one caller path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(ResolvedDocPath),
    NotFound,
    /// The path tried to escape the root. Nothing was touched on disk.
    SecurityViolation,
}

/// Resolves caller-supplied paths against a single [`DocRoot`].
#[derive(Debug, Clone)]
pub struct PathResolver<F> {
    root: Arc<DocRoot>,
    fs: F,
}

impl<F: DocFs> PathResolver<F> {
    pub fn new(root: Arc<DocRoot>, fs: F) -> Self {
        Self { root, fs }
    }

    pub fn root(&self) -> &DocRoot {
        &self.root
    }

    /// Resolve a raw caller path.
    ///
    /// Accepts both `guide.md` and `docs/guide.md` when the root is `docs`.
    /// `.` segments are dropped. The first candidate that exists wins.
    pub async fn resolve(&self, raw: &str) -> Resolution {
        let normalized = normalize_path(raw);
        if has_traversal(&normalized) {
            error!(path = raw, "Rejected path traversal attempt");
            return Resolution::SecurityViolation;
        }

        let normalized = join_segments(normalized.split('/').filter(|segment| *segment != "."));
        for candidate in self.candidates(&normalized) {
            let Some(target) = self.target_for(&candidate) else {
                error!(path = raw, candidate = %candidate, "Resolved target escapes document root");
                continue;
            };

            match self.fs.stat(&target).await {
                Ok(kind) => {
                    debug!(path = raw, target = %target.display(), ?kind, "Resolved document path");
                    return Resolution::Found(ResolvedDocPath {
                        absolute_path: target,
                        relative_path: candidate,
                        kind,
                    });
                }
                Err(e) => {
                    debug!(path = raw, candidate = %candidate, "Candidate not usable: {}", e);
                }
            }
        }

        Resolution::NotFound
    }

    /// Candidate root-relative paths for a normalized caller path, in
    /// priority order, without duplicates.
    fn candidates(&self, normalized: &str) -> Vec<String> {
        let prefix = self.root.relative_path();
        let mut candidates: Vec<String> = Vec::with_capacity(2);
        let mut push = |candidate: &str| {
            if !candidates.iter().any(|c| c == candidate) {
                candidates.push(candidate.to_string());
            }
        };

        if normalized.is_empty() {
            push(".");
        } else {
            push(normalized);
        }

        if let Some(stripped) = normalized
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|rest| !rest.is_empty())
        {
            push(stripped);
        }

        if normalized == prefix {
            push(".");
        }

        candidates
    }

    /// Absolute location of a candidate, or `None` if it would leave the root.
    fn target_for(&self, candidate: &str) -> Option<PathBuf> {
        let root = self.root.absolute_path();
        if candidate == "." {
            return Some(root.to_path_buf());
        }

        let mut target = root.to_path_buf();
        for component in Path::new(candidate).components() {
            match component {
                Component::Normal(segment) => target.push(segment),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }

        target.starts_with(root).then_some(target)
    }
}
