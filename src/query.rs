//! Batch query handling: resolve each requested path and gather results.

use crate::config::DocRoot;
use crate::fs::{DocFs, EntryKind};
use crate::listing::{available_paths, format_available_paths, list_directory};
use crate::resolve::{PathResolver, Resolution, ResolvedDocPath};
use crate::search::{Suggester, WalkCachePolicy};
use futures::future::{join_all, try_join_all};
use std::io;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Error text for rejected traversal attempts. Deliberately carries no detail.
pub const INVALID_PATH: &str = "Invalid path";

/// A Markdown file's content inside a directory result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Display path, including the root prefix.
    pub path: String,
    pub content: String,
}

/// Result for one requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocResult {
    File {
        path: String,
        content: String,
    },
    Directory {
        path: String,
        subdirectories: Vec<String>,
        files: Vec<String>,
        /// Contents of `files`, in the same order.
        documents: Vec<Document>,
        suggestions: Option<String>,
    },
    Error {
        path: String,
        error: String,
        suggestions: Option<String>,
    },
}

impl DocResult {
    /// The path as the caller requested it.
    pub fn path(&self) -> &str {
        match self {
            Self::File { path, .. }
            | Self::Directory { path, .. }
            | Self::Error { path, .. } => path,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::File { .. } => "file",
            Self::Directory { .. } => "directory",
            Self::Error { .. } => "error",
        }
    }

    pub fn suggestions(&self) -> Option<&str> {
        match self {
            Self::File { .. } => None,
            Self::Directory { suggestions, .. } | Self::Error { suggestions, .. } => {
                suggestions.as_deref()
            }
        }
    }
}

/// Answers document queries against one [`DocRoot`].
///
/// Each requested path is handled independently; a failure on one path only
/// ever produces an error entry for that path.
#[derive(Debug)]
pub struct QueryHandler<F> {
    root: Arc<DocRoot>,
    fs: F,
    resolver: PathResolver<F>,
    suggester: Suggester<F>,
}

impl<F: DocFs> QueryHandler<F> {
    pub fn new(root: Arc<DocRoot>, fs: F, walk_cache: WalkCachePolicy) -> Self {
        Self {
            resolver: PathResolver::new(root.clone(), fs.clone()),
            suggester: Suggester::new(fs.clone(), walk_cache),
            root,
            fs,
        }
    }

    pub fn root(&self) -> &DocRoot {
        &self.root
    }

    pub const fn suggester(&self) -> &Suggester<F> {
        &self.suggester
    }

    /// Handle a batch of paths concurrently; results keep request order.
    pub async fn handle(&self, paths: &[String], query_keywords: &[String]) -> Vec<DocResult> {
        debug!(
            paths = ?paths,
            keywords = ?query_keywords,
            "Handling document query"
        );
        join_all(paths.iter().map(|path| self.handle_path(path, query_keywords))).await
    }

    /// Handle a single requested path.
    pub async fn handle_path(&self, raw: &str, query_keywords: &[String]) -> DocResult {
        match self.resolver.resolve(raw).await {
            Resolution::SecurityViolation => DocResult::Error {
                path: raw.to_string(),
                error: INVALID_PATH.to_string(),
                suggestions: None,
            },
            Resolution::NotFound => self.not_found(raw, query_keywords).await,
            Resolution::Found(resolved) => {
                match self.read_resolved(raw, &resolved, query_keywords).await {
                    Ok(result) => result,
                    Err(e) => {
                        error!(
                            path = raw,
                            "Failed to read {}: {}",
                            resolved.absolute_path.display(),
                            e
                        );
                        DocResult::Error {
                            path: raw.to_string(),
                            error: e.to_string(),
                            suggestions: None,
                        }
                    }
                }
            }
        }
    }

    async fn read_resolved(
        &self,
        raw: &str,
        resolved: &ResolvedDocPath,
        query_keywords: &[String],
    ) -> io::Result<DocResult> {
        match resolved.kind {
            EntryKind::File => Ok(DocResult::File {
                path: raw.to_string(),
                content: self.fs.read_to_string(&resolved.absolute_path).await?,
            }),
            EntryKind::Directory => {
                let listing = list_directory(&self.fs, &self.root, resolved).await?;
                let documents = try_join_all(listing.files.iter().map(|file| async {
                    Ok::<_, io::Error>(Document {
                        path: file.display_path.clone(),
                        content: self.fs.read_to_string(&file.absolute_path).await?,
                    })
                }))
                .await?;

                Ok(DocResult::Directory {
                    path: raw.to_string(),
                    files: listing.file_paths(),
                    subdirectories: listing.subdirectories,
                    documents,
                    suggestions: self.suggestions(raw, query_keywords).await,
                })
            }
            EntryKind::Other => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file or directory",
            )),
        }
    }

    async fn not_found(&self, raw: &str, query_keywords: &[String]) -> DocResult {
        let available = available_paths(&self.fs, &self.root)
            .await
            .unwrap_or_else(|e| {
                warn!("Failed to list document root: {}", e);
                Vec::new()
            });

        let mut error = format!("Path \"{}\" not found.", raw);
        let block = format_available_paths(&available);
        if !block.is_empty() {
            error.push_str("\n\n");
            error.push_str(block.trim_end());
        }

        DocResult::Error {
            path: raw.to_string(),
            error,
            suggestions: self.suggestions(raw, query_keywords).await,
        }
    }

    async fn suggestions(&self, raw: &str, query_keywords: &[String]) -> Option<String> {
        let block = self
            .suggester
            .suggest(&[self.root.absolute_path()], raw, query_keywords)
            .await;
        (!block.is_empty()).then_some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;
    use assert2::{check, let_assert};

    fn handler(fs: MemoryFs) -> QueryHandler<MemoryFs> {
        let root = Arc::new(DocRoot::new("docs", "/srv/docs").unwrap());
        QueryHandler::new(root, fs, WalkCachePolicy::Forever)
    }

    fn sample() -> MemoryFs {
        MemoryFs::new()
            .with_file("/srv/docs/index.md", "Welcome")
            .with_file("/srv/docs/overview/a.md", "alpha overview")
            .with_file("/srv/docs/overview/b.md", "beta")
            .with_file("/srv/docs/overview/getting-started.md", "Start with the overview.")
            .with_file("/srv/docs/reference/api/client.md", "client api")
            .with_file("/srv/secret.md", "overview secret")
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_traversal_yields_bare_invalid_path() {
        let results = handler(sample())
            .handle(&paths(&["../secret.md"]), &paths(&["overview"]))
            .await;

        let_assert!([DocResult::Error { path, error, suggestions }] = results.as_slice());
        check!(path == "../secret.md");
        check!(error == INVALID_PATH);
        check!(suggestions.is_none());
    }

    #[tokio::test]
    async fn test_not_found_lists_available_paths_and_suggestions() {
        let result = handler(sample())
            .handle_path("unknown/path", &paths(&["overview"]))
            .await;

        let_assert!(DocResult::Error { error, suggestions: Some(suggestions), .. } = result);
        check!(error.starts_with("Path \"unknown/path\" not found."));
        check!(error.contains(
            "Available paths:\n- index.md\n- overview/\n- reference/\n- reference/api/"
        ));
        check!(suggestions.contains("overview/getting-started.md"));
    }

    #[tokio::test]
    async fn test_not_found_without_keywords_has_no_suggestions() {
        let result = handler(sample()).handle_path("x/yz", &[]).await;
        let_assert!(DocResult::Error { suggestions: None, .. } = result);
    }

    #[tokio::test]
    async fn test_directory_aggregates_documents() {
        let result = handler(sample()).handle_path("overview", &[]).await;

        let_assert!(
            DocResult::Directory {
                files,
                documents,
                suggestions,
                subdirectories,
                ..
            } = result
        );
        check!(subdirectories.is_empty());
        check!(
            files
                == vec![
                    "docs/overview/a.md",
                    "docs/overview/b.md",
                    "docs/overview/getting-started.md"
                ]
        );
        check!(documents.len() == 3);
        check!(documents[1].content == "beta");
        // "overview" is derived from the directory name itself.
        let_assert!(Some(suggestions) = suggestions);
        check!(suggestions.contains("overview/a.md"));
    }

    #[tokio::test]
    async fn test_read_failure_is_contained_per_path() {
        let fs = sample().with_unreadable("/srv/docs/overview/b.md");
        let results = handler(fs)
            .handle(&paths(&["overview/b.md", "index.md", "overview"]), &[])
            .await;

        let_assert!(DocResult::Error { error, suggestions: None, .. } = &results[0]);
        check!(error.contains("permission denied"));
        let_assert!(DocResult::File { content, .. } = &results[1]);
        check!(content == "Welcome");
        let_assert!(DocResult::Error { .. } = &results[2]);
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let results = handler(sample())
            .handle(&paths(&["index.md", "does-not-exist.md", "docs/overview/a.md"]), &[])
            .await;

        let kinds: Vec<_> = results.iter().map(DocResult::kind).collect();
        let paths: Vec<_> = results.iter().map(DocResult::path).collect();
        check!(kinds == vec!["file", "error", "file"]);
        check!(paths == vec!["index.md", "does-not-exist.md", "docs/overview/a.md"]);
    }
}
