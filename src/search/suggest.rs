//! "Might be relevant" suggestions for missed or broad requests.

use super::keywords::Keywords;
use super::scoring::{FileScore, rank_candidates};
use super::walk::{WalkCache, WalkCachePolicy};
use crate::fs::DocFs;
use futures::StreamExt;
use std::path::Path;
use tracing::{debug, warn};

/// Maximum number of suggested paths.
pub const MAX_SUGGESTIONS: usize = 10;

/// Upper bound on files read at once during a scan.
const MAX_CONCURRENT_READS: usize = 64;

/// First line of every suggestion block.
pub const SUGGESTION_HEADER: &str = "Here are some paths that might be relevant to your request:";

/// Scans Markdown trees and ranks files against request keywords.
#[derive(Debug)]
pub struct Suggester<F> {
    fs: F,
    walks: WalkCache,
}

impl<F: DocFs> Suggester<F> {
    pub fn new(fs: F, policy: WalkCachePolicy) -> Self {
        Self {
            fs,
            walks: WalkCache::new(policy),
        }
    }

    pub const fn walk_cache(&self) -> &WalkCache {
        &self.walks
    }

    /// Ranked paths (relative to whichever base they were found under) for
    /// a request path plus explicit query keywords.
    ///
    /// Returns an empty list when no keywords can be derived or nothing
    /// matches. Unreadable files are logged and skipped.
    pub async fn suggest_paths(
        &self,
        bases: &[&Path],
        request_path: &str,
        query_keywords: &[String],
    ) -> Vec<String> {
        let keywords = Keywords::derive(request_path, query_keywords);
        if keywords.is_empty() {
            return Vec::new();
        }
        debug!(
            path = request_path,
            keywords = ?keywords.iter().collect::<Vec<_>>(),
            "Building suggestions"
        );

        let mut candidates = Vec::new();
        for base in bases {
            match self.walks.markdown_files(&self.fs, base).await {
                Ok(files) => candidates.extend(files.iter().filter_map(|file| {
                    relative_display(base, file).map(|relative| (relative, file.clone()))
                })),
                Err(e) => warn!("Failed to scan {} for suggestions: {}", base.display(), e),
            }
        }

        let keywords = &keywords;
        let scores: Vec<FileScore> = futures::stream::iter(candidates)
            .map(|(relative, file)| async move {
                match self.fs.read_to_string(&file).await {
                    Ok(content) => Some(FileScore::compute(relative, &content, keywords)),
                    Err(e) => {
                        warn!("Skipping {} while scanning: {}", file.display(), e);
                        None
                    }
                }
            })
            .buffered(MAX_CONCURRENT_READS)
            .filter_map(std::future::ready)
            .collect()
            .await;

        rank_candidates(scores, keywords.len(), MAX_SUGGESTIONS)
            .into_iter()
            .map(|score| score.path)
            .collect()
    }

    /// Like [`Suggester::suggest_paths`], rendered as a suggestion block.
    /// Empty string when there is nothing to suggest.
    pub async fn suggest(
        &self,
        bases: &[&Path],
        request_path: &str,
        query_keywords: &[String],
    ) -> String {
        format_suggestions(&self.suggest_paths(bases, request_path, query_keywords).await)
    }
}

/// `/`-separated path of `file` relative to `base`.
fn relative_display(base: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(base).ok()?;
    Some(
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

pub fn format_suggestions(paths: &[String]) -> String {
    if paths.is_empty() {
        return String::new();
    }

    let mut block = format!("{}\n", SUGGESTION_HEADER);
    for path in paths {
        block.push_str("- ");
        block.push_str(path);
        block.push('\n');
    }
    block
}
