//! Recursive Markdown discovery with a per-directory, single-flight cache.
//!
//! Concurrent requests for the same base directory share one in-flight walk
//! via shared futures. How long a finished walk stays valid is governed by
//! [`WalkCachePolicy`].

use crate::fs::{DocFs, EntryKind};
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Type alias for shared walk futures.
type SharedWalk = Shared<BoxFuture<'static, Result<Arc<Vec<PathBuf>>, String>>>;

/// How long walked file lists are reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalkCachePolicy {
    /// Walk once per base directory for the life of the process. Files added
    /// later are invisible to suggestions until restart.
    #[default]
    Forever,
    /// Walk on every request.
    Disabled,
    /// Re-walk once an entry is older than the given age.
    Ttl(Duration),
}

struct CachedWalk {
    walk: SharedWalk,
    started: Instant,
}

/// Memoized Markdown file lists keyed by absolute base directory.
pub struct WalkCache {
    policy: WalkCachePolicy,
    entries: Mutex<HashMap<PathBuf, CachedWalk>>,
}

impl std::fmt::Debug for WalkCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalkCache")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl WalkCache {
    pub fn new(policy: WalkCachePolicy) -> Self {
        Self {
            policy,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub const fn policy(&self) -> WalkCachePolicy {
        self.policy
    }

    fn is_fresh(&self, cached: &CachedWalk) -> bool {
        match self.policy {
            WalkCachePolicy::Forever => true,
            WalkCachePolicy::Disabled => false,
            WalkCachePolicy::Ttl(ttl) => cached.started.elapsed() < ttl,
        }
    }

    /// All `.md` files under `base`, walking at most once per cache lifetime.
    ///
    /// A failed walk is not kept, so the next request retries it.
    pub async fn markdown_files<F: DocFs>(
        &self,
        fs: &F,
        base: &Path,
    ) -> Result<Arc<Vec<PathBuf>>, String> {
        if self.policy == WalkCachePolicy::Disabled {
            return walk_markdown(fs, base)
                .await
                .map(Arc::new)
                .map_err(|e| e.to_string());
        }

        let walk = {
            let mut entries = self.entries.lock().await;
            match entries.get(base) {
                Some(cached) if self.is_fresh(cached) => {
                    debug!("Walk cache hit for {}", base.display());
                    cached.walk.clone()
                }
                _ => {
                    let fs = fs.clone();
                    let dir = base.to_path_buf();
                    let walk_future: BoxFuture<'static, Result<Arc<Vec<PathBuf>>, String>> =
                        Box::pin(async move {
                            walk_markdown(&fs, &dir)
                                .await
                                .map(Arc::new)
                                .map_err(|e| e.to_string())
                        });
                    let shared = walk_future.shared();

                    entries.insert(
                        base.to_path_buf(),
                        CachedWalk {
                            walk: shared.clone(),
                            started: Instant::now(),
                        },
                    );
                    debug!("Walking {}", base.display());
                    shared
                }
            }
        };

        let result = walk.clone().await;

        if result.is_err() {
            let mut entries = self.entries.lock().await;
            if entries
                .get(base)
                .is_some_and(|cached| cached.walk.ptr_eq(&walk))
            {
                entries.remove(base);
            }
        }

        result
    }

    /// Forget every cached walk.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

/// Walk `base` depth-first with an explicit stack, collecting `.md` files.
///
/// Entries are visited in name order so repeated walks of an unchanged tree
/// yield the same sequence. Unreadable subdirectories are skipped; an
/// unreadable `base` is an error.
pub async fn walk_markdown<F: DocFs>(fs: &F, base: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![base.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = match fs.read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if dir == base => return Err(e),
            Err(e) => {
                warn!("Skipping unreadable directory {}: {}", dir.display(), e);
                continue;
            }
        };
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut subdirectories = Vec::new();
        for entry in entries {
            match entry.kind {
                EntryKind::Directory => subdirectories.push(dir.join(&entry.name)),
                EntryKind::File if entry.name.ends_with(".md") => files.push(dir.join(&entry.name)),
                _ => {}
            }
        }

        // Reversed so the stack pops them in name order.
        pending.extend(subdirectories.into_iter().rev());
    }

    Ok(files)
}
