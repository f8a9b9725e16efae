//! Shared test fixtures and utilities for integration tests.
//!
//! Each test gets its own temporary directory laid out like a real project:
//! a `mdocs.toml` next to a `docs/` tree. Nothing is shared between tests, so
//! walk caches always start cold.

use mdocs_mcp::{Config, DocRoot, LocalFs, QueryHandler, WalkCachePolicy};
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A temporary project directory for test isolation.
///
/// Provides basic filesystem operations within a temp directory that is
/// automatically cleaned up when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a directory (and all parent directories) within this workspace.
    ///
    /// # Panics
    /// Panics if directory creation fails.
    pub fn create_dir(&self, path: &str) {
        let full_path = self.root.join(path);
        std::fs::create_dir_all(&full_path)
            .unwrap_or_else(|e| panic!("Failed to create directory '{}': {}", path, e));
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Writes `mdocs.toml` pointing at `docs` and returns its path.
    pub fn create_config(&self, docs: &str) -> PathBuf {
        let path = self.root.join("mdocs.toml");
        std::fs::write(&path, format!("docs = \"{}\"\n", docs))
            .unwrap_or_else(|e| panic!("Failed to write config: {}", e));
        path
    }

    /// Loads the workspace config and resolves its document root.
    pub fn doc_root(&self) -> DocRoot {
        let config_path = self.root.join("mdocs.toml");
        let config = Config::load(&config_path).expect("Failed to load config");
        config.doc_root(&config_path).expect("Failed to resolve doc root")
    }

    /// Builds a query handler over the real filesystem.
    pub fn handler(&self, walk_cache: WalkCachePolicy) -> QueryHandler<LocalFs> {
        QueryHandler::new(Arc::new(self.doc_root()), LocalFs, walk_cache)
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// A small documentation project used by most scenarios.
///
/// ```text
/// mdocs.toml
/// package.json
/// docs/
///   index.md
///   overview/a.md
///   overview/b.md
///   overview/getting-started.md
///   guides/deploying.md
///   reference/api/client.md
/// ```
#[fixture]
pub fn docs_workspace() -> TempWorkspace {
    let workspace = TempWorkspace::new();
    workspace.create_config("docs");
    workspace.create_file("package.json", r#"{"name": "outside-the-root"}"#);
    workspace.create_file("docs/index.md", "# Home\n\nWelcome to the docs.\n");
    workspace.create_file("docs/overview/a.md", "# A\n\nFirst part.\n");
    workspace.create_file("docs/overview/b.md", "# B\n\nSecond part.\n");
    workspace.create_file(
        "docs/overview/getting-started.md",
        "# Getting started\n\nThis overview walks through installation.\n",
    );
    workspace.create_file(
        "docs/guides/deploying.md",
        "# Deploying\n\nShip it with docker.\n",
    );
    workspace.create_file(
        "docs/reference/api/client.md",
        "# Client\n\nThe client API reference.\n",
    );
    workspace
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
