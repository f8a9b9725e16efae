//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for mdocs-mcp startup and plumbing.
///
/// Per-path query failures never use this; they become [`crate::DocResult::Error`]
/// entries instead.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when the configuration cannot produce a usable document root.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unexpected fields.
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The `docs` entry is not a usable relative path.
    #[error("invalid docs path '{path}': {reason}")]
    InvalidDocsPath { path: String, reason: &'static str },

    /// The `docs` entry does not point at an existing directory.
    #[error("docs directory {} does not exist or is not a directory", path.display())]
    MissingDocsDir { path: PathBuf },

    /// The `ttl` cache policy was selected without `ttl_secs`.
    #[error("walk_cache policy 'ttl' requires ttl_secs")]
    MissingTtl,
}
