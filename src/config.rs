//! Server configuration and the document root it describes.
//!
//! The config file is a small TOML document:
//!
//! ```toml
//! docs = "docs"
//! response_format = "legacy"
//!
//! [walk_cache]
//! policy = "ttl"
//! ttl_secs = 30
//! ```
//!
//! `docs` is resolved relative to the directory containing the config file.

use crate::error::ConfigError;
use crate::path::{has_traversal, normalize_path};
use crate::search::WalkCachePolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file name looked up by the binary.
pub const DEFAULT_CONFIG_FILE: &str = "mdocs.toml";

/// The single directory tree that is safe to expose.
///
/// Every resolved document lies on or under [`DocRoot::absolute_path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRoot {
    /// Location relative to the config file, e.g. `docs`. Never empty, never `.`.
    relative_path: String,
    /// Resolved location on the (possibly virtual) filesystem.
    absolute_path: PathBuf,
}

impl DocRoot {
    /// Build a root from an already-resolved absolute location.
    ///
    /// The relative path is normalized and must name a subdirectory: empty
    /// paths, `.` and anything containing `..` are rejected.
    pub fn new(
        relative_path: &str,
        absolute_path: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            relative_path: validate_relative(relative_path)?,
            absolute_path: absolute_path.into(),
        })
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }
}

fn validate_relative(raw: &str) -> Result<String, ConfigError> {
    let normalized = normalize_path(raw);
    let invalid = |reason| ConfigError::InvalidDocsPath {
        path: raw.to_string(),
        reason,
    };

    if normalized.is_empty() || normalized == "." {
        return Err(invalid("must name a subdirectory of the config directory"));
    }
    if has_traversal(&normalized) {
        return Err(invalid("must not contain '..'"));
    }

    Ok(normalized)
}

/// How query results are rendered into the tool response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// `## <path>` sections separated by `---`.
    #[default]
    Legacy,
    /// One frontmatter-tagged block per requested path.
    Structured,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CachePolicyKind {
    #[default]
    Forever,
    Disabled,
    Ttl,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct WalkCacheSection {
    #[serde(default)]
    policy: CachePolicyKind,
    ttl_secs: Option<u64>,
}

/// Parsed contents of the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Document root, relative to the config file.
    pub docs: String,
    #[serde(default)]
    pub response_format: ResponseFormat,
    #[serde(default)]
    walk_cache: WalkCacheSection,
}

impl Config {
    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse config text; `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the document root against the config file's directory.
    ///
    /// The absolute location is canonicalized, so it must exist.
    pub fn doc_root(&self, config_path: &Path) -> Result<DocRoot, ConfigError> {
        let relative = validate_relative(&self.docs)?;
        let base = config_path.parent().unwrap_or_else(|| Path::new(""));
        let joined = base.join(&relative);

        let absolute = std::fs::canonicalize(&joined)
            .ok()
            .filter(|p| p.is_dir())
            .ok_or(ConfigError::MissingDocsDir { path: joined })?;

        Ok(DocRoot {
            relative_path: relative,
            absolute_path: absolute,
        })
    }

    /// The walk cache policy described by the `[walk_cache]` table.
    pub fn walk_cache_policy(&self) -> Result<WalkCachePolicy, ConfigError> {
        match self.walk_cache.policy {
            CachePolicyKind::Forever => Ok(WalkCachePolicy::Forever),
            CachePolicyKind::Disabled => Ok(WalkCachePolicy::Disabled),
            CachePolicyKind::Ttl => self
                .walk_cache
                .ttl_secs
                .map(|secs| WalkCachePolicy::Ttl(Duration::from_secs(secs)))
                .ok_or(ConfigError::MissingTtl),
        }
    }
}
