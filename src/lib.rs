//! Markdown documentation over MCP.
//!
//! Resolves caller-supplied paths inside a configured document root and, when a
//! path misses, suggests related documents ranked by keyword coverage.

pub mod config;
pub mod error;
pub mod format;
pub mod fs;
pub mod listing;
pub mod path;
pub mod query;
pub mod resolve;
pub mod search;
pub mod server;
pub mod tools;
pub mod tracing;

pub use config::{Config, DocRoot, ResponseFormat};
pub use error::ConfigError;
pub use fs::{DocFs, EntryKind, LocalFs, MemoryFs};
pub use query::{DocResult, Document, QueryHandler};
pub use resolve::{PathResolver, Resolution, ResolvedDocPath};
pub use search::{Suggester, WalkCachePolicy};
pub use server::DocsServer;
