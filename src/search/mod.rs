//! Keyword-driven relevance suggestions over a Markdown tree.
//!
//! This module derives keywords from request paths and query terms, walks the
//! document tree, scores each file by keyword coverage and structural cues,
//! and renders the top candidates.

// Module declarations
pub(crate) mod keywords;
pub(crate) mod scoring;
pub(crate) mod suggest;
pub(crate) mod walk;

// Public re-exports (used via lib.rs)
pub use keywords::{Keywords, path_keywords, query_terms};
pub use scoring::{FileScore, path_relevance, rank_candidates};
pub use suggest::{MAX_SUGGESTIONS, SUGGESTION_HEADER, Suggester, format_suggestions};
pub use walk::{WalkCache, WalkCachePolicy, walk_markdown};
