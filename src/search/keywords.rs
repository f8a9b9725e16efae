//! Keyword derivation from request paths and explicit query terms.

use crate::path::{last_segment, normalize_path};
use ahash::AHashSet;

/// Path tokens this short or shorter carry no signal.
const MIN_PATH_TOKEN_LENGTH: usize = 3;

/// Ordered, deduplicated, lowercase keyword set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
    terms: Vec<String>,
}

impl Keywords {
    /// Keywords from a request path unioned with explicit query keywords.
    pub fn derive(request_path: &str, query_keywords: &[String]) -> Self {
        let mut keywords = Self::default();
        let mut seen = AHashSet::new();

        for term in path_keywords(request_path)
            .into_iter()
            .chain(query_terms(query_keywords))
        {
            if seen.insert(term.clone()) {
                keywords.terms.push(term);
            }
        }

        keywords
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

/// Split on `-`, `_` and before every uppercase letter.
fn split_words(segment: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for ch in segment.chars() {
        if ch == '-' || ch == '_' {
            words.push(std::mem::take(&mut current));
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    words.push(current);

    words
}

fn strip_markdown_extension(segment: &str) -> &str {
    let lower = segment.to_ascii_lowercase();
    for ext in [".mdx", ".md"] {
        if lower.ends_with(ext) {
            return &segment[..segment.len() - ext.len()];
        }
    }
    segment
}

/// Keywords implied by the last segment of a request path.
///
/// `guides/gettingStarted.md` → `["getting", "started"]`
pub fn path_keywords(request_path: &str) -> Vec<String> {
    let normalized = normalize_path(request_path);
    let stem = strip_markdown_extension(last_segment(&normalized));

    let mut seen = AHashSet::new();
    split_words(stem)
        .into_iter()
        .filter(|word| word.chars().count() >= MIN_PATH_TOKEN_LENGTH)
        .map(|word| word.to_lowercase())
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// Whitespace-separated, lowercased terms from explicit query keywords.
pub fn query_terms(query_keywords: &[String]) -> Vec<String> {
    let mut seen = AHashSet::new();
    query_keywords
        .iter()
        .flat_map(|keyword| keyword.split_whitespace())
        .map(str::to_lowercase)
        .filter(|term| seen.insert(term.clone()))
        .collect()
}
