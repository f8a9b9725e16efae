//! Relevance scoring for suggestion candidates.
//!
//! Content signals are gathered line by line; path signals come from the
//! candidate's own root-relative path.

use super::keywords::Keywords;
use ahash::AHashSet;

/// Bonus for living under `reference/`.
const REFERENCE_BONUS: u32 = 2;
/// Bonus per keyword contained in the path.
const PATH_KEYWORD_BONUS: u32 = 3;
/// Bonus for well-known orientation sections.
const SECTION_BONUS: u32 = 1;
const SECTION_MARKERS: &[&str] = &["guides", "getting-started", "architecture"];

const TITLE_WEIGHT: u32 = 3;
const PATH_WEIGHT: u32 = 2;
const COVERAGE_WEIGHT: u32 = 5;
const FULL_COVERAGE_BONUS: u32 = 10;

/// Per-file accumulator for a single suggestion request.
#[derive(Debug, Clone, Default)]
pub struct FileScore {
    /// Root-relative, `/`-separated.
    pub path: String,
    /// Distinct keywords seen anywhere in the content.
    pub keyword_matches: AHashSet<String>,
    pub total_matches: u32,
    /// Matches on lines that look like headings or titles.
    pub title_matches: u32,
    pub path_relevance: u32,
}

impl FileScore {
    /// Score a file's content against `keywords`.
    pub fn compute(path: String, content: &str, keywords: &Keywords) -> Self {
        let mut score = Self {
            path_relevance: path_relevance(&path, keywords),
            path,
            ..Self::default()
        };

        for line in content.lines() {
            let line = line.to_lowercase();
            let is_title = line.contains('#') || line.contains("title");

            for keyword in keywords.iter() {
                if !line.contains(keyword) {
                    continue;
                }
                score.total_matches = score.total_matches.saturating_add(1);
                if !score.keyword_matches.contains(keyword) {
                    score.keyword_matches.insert(keyword.to_string());
                }
                if is_title {
                    score.title_matches = score.title_matches.saturating_add(1);
                }
            }
        }

        score
    }

    /// True if any keyword matched a line of content. Path relevance only
    /// boosts files that already matched.
    pub fn is_candidate(&self) -> bool {
        !self.keyword_matches.is_empty()
    }

    /// Final ranking score.
    pub fn rank(&self, total_keywords: usize) -> u32 {
        let coverage = u32::try_from(self.keyword_matches.len()).unwrap_or(u32::MAX);
        let full_coverage = if total_keywords > 0 && self.keyword_matches.len() == total_keywords {
            FULL_COVERAGE_BONUS
        } else {
            0
        };

        self.total_matches
            .saturating_add(self.title_matches.saturating_mul(TITLE_WEIGHT))
            .saturating_add(self.path_relevance.saturating_mul(PATH_WEIGHT))
            .saturating_add(coverage.saturating_mul(COVERAGE_WEIGHT))
            .saturating_add(full_coverage)
    }
}

/// Structural bonus from a root-relative path.
pub fn path_relevance(path: &str, keywords: &Keywords) -> u32 {
    let lower = path.to_lowercase();
    let mut relevance: u32 = 0;

    if lower.starts_with("reference/") {
        relevance += REFERENCE_BONUS;
    }

    let keyword_hits = keywords.iter().filter(|k| lower.contains(*k)).count();
    relevance = relevance.saturating_add(
        u32::try_from(keyword_hits)
            .unwrap_or(u32::MAX)
            .saturating_mul(PATH_KEYWORD_BONUS),
    );

    if SECTION_MARKERS.iter().any(|marker| lower.contains(*marker)) {
        relevance = relevance.saturating_add(SECTION_BONUS);
    }

    relevance
}

/// Stable descending sort by rank; ties keep scan order.
pub fn rank_candidates(
    scores: Vec<FileScore>,
    total_keywords: usize,
    limit: usize,
) -> Vec<FileScore> {
    let mut ranked: Vec<(u32, FileScore)> = scores
        .into_iter()
        .filter(FileScore::is_candidate)
        .map(|score| (score.rank(total_keywords), score))
        .collect();

    ranked.sort_by(|(a, _), (b, _)| b.cmp(a));
    ranked.into_iter().take(limit).map(|(_, score)| score).collect()
}
