//! Fuzzy keyword matching.
//!
//! A keyword matches a query when the characters of the keyword that occur in
//! the query, read left to right, spell out exactly the query. Every occurrence
//! counts, so `"python"` matches `"pyn"` while `"lualua"` does not match `"lu"`
//! (its filtered sequence is `"lulu"`). Comparison is case-insensitive.

use super::scoring::squared_position_score;
use std::collections::HashSet;

/// A matched keyword and its score (lower is better).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch<'a> {
    pub keyword: &'a str,
    pub score: u64,
}

/// A lowercased query, prepared once and matched against many keywords.
#[derive(Debug, Clone)]
pub struct QueryPattern {
    chars: Vec<char>,
    charset: HashSet<char>,
}

impl QueryPattern {
    pub fn new(query: &str) -> Self {
        let chars: Vec<char> = query.to_lowercase().chars().collect();
        let charset = chars.iter().copied().collect();
        Self { chars, charset }
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Scores `keyword` against this pattern, or `None` if it doesn't match.
    pub fn score(&self, keyword: &str) -> Option<u64> {
        let lowered: Vec<char> = keyword.to_lowercase().chars().collect();

        // cheap pre-filter: the keyword must contain every query character
        let keyword_chars: HashSet<char> = lowered.iter().copied().collect();
        if !self.charset.is_subset(&keyword_chars) {
            return None;
        }

        let mut positions = Vec::with_capacity(self.chars.len());
        let mut expected = self.chars.iter();
        for (pos, c) in lowered.iter().enumerate() {
            if !self.charset.contains(c) {
                continue;
            }
            if expected.next() != Some(c) {
                return None;
            }
            positions.push(pos);
        }
        if expected.next().is_some() {
            return None;
        }

        Some(squared_position_score(positions))
    }
}

/// Filters `keywords` down to those matching `query`, with scores, best first.
///
/// The sort is stable: keywords with equal scores keep their input order.
pub fn rank_keywords<'a, I>(keywords: I, query: &str) -> Vec<KeywordMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let pattern = QueryPattern::new(query);
    let mut matches: Vec<KeywordMatch<'a>> = keywords
        .into_iter()
        .filter_map(|keyword| {
            pattern
                .score(keyword)
                .map(|score| KeywordMatch { keyword, score })
        })
        .collect();

    matches.sort_by_key(|m| m.score);
    matches
}

/// Returns the keywords matching `query`, best first.
///
/// An empty query matches every keyword with score 0, so the input order is
/// returned unchanged. No match yields an empty vector.
pub fn filter_and_rank<'a, I>(keywords: I, query: &str) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    rank_keywords(keywords, query)
        .into_iter()
        .map(|m| m.keyword)
        .collect()
}
