//! Fuzzy keyword matching and match scoring.
//!
//! The matcher is a pure function over a list of keywords: it never sees the
//! registry, only the keywords the caller hands it.

pub(crate) mod fuzzy;
pub(crate) mod scoring;

pub use fuzzy::{KeywordMatch, QueryPattern, filter_and_rank, rank_keywords};
pub use scoring::squared_position_score;
