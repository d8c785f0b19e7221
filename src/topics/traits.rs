// Term ranker trait — swap-ready abstraction.
//
// The pipeline only needs "titles in, ranking out". The default ranker is
// TF-IDF; a different weighting can be dropped in without touching the
// search pipeline or the report.

use super::ranking::TermRanking;

/// Rank the terms of a title corpus for one search.
pub trait TermRanker {
    /// Produce a ranking of `titles`, never counting `search_term` itself.
    fn rank(&self, titles: &[String], search_term: &str) -> TermRanking;
}
