// Term ranking over a title corpus.
//
// Two separate rankings come out of one TF-IDF model:
//   - top_terms:   the N terms with the highest mean weight (distinctiveness)
//   - term_counts: those same N terms re-sorted by raw occurrence count
//                  (popularity)
// Both sorts are stable, so ties keep vocabulary order, then score order.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::info;

use super::stopwords::StopTermSet;
use super::tfidf::TfIdfModel;
use super::traits::TermRanker;

/// Default number of top terms.
pub const DEFAULT_TOP_N: usize = 10;

/// A term with its mean TF-IDF weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTerm {
    pub term: String,
    pub score: f64,
}

/// A term with its raw occurrence count across all titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: u32,
}

/// Output of one ranking pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TermRanking {
    /// At most `top_n` terms, descending by mean weight
    pub top_terms: Vec<ScoredTerm>,
    /// The same terms as `top_terms`, descending by raw count
    pub term_counts: Vec<TermCount>,
    /// Mean weight of every surviving term
    pub full_score_vector: BTreeMap<String, f64>,
}

impl TermRanking {
    pub fn is_empty(&self) -> bool {
        self.full_score_vector.is_empty()
    }
}

/// Rank title terms, excluding English stop words, the fixed denylist and
/// `search_term` itself.
pub fn rank<S: AsRef<str>>(titles: &[S], search_term: &str, top_n: usize) -> TermRanking {
    rank_with(titles, &StopTermSet::for_search(search_term), top_n)
}

/// Rank title terms against an explicit stop-term set.
///
/// Never fails: an empty corpus, or one where every token is a stop term,
/// yields an empty ranking.
pub fn rank_with<S: AsRef<str>>(
    titles: &[S],
    stop_terms: &StopTermSet,
    top_n: usize,
) -> TermRanking {
    if titles.is_empty() {
        return TermRanking::default();
    }

    let model = TfIdfModel::fit(titles, stop_terms);
    let vocabulary = model.vocabulary();
    let means = model.mean_weights();
    let totals = model.total_counts();

    // Column indices sorted by mean weight, descending. `sort_by` is
    // stable, so equal scores keep vocabulary order.
    let mut order: Vec<usize> = (0..vocabulary.len()).collect();
    order.sort_by(|&a, &b| means[b].total_cmp(&means[a]));
    order.truncate(top_n);

    let top_terms: Vec<ScoredTerm> = order
        .iter()
        .map(|&col| ScoredTerm {
            term: vocabulary[col].clone(),
            score: means[col],
        })
        .collect();

    let mut term_counts: Vec<TermCount> = order
        .iter()
        .map(|&col| TermCount {
            term: vocabulary[col].clone(),
            count: totals[col],
        })
        .collect();
    term_counts.sort_by(|a, b| b.count.cmp(&a.count));

    let full_score_vector: BTreeMap<String, f64> = vocabulary
        .iter()
        .cloned()
        .zip(means.iter().copied())
        .collect();

    if let Some(first) = top_terms.first() {
        info!(
            titles = titles.len(),
            vocabulary = vocabulary.len(),
            top_term = %first.term,
            top_score = first.score,
            "Ranked title terms"
        );
    }

    TermRanking {
        top_terms,
        term_counts,
        full_score_vector,
    }
}

/// TF-IDF ranker with a fixed top-N and optional extra stop terms.
#[derive(Debug, Clone)]
pub struct TfIdfRanker {
    pub top_n: usize,
    pub extra_stop_terms: Vec<String>,
}

impl Default for TfIdfRanker {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            extra_stop_terms: Vec::new(),
        }
    }
}

impl TermRanker for TfIdfRanker {
    fn rank(&self, titles: &[String], search_term: &str) -> TermRanking {
        let mut stop_terms = StopTermSet::for_search(search_term);
        stop_terms.extend(self.extra_stop_terms.iter().cloned());
        rank_with(titles, &stop_terms, self.top_n)
    }
}
