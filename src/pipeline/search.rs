// Search pipeline: one arXiv query, one ranking pass.
//
// `run_search` is the single entry point the report uses. It never retries
// and never returns partial results: if retrieval or parsing fails, the
// caller gets the error and nothing else.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::arxiv::categories::{self, LabelCount};
use crate::arxiv::client::ArxivClient;
use crate::arxiv::feed::{FeedItem, FeedPage};
use crate::error::SearchError;
use crate::topics::ranking::{ScoredTerm, TermCount, TfIdfRanker};
use crate::topics::traits::TermRanker;

/// Per-search knobs.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub max_results: usize,
    pub top_n: usize,
    pub extra_stop_terms: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_results: crate::arxiv::client::DEFAULT_MAX_RESULTS,
            top_n: crate::topics::ranking::DEFAULT_TOP_N,
            extra_stop_terms: Vec::new(),
        }
    }
}

/// Everything the report needs for one search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub term: String,
    /// Papers in feed order
    pub items: Vec<FeedItem>,
    pub top_terms: Vec<ScoredTerm>,
    pub term_counts: Vec<TermCount>,
    pub full_score_vector: BTreeMap<String, f64>,
    pub total_results: Option<u64>,
}

impl SearchResult {
    /// Items newest first. Ties keep feed order.
    pub fn recent_items(&self) -> Vec<&FeedItem> {
        let mut items: Vec<&FeedItem> = self.items.iter().collect();
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        items
    }

    /// Mean TF-IDF weight of `term`, if it is in the vocabulary.
    pub fn score_of(&self, term: &str) -> Option<f64> {
        self.full_score_vector.get(term).copied()
    }

    /// Publication timestamps in feed order.
    pub fn dates(&self) -> Vec<DateTime<Utc>> {
        self.items.iter().map(|i| i.published_at).collect()
    }

    /// Category labels counted in order of first appearance.
    pub fn categories(&self) -> Vec<LabelCount> {
        categories::count_labels(self.items.iter().map(|i| i.category_code.as_str()))
    }
}

/// Fetch papers for `term` and rank their title terms.
pub async fn run_search(
    client: &ArxivClient,
    term: &str,
    settings: &SearchSettings,
) -> Result<SearchResult, SearchError> {
    let page = client.fetch(term, settings.max_results).await?;
    Ok(analyze(term, page, settings))
}

/// The network-free half of a search: rank the titles of an already
/// parsed feed page and assemble the result.
pub fn analyze(term: &str, page: FeedPage, settings: &SearchSettings) -> SearchResult {
    let ranker = TfIdfRanker {
        top_n: settings.top_n,
        extra_stop_terms: settings.extra_stop_terms.clone(),
    };
    analyze_with(&ranker, term, page)
}

/// Same as [`analyze`] with a caller-chosen ranker.
pub fn analyze_with(ranker: &dyn TermRanker, term: &str, page: FeedPage) -> SearchResult {
    let titles: Vec<String> = page.items.iter().map(|i| i.title.clone()).collect();
    let ranking = ranker.rank(&titles, term);

    info!(
        term = term,
        papers = page.items.len(),
        top_terms = ranking.top_terms.len(),
        "Search analyzed"
    );

    SearchResult {
        term: term.to_string(),
        items: page.items,
        top_terms: ranking.top_terms,
        term_counts: ranking.term_counts,
        full_score_vector: ranking.full_score_vector,
        total_results: page.total_results,
    }
}
