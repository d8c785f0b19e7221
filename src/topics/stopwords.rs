// Stop-term sets for title ranking.
//
// The English list is loaded once per process through `english()`; every
// search then builds its own `StopTermSet` on top of it, adding the fixed
// denylist and the search term itself so the query never ranks as its own
// most important term.

use std::collections::HashSet;
use std::sync::OnceLock;

use stop_words::{get, LANGUAGE};
use tracing::debug;

/// Words that show up in paper titles regardless of topic.
pub const DENYLIST: [&str; 3] = ["survey", "research", "new"];

static ENGLISH: OnceLock<Vec<String>> = OnceLock::new();

/// The English stop-word list, loaded on first use and reused afterwards.
///
/// Safe to call any number of times; only the first call builds the list.
pub fn english() -> &'static [String] {
    ENGLISH.get_or_init(|| {
        let words: Vec<String> = get(LANGUAGE::English)
            .into_iter()
            .map(|w| w.to_lowercase())
            .collect();
        debug!(count = words.len(), "Loaded English stop words");
        words
    })
}

/// Exclusion set for one search.
#[derive(Debug, Clone, Default)]
pub struct StopTermSet {
    terms: HashSet<String>,
}

impl StopTermSet {
    /// English stop words + denylist + the search term in raw, lower and
    /// upper case.
    pub fn for_search(search_term: &str) -> Self {
        Self::with_base(english(), search_term)
    }

    /// Same as [`StopTermSet::for_search`] but over a caller-supplied base
    /// list instead of the English one.
    pub fn with_base<S: AsRef<str>>(base: &[S], search_term: &str) -> Self {
        let mut terms: HashSet<String> = base.iter().map(|w| w.as_ref().to_string()).collect();
        terms.extend(DENYLIST.iter().map(|w| w.to_string()));
        terms.insert(search_term.to_string());
        terms.insert(search_term.to_lowercase());
        terms.insert(search_term.to_uppercase());
        Self { terms }
    }

    /// Add extra terms (e.g. from configuration).
    pub fn extend<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms.extend(extra.into_iter().map(Into::into));
    }

    pub fn contains(&self, token: &str) -> bool {
        self.terms.contains(token)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }
}
