// TF-IDF weighting over a corpus of paper titles.
//
// Each title is one document. The weighting follows the usual
// smoothed-idf, L2-normalized scheme:
//
//   tf(t, d)  = raw count of t in d
//   idf(t)    = ln((1 + n) / (1 + df(t))) + 1
//   w(t, d)   = tf(t, d) * idf(t), each row scaled to unit L2 norm
//
// The vocabulary is kept in lexicographic order. Every downstream
// tie-break relies on that order, so it must not depend on hash iteration.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::stopwords::StopTermSet;

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

fn token_pattern() -> &'static Regex {
    // Two or more Unicode word characters
    TOKEN_PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("valid token pattern"))
}

/// Lowercase a title and split it into tokens, dropping stop terms.
pub fn tokenize(text: &str, stop_terms: &StopTermSet) -> Vec<String> {
    let lower = text.to_lowercase();
    token_pattern()
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|tok| !stop_terms.contains(tok))
        .map(str::to_string)
        .collect()
}

/// Fitted document-term model for one corpus.
#[derive(Debug, Clone, Default)]
pub struct TfIdfModel {
    /// Surviving terms in lexicographic order (column order)
    vocabulary: Vec<String>,
    /// Raw counts, one row per document, one column per vocabulary term
    counts: Vec<Vec<u32>>,
    /// Normalized tf-idf weights, same shape as `counts`
    weights: Vec<Vec<f64>>,
    /// Smoothed idf per vocabulary term
    idf: Vec<f64>,
}

impl TfIdfModel {
    /// Build the model for `documents`, excluding `stop_terms`.
    pub fn fit<S: AsRef<str>>(documents: &[S], stop_terms: &StopTermSet) -> Self {
        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|d| tokenize(d.as_ref(), stop_terms))
            .collect();

        let mut index: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            for tok in tokens {
                index.entry(tok.as_str()).or_insert(0);
            }
        }
        // Column numbers follow lexicographic order
        for (col, slot) in index.values_mut().enumerate() {
            *slot = col;
        }
        let vocabulary: Vec<String> = index.keys().map(|k| k.to_string()).collect();

        let n_terms = vocabulary.len();
        let counts: Vec<Vec<u32>> = tokenized
            .iter()
            .map(|tokens| {
                let mut row = vec![0u32; n_terms];
                for tok in tokens {
                    row[index[tok.as_str()]] += 1;
                }
                row
            })
            .collect();

        let n_docs = documents.len() as f64;
        let idf: Vec<f64> = (0..n_terms)
            .map(|col| {
                let df = counts.iter().filter(|row| row[col] > 0).count() as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let weights = counts
            .iter()
            .map(|row| {
                let mut w: Vec<f64> = row
                    .iter()
                    .zip(&idf)
                    .map(|(&tf, &idf)| tf as f64 * idf)
                    .collect();
                let norm = w.iter().map(|x| x * x).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for x in &mut w {
                        *x /= norm;
                    }
                }
                w
            })
            .collect();

        Self {
            vocabulary,
            counts,
            weights,
            idf,
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn document_count(&self) -> usize {
        self.counts.len()
    }

    /// Column index of a term, if it survived filtering.
    pub fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary
            .binary_search_by(|v| v.as_str().cmp(term))
            .ok()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.column(term).map(|c| self.idf[c])
    }

    /// Weight of `term` in document `doc` (0 when absent).
    pub fn weight(&self, doc: usize, term: &str) -> f64 {
        match (self.weights.get(doc), self.column(term)) {
            (Some(row), Some(col)) => row[col],
            _ => 0.0,
        }
    }

    /// Mean weight of each vocabulary term across all documents, in
    /// vocabulary order.
    pub fn mean_weights(&self) -> Vec<f64> {
        let n = self.weights.len();
        if n == 0 {
            return Vec::new();
        }
        (0..self.vocabulary.len())
            .map(|col| self.weights.iter().map(|row| row[col]).sum::<f64>() / n as f64)
            .collect()
    }

    /// Total raw occurrences of each vocabulary term, in vocabulary order.
    pub fn total_counts(&self) -> Vec<u32> {
        (0..self.vocabulary.len())
            .map(|col| self.counts.iter().map(|row| row[col]).sum())
            .collect()
    }
}
