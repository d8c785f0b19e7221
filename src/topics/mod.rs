// Term ranking — stop terms, TF-IDF weighting and top-term selection.

pub mod ranking;
pub mod stopwords;
pub mod tfidf;
pub mod traits;
