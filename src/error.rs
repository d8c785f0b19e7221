// Error types for the search pipeline.
//
// Only retrieval and feed parsing can fail. Both abort the whole search:
// there is no partial result and no retry.

use thiserror::Error;

/// Any failure of a search invocation.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The feed could not be fetched.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// The feed was fetched but one of its entries is malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Network or HTTP-level failure talking to the feed source.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Transport failure: DNS, connect, timeout, body read
    #[error("arXiv request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("arXiv API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered 2xx but the feed is an arXiv error report
    #[error("arXiv API rejected the query: {0}")]
    Api(String),
}

/// A feed document or one of its entries could not be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("feed is not well-formed XML: {0}")]
    Document(String),

    #[error("entry {index}: missing <title>")]
    MissingTitle { index: usize },

    #[error("entry {index}: missing <published>")]
    MissingPublished { index: usize },

    #[error("entry {index}: invalid published timestamp {value:?}")]
    InvalidTimestamp { index: usize, value: String },

    #[error("entry {index}: missing category term")]
    MissingCategory { index: usize },
}
