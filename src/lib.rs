// Paperscope: term and category report for arXiv searches
//
// This is the library root. A search is one arXiv query (arxiv), one
// ranking pass over the returned titles (topics), glued together by the
// pipeline and rendered by output.

pub mod arxiv;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod topics;
