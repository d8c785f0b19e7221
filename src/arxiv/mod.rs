// arXiv feed retrieval — HTTP query, Atom parsing and category labels.

pub mod categories;
pub mod client;
pub mod feed;
