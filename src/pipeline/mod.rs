// Search pipeline — retrieval followed by term ranking.

pub mod search;
