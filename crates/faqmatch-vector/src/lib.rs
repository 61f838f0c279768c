//! TF-IDF semantic similarity over the FAQ corpus.

pub mod index_build;
pub mod search;
pub mod sparse;

pub use index_build::{terms, Vocabulary};
pub use search::SemanticIndex;
pub use sparse::SparseVector;
