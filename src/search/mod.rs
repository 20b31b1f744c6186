//! Tokenization, indexing, and ranking for the suggestion engine.

pub mod index;
pub mod ranker;
pub mod segmenter;
pub mod tokenize;
pub mod trie;

pub use index::{Field, InvertedIndex, Posting};
pub use ranker::{RankedTool, Ranker};
pub use segmenter::{CombineStrategy, IntentSegmenter};
pub use tokenize::{STOPWORDS_EN, STOPWORDS_PT, normalize, tokenize};
pub use trie::Trie;
