//! # Radix Index
//!
//! A mutable compressed trie (radix tree) that maps words to every value recorded for them.
//!
//! Each edge of the trie carries a label of one or more characters. Inserting a word that shares
//! a first character with an existing edge splits that edge, and deleting a word collapses any
//! chain of single-child nodes it leaves behind, so the tree always holds the minimal number of
//! nodes for the words it contains.
//!
//! ## Features
//!
//! - **Multiple values per key**: repeated inserts of a word accumulate in insertion order
//! - **Exact lookup**: `search` returns the values of one word, never a prefix range
//! - **Self-compacting deletes**: removed words leave no dangling intermediate nodes behind
//! - **Graphviz output**: `render` produces a DOT description of the current tree shape
//! - **Word indexer**: `Indexer` tokenizes free text and records the position of every word
//!
//! ## Example
//!
//! ```rust
//! use radix_index::Trie;
//!
//! let mut trie = Trie::new();
//! trie.insert("stof", 123);
//! trie.insert("stoffig", 45);
//!
//! assert_eq!(trie.search("stof"), &[123]);
//! assert_eq!(trie.search("stoffig"), &[45]);
//!
//! trie.delete("stoffig");
//! assert_eq!(trie.value_node_count(), 1);
//! assert_eq!(trie.search("stof"), &[123]);
//! ```

pub mod node;
pub mod tokenizer;
mod index;
mod render;
mod trie;
mod util;

// Re-export public types
pub use crate::index::Indexer;
pub use crate::node::TrieNode;
pub use crate::trie::Trie;

/// Target used by every `tracing` event this crate emits.
pub(crate) const LOG_TARGET: &str = "radix_index";

/// Errors that can occur in trie and indexer operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Key is invalid for the operation
    #[error("Invalid key for this operation")]
    InvalidKey,
    /// A structural invariant does not hold at the given path
    #[error("invariant violated at `{path}`: {reason}")]
    InvariantViolation {
        /// Concatenated labels from the root to the offending node
        path: String,
        /// Which invariant failed
        reason: String,
    },
    /// Reading indexer input failed
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
