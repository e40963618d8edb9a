//! Word position index built on the trie.

use std::io::Read;

use tracing::debug;

use crate::tokenizer::{normalize, tokenize};
use crate::trie::Trie;
use crate::{Error, LOG_TARGET};

/// Records, for every word in a text, the positions at which it occurs.
///
/// Positions count words from the start of the first indexed text and keep counting across
/// subsequent calls, so several inputs can be indexed as one continuous document.
///
/// # Examples
///
/// ```
/// use radix_index::Indexer;
///
/// let mut indexer = Indexer::new();
/// indexer.index_text("Een vos, een hond.");
///
/// assert_eq!(indexer.positions("een"), &[0, 2]);
/// assert_eq!(indexer.positions("Hond"), &[3]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Indexer {
    trie: Trie<usize>,
    position: usize,
}

impl Indexer {
    /// Creates an indexer with nothing indexed yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes `text` and records the position of every word.
    ///
    /// Returns the number of words indexed.
    pub fn index_text(&mut self, text: &str) -> usize {
        let words = tokenize(text);
        for word in &words {
            self.trie.insert(word, self.position);
            self.position += 1;
        }

        debug!(
            target: LOG_TARGET,
            words = words.len(),
            distinct = self.trie.len(),
            "Indexed text"
        );
        words.len()
    }

    /// Reads `reader` to the end and indexes its contents as text.
    pub fn index_reader<R: Read>(&mut self, mut reader: R) -> Result<usize, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(self.index_text(&text))
    }

    /// Returns the positions of `word`, normalized the same way indexed text is.
    pub fn positions(&self, word: &str) -> &[usize] {
        self.trie.search(&normalize(word))
    }

    /// Forgets every position recorded for `word` and returns them.
    pub fn remove(&mut self, word: &str) -> Vec<usize> {
        self.trie.delete(&normalize(word))
    }

    /// The total number of words indexed so far.
    pub fn words_indexed(&self) -> usize {
        self.position
    }

    /// The underlying trie.
    pub fn trie(&self) -> &Trie<usize> {
        &self.trie
    }
}
