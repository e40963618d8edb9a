//! Turns free text into trie keys.
//!
//! The trie itself compares keys verbatim. This module produces the normalized words the
//! [`Indexer`](crate::Indexer) feeds it: ASCII letters only, lower-cased, split on spaces.

/// Strips every character that is not an ASCII letter or a space and lower-cases the rest.
///
/// ```
/// use radix_index::tokenizer::normalize;
///
/// assert_eq!(normalize("De hond, zelf lui!"), "de hond zelf lui");
/// ```
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Splits normalized text into words.
///
/// Runs of spaces never produce empty words, since the empty string is not a valid key.
///
/// ```
/// use radix_index::tokenizer::tokenize;
///
/// assert_eq!(tokenize("Einde.  Echt!"), vec!["einde", "echt"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}
