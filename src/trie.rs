//! The main trie implementation.
//!
//! This module contains the `Trie` type, which provides the primary API for working
//! with the radix trie data structure.

use tracing::warn;

use crate::node::TrieNode;
use crate::util::{split_first_unit, strip_proper_prefix};
use crate::{Error, LOG_TARGET};

/// A mutable radix trie mapping string keys to every value inserted under them.
///
/// This Radix Trie (also known as a compressed trie) stores each key as a path of edge labels
/// from the root. No two sibling edges share a first character, and no node without values is
/// left with fewer than two children, so the tree never holds more nodes than its keys require.
///
/// Keys are compared character by character without any normalization. Values inserted under
/// the same key accumulate in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trie<V> {
    /// The root node of the trie
    pub(crate) root: TrieNode<V>,

    /// The number of distinct keys stored in the trie
    size: usize,
}

impl<V> Trie<V> {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::Trie;
    ///
    /// let trie = Trie::<i32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Trie {
            root: TrieNode::new(""),
            size: 0,
        }
    }

    /// Returns the number of distinct keys stored in the trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("vos", 14);
    /// trie.insert("vos", 23);
    /// assert_eq!(trie.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie contains no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Counts the value-bearing nodes by walking the whole tree.
    ///
    /// This always agrees with [`len`](Self::len); it is the structural count rather than the
    /// bookkept one.
    pub fn value_node_count(&self) -> usize {
        self.root.value_node_count()
    }

    /// Returns the root node, for callers that want to walk the tree shape.
    pub fn root(&self) -> &TrieNode<V> {
        &self.root
    }

    /// Appends `value` to the values stored under `key`.
    ///
    /// An empty key cannot be stored; it is logged and ignored. Use
    /// [`try_insert`](Self::try_insert) to observe that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("lui", 23);
    /// trie.insert("luie", 14);
    ///
    /// assert_eq!(trie.search("lui"), &[23]);
    /// assert_eq!(trie.search("luie"), &[14]);
    /// ```
    pub fn insert(&mut self, key: &str, value: V) {
        if let Err(e) = self.try_insert(key, value) {
            warn!(target: LOG_TARGET, key, error = %e, "Ignoring insert");
        }
    }

    /// Appends `value` to the values stored under `key`, rejecting the empty key.
    pub fn try_insert(&mut self, key: &str, value: V) -> Result<(), Error> {
        if key.is_empty() {
            return Err(Error::InvalidKey);
        }

        if Self::insert_recursive(&mut self.root, key, value) {
            self.size += 1;
        }
        Ok(())
    }

    // Recursive helper for insert. Returns whether a new key was created.
    fn insert_recursive(node: &mut TrieNode<V>, key: &str, value: V) -> bool {
        // Exact match: append to whatever is already stored there
        if let Some(exact) = node.children.get_mut(key) {
            let created = !exact.is_value_bearing();
            exact.values.push(value);
            return created;
        }

        let (first, rest) = match split_first_unit(key) {
            Some(split) => split,
            None => return false,
        };

        let shared = match node.child_sharing_first_unit_mut(first) {
            Some(child) => child,
            None => {
                // No child continues this key, add it as a fresh leaf
                node.add_child(key, vec![value]);
                return true;
            }
        };

        // The child's whole label is consumed by the key, continue below it
        if let Some(remaining) = strip_proper_prefix(key, &shared.label) {
            return Self::insert_recursive(shared, remaining, value);
        }

        // The child only shares a leading part with the key, split it on the first unit
        let label = shared.label.clone();
        let branch = match node.split_child(&label, first) {
            Some(branch) => branch,
            None => return false,
        };
        if rest.is_empty() {
            branch.values.push(value);
        } else {
            Self::insert_recursive(branch, rest, value);
        }

        // Splitting on a single unit leaves a chain wherever the keys share more than that
        node.collapse_child(first);
        true
    }

    /// Returns the values stored under `key` in insertion order.
    ///
    /// Absent keys yield an empty slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("vos", 14);
    /// trie.insert("vos", 23);
    ///
    /// assert_eq!(trie.search("vos"), &[14, 23]);
    /// assert!(trie.search("beer").is_empty());
    /// ```
    pub fn search(&self, key: &str) -> &[V] {
        let mut current = &self.root;
        let mut remaining = key;

        loop {
            if let Some(exact) = current.children.get(remaining) {
                return &exact.values;
            }

            let next = split_first_unit(remaining)
                .and_then(|(first, _)| current.child_sharing_first_unit(first))
                .and_then(|child| {
                    strip_proper_prefix(remaining, &child.label).map(|rest| (child, rest))
                });

            match next {
                Some((child, rest)) => {
                    current = child;
                    remaining = rest;
                }
                None => return &[],
            }
        }
    }

    /// Returns `true` if at least one value is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        !self.search(key).is_empty()
    }

    /// Removes `key` and returns every value that was stored under it.
    ///
    /// Deleting an absent key changes nothing and returns an empty vector. Nodes left without
    /// a purpose are collapsed on the way back up to the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use radix_index::Trie;
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("weinig", 123);
    ///
    /// assert_eq!(trie.delete("weinig"), vec![123]);
    /// assert_eq!(trie.delete("veel"), Vec::<i32>::new());
    /// assert!(trie.is_empty());
    /// ```
    pub fn delete(&mut self, key: &str) -> Vec<V> {
        let removed = Self::delete_recursive(&mut self.root, key);
        if !removed.is_empty() {
            self.size -= 1;
        }
        removed
    }

    // Recursive helper for delete. The caller's frame collapses the child it descended into,
    // so the tidy-up walks from the point of deletion back to the root.
    fn delete_recursive(node: &mut TrieNode<V>, key: &str) -> Vec<V> {
        if let Some(exact) = node.children.get_mut(key) {
            let removed = std::mem::take(&mut exact.values);
            if !removed.is_empty() {
                node.collapse_child(key);
            }
            return removed;
        }

        let (first, _) = match split_first_unit(key) {
            Some(split) => split,
            None => return Vec::new(),
        };
        let child = match node.child_sharing_first_unit_mut(first) {
            Some(child) => child,
            None => return Vec::new(),
        };
        let remaining = match strip_proper_prefix(key, &child.label) {
            Some(remaining) => remaining,
            None => return Vec::new(),
        };

        let label = child.label.clone();
        let removed = Self::delete_recursive(child, remaining);
        if !removed.is_empty() {
            node.collapse_child(&label);
        }
        removed
    }

    /// Returns every stored key in lexicographic order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.size);
        let mut prefix = String::new();
        Self::collect_keys(&self.root, &mut prefix, &mut keys);
        keys
    }

    fn collect_keys(node: &TrieNode<V>, prefix: &mut String, keys: &mut Vec<String>) {
        for child in node.children.values() {
            prefix.push_str(&child.label);
            if child.is_value_bearing() {
                keys.push(prefix.clone());
            }
            Self::collect_keys(child, prefix, keys);
            prefix.truncate(prefix.len() - child.label.len());
        }
    }

    /// Walks the whole tree and reports the first structural invariant that does not hold.
    ///
    /// Checked: the root carries no label or values, every child is filed under its own
    /// non-empty label, no two siblings share a first unit, every non-root node without values
    /// has at least two children, and the stored length matches the number of value-bearing
    /// nodes.
    pub fn check_invariants(&self) -> Result<(), Error> {
        if !self.root.label.is_empty() || self.root.is_value_bearing() {
            return Err(violation("", "root carries a label or values"));
        }

        let mut path = String::new();
        Self::check_node(&self.root, &mut path)?;

        let counted = self.root.value_node_count();
        if counted != self.size {
            return Err(violation(
                "",
                format!("stored length {} but {} value-bearing nodes", self.size, counted),
            ));
        }
        Ok(())
    }

    fn check_node(node: &TrieNode<V>, path: &mut String) -> Result<(), Error> {
        let mut previous_first: Option<&str> = None;

        for (key, child) in &node.children {
            path.push_str(&child.label);

            if key != &child.label {
                return Err(violation(path, format!("filed under `{}`", key)));
            }
            let first = match split_first_unit(&child.label) {
                Some((first, _)) => first,
                None => return Err(violation(path, "empty label below the root")),
            };
            // Children iterate in order, so siblings sharing a first unit are adjacent
            if previous_first == Some(first) {
                return Err(violation(path, "sibling shares its first unit"));
            }
            previous_first = Some(first);

            if !child.is_value_bearing() && child.children.len() < 2 {
                return Err(violation(
                    path,
                    format!("node without values has {} children", child.children.len()),
                ));
            }

            Self::check_node(child, path)?;
            path.truncate(path.len() - child.label.len());
        }
        Ok(())
    }
}

fn violation(path: &str, reason: impl Into<String>) -> Error {
    Error::InvariantViolation {
        path: path.to_string(),
        reason: reason.into(),
    }
}

// Default implementation
impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie_of(entries: &[(&str, u32)]) -> Trie<u32> {
        let mut trie = Trie::new();
        for (key, value) in entries {
            trie.insert(key, *value);
        }
        trie.check_invariants().unwrap();
        trie
    }

    fn root_labels(trie: &Trie<u32>) -> Vec<&str> {
        trie.root().children().map(TrieNode::label).collect()
    }

    #[test]
    fn test_new_trie() {
        let trie: Trie<u32> = Trie::new();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
        assert_eq!(trie.value_node_count(), 0);
        trie.check_invariants().unwrap();
    }

    #[test]
    fn test_search_nonexistent() {
        let trie: Trie<u32> = Trie::new();
        assert!(trie.search("vos").is_empty());
        assert!(!trie.contains_key("vos"));
    }

    #[test]
    fn test_insert_and_search() {
        let trie = trie_of(&[("vos", 13)]);

        assert_eq!(trie.len(), 1);
        assert_eq!(trie.search("vos"), &[13]);
        assert!(trie.search("vo").is_empty());
        assert!(trie.search("voss").is_empty());
    }

    #[test]
    fn test_insert_appends() {
        let trie = trie_of(&[("vos", 14), ("vos", 23)]);

        assert_eq!(trie.len(), 1);
        assert_eq!(trie.search("vos"), &[14, 23]);
    }

    #[test]
    fn test_try_insert_empty_key() {
        let mut trie: Trie<u32> = Trie::new();

        assert!(matches!(trie.try_insert("", 1), Err(Error::InvalidKey)));
        trie.insert("", 1);
        assert!(trie.is_empty());
        assert!(trie.search("").is_empty());
    }

    #[test]
    fn test_node_splitting() {
        let trie = trie_of(&[("beer", 5), ("beroepsmilitair", 442)]);

        assert_eq!(trie.search("beer"), &[5]);
        assert_eq!(trie.search("beroepsmilitair"), &[442]);

        // The shared "be" becomes a single branching edge
        assert_eq!(root_labels(&trie), vec!["be"]);
        let be = trie.root().child("be").unwrap();
        let below: Vec<&str> = be.children().map(TrieNode::label).collect();
        assert_eq!(below, vec!["er", "roepsmilitair"]);
    }

    #[test]
    fn test_larger_key_first() {
        let trie = trie_of(&[("luie", 14), ("lui", 23)]);

        assert_eq!(trie.search("lui"), &[23]);
        assert_eq!(trie.search("luie"), &[14]);
        assert_eq!(trie.value_node_count(), 2);
    }

    #[test]
    fn test_shorter_key_first() {
        let trie = trie_of(&[("de", 14), ("deze", 23)]);

        assert_eq!(trie.search("de"), &[14]);
        assert_eq!(trie.search("deze"), &[23]);
        assert_eq!(root_labels(&trie), vec!["de"]);
    }

    #[test]
    fn test_single_unit_key_splits_leaf() {
        let trie = trie_of(&[("abc", 1), ("a", 2)]);

        assert_eq!(trie.search("a"), &[2]);
        assert_eq!(trie.search("abc"), &[1]);
        assert_eq!(root_labels(&trie), vec!["a"]);
    }

    #[test]
    fn test_multi_branched_tree() {
        let trie = trie_of(&[
            ("werk", 14),
            ("werken", 5),
            ("werkelijk", 23),
            ("werkeloos", 183),
        ]);

        assert_eq!(trie.len(), 4);
        assert_eq!(trie.search("werk"), &[14]);
        assert_eq!(trie.search("werken"), &[5]);
        assert_eq!(trie.search("werkelijk"), &[23]);
        assert_eq!(trie.search("werkeloos"), &[183]);
        assert!(trie.search("werke").is_empty());
        assert!(trie.search("werkel").is_empty());
    }

    #[test]
    fn test_delete_existing() {
        let mut trie = trie_of(&[("voornamelijk", 23), ("vos", 7), ("voornemens", 3)]);
        assert_eq!(trie.value_node_count(), 3);

        assert_eq!(trie.delete("voornemens"), vec![3]);
        trie.check_invariants().unwrap();

        assert_eq!(trie.value_node_count(), 2);
        assert!(trie.search("voornemens").is_empty());
        assert_eq!(trie.search("voornamelijk"), &[23]);
        assert_eq!(trie.search("vos"), &[7]);
    }

    #[test]
    fn test_delete_nonexistent() {
        let mut trie = trie_of(&[("weinig", 123)]);
        let before = trie.clone();

        assert!(trie.delete("veel").is_empty());
        assert!(trie.delete("wein").is_empty());
        assert!(trie.delete("weinigen").is_empty());
        assert!(trie.delete("").is_empty());
        assert_eq!(trie, before);
    }

    #[test]
    fn test_delete_intermediate_is_noop() {
        // "werke" exists only as a branching node, never as a key
        let mut trie = trie_of(&[("werken", 5), ("werkelijk", 23)]);
        let before = trie.clone();

        assert!(trie.delete("werke").is_empty());
        assert_eq!(trie, before);
    }

    #[test]
    fn test_delete_with_compression() {
        let mut trie = trie_of(&[("stof", 123), ("stoffig", 45), ("storing", 3)]);

        trie.delete("stof");
        trie.check_invariants().unwrap();

        // "sto" still branches, "f" folds into the surviving "stoffig" leaf
        let sto = trie.root().child("sto").unwrap();
        let below: Vec<&str> = sto.children().map(TrieNode::label).collect();
        assert_eq!(below, vec!["ffig", "ring"]);

        trie.delete("storing");
        trie.check_invariants().unwrap();
        assert_eq!(root_labels(&trie), vec!["stoffig"]);
        assert_eq!(trie.search("stoffig"), &[45]);
    }

    #[test]
    fn test_delete_collapses_chain() {
        let mut trie = trie_of(&[("la", 14), ("lak", 3), ("laks", 73), ("lakschade", 23)]);

        trie.delete("laks");
        trie.check_invariants().unwrap();
        assert_eq!(trie.search("lakschade"), &[23]);

        trie.delete("lak");
        trie.delete("la");
        trie.check_invariants().unwrap();
        assert_eq!(root_labels(&trie), vec!["lakschade"]);
    }

    #[test]
    fn test_delete_leaves_branching_node() {
        let mut trie = trie_of(&[("verder", 123), ("verhaal", 45), ("verdraaid", 3)]);

        trie.delete("verhaal");
        trie.check_invariants().unwrap();

        assert_eq!(root_labels(&trie), vec!["verd"]);
        assert_eq!(trie.search("verder"), &[123]);
        assert_eq!(trie.search("verdraaid"), &[3]);
    }

    #[test]
    fn test_delete_from_root() {
        let mut trie = trie_of(&[("weinig", 123)]);

        trie.delete("weinig");
        assert_eq!(trie.value_node_count(), 0);
        assert!(trie.root().is_leaf());
    }

    #[test]
    fn test_keys() {
        let trie = trie_of(&[("vos", 1), ("beer", 2), ("voordeur", 3), ("voor", 4), ("vos", 5)]);

        assert_eq!(trie.keys(), vec!["beer", "voor", "voordeur", "vos"]);
    }

    #[test]
    fn test_check_invariants_reports_violation() {
        let mut trie = trie_of(&[("vos", 1)]);

        // Leave a dangling intermediate behind by hand
        let mut dangling = TrieNode::new("b");
        dangling.add_child("eer", vec![2]);
        trie.root.children.insert("b".to_string(), dangling);

        match trie.check_invariants() {
            Err(Error::InvariantViolation { path, .. }) => assert_eq!(path, "b"),
            other => panic!("expected a violation, got {:?}", other),
        }
    }
}
