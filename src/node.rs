//! Node implementation for the radix trie.
//!
//! This module contains the `TrieNode` structure that forms the backbone of the radix trie
//! implementation, along with the local rewrites (split, merge, fold) the trie applies while
//! inserting and deleting. Every node owns its children outright; there are no parent pointers.
//! Upward propagation happens on the way back out of the recursive descent in `trie.rs`.

use std::collections::BTreeMap;
use std::ops::Bound;

use tracing::trace;

use crate::LOG_TARGET;

/// A node in the radix trie.
///
/// Each node holds the edge label leading to it from its parent, the values recorded for the key
/// that ends here, and its children keyed by their own labels. The root is the only node with
/// an empty label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieNode<V> {
    /// The edge label from the parent to this node
    pub(crate) label: String,

    /// Values recorded for the key ending at this node, in insertion order
    pub(crate) values: Vec<V>,

    /// Child nodes indexed by their full label
    ///
    /// No two children share a first unit, so at most one child can continue any key.
    pub(crate) children: BTreeMap<String, TrieNode<V>>,
}

impl<V> TrieNode<V> {
    /// Creates a new empty node with the given label
    pub(crate) fn new(label: impl Into<String>) -> Self {
        TrieNode {
            label: label.into(),
            values: Vec::new(),
            children: BTreeMap::new(),
        }
    }

    /// Creates a new childless node with the given label and values
    pub(crate) fn with_values(label: impl Into<String>, values: Vec<V>) -> Self {
        TrieNode {
            label: label.into(),
            values,
            children: BTreeMap::new(),
        }
    }

    /// The edge label leading to this node (empty for the root)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The values stored at this node, oldest first
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Iterates over the children in lexicographic label order
    pub fn children(&self) -> impl Iterator<Item = &TrieNode<V>> {
        self.children.values()
    }

    /// Returns the child with exactly this label, if any
    pub fn child(&self, label: &str) -> Option<&TrieNode<V>> {
        self.children.get(label)
    }

    /// Returns whether this node is a leaf node (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns whether a complete key ends at this node
    pub fn is_value_bearing(&self) -> bool {
        !self.values.is_empty()
    }

    /// Returns the number of value-bearing nodes in this subtree, including this node
    pub fn value_node_count(&self) -> usize {
        let mut count = if self.is_value_bearing() { 1 } else { 0 };

        for child in self.children.values() {
            count += child.value_node_count();
        }

        count
    }

    /// Counts value-bearing nodes in this subtree, stopping once `limit` have been seen.
    fn value_nodes_up_to(&self, limit: usize) -> usize {
        let mut count = if self.is_value_bearing() { 1 } else { 0 };

        for child in self.children.values() {
            if count >= limit {
                break;
            }
            count += child.value_nodes_up_to(limit - count);
        }

        count.min(limit)
    }

    /// Locates the only value-bearing node in this subtree.
    ///
    /// Returns the labels walked below this node to reach it (empty when this node is the one)
    /// together with the node itself.
    ///
    /// # Panics
    ///
    /// Panics if the subtree does not contain exactly one value-bearing node.
    pub fn sole_value_node(&self) -> (Vec<&str>, &TrieNode<V>) {
        let count = self.value_node_count();
        assert!(
            count == 1,
            "sole_value_node requires exactly one value-bearing node below `{}`, found {}",
            self.label,
            count
        );

        let mut path = Vec::new();
        let mut node = self;
        while !node.is_value_bearing() {
            node = match node.children.values().find(|child| child.value_node_count() > 0) {
                Some(child) => child,
                None => unreachable!("value count was checked above"),
            };
            path.push(node.label.as_str());
        }

        (path, node)
    }

    /// Returns the child whose label starts with `first`, if any
    pub(crate) fn child_sharing_first_unit(&self, first: &str) -> Option<&TrieNode<V>> {
        // Labels starting with `first` sort directly at or after it
        self.children
            .range::<str, _>((Bound::Included(first), Bound::Unbounded))
            .next()
            .map(|(_, child)| child)
            .filter(|child| child.label.starts_with(first))
    }

    /// Mutable counterpart of [`child_sharing_first_unit`](Self::child_sharing_first_unit)
    pub(crate) fn child_sharing_first_unit_mut(&mut self, first: &str) -> Option<&mut TrieNode<V>> {
        self.children
            .range_mut::<str, _>((Bound::Included(first), Bound::Unbounded))
            .next()
            .map(|(_, child)| child)
            .filter(|child| child.label.starts_with(first))
    }

    /// Adds a fresh childless node holding `values` under this node
    pub(crate) fn add_child(&mut self, label: &str, values: Vec<V>) {
        self.children
            .insert(label.to_string(), TrieNode::with_values(label, values));
    }

    /// Replaces the child labeled `label` with a new node labeled `first` and moves the old
    /// child below it, relabeled with everything after `first`.
    ///
    /// The moved child keeps its values and children. Returns the new node.
    pub(crate) fn split_child(&mut self, label: &str, first: &str) -> Option<&mut TrieNode<V>> {
        let mut displaced = self.children.remove(label)?;
        displaced.label = label[first.len()..].to_string();
        trace!(target: LOG_TARGET, label, at = first, "Splitting edge");

        let mut branch = TrieNode::new(first);
        branch.children.insert(displaced.label.clone(), displaced);
        Some(self.children.entry(first.to_string()).or_insert(branch))
    }

    /// Restores the minimal shape of the child labeled `label`.
    ///
    /// A child without values is dropped when it has no children, folded down onto the single
    /// value-bearing node left in its subtree, or merged with its only child. A child that holds
    /// values or still branches is left alone.
    pub(crate) fn collapse_child(&mut self, label: &str) {
        let (child_count, value_nodes) = match self.children.get(label) {
            Some(child) if !child.is_value_bearing() => match child.children.len() {
                0 => (0, 0),
                1 => (1, child.value_nodes_up_to(2)),
                _ => return,
            },
            _ => return,
        };

        let child = match self.children.remove(label) {
            Some(child) => child,
            None => return,
        };
        let replacement = if child_count == 0 {
            trace!(target: LOG_TARGET, label, "Dropping empty node");
            return;
        } else if value_nodes == 1 {
            child.fold_sole_survivor()
        } else {
            child.merge_only_child()
        };

        trace!(target: LOG_TARGET, label, merged = %replacement.label, "Collapsed node");
        self.children.insert(replacement.label.clone(), replacement);
    }

    /// Folds the chain from this node down to the single value-bearing node below it into one
    /// childless node whose label is the concatenation of every label on that chain.
    ///
    /// # Panics
    ///
    /// Panics if the subtree does not contain exactly one value-bearing node.
    pub(crate) fn fold_sole_survivor(self) -> TrieNode<V> {
        let path: Vec<String> = self
            .sole_value_node()
            .0
            .into_iter()
            .map(str::to_owned)
            .collect();

        let TrieNode {
            mut label,
            mut values,
            mut children,
        } = self;
        for key in path {
            let next = match children.remove(&key) {
                Some(next) => next,
                None => unreachable!("sole value path leads through existing children"),
            };
            label.push_str(&next.label);
            values = next.values;
            children = next.children;
        }

        // Anything still hanging below the survivor holds no values
        drop(children);
        TrieNode::with_values(label, values)
    }

    /// Merges this node with its only child, prefixing the child's label with this node's label.
    ///
    /// The child's values and children carry over unchanged.
    fn merge_only_child(mut self) -> TrieNode<V> {
        match self.children.pop_first() {
            Some((_, mut only)) => {
                only.label.insert_str(0, &self.label);
                only
            }
            None => self,
        }
    }
}
