//! Textual renderings of the trie shape.
//!
//! `render` emits a Graphviz DOT digraph, and the `Display` impl prints an indented outline.
//! Both walk the tree depth-first with children in lexicographic label order.

use std::fmt::{self, Display};

use crate::node::TrieNode;
use crate::trie::Trie;

/// Node name of the root in the DOT output.
const DOT_ROOT_NAME: &str = "_";

impl<V: Display> Trie<V> {
    /// Renders the trie as a Graphviz DOT digraph.
    ///
    /// Every node is named by its parent's name followed by its own label, starting from `_`
    /// for the root, so names are unique. Each node is labeled with its edge label, and leaf
    /// nodes also show their values.
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
    /// assert_eq!(
    ///     trie.render(),
    ///     "digraph G\n{\n_[label=\"\"]\n_ -> _vos\n_vos[label=\"vos[14, 23]\"]\n}"
    /// );
    /// ```
    pub fn render(&self) -> String {
        let mut dot = String::from("digraph G\n{\n");
        dot.push_str(DOT_ROOT_NAME);
        dot.push_str("[label=\"\"]\n");
        write_dot(&self.root, DOT_ROOT_NAME, &mut dot);
        dot.push('}');
        dot
    }
}

fn write_dot<V: Display>(node: &TrieNode<V>, node_name: &str, dot: &mut String) {
    for child in node.children() {
        let child_name = format!("{}{}", node_name, child.label());
        push_name(dot, node_name);
        dot.push_str(" -> ");
        push_name(dot, &child_name);
        dot.push('\n');

        push_name(dot, &child_name);
        dot.push_str("[label=\"");
        push_escaped(dot, child.label());
        if child.is_leaf() {
            push_escaped(dot, &format_values(child.values()));
        }
        dot.push_str("\"]\n");

        write_dot(child, &child_name, dot);
    }
}

/// Writes a node name, quoting it unless it is a plain DOT identifier.
fn push_name(dot: &mut String, name: &str) {
    if is_dot_id(name) {
        dot.push_str(name);
    } else {
        dot.push('"');
        push_escaped(dot, name);
        dot.push('"');
    }
}

/// Plain DOT identifiers are a letter, underscore or non-ASCII character, followed by any of
/// those or digits.
fn is_dot_id(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_ascii_alphabetic() || !first.is_ascii() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric() || !c.is_ascii())
        }
        _ => false,
    }
}

fn push_escaped(dot: &mut String, text: &str) {
    for c in text.chars() {
        if c == '"' || c == '\\' {
            dot.push('\\');
        }
        dot.push(c);
    }
}

/// Formats values as `[a, b, c]`.
fn format_values<V: Display>(values: &[V]) -> String {
    let values: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", values.join(", "))
}

/// Indented outline, one node per line, four spaces per level.
///
/// The root prints as `_`; every other node prints its label, its values when it has any, and
/// a trailing colon.
impl<V: Display> Display for Trie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", DOT_ROOT_NAME)?;
        write_outline(&self.root, 1, f)
    }
}

fn write_outline<V: Display>(
    node: &TrieNode<V>,
    level: usize,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    for child in node.children() {
        write!(f, "{:indent$}{}", "", child.label(), indent = level * 4)?;
        if child.is_value_bearing() {
            f.write_str(&format_values(child.values()))?;
        }
        writeln!(f, ":")?;
        write_outline(child, level + 1, f)?;
    }
    Ok(())
}
