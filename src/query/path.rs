//! Path Navigator
//!
//! Descent by element name, one level per segment. Each segment picks the
//! first direct child with that name, so later same-named siblings are never
//! reached by a path. Empty segments are skipped; any segment without a match
//! fails the whole descent.

use crate::dom::Node;
use crate::segment::{segments, Segments};
use log::trace;

impl Node {
    /// First direct child named `name`
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Descend through `labels`; an empty path is the node itself
    pub fn sub_node(&self, labels: &[&str]) -> Option<&Node> {
        descend(self, labels.iter().copied())
    }

    /// Descend through a `/`-delimited path
    pub fn sub_node_at(&self, path: &str) -> Option<&Node> {
        descend(self, segments(path))
    }

    /// Descend through a path delimited by `delimiter`
    pub fn sub_node_at_with(&self, path: &str, delimiter: u8) -> Option<&Node> {
        descend(self, Segments::new(path, delimiter))
    }

    /// Text of the node at `labels`
    ///
    /// `None` when the path does not resolve or has no non-empty segment;
    /// `Some("")` when the node exists but holds no text.
    pub fn sub_node_text(&self, labels: &[&str]) -> Option<&str> {
        descend_text(self, labels.iter().copied())
    }

    /// Text of the node at a `/`-delimited path
    pub fn sub_node_text_at(&self, path: &str) -> Option<&str> {
        descend_text(self, segments(path))
    }

    /// Consume the tree and keep only the subtree at `labels`
    pub fn into_sub_node(self, labels: &[&str]) -> Option<Node> {
        let mut current = self;
        for label in labels.iter().filter(|l| !l.is_empty()) {
            let pos = current.nodes.iter().position(|n| n.name == *label)?;
            current = current.nodes.swap_remove(pos);
        }
        Some(current)
    }
}

fn descend<'n, 's>(node: &'n Node, labels: impl Iterator<Item = &'s str>) -> Option<&'n Node> {
    let mut current = node;
    for label in labels.filter(|l| !l.is_empty()) {
        match current.child(label) {
            Some(next) => current = next,
            None => {
                trace!("no <{}> under <{}>", label, current.name);
                return None;
            }
        }
    }
    Some(current)
}

fn descend_text<'n, 's>(node: &'n Node, labels: impl Iterator<Item = &'s str>) -> Option<&'n str> {
    let mut labels = labels.filter(|l| !l.is_empty()).peekable();
    labels.peek()?;
    descend(node, labels).map(Node::text)
}
