//! Recursive Finder
//!
//! Depth-first, pre-order search of the descendants for the first element
//! with a given name. Uses an explicit stack to stay safe on deep trees.

use crate::dom::Node;

impl Node {
    /// First descendant named `label`, in document (pre-order) order
    ///
    /// The node itself is never matched, except that an empty label returns it.
    pub fn find_node(&self, label: &str) -> Option<&Node> {
        if label.is_empty() {
            return Some(self);
        }

        let mut stack: Vec<&Node> = self.nodes.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if node.name == label {
                return Some(node);
            }
            stack.extend(node.nodes.iter().rev());
        }
        None
    }
}
