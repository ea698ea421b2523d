//! Flattener
//!
//! Projects a tree onto one level of string keys. A node's own facts are
//! `#name`, `#data` and `#attr.<name>`; a descendant's facts carry one
//! `#nodes.<name>.` step per level above it, e.g. `#nodes.b.#nodes.c.#data`.
//!
//! Nodes are visited breadth-first. Same-named siblings share their keys, so
//! for each key the last visited sibling that has it wins.

use crate::dom::Node;
use std::collections::{HashMap, VecDeque};

/// Key of a node's own name
pub const NAME_KEY: &str = "#name";
/// Key of a node's own text
pub const DATA_KEY: &str = "#data";
/// Prefix of a node's attribute keys
pub const ATTR_PREFIX: &str = "#attr.";
/// Prefix of one descent step
pub const NODES_PREFIX: &str = "#nodes.";

impl Node {
    /// Flatten the tree into a single-level map
    pub fn to_map(&self) -> HashMap<String, String> {
        let mut out = HashMap::new();
        flatten_into(self, None, &mut out);

        let mut queue: VecDeque<(String, &Node)> = self
            .nodes
            .iter()
            .map(|child| (format!("{NODES_PREFIX}{}", child.name), child))
            .collect();

        while let Some((prefix, node)) = queue.pop_front() {
            flatten_into(node, Some(prefix.as_str()), &mut out);
            for child in &node.nodes {
                queue.push_back((format!("{prefix}.{NODES_PREFIX}{}", child.name), child));
            }
        }

        out
    }
}

/// Insert a node's own facts under `prefix`
fn flatten_into(node: &Node, prefix: Option<&str>, out: &mut HashMap<String, String>) {
    let key = |fact: &str| match prefix {
        Some(prefix) => format!("{prefix}.{fact}"),
        None => fact.to_string(),
    };

    if !node.name.is_empty() {
        out.insert(key(NAME_KEY), node.name.clone());
    }
    if !node.data.is_empty() {
        out.insert(key(DATA_KEY), node.data.clone());
    }
    for (name, value) in &node.attrs {
        out.insert(key(&format!("{ATTR_PREFIX}{name}")), value.clone());
    }
}
