//! Parallel Path Queries
//!
//! Uses Rayon to evaluate many path lookups against one shared tree. The tree
//! is only read, so no locking is involved.

use crate::dom::Node;
use rayon::prelude::*;

/// Text at each `/`-delimited path, in input order
pub fn texts_parallel<'n>(root: &'n Node, paths: &[&str]) -> Vec<Option<&'n str>> {
    paths
        .par_iter()
        .map(|path| root.sub_node_text_at(path))
        .collect()
}

/// Parallel xmap - resolve `(key, path)` pairs into `(key, text)` pairs
pub fn xmap(root: &Node, queries: &[(&str, &str)]) -> Vec<(String, Option<String>)> {
    queries
        .par_iter()
        .map(|(key, path)| {
            let text = root.sub_node_text_at(path).map(str::to_owned);
            (key.to_string(), text)
        })
        .collect()
}

/// Split each node of `nodes` on `label` in parallel, keeping input order
pub fn split_all(nodes: &[Node], label: &str) -> Vec<Node> {
    nodes
        .par_iter()
        .flat_map_iter(|node| node.split(label))
        .collect()
}
