//! Predicate Search
//!
//! Picks one element among the direct children sharing a name (the candidate
//! set) by checking the text found at paths below each candidate. Candidates
//! are tried in document order and the first one meeting every condition wins.
//! Values compare byte for byte, untrimmed.

use crate::dom::Node;

impl Node {
    /// First `label` child whose `sub_label` child holds `value`
    pub fn sub_node_by(&self, label: &str, sub_label: &str, value: &str) -> Option<&Node> {
        self.sub_nodes(label)
            .into_iter()
            .find(|node| node.child_text_is(sub_label, value))
    }

    /// Text of `target` in the first `label` child whose `sub_label` child holds `value`
    ///
    /// A candidate without a `target` child is passed over.
    pub fn sub_node_text_by(
        &self,
        label: &str,
        sub_label: &str,
        value: &str,
        target: &str,
    ) -> Option<&str> {
        self.sub_nodes(label)
            .into_iter()
            .filter(|node| node.child_text_is(sub_label, value))
            .find_map(|node| node.sub_node(&[target]).map(Node::text))
    }

    /// First `label` child whose `sub_label1` and `sub_label2` children hold `value1` and `value2`
    pub fn sub_node_by2(
        &self,
        label: &str,
        sub_label1: &str,
        value1: &str,
        sub_label2: &str,
        value2: &str,
    ) -> Option<&Node> {
        self.sub_nodes(label).into_iter().find(|node| {
            node.child_text_is(sub_label1, value1) && node.child_text_is(sub_label2, value2)
        })
    }

    /// Text of `target` in the first `label` child matching two conditions
    ///
    /// A candidate without a `target` child is passed over.
    pub fn sub_node_text_by2(
        &self,
        label: &str,
        sub_label1: &str,
        value1: &str,
        sub_label2: &str,
        value2: &str,
        target: &str,
    ) -> Option<&str> {
        self.sub_nodes(label)
            .into_iter()
            .filter(|node| {
                node.child_text_is(sub_label1, value1) && node.child_text_is(sub_label2, value2)
            })
            .find_map(|node| node.sub_node(&[target]).map(Node::text))
    }

    /// First `label` child of the node at `root_path` meeting every `(path, value)` condition
    ///
    /// Both `root_path` and the condition paths are `/`-delimited. An empty
    /// condition list accepts the first candidate.
    pub fn sub_node_by_x(
        &self,
        root_path: &str,
        label: &str,
        conditions: &[(&str, &str)],
    ) -> Option<&Node> {
        self.sub_node_at(root_path)?
            .sub_nodes(label)
            .into_iter()
            .find(|node| node.matches_all(conditions))
    }

    /// Text at `target_path` in the candidate [`sub_node_by_x`](Node::sub_node_by_x) selects
    ///
    /// The first matching candidate is final: if it has nothing at
    /// `target_path` the result is `None`.
    pub fn sub_node_text_by_x(
        &self,
        root_path: &str,
        label: &str,
        target_path: &str,
        conditions: &[(&str, &str)],
    ) -> Option<&str> {
        self.sub_node_by_x(root_path, label, conditions)?
            .sub_node_at(target_path)
            .map(Node::text)
    }

    fn child_text_is(&self, sub_label: &str, value: &str) -> bool {
        self.sub_node(&[sub_label]).is_some_and(|n| n.data == value)
    }

    fn matches_all(&self, conditions: &[(&str, &str)]) -> bool {
        conditions.iter().all(|(path, value)| {
            self.sub_node_at(path).is_some_and(|n| n.data == *value)
        })
    }
}

/// Pair up an alternating `path, value, path, value, ...` list
///
/// A trailing path without a value is dropped.
pub fn conditions_from_pairs<'s>(pairs: &[&'s str]) -> Vec<(&'s str, &'s str)> {
    pairs.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
}
