//! Splitter
//!
//! Turns a node holding repeated nested elements into one copy of the node
//! per repeated element. For the label `b.c` every `c` found under a `b`
//! child yields a copy of the node in which the `b` children are replaced by
//! that single `c`.
//!
//! The carried elements are the `c` elements themselves, taken from the last
//! level of the label. No child of a `c` is lifted up or renamed, so for a
//! label `b.c` the copy holds a `c`, never one of its children.

use crate::dom::Node;
use crate::segment::{Segments, SPLIT_DELIMITER};

impl Node {
    /// Split on a `.`-delimited label
    ///
    /// Copies come out in document order of the elements they carry. Every
    /// other child of the node is kept, in place, ahead of the carried
    /// element. An empty label returns the node unchanged as the only item;
    /// a label that matches nothing returns no nodes.
    pub fn split(&self, label: &str) -> Vec<Node> {
        let terms: Vec<&str> = Segments::new(label, SPLIT_DELIMITER).collect();
        let Some((last, path)) = terms.split_last() else {
            return vec![self.clone()];
        };
        let first = terms[0];

        // Each level holds the children of the previous level's matches
        let mut level: Vec<&Node> = self.nodes.iter().collect();
        for term in path {
            level = level
                .into_iter()
                .filter(|n| n.name == *term)
                .flat_map(|n| n.nodes.iter())
                .collect();
        }

        let base = Node {
            name: self.name.clone(),
            attrs: self.attrs.clone(),
            data: self.data.clone(),
            nodes: self
                .nodes
                .iter()
                .filter(|n| n.name != first)
                .cloned()
                .collect(),
        };

        level
            .into_iter()
            .filter(|n| n.name == *last)
            .map(|leaf| {
                let mut node = base.clone();
                node.nodes.push(leaf.clone());
                node
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_nested_chain() {
        let root: Node = "<a><b><c>1</c></b><b><c>2</c></b></a>".parse().unwrap();
        let parts = root.split("b.c");
        assert_eq!(parts.len(), 2);
        for (part, expected) in parts.iter().zip(["1", "2"]) {
            assert_eq!(part.name, "a");
            assert_eq!(part.nodes.len(), 1);
            assert_eq!(part.nodes[0].name, "c");
            assert_eq!(part.nodes[0].text(), expected);
        }
    }

    #[test]
    fn test_split_keeps_other_children() {
        let root: Node = "<order id=\"7\"><customer>ann</customer>\
            <items><item><sku>x</sku></item><item><sku>y</sku></item><note>n</note></items>\
            <total>3</total></order>"
            .parse()
            .unwrap();
        let parts = root.split("items.item");
        assert_eq!(parts.len(), 2);

        let first = &parts[0];
        assert_eq!(first.attr("id"), Some("7"));
        let names: Vec<&str> = first.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["customer", "total", "item"]);
        assert_eq!(first.sub_node_text_at("item/sku"), Some("x"));
        assert_eq!(parts[1].sub_node_text_at("item/sku"), Some("y"));
    }

    #[test]
    fn test_split_single_term() {
        let root: Node = "<a><h>head</h><b>1</b><b>2</b><b>3</b></a>".parse().unwrap();
        let parts = root.split("b");
        let values: Vec<&str> = parts.iter().map(|p| p.nodes[1].text()).collect();
        assert_eq!(values, vec!["1", "2", "3"]);
        assert!(parts.iter().all(|p| p.nodes.len() == 2 && p.nodes[0].name == "h"));
    }

    #[test]
    fn test_split_three_levels_in_document_order() {
        let root: Node = "<r>\
            <g><s><v>1</v><v>2</v></s></g>\
            <g><s><v>3</v></s><s><v>4</v></s></g>\
            </r>"
            .parse()
            .unwrap();
        let values: Vec<String> = root
            .split("g.s.v")
            .iter()
            .map(|p| p.nodes[0].data.clone())
            .collect();
        assert_eq!(values, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_split_carries_last_term_elements() {
        let root: Node = "<a><b><c k=\"1\"><d>x</d></c></b></a>".parse().unwrap();
        let parts = root.split("b.c");
        assert_eq!(parts.len(), 1);
        let carried = &parts[0].nodes[0];
        assert_eq!(carried.name, "c");
        assert_eq!(carried.attr("k"), Some("1"));
        assert_eq!(carried.sub_node_text(&["d"]), Some("x"));
    }

    #[test]
    fn test_split_empty_label() {
        let root: Node = "<a><b>1</b></a>".parse().unwrap();
        assert_eq!(root.split(""), vec![root.clone()]);
    }

    #[test]
    fn test_split_no_match() {
        let root: Node = "<a><b>1</b></a>".parse().unwrap();
        assert!(root.split("x.y").is_empty());
        assert!(root.split("b.y").is_empty());
    }

    #[test]
    fn test_split_does_not_touch_source() {
        let root: Node = "<a><b><c>1</c></b><b><c>2</c></b></a>".parse().unwrap();
        let before = root.clone();
        let mut parts = root.split("b.c");
        parts[0].nodes[0].data = "changed".to_string();
        assert_eq!(root, before);
        assert_eq!(parts[1].nodes[0].text(), "2");
    }
}
