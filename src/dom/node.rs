//! XML Node representation
//!
//! A strict tree: every node owns its children, so cloning is a deep copy and
//! a built tree can be read from many threads at once.

use std::collections::HashMap;

/// One element with its attributes, own text and ordered children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Local tag name
    pub name: String,
    /// Attributes by local name (empty when the element has none)
    pub attrs: HashMap<String, String>,
    /// Own character data, untrimmed; empty when none was captured
    pub data: String,
    /// Child elements in document order
    pub nodes: Vec<Node>,
}

impl Node {
    /// Create an element with no attributes, text or children
    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add an attribute
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Set the character data
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    /// Append a child
    pub fn with_child(mut self, child: Node) -> Self {
        self.nodes.push(child);
        self
    }

    /// The node's own character data
    #[inline]
    pub fn text(&self) -> &str {
        &self.data
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Check if this node has child elements
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Direct children named `name`, in document order.
    /// An empty name selects every child.
    pub fn sub_nodes(&self, name: &str) -> Vec<&Node> {
        if name.is_empty() {
            return self.nodes.iter().collect();
        }
        self.nodes.iter().filter(|n| n.name == name).collect()
    }
}
