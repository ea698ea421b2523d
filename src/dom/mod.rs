//! DOM Module - owned element tree
//!
//! - Node: element name, attributes, own text and ordered children
//! - Builder: token stream to tree, with the document-level parse entry points

pub mod builder;
pub mod node;

pub use builder::{build_node, parse, parse_lenient, parse_root};
pub use node::Node;
