//! ResourceArc Wrapper
//!
//! Keeps a parsed tree on the Rust side between NIF calls.

use crate::dom::Node;
use rustler::ResourceArc;

/// A parsed tree that can be stored in a ResourceArc
///
/// The tree is never modified after parsing, so concurrent NIF calls read it
/// without a lock. Splits and maps build new values.
pub struct DocumentResource {
    root: Node,
}

impl DocumentResource {
    pub fn new(root: Node) -> Self {
        DocumentResource { root }
    }

    /// The root element
    pub fn root(&self) -> &Node {
        &self.root
    }
}

#[rustler::resource_impl]
impl rustler::Resource for DocumentResource {}

/// Type alias for document ResourceArc
pub type DocumentRef = ResourceArc<DocumentResource>;
