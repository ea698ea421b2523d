//! Transform Module
//!
//! Value-producing reshapes of a tree. The source tree is never modified.
//!
//! - Split: one copy of a node per repeated nested element
//! - Flatten: single-level map keyed by ancestry paths

pub mod flatten;
pub mod split;

pub use flatten::{ATTR_PREFIX, DATA_KEY, NAME_KEY, NODES_PREFIX};
