//! Error types
//!
//! Only tree construction can fail. Queries never return an error: a missing
//! path, child or predicate match is reported as `None`.

use quick_xml::events::attributes::AttrError;

/// Failure while reading a document into a [`Node`](crate::dom::Node) tree
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The reader rejected the input (syntax error, mismatched end tag, bad escape)
    #[error("xml parse: {0}")]
    Xml(#[from] quick_xml::Error),
    /// An attribute inside a start tag could not be read
    #[error("attribute: {0}")]
    Attribute(#[from] AttrError),
    /// A tag name was not valid UTF-8
    #[error("utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// The input ended before any element was opened
    #[error("document has no root element")]
    NoRootElement,
}

/// Result alias used by the builder and the token sources
pub type Result<T> = std::result::Result<T, Error>;
