//! Token Source Module
//!
//! - Events: the abstract token vocabulary and the `TokenSource` trait
//! - SliceReader: quick-xml backed source over an in-memory document

pub mod events;
pub mod slice;

pub use events::{StartTag, Token, TokenSource};
pub use slice::SliceReader;
