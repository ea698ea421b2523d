//! Query Module
//!
//! Read-only lookups on a built tree. Every query is total: a miss is `None`.
//!
//! - Path: first-match descent by segments or delimited path
//! - Predicate: candidate selection by (path, value) conditions
//! - Find: pre-order search by name across all descendants

pub mod find;
pub mod path;
pub mod predicate;

pub use predicate::conditions_from_pairs;
