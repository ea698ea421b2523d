//! Batch Query Strategies
//!
//! - Parallel: many path lookups or splits over shared trees with Rayon

pub mod parallel;

pub use parallel::{split_all, texts_parallel, xmap};
