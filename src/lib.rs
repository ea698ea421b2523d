//! RustyNode - schema-less XML trees with path, predicate and split queries
//!
//! A document is read once into a [`Node`] tree (element name, attributes,
//! own text, ordered children). Queries then run over that tree:
//!
//! - Path descent: `sub_node`, `sub_node_at`, `sub_node_text*`
//! - Predicate search: `sub_node_by*`, `sub_node_text_by*`
//! - Recursive search: `find_node`
//! - Split: one copy of a node per repeated nested element
//! - Flatten: `to_map`, a single-level view keyed by ancestry paths
//!
//! The same operations are exported as NIFs for `RustyNode.Native`.

use rustler::{Binary, Encoder, Env, NifResult, ResourceArc, Term};

pub mod dom;
pub mod error;
pub mod query;
pub mod reader;
pub mod segment;
pub mod strategy;
pub mod transform;

mod resource;
mod term;

pub use dom::Node;
pub use error::{Error, Result};

use reader::SliceReader;
use resource::{DocumentRef, DocumentResource};
use term::{
    error_to_term, map_to_term, node_to_term, nodes_to_term, optional_node_to_term,
    optional_str_to_term,
};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "memory_tracking")]
mod tracking {
    use std::alloc::{GlobalAlloc, Layout};
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
    pub static PEAK_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

    pub struct TrackingAllocator;

    #[cfg(feature = "mimalloc")]
    static UNDERLYING: mimalloc::MiMalloc = mimalloc::MiMalloc;

    #[cfg(not(feature = "mimalloc"))]
    static UNDERLYING: std::alloc::System = std::alloc::System;

    unsafe impl GlobalAlloc for TrackingAllocator {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            let ptr = UNDERLYING.alloc(layout);
            if !ptr.is_null() {
                let current = ALLOCATED.fetch_add(layout.size(), Ordering::Relaxed) + layout.size();
                PEAK_ALLOCATED.fetch_max(current, Ordering::Relaxed);
            }
            ptr
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            ALLOCATED.fetch_sub(layout.size(), Ordering::Relaxed);
            UNDERLYING.dealloc(ptr, layout)
        }
    }
}

#[cfg(feature = "memory_tracking")]
#[global_allocator]
static GLOBAL: tracking::TrackingAllocator = tracking::TrackingAllocator;

#[cfg(all(feature = "mimalloc", not(feature = "memory_tracking")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Memory Tracking NIFs
// ============================================================================

#[cfg(feature = "memory_tracking")]
use std::sync::atomic::Ordering;

#[cfg(feature = "memory_tracking")]
#[rustler::nif]
fn get_rust_memory() -> usize {
    tracking::ALLOCATED.load(Ordering::SeqCst)
}

#[cfg(feature = "memory_tracking")]
#[rustler::nif]
fn get_rust_memory_peak() -> usize {
    tracking::PEAK_ALLOCATED.load(Ordering::SeqCst)
}

#[cfg(feature = "memory_tracking")]
#[rustler::nif]
fn reset_rust_memory_stats() -> (usize, usize) {
    let current = tracking::ALLOCATED.load(Ordering::SeqCst);
    let peak = tracking::PEAK_ALLOCATED.swap(current, Ordering::SeqCst);
    (current, peak)
}

#[cfg(not(feature = "memory_tracking"))]
#[rustler::nif]
fn get_rust_memory() -> usize {
    0
}

#[cfg(not(feature = "memory_tracking"))]
#[rustler::nif]
fn get_rust_memory_peak() -> usize {
    0
}

#[cfg(not(feature = "memory_tracking"))]
#[rustler::nif]
fn reset_rust_memory_stats() -> (usize, usize) {
    (0, 0)
}

// ============================================================================
// Parsing
// ============================================================================

fn read_tree(input: &[u8], lenient: bool) -> std::result::Result<Node, String> {
    let text = std::str::from_utf8(input).map_err(|e| e.to_string())?;
    let root = if lenient {
        dom::parse_root(&mut SliceReader::new_lenient(text))
    } else {
        dom::parse_root(&mut SliceReader::new(text))
    };
    root.map_err(|e| e.to_string())
}

fn parse_to_resource<'a>(env: Env<'a>, input: Binary<'a>, lenient: bool) -> Term<'a> {
    match read_tree(input.as_slice(), lenient) {
        Ok(root) => {
            let arc = ResourceArc::new(DocumentResource::new(root));
            (term::ok(), arc).encode(env)
        }
        Err(reason) => error_to_term(env, reason),
    }
}

/// Parse a document into a tree resource: {:ok, doc} or {:error, reason}
/// End-tag names must match their start tag.
#[rustler::nif]
fn parse<'a>(env: Env<'a>, input: Binary<'a>) -> NifResult<Term<'a>> {
    Ok(parse_to_resource(env, input, false))
}

/// Parse without checking end-tag names
#[rustler::nif]
fn parse_lenient<'a>(env: Env<'a>, input: Binary<'a>) -> NifResult<Term<'a>> {
    Ok(parse_to_resource(env, input, true))
}

/// Parse and descend in one call: {:ok, node | nil} or {:error, reason}
/// The first label names the root.
#[rustler::nif]
fn parse_at<'a>(env: Env<'a>, input: Binary<'a>, labels: Vec<&str>) -> NifResult<Term<'a>> {
    let text = match std::str::from_utf8(input.as_slice()) {
        Ok(text) => text,
        Err(e) => return Ok(error_to_term(env, e)),
    };

    match dom::parse(text, &labels) {
        Ok(node) => Ok((term::ok(), optional_node_to_term(env, node.as_ref())).encode(env)),
        Err(e) => Ok(error_to_term(env, e)),
    }
}

/// Get root element of a document
#[rustler::nif]
fn get_root<'a>(env: Env<'a>, doc_ref: DocumentRef) -> NifResult<Term<'a>> {
    Ok(node_to_term(env, doc_ref.root()))
}

// ============================================================================
// Queries
// ============================================================================

/// Node at a `/`-delimited path, or nil
#[rustler::nif]
fn sub_node<'a>(env: Env<'a>, doc_ref: DocumentRef, path: &str) -> NifResult<Term<'a>> {
    Ok(optional_node_to_term(env, doc_ref.root().sub_node_at(path)))
}

/// Text at a `/`-delimited path, or nil
#[rustler::nif]
fn sub_node_text<'a>(env: Env<'a>, doc_ref: DocumentRef, path: &str) -> NifResult<Term<'a>> {
    Ok(optional_str_to_term(env, doc_ref.root().sub_node_text_at(path)))
}

/// Children named `name` of the node at `path`; [] when the path is missing
#[rustler::nif]
fn sub_nodes<'a>(
    env: Env<'a>,
    doc_ref: DocumentRef,
    path: &str,
    name: &str,
) -> NifResult<Term<'a>> {
    let nodes = doc_ref
        .root()
        .sub_node_at(path)
        .map(|node| node.sub_nodes(name))
        .unwrap_or_default();
    Ok(nodes_to_term(env, nodes.into_iter()))
}

/// First `label` child under `root_path` meeting alternating path/value conditions
#[rustler::nif]
fn sub_node_by_x<'a>(
    env: Env<'a>,
    doc_ref: DocumentRef,
    root_path: &str,
    label: &str,
    pairs: Vec<&str>,
) -> NifResult<Term<'a>> {
    let conditions = query::conditions_from_pairs(&pairs);
    let node = doc_ref.root().sub_node_by_x(root_path, label, &conditions);
    Ok(optional_node_to_term(env, node))
}

/// Text at `target_path` in the node `sub_node_by_x` selects, or nil
#[rustler::nif]
fn sub_node_text_by_x<'a>(
    env: Env<'a>,
    doc_ref: DocumentRef,
    root_path: &str,
    label: &str,
    target_path: &str,
    pairs: Vec<&str>,
) -> NifResult<Term<'a>> {
    let conditions = query::conditions_from_pairs(&pairs);
    let text = doc_ref
        .root()
        .sub_node_text_by_x(root_path, label, target_path, &conditions);
    Ok(optional_str_to_term(env, text))
}

/// First descendant named `label`, or nil
#[rustler::nif]
fn find_node<'a>(env: Env<'a>, doc_ref: DocumentRef, label: &str) -> NifResult<Term<'a>> {
    Ok(optional_node_to_term(env, doc_ref.root().find_node(label)))
}

// ============================================================================
// Transforms
// ============================================================================

/// Split the root on a `.`-delimited label
#[rustler::nif]
fn split<'a>(env: Env<'a>, doc_ref: DocumentRef, label: &str) -> NifResult<Term<'a>> {
    let parts = doc_ref.root().split(label);
    Ok(nodes_to_term(env, parts.iter()))
}

/// Flatten the root into a map of binaries
#[rustler::nif]
fn to_map<'a>(env: Env<'a>, doc_ref: DocumentRef) -> NifResult<Term<'a>> {
    map_to_term(env, &doc_ref.root().to_map())
}

// ============================================================================
// Parallel Queries
// ============================================================================

/// Text at each path, evaluated in parallel; nil for misses
#[rustler::nif(schedule = "DirtyCpu")]
fn texts_parallel<'a>(
    env: Env<'a>,
    doc_ref: DocumentRef,
    paths: Vec<&str>,
) -> NifResult<Term<'a>> {
    let texts = strategy::texts_parallel(doc_ref.root(), &paths);

    let mut list = Term::list_new_empty(env);
    for text in texts.into_iter().rev() {
        list = list.list_prepend(optional_str_to_term(env, text));
    }
    Ok(list)
}

// ============================================================================
// NIF Initialization
// ============================================================================

rustler::init!("Elixir.RustyNode.Native");
