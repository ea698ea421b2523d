//! Elixir Term Conversion Utilities
//!
//! Converts nodes and query results to Elixir terms.

use crate::dom::Node;
use rustler::{Encoder, Env, NewBinary, NifResult, Term};
use std::collections::HashMap;

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    ok,
    error,
    element,
}

/// Convert a node to `{:element, name, [{attr, value}], data, children}`
///
/// Attributes are sorted by name so the same tree always encodes the same way.
pub fn node_to_term<'a>(env: Env<'a>, node: &Node) -> Term<'a> {
    let mut attrs_sorted: Vec<(&String, &String)> = node.attrs.iter().collect();
    attrs_sorted.sort_unstable();

    // Build lists back to front with list_prepend
    let mut attrs = Term::list_new_empty(env);
    for (name, value) in attrs_sorted.into_iter().rev() {
        let tuple = (str_to_binary(env, name), str_to_binary(env, value));
        attrs = attrs.list_prepend(tuple.encode(env));
    }

    let children = nodes_to_term(env, node.nodes.iter());

    (
        element(),
        str_to_binary(env, &node.name),
        attrs,
        str_to_binary(env, &node.data),
        children,
    )
        .encode(env)
}

/// Convert a node, or `nil` when absent
pub fn optional_node_to_term<'a>(env: Env<'a>, node: Option<&Node>) -> Term<'a> {
    match node {
        Some(node) => node_to_term(env, node),
        None => rustler::types::atom::nil().encode(env),
    }
}

/// Convert a sequence of nodes to a list, keeping order
pub fn nodes_to_term<'a, 'n, I>(env: Env<'a>, nodes: I) -> Term<'a>
where
    I: DoubleEndedIterator<Item = &'n Node>,
{
    let mut list = Term::list_new_empty(env);
    for node in nodes.rev() {
        list = list.list_prepend(node_to_term(env, node));
    }
    list
}

/// Convert optional text to a binary, or `nil` when absent
pub fn optional_str_to_term<'a>(env: Env<'a>, text: Option<&str>) -> Term<'a> {
    match text {
        Some(text) => str_to_binary(env, text),
        None => rustler::types::atom::nil().encode(env),
    }
}

/// Convert a flattened map to an Elixir map of binaries
pub fn map_to_term<'a>(env: Env<'a>, map: &HashMap<String, String>) -> NifResult<Term<'a>> {
    let pairs: Vec<(Term<'a>, Term<'a>)> = map
        .iter()
        .map(|(key, value)| (str_to_binary(env, key), str_to_binary(env, value)))
        .collect();
    Term::map_from_pairs(env, &pairs)
}

/// `{:error, reason}`
pub fn error_to_term<'a>(env: Env<'a>, reason: impl std::fmt::Display) -> Term<'a> {
    (error(), reason.to_string()).encode(env)
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
pub fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
