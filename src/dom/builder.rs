//! Tree Builder
//!
//! Turns a flat token stream into a [`Node`] tree.
//!
//! Each open element carries a nesting balance. A start tag with the same name
//! as the element currently being built deepens that element instead of opening
//! a child, and only a matching end tag brings the balance back down. Running
//! out of input closes every open element where it stands: a truncated document
//! yields a partial tree, not an error.
//!
//! Open elements live on an explicit stack so deep documents cannot overflow
//! the thread stack.

use super::node::Node;
use crate::error::{Error, Result};
use crate::reader::{SliceReader, StartTag, Token, TokenSource};
use log::{debug, trace};
use std::str::FromStr;

/// An element under construction
struct Frame {
    node: Node,
    balance: usize,
}

impl Frame {
    fn open(tag: StartTag<'_>) -> Self {
        let mut node = Node::new(tag.name.into_owned());
        for (name, value) in tag.attributes {
            node.attrs.insert(name.into_owned(), value.into_owned());
        }
        Frame { node, balance: 1 }
    }
}

/// Build the element opened by `start`, consuming tokens up to its matching end tag
///
/// Errors from the source propagate; end of input does not.
pub fn build_node<'a, S>(source: &mut S, start: StartTag<'a>) -> Result<Node>
where
    S: TokenSource<'a> + ?Sized,
{
    let mut current = Frame::open(start);
    let mut parents: Vec<Frame> = Vec::new();

    loop {
        match source.next_token()? {
            Token::StartTag(tag) => {
                if tag.name == current.node.name.as_str() {
                    current.balance += 1;
                    trace!("<{}> re-entered, balance {}", current.node.name, current.balance);
                    continue;
                }
                let child = Frame::open(tag);
                parents.push(std::mem::replace(&mut current, child));
            }

            Token::CharData(text) => {
                // Whitespace-only runs never replace captured text
                if !text.trim().is_empty() {
                    current.node.data = text.into_owned();
                }
            }

            Token::EndTag(name) => {
                if name != current.node.name.as_str() {
                    continue;
                }
                current.balance -= 1;
                if current.balance == 0 {
                    match parents.pop() {
                        Some(parent) => {
                            let done = std::mem::replace(&mut current, parent);
                            current.node.nodes.push(done.node);
                        }
                        None => return Ok(current.node),
                    }
                }
            }

            Token::EndOfInput => {
                debug!(
                    "input ended inside <{}> with {} open element(s)",
                    current.node.name,
                    parents.len() + 1
                );
                while let Some(parent) = parents.pop() {
                    let done = std::mem::replace(&mut current, parent);
                    current.node.nodes.push(done.node);
                }
                return Ok(current.node);
            }
        }
    }
}

/// Build the first element of a token stream
///
/// Tokens before the first start tag are skipped.
pub fn parse_root<'a, S>(source: &mut S) -> Result<Node>
where
    S: TokenSource<'a> + ?Sized,
{
    loop {
        match source.next_token()? {
            Token::StartTag(tag) => return build_node(source, tag),
            Token::EndOfInput => return Err(Error::NoRootElement),
            _ => continue,
        }
    }
}

/// Parse a document and descend to `labels`
///
/// `labels[0]` names the root; the rest is a path below it. An empty `labels`
/// returns the root. A path that does not resolve is `Ok(None)`, not an error.
pub fn parse(document: &str, labels: &[&str]) -> Result<Option<Node>> {
    parse_with(SliceReader::new(document), labels)
}

/// Like [`parse`], without checking end-tag names
pub fn parse_lenient(document: &str, labels: &[&str]) -> Result<Option<Node>> {
    parse_with(SliceReader::new_lenient(document), labels)
}

fn parse_with(mut reader: SliceReader<'_>, labels: &[&str]) -> Result<Option<Node>> {
    let root = parse_root(&mut reader)?;
    debug!("parsed <{}> with {} child element(s)", root.name, root.nodes.len());

    let Some((first, rest)) = labels.split_first() else {
        return Ok(Some(root));
    };
    if *first != root.name {
        trace!("root <{}> does not match {:?}", root.name, first);
        return Ok(None);
    }
    Ok(root.into_sub_node(rest))
}

impl FromStr for Node {
    type Err = Error;

    /// Parse a whole document into its root node
    fn from_str(document: &str) -> Result<Self> {
        parse_root(&mut SliceReader::new(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::errors::SyntaxError;

    fn build(tokens: Vec<Token<'static>>) -> Result<Node> {
        let mut source = tokens.into_iter().map(Ok::<_, Error>);
        parse_root(&mut source)
    }

    #[test]
    fn test_simple_tree() {
        let root: Node = "<a><b x=\"1\">hi</b><b x=\"2\">yo</b></a>".parse().unwrap();
        assert_eq!(root.name, "a");
        assert_eq!(root.nodes.len(), 2);
        assert_eq!(root.nodes[0].attr("x"), Some("1"));
        assert_eq!(root.nodes[0].text(), "hi");
        assert_eq!(root.nodes[1].attr("x"), Some("2"));
        assert_eq!(root.nodes[1].text(), "yo");
        assert!(root.attrs.is_empty());
    }

    #[test]
    fn test_whitespace_does_not_populate_data() {
        let root: Node = "<a>\n  <b>x</b>\n</a>".parse().unwrap();
        assert_eq!(root.text(), "");
        assert_eq!(root.nodes[0].text(), "x");
    }

    #[test]
    fn test_data_is_kept_untrimmed() {
        let root: Node = "<a>  padded text \n</a>".parse().unwrap();
        assert_eq!(root.text(), "  padded text \n");
    }

    #[test]
    fn test_later_text_overwrites_earlier() {
        let root: Node = "<a>first<b/>second<c/>   </a>".parse().unwrap();
        assert_eq!(root.text(), "second");
        assert_eq!(root.nodes.len(), 2);
    }

    #[test]
    fn test_same_name_reentry_nests_instead_of_child() {
        let root: Node = "<a><a>inner</a><b/></a>".parse().unwrap();
        assert_eq!(root.name, "a");
        assert_eq!(root.text(), "inner");
        assert_eq!(root.nodes.len(), 1);
        assert_eq!(root.nodes[0].name, "b");
    }

    #[test]
    fn test_reentry_only_applies_to_current_element() {
        let root: Node = "<a><b><a>deep</a></b></a>".parse().unwrap();
        assert_eq!(root.nodes[0].name, "b");
        assert_eq!(root.nodes[0].nodes[0].name, "a");
        assert_eq!(root.nodes[0].nodes[0].text(), "deep");
    }

    #[test]
    fn test_truncated_tokens_yield_partial_tree() {
        let root = build(vec![
            Token::start("a"),
            Token::start("b"),
            Token::text("x"),
            Token::end("b"),
            Token::start("c"),
            Token::start("d"),
            Token::text("y"),
        ])
        .unwrap();
        assert_eq!(root.nodes.len(), 2);
        assert_eq!(root.nodes[0].text(), "x");
        assert_eq!(root.nodes[1].name, "c");
        assert_eq!(root.nodes[1].nodes[0].name, "d");
        assert_eq!(root.nodes[1].nodes[0].text(), "y");
    }

    #[test]
    fn test_truncated_document_is_not_an_error() {
        let root: Node = "<a><b>x</b><c>".parse().unwrap();
        assert_eq!(root.name, "a");
        assert_eq!(root.nodes[0].text(), "x");
    }

    #[test]
    fn test_source_error_propagates() {
        let mut source = vec![
            Ok(Token::start("a")),
            Err(Error::Xml(quick_xml::Error::Syntax(SyntaxError::UnclosedTag))),
        ]
        .into_iter();
        assert!(matches!(parse_root(&mut source), Err(Error::Xml(_))));
    }

    #[test]
    fn test_attributes_from_start_tag() {
        let mut source = vec![Ok::<_, Error>(Token::end("a"))].into_iter();
        let tag = StartTag::new("a").with_attribute("k", "v").with_attribute("k", "w");
        let node = build_node(&mut source, tag).unwrap();
        assert_eq!(node.attr("k"), Some("w"));
        assert!(node.nodes.is_empty());
    }

    #[test]
    fn test_skips_prolog() {
        let root: Node = "<?xml version=\"1.0\"?>\n<!-- hi -->\n<root/>".parse().unwrap();
        assert_eq!(root.name, "root");
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!("".parse::<Node>(), Err(Error::NoRootElement)));
        assert!(matches!("  \n".parse::<Node>(), Err(Error::NoRootElement)));
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!("<a></b>".parse::<Node>(), Err(Error::Xml(_))));
        assert!(parse("<a><b x=1></b></a>", &[]).is_err());
    }

    #[test]
    fn test_duplicate_attribute_last_wins() {
        let root: Node = "<a k=\"1\" k=\"2\"><b j=\"x\" j=\"y\"/></a>".parse().unwrap();
        assert_eq!(root.attr("k"), Some("2"));
        assert_eq!(root.nodes[0].attr("j"), Some("y"));
    }

    #[test]
    fn test_lenient_absorbs_mismatched_end() {
        let node = parse_lenient("<a><b>x</c></b></a>", &[]).unwrap().unwrap();
        assert_eq!(node.nodes[0].name, "b");
        assert_eq!(node.nodes[0].text(), "x");
    }

    #[test]
    fn test_parse_with_labels() {
        let doc = "<a><b><c>1</c></b></a>";
        assert_eq!(parse(doc, &[]).unwrap().unwrap().name, "a");
        assert_eq!(parse(doc, &["a"]).unwrap().unwrap().name, "a");
        assert_eq!(parse(doc, &["a", "b", "c"]).unwrap().unwrap().text(), "1");
        assert_eq!(parse(doc, &["a", "", "b"]).unwrap().unwrap().name, "b");
        assert!(parse(doc, &["x"]).unwrap().is_none());
        assert!(parse(doc, &["x", "b"]).unwrap().is_none());
        assert!(parse(doc, &["a", "c"]).unwrap().is_none());
    }

    #[test]
    fn test_deep_document() {
        let depth = 1_000;
        let mut doc = String::new();
        for i in 0..depth {
            doc.push_str(&format!("<n{}>", i % 2));
        }
        doc.push_str("leaf");
        for i in (0..depth).rev() {
            doc.push_str(&format!("</n{}>", i % 2));
        }
        let root: Node = doc.parse().unwrap();
        let mut node = &root;
        let mut levels = 1;
        while let Some(child) = node.nodes.first() {
            node = child;
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(node.text(), "leaf");
    }
}
