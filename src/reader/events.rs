//! Token Types
//!
//! The abstract token stream consumed by the tree builder. Whatever produces
//! the tokens (the quick-xml backed [`SliceReader`](super::slice::SliceReader)
//! or a caller's own tokenizer) only has to speak this vocabulary.

use crate::error::Result;
use std::borrow::Cow;

/// One token of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Start of an element: <name attrs...>
    StartTag(StartTag<'a>),
    /// End of an element: </name>
    EndTag(Cow<'a, str>),
    /// Text content between tags (entities already decoded)
    CharData(Cow<'a, str>),
    /// No more input
    EndOfInput,
}

/// Start tag event data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'a> {
    /// Local element name
    pub name: Cow<'a, str>,
    /// Attributes in document order, as (local name, value)
    pub attributes: Vec<(Cow<'a, str>, Cow<'a, str>)>,
}

impl<'a> StartTag<'a> {
    /// Create a start tag with no attributes
    pub fn new(name: impl Into<Cow<'a, str>>) -> Self {
        StartTag {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Add an attribute
    pub fn with_attribute(
        mut self,
        name: impl Into<Cow<'a, str>>,
        value: impl Into<Cow<'a, str>>,
    ) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

impl<'a> Token<'a> {
    /// Start tag token without attributes
    pub fn start(name: impl Into<Cow<'a, str>>) -> Self {
        Token::StartTag(StartTag::new(name))
    }

    /// End tag token
    pub fn end(name: impl Into<Cow<'a, str>>) -> Self {
        Token::EndTag(name.into())
    }

    /// Character data token
    pub fn text(content: impl Into<Cow<'a, str>>) -> Self {
        Token::CharData(content.into())
    }

    /// Check if this is the end of input
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Token::EndOfInput)
    }
}

/// A pull source of tokens, owned exclusively by one parse
pub trait TokenSource<'a> {
    /// Next token. After [`Token::EndOfInput`] keeps returning it.
    fn next_token(&mut self) -> Result<Token<'a>>;
}

/// Any fallible token iterator is a source; an exhausted iterator is end of input.
impl<'a, I> TokenSource<'a> for I
where
    I: Iterator<Item = Result<Token<'a>>>,
{
    fn next_token(&mut self) -> Result<Token<'a>> {
        self.next().unwrap_or(Ok(Token::EndOfInput))
    }
}
