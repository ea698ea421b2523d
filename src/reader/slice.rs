//! Slice Reader
//!
//! Token source over an in-memory document, backed by quick-xml.
//! Names and attribute keys are reported by local name; comments, processing
//! instructions, the XML declaration and DOCTYPE never reach the builder.

use super::events::{StartTag, Token};
use crate::error::Result;
use quick_xml::errors::IllFormedError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

/// XML token reader from a string slice
pub struct SliceReader<'a> {
    reader: Reader<&'a [u8]>,
    done: bool,
}

impl<'a> SliceReader<'a> {
    /// Create a new slice reader (strict mode: end tags must match their start tag)
    pub fn new(input: &'a str) -> Self {
        Self::with_mode(input, true)
    }

    /// Create a new slice reader in lenient mode
    ///
    /// End-tag names are not checked. An end tag with no open element left to
    /// close is still reported as an end tag, and the builder skips it.
    pub fn new_lenient(input: &'a str) -> Self {
        Self::with_mode(input, false)
    }

    fn with_mode(input: &'a str, strict: bool) -> Self {
        let mut reader = Reader::from_str(input);
        let config = reader.config_mut();
        // <b/> arrives as <b></b>
        config.expand_empty_elements = true;
        config.check_end_names = strict;
        // A lenient end tag can close past the real open element, so later
        // end tags may find nothing open
        config.allow_unmatched_ends = !strict;
        SliceReader {
            reader,
            done: false,
        }
    }

    /// Get the next token
    pub fn next_event(&mut self) -> Result<Token<'a>> {
        if self.done {
            return Ok(Token::EndOfInput);
        }

        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                // Unclosed elements at the end are the builder's business
                Err(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(_))) => Event::Eof,
                Err(e) => {
                    self.done = true;
                    return Err(e.into());
                }
            };

            match event {
                Event::Start(e) | Event::Empty(e) => {
                    return Ok(Token::StartTag(self.start_tag(&e)?));
                }
                Event::End(e) => {
                    let name = std::str::from_utf8(e.local_name().as_ref())?.to_owned();
                    return Ok(Token::EndTag(Cow::Owned(name)));
                }
                Event::Text(t) => {
                    let content = t.unescape()?.into_owned();
                    return Ok(Token::CharData(Cow::Owned(content)));
                }
                Event::CData(c) => {
                    return Ok(Token::CharData(bytes_to_str(c.into_inner())?));
                }
                Event::Eof => {
                    self.done = true;
                    return Ok(Token::EndOfInput);
                }
                _ => continue,
            }
        }
    }

    fn start_tag(&self, e: &BytesStart<'a>) -> Result<StartTag<'a>> {
        let name = std::str::from_utf8(e.local_name().as_ref())?.to_owned();
        let mut tag = StartTag::new(name);

        // Duplicate attributes are accepted in both modes; the last one wins
        let mut attributes = e.attributes();
        attributes.with_checks(false);
        for attr in attributes {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_owned();
            let value = attr.unescape_value()?.into_owned();
            tag.attributes.push((Cow::Owned(key), Cow::Owned(value)));
        }

        Ok(tag)
    }
}

impl<'a> Iterator for SliceReader<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_event() {
            Ok(Token::EndOfInput) => None,
            other => Some(other),
        }
    }
}

/// Borrow raw bytes as text when possible
fn bytes_to_str(bytes: Cow<'_, [u8]>) -> Result<Cow<'_, str>> {
    Ok(match bytes {
        Cow::Borrowed(b) => Cow::Borrowed(std::str::from_utf8(b)?),
        Cow::Owned(v) => Cow::Owned(String::from_utf8(v).map_err(|e| e.utf8_error())?),
    })
}
