//! Delimited path segmentation
//!
//! Paths like `order/items/item` and split labels like `items.item` are cut
//! on a single ASCII delimiter with memchr. Empty segments (leading, trailing
//! or doubled delimiters) are skipped.

use memchr::memchr;

/// Delimiter for descent paths
pub const DEFAULT_PATH_DELIMITER: u8 = b'/';

/// Delimiter for split labels
pub const SPLIT_DELIMITER: u8 = b'.';

/// Iterator over the non-empty segments of a delimited path
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
    delimiter: Option<u8>,
}

impl<'a> Segments<'a> {
    /// Segment `path` on `delimiter`
    ///
    /// A non-ASCII delimiter byte never occurs on a character boundary, so
    /// such a path is one segment.
    pub fn new(path: &'a str, delimiter: u8) -> Self {
        Segments {
            rest: path,
            delimiter: delimiter.is_ascii().then_some(delimiter),
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while !self.rest.is_empty() {
            let bytes = self.rest.as_bytes();
            let (segment, rest) = match self.delimiter.and_then(|d| memchr(d, bytes)) {
                Some(pos) => (&self.rest[..pos], &self.rest[pos + 1..]),
                None => (self.rest, ""),
            };
            self.rest = rest;
            if !segment.is_empty() {
                return Some(segment);
            }
        }
        None
    }
}

/// Segments of a `/`-delimited path
pub fn segments(path: &str) -> Segments<'_> {
    Segments::new(path, DEFAULT_PATH_DELIMITER)
}
