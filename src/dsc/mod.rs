//! Document Structuring Convention (DSC) header comments.
//!
//! EPS files describe themselves through `%%Name: value` comment lines in
//! their header. This module reads the two that matter for page setup:
//!
//! - `%%BoundingBox: llx lly urx ury` - image extent in points
//! - `%%Orientation: Portrait|Landscape`
//!
//! Everything here operates on raw bytes. EPS headers are ASCII but the body
//! may carry arbitrary binary data, so the buffer is never decoded as a whole.

mod bounding_box;
mod locator;
mod orientation;

pub use bounding_box::BoundingBox;
pub use locator::{find_directive, locate_directive, Directive};
pub use orientation::OrientationMode;

use std::ops::Range;

/// PostScript whitespace: space, tab, CR, LF, null, form feed.
pub(crate) fn is_ps_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x00 | 0x0C)
}

/// A half-open byte range `[start, end)` into a document buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// First byte of the span
    pub start: usize,
    /// One past the last byte of the span
    pub end: usize,
}

impl Span {
    /// Create a span. `end` is clamped so the span is never inverted.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The span as a `Range` for slicing.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Bytes of `buf` covered by this span.
    ///
    /// Out-of-range spans yield an empty slice rather than panicking.
    pub fn slice<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        buf.get(self.range()).unwrap_or(&[])
    }

    /// Shrink the span to exclude leading and trailing PostScript whitespace.
    ///
    /// A span holding only whitespace collapses to an empty span at its end.
    pub fn trim(&self, buf: &[u8]) -> Span {
        let bytes = self.slice(buf);
        let leading = bytes.iter().take_while(|&&b| is_ps_whitespace(b)).count();
        let trailing = bytes[leading..]
            .iter()
            .rev()
            .take_while(|&&b| is_ps_whitespace(b))
            .count();
        if leading == bytes.len() {
            return Span::new(self.start + bytes.len(), self.start + bytes.len());
        }
        Span::new(self.start + leading, self.start + bytes.len() - trailing)
    }
}

/// Newline convention of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// Unix `\n`
    #[default]
    Lf,
    /// Classic Mac `\r`
    Cr,
    /// DOS `\r\n`
    CrLf,
}

impl LineEnding {
    /// Detect the convention from the first newline sequence in `buf`.
    ///
    /// Falls back to `\n` when the buffer has no newline at all.
    pub fn detect(buf: &[u8]) -> Self {
        match buf.iter().position(|&b| b == b'\r' || b == b'\n') {
            Some(pos) if buf[pos] == b'\n' => LineEnding::Lf,
            Some(pos) if buf.get(pos + 1) == Some(&b'\n') => LineEnding::CrLf,
            Some(_) => LineEnding::Cr,
            None => LineEnding::default(),
        }
    }

    /// The newline sequence itself.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::CrLf => "\r\n",
        }
    }
}
