//! Locating DSC directives in a raw document buffer.

use super::Span;
use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::bytes::Regex;

lazy_static! {
    /// Case-insensitive, ASCII-only marker for the bounding box comment
    static ref RE_BOUNDING_BOX: Regex = Regex::new(r"(?i-u)%%BoundingBox:").unwrap();

    /// Case-insensitive, ASCII-only marker for the orientation comment
    static ref RE_ORIENTATION: Regex = Regex::new(r"(?i-u)%%Orientation:").unwrap();
}

/// The header directives this crate knows how to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `%%BoundingBox:`
    BoundingBox,
    /// `%%Orientation:`
    Orientation,
}

impl Directive {
    /// The comment marker, including the leading `%%` and trailing colon.
    pub fn marker(&self) -> &'static str {
        match self {
            Directive::BoundingBox => "%%BoundingBox:",
            Directive::Orientation => "%%Orientation:",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Directive::BoundingBox => &*RE_BOUNDING_BOX,
            Directive::Orientation => &*RE_ORIENTATION,
        }
    }
}

/// Find the value span of the first occurrence of `directive`.
///
/// The span starts right after the marker and runs up to, but not including,
/// the first CR, LF or `%`, or to the end of the buffer. It is returned
/// untrimmed; see [`Span::trim`].
pub fn find_directive(buf: &[u8], directive: Directive) -> Option<Span> {
    let marker = directive.pattern().find(buf)?;
    let start = marker.end();
    let end = buf[start..]
        .iter()
        .position(|&b| matches!(b, b'\r' | b'\n' | b'%'))
        .map_or(buf.len(), |offset| start + offset);

    log::debug!(
        "{} at byte {}, value span {}..{}",
        directive.marker(),
        marker.start(),
        start,
        end
    );
    Some(Span::new(start, end))
}

/// Like [`find_directive`], but a missing directive is an error.
pub fn locate_directive(buf: &[u8], directive: Directive) -> Result<Span> {
    find_directive(buf, directive)
        .ok_or_else(|| Error::DirectiveNotFound(directive.marker().to_string()))
}
