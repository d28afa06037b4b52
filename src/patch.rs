//! Span-based byte patching.
//!
//! A patch is a set of non-overlapping `(span, replacement)` edits against an
//! original buffer. Edits are applied left to right in start order, so the
//! relative position of the edited regions in the source never matters, and
//! every byte outside the edited spans is copied through unchanged.

use crate::dsc::Span;
use crate::error::{Error, Result};

/// Replace the bytes covered by `span` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Region of the original buffer to replace
    pub span: Span,
    /// Bytes written in place of the region
    pub replacement: Vec<u8>,
}

impl TextEdit {
    /// Create an edit.
    pub fn new(span: Span, replacement: impl Into<Vec<u8>>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }
}

/// Result of [`apply_edits`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    /// The patched buffer
    pub data: Vec<u8>,
    /// Where each replacement landed in `data`, in start order
    pub spans: Vec<Span>,
}

/// Apply `edits` to `original`, producing a new buffer.
///
/// # Errors
///
/// Returns [`Error::InvalidEdit`] if two edits overlap or an edit reaches past
/// the end of `original`. Two empty edits at the same offset, or an empty edit
/// touching the end of another, do not overlap.
pub fn apply_edits(original: &[u8], mut edits: Vec<TextEdit>) -> Result<Patched> {
    edits.sort_by_key(|edit| (edit.span.start, edit.span.end));

    let growth: usize = edits.iter().map(|e| e.replacement.len()).sum();
    let mut data = Vec::with_capacity(original.len() + growth);
    let mut spans = Vec::with_capacity(edits.len());
    let mut cursor = 0;

    for edit in &edits {
        if edit.span.end > original.len() {
            return Err(Error::InvalidEdit(format!(
                "span {}..{} is past the end of a {} byte buffer",
                edit.span.start,
                edit.span.end,
                original.len()
            )));
        }
        if edit.span.start < cursor {
            return Err(Error::InvalidEdit(format!(
                "span {}..{} overlaps an earlier edit ending at {}",
                edit.span.start, edit.span.end, cursor
            )));
        }

        data.extend_from_slice(&original[cursor..edit.span.start]);
        let landed = data.len();
        data.extend_from_slice(&edit.replacement);
        spans.push(Span::new(landed, data.len()));
        cursor = edit.span.end;
    }
    data.extend_from_slice(&original[cursor..]);

    Ok(Patched { data, spans })
}
