//! EPS header rewriting.
//!
//! Ghostscript renders an EPS onto its default paper size unless told
//! otherwise. This module replaces the `%%BoundingBox` value with a short
//! PostScript prologue that sets the page size to the image extent and moves
//! the image origin to the page origin:
//!
//! ```text
//! %%BoundingBox: 0 0 <w> <h>
//! << /PageSize [<w> <h>] >> setpagedevice
//! gsave <-x0> <-y0> translate
//! ```
//!
//! The `%%Orientation` value is optionally flipped or blanked in the same
//! pass. Every other byte of the document is left untouched.

use crate::dsc::{
    find_directive, locate_directive, BoundingBox, Directive, LineEnding, OrientationMode, Span,
};
use crate::error::Result;
use crate::patch::{apply_edits, TextEdit};

/// Outcome of [`rewrite_header`].
#[derive(Debug, Clone, PartialEq)]
pub struct RewrittenHeader {
    /// The full rewritten document
    pub data: Vec<u8>,
    /// Parsed `%%BoundingBox`
    pub bounding_box: BoundingBox,
    /// Newline convention used for the inserted lines
    pub line_ending: LineEnding,
    /// Trimmed `%%BoundingBox` value span in the original document
    pub bounding_box_span: Span,
    /// Trimmed `%%Orientation` value span in the original document, if present
    pub orientation_span: Option<Span>,
    /// Replacement written for the orientation value, if it changed
    pub orientation: Option<&'static str>,
    /// End of the last replacement in `data`
    edited_end: usize,
}

impl RewrittenHeader {
    /// The rewritten document from its start through the end of the line
    /// holding the last edit.
    pub fn edited_region(&self) -> &[u8] {
        let rest = &self.data[self.edited_end..];
        let line_end = match rest.iter().position(|&b| b == b'\r' || b == b'\n') {
            Some(pos) if rest[pos] == b'\r' && rest.get(pos + 1) == Some(&b'\n') => pos + 2,
            Some(pos) => pos + 1,
            None => rest.len(),
        };
        &self.data[..self.edited_end + line_end]
    }
}

/// Build the text that replaces the `%%BoundingBox` value.
pub fn page_setup_block(bbox: &BoundingBox, line_ending: LineEnding) -> String {
    let (width, height) = (bbox.page_width(), bbox.page_height());
    let (tx, ty) = bbox.origin_translation();
    let nl = line_ending.as_str();
    format!(
        "0 0 {width} {height} {nl}<< /PageSize [{width} {height}] >> setpagedevice {nl}gsave {tx} {ty} translate"
    )
}

/// Rewrite the header of the EPS document in `buf`.
///
/// The bounding box is mandatory; the orientation comment is only touched if
/// it exists and `mode` calls for a change.
///
/// # Errors
///
/// - [`Error::DirectiveNotFound`](crate::Error::DirectiveNotFound) if there is
///   no `%%BoundingBox:` comment
/// - [`Error::BoundingBoxParse`](crate::Error::BoundingBoxParse) if its value
///   is not four numbers
pub fn rewrite_header(buf: &[u8], mode: OrientationMode) -> Result<RewrittenHeader> {
    let bounding_box_span = locate_directive(buf, Directive::BoundingBox)?.trim(buf);
    let bounding_box = BoundingBox::parse(bounding_box_span.slice(buf))?;
    let line_ending = LineEnding::detect(buf);

    log::debug!(
        "Bounding box {} {} {} {}, page {}x{}",
        bounding_box.x0,
        bounding_box.y0,
        bounding_box.x1,
        bounding_box.y1,
        bounding_box.page_width(),
        bounding_box.page_height()
    );

    let mut edits = vec![TextEdit::new(
        bounding_box_span,
        page_setup_block(&bounding_box, line_ending),
    )];

    let orientation_span = find_directive(buf, Directive::Orientation).map(|span| span.trim(buf));
    let orientation = orientation_span.and_then(|span| mode.transform(span.slice(buf)));
    if let (Some(span), Some(replacement)) = (orientation_span, orientation) {
        log::debug!(
            "Orientation '{}' -> '{}'",
            String::from_utf8_lossy(span.slice(buf)),
            replacement
        );
        edits.push(TextEdit::new(span, replacement));
    }

    let patched = apply_edits(buf, edits)?;
    let edited_end = patched.spans.last().map_or(0, |span| span.end);

    Ok(RewrittenHeader {
        data: patched.data,
        bounding_box,
        line_ending,
        bounding_box_span,
        orientation_span,
        orientation,
        edited_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_page_setup_block() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 220.0);
        assert_eq!(
            page_setup_block(&bbox, LineEnding::Lf),
            "0 0 100 200 \n<< /PageSize [100 200] >> setpagedevice \ngsave -10 -20 translate"
        );
    }

    #[test]
    fn test_page_setup_block_crlf() {
        let bbox = BoundingBox::new(0.0, 0.0, 5.0, 6.0);
        let block = page_setup_block(&bbox, LineEnding::CrLf);
        assert!(block.starts_with("0 0 5 6 \r\n<< /PageSize [5 6] >>"));
        assert!(block.ends_with("setpagedevice \r\ngsave 0 0 translate"));
    }

    #[test]
    fn test_rewrite_with_flip() {
        let buf = b"%!PS-Adobe-3.0 EPSF-3.0\n%%BoundingBox: 0 0 200 100\n%%Orientation: Landscape\n%%EndComments\n";
        let out = rewrite_header(buf, OrientationMode::Flip).unwrap();
        assert_eq!(
            String::from_utf8(out.data.clone()).unwrap(),
            "%!PS-Adobe-3.0 EPSF-3.0\n\
             %%BoundingBox: 0 0 200 100 \n\
             << /PageSize [200 100] >> setpagedevice \n\
             gsave 0 0 translate\n\
             %%Orientation: Portrait\n\
             %%EndComments\n"
        );
        assert_eq!(out.orientation, Some("Portrait"));
    }

    #[test]
    fn test_orientation_before_bounding_box() {
        let buf = b"%%Orientation: Portrait\n%%BoundingBox: 10 20 110 220\nshowpage\n";
        let out = rewrite_header(buf, OrientationMode::Flip).unwrap();
        assert_eq!(
            String::from_utf8(out.data).unwrap(),
            "%%Orientation: Landscape\n\
             %%BoundingBox: 0 0 100 200 \n\
             << /PageSize [100 200] >> setpagedevice \n\
             gsave -10 -20 translate\n\
             showpage\n"
        );
    }

    #[test]
    fn test_remove_orientation() {
        let buf = b"%%BoundingBox: 0 0 1 1\n%%Orientation: Landscape\n";
        let out = rewrite_header(buf, OrientationMode::Remove).unwrap();
        assert!(out.data.ends_with(b"%%Orientation:  \n"));
    }

    #[test]
    fn test_missing_orientation_is_noop() {
        let buf = b"%%BoundingBox: 0 0 1 1\nshowpage\n";
        let out = rewrite_header(buf, OrientationMode::Flip).unwrap();
        assert!(out.orientation_span.is_none());
        assert!(out.orientation.is_none());
    }

    #[test]
    fn test_mode_none_leaves_orientation() {
        let buf = b"%%BoundingBox: 0 0 1 1\n%%Orientation: Landscape\n";
        let out = rewrite_header(buf, OrientationMode::None).unwrap();
        assert!(out.data.ends_with(b"%%Orientation: Landscape\n"));
        assert!(out.orientation_span.is_some());
        assert!(out.orientation.is_none());
    }

    #[test]
    fn test_line_ending_follows_document() {
        let buf = b"%!PS\r\n%%BoundingBox: 0 0 2 3\r\n";
        let out = rewrite_header(buf, OrientationMode::None).unwrap();
        assert_eq!(out.line_ending, LineEnding::CrLf);
        let text = String::from_utf8(out.data).unwrap();
        assert!(text.contains("0 0 2 3 \r\n<< /PageSize [2 3] >> setpagedevice \r\ngsave 0 0 translate\r\n"));
    }

    #[test]
    fn test_missing_bounding_box() {
        let err = rewrite_header(b"%!PS\n%%Orientation: Portrait\n", OrientationMode::Flip).unwrap_err();
        assert!(matches!(err, Error::DirectiveNotFound(_)));
    }

    #[test]
    fn test_malformed_bounding_box() {
        let err = rewrite_header(b"%%BoundingBox: (atend)\n", OrientationMode::None).unwrap_err();
        assert!(matches!(err, Error::BoundingBoxParse(_)));
    }

    #[test]
    fn test_edited_region() {
        let buf = b"%!PS\n%%BoundingBox: 0 0 1 1\n%%Orientation: Portrait\n%%EndComments\nbody\n";
        let out = rewrite_header(buf, OrientationMode::Flip).unwrap();
        let region = String::from_utf8(out.edited_region().to_vec()).unwrap();
        assert!(region.ends_with("%%Orientation: Landscape\n"));
        assert!(!region.contains("EndComments"));
    }
}
