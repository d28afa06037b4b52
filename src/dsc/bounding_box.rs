//! `%%BoundingBox` value parsing.

use crate::error::{Error, Result};
use nom::{
    character::complete::{multispace0, multispace1},
    combinator::all_consuming,
    multi::separated_list0,
    number::complete::double,
    sequence::delimited,
    IResult,
};

/// Image extent in PostScript points, as declared by `%%BoundingBox`.
///
/// `(x0, y0)` is normally the lower-left corner and `(x1, y1)` the
/// upper-right. Swapped corners are accepted; [`width`](Self::width) and
/// [`height`](Self::height) are absolute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Lower-left x
    pub x0: f64,
    /// Lower-left y
    pub y0: f64,
    /// Upper-right x
    pub x1: f64,
    /// Upper-right y
    pub y1: f64,
}

/// Whitespace-separated numbers, with nothing else in the input.
fn coordinates(input: &str) -> IResult<&str, Vec<f64>> {
    all_consuming(delimited(multispace0, separated_list0(multispace1, double), multispace0))(input)
}

impl BoundingBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Parse the value of a `%%BoundingBox:` comment.
    ///
    /// Accepts integers and reals, negative or not. Anything other than
    /// exactly four finite numbers with a finite extent is rejected,
    /// including the deferred `(atend)` form.
    pub fn parse(value: &[u8]) -> Result<Self> {
        let malformed =
            || Error::BoundingBoxParse(String::from_utf8_lossy(value).trim().to_string());

        let text = std::str::from_utf8(value).map_err(|_| malformed())?;
        let (_, numbers) = coordinates(text).map_err(|_| malformed())?;

        match numbers.as_slice() {
            &[x0, y0, x1, y1] if numbers.iter().all(|n| n.is_finite()) => {
                let bbox = Self::new(x0, y0, x1, y1);
                if bbox.width().is_finite() && bbox.height().is_finite() {
                    Ok(bbox)
                } else {
                    Err(malformed())
                }
            },
            _ => Err(malformed()),
        }
    }

    /// Horizontal extent, `|x1 - x0|`.
    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).abs()
    }

    /// Vertical extent, `|y1 - y0|`.
    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).abs()
    }

    /// Page width as emitted into `/PageSize`, truncated toward zero.
    pub fn page_width(&self) -> i64 {
        self.width() as i64
    }

    /// Page height as emitted into `/PageSize`, truncated toward zero.
    pub fn page_height(&self) -> i64 {
        self.height() as i64
    }

    /// Translation that moves the lower-left corner to the page origin.
    ///
    /// Truncated toward zero. Coordinates beyond the `i64` range saturate.
    pub fn origin_translation(&self) -> (i64, i64) {
        ((-self.x0) as i64, (-self.y0) as i64)
    }
}
