//! `%%Orientation` rewriting.

use std::fmt;
use std::str::FromStr;

/// What to do with the `%%Orientation` comment before conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationMode {
    /// Leave the comment alone
    #[default]
    None,
    /// Swap `Landscape` and `Portrait`
    Flip,
    /// Blank out a `Landscape` or `Portrait` value
    Remove,
}

fn contains_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window.eq_ignore_ascii_case(needle))
}

impl OrientationMode {
    /// Map the numeric mode used on the command line.
    ///
    /// `0` is none, `1` flip, `2` remove. Anything else silently becomes
    /// [`OrientationMode::None`].
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => OrientationMode::Flip,
            2 => OrientationMode::Remove,
            _ => OrientationMode::None,
        }
    }

    /// Numeric code of this mode.
    pub fn code(&self) -> i64 {
        match self {
            OrientationMode::None => 0,
            OrientationMode::Flip => 1,
            OrientationMode::Remove => 2,
        }
    }

    /// Replacement for the (trimmed) orientation value, or `None` to keep it.
    ///
    /// Matching is by case-insensitive containment, and `landscape` is tested
    /// before `portrait`.
    pub fn transform(&self, value: &[u8]) -> Option<&'static str> {
        let landscape = contains_ignore_case(value, b"landscape");
        let portrait = contains_ignore_case(value, b"portrait");

        match self {
            OrientationMode::None => None,
            OrientationMode::Flip if landscape => Some("Portrait"),
            OrientationMode::Flip if portrait => Some("Landscape"),
            OrientationMode::Remove if landscape || portrait => Some(" "),
            _ => None,
        }
    }
}

impl fmt::Display for OrientationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrientationMode::None => "none",
            OrientationMode::Flip => "flip",
            OrientationMode::Remove => "remove",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OrientationMode {
    type Err = String;

    /// Accepts a numeric code (coerced like [`from_code`](Self::from_code))
    /// or one of the names `none`, `flip`, `remove`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Ok(Self::from_code(code));
        }
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(OrientationMode::None),
            "flip" => Ok(OrientationMode::Flip),
            "remove" => Ok(OrientationMode::Remove),
            _ => Err(format!("unknown orientation mode '{}' (expected 0-2, none, flip or remove)", s)),
        }
    }
}
