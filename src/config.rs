//! Configuration for a single conversion.

use crate::dsc::OrientationMode;
use crate::interpreter::DEFAULT_RESOLUTION;
use crate::paths;
use std::path::{Path, PathBuf};

/// Options for converting one EPS file.
///
/// # Example
///
/// ```
/// use eps2pdf::config::ConversionOptions;
/// use eps2pdf::OrientationMode;
///
/// let options = ConversionOptions::new("figure.eps")
///     .with_orientation(OrientationMode::Flip)
///     .with_resolution(600);
///
/// assert_eq!(options.output_path(), std::path::PathBuf::from("figure.pdf"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    /// EPS file to convert
    pub input: PathBuf,

    /// Explicit interpreter executable.
    ///
    /// Must exist when given. When `None`, the interpreter is discovered from
    /// the environment and `PATH`.
    pub interpreter: Option<PathBuf>,

    /// What to do with the `%%Orientation` comment
    pub orientation: OrientationMode,

    /// Output path. Defaults to the input path with a `.pdf` extension.
    pub output: Option<PathBuf>,

    /// Rendering resolution in DPI
    pub resolution: u32,
}

impl ConversionOptions {
    /// Create options for `input` with defaults for everything else.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            interpreter: None,
            orientation: OrientationMode::None,
            output: None,
            resolution: DEFAULT_RESOLUTION,
        }
    }

    /// Use a specific interpreter executable.
    pub fn with_interpreter(mut self, path: impl Into<PathBuf>) -> Self {
        self.interpreter = Some(path.into());
        self
    }

    /// Set the orientation mode.
    pub fn with_orientation(mut self, mode: OrientationMode) -> Self {
        self.orientation = mode;
        self
    }

    /// Set the orientation mode from its numeric code; out-of-range codes
    /// mean [`OrientationMode::None`].
    pub fn with_orientation_code(mut self, code: i64) -> Self {
        self.orientation = OrientationMode::from_code(code);
        self
    }

    /// Write the PDF somewhere other than next to the input.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Set the rendering resolution.
    pub fn with_resolution(mut self, dpi: u32) -> Self {
        self.resolution = dpi;
        self
    }

    /// Where the PDF will be written.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| paths::output_path(&self.input))
    }

    /// Where the rewritten copy of the input is staged.
    pub fn temp_path(&self) -> PathBuf {
        paths::temp_path(&self.input)
    }

    /// The explicit interpreter, if any.
    pub fn interpreter(&self) -> Option<&Path> {
        self.interpreter.as_deref()
    }
}
