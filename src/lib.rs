// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]
#![cfg_attr(test, allow(unused_variables))]

//! # eps2pdf
//!
//! Convert Encapsulated PostScript images to PDF with Ghostscript, with the
//! PDF page sized to the image's bounding box instead of a default paper size.
//!
//! ## How it works
//!
//! - **Header rewrite**: the `%%BoundingBox` comment is located and replaced
//!   with a `setpagedevice` prologue that sets `/PageSize` to the box extent and
//!   translates the image origin to the page origin
//! - **Orientation**: the `%%Orientation` comment can be flipped between
//!   `Portrait` and `Landscape`, or blanked out
//! - **Byte-exact**: everything outside the two rewritten values is copied
//!   through untouched, including binary previews and odd line endings
//! - **Interpreter**: the rewritten copy is staged next to the input, handed to
//!   Ghostscript's `pdfwrite` device, and removed again
//!
//! ## Quick Start
//!
//! ```no_run
//! use eps2pdf::{convert, ConversionOptions, OrientationMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = ConversionOptions::new("figure.eps").with_orientation(OrientationMode::Flip);
//! let conversion = convert(&options)?;
//! println!("{}", conversion.summary());
//! # Ok(())
//! # }
//! ```
//!
//! The header rewrite is usable on its own:
//!
//! ```
//! use eps2pdf::rewriter::rewrite_header;
//! use eps2pdf::OrientationMode;
//!
//! let eps = b"%!PS-Adobe-3.0 EPSF-3.0\n%%BoundingBox: 10 20 110 220\n";
//! let rewritten = rewrite_header(eps, OrientationMode::None).unwrap();
//! assert!(rewritten.data.ends_with(b"gsave -10 -20 translate\n"));
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 (<http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license (<http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// DSC comment handling
pub mod dsc;
pub mod patch;
pub mod rewriter;

// Interpreter and file handling
pub mod interpreter;
pub mod paths;

// Configuration
pub mod config;

// High-level API
pub mod converter;

// Re-exports
pub use config::ConversionOptions;
pub use converter::{convert, convert_with, convert_with_status, Conversion, ConversionPlan};
pub use dsc::{BoundingBox, OrientationMode};
pub use error::{Error, Result};
pub use interpreter::{CommandOutput, CommandRunner, Interpreter, SystemRunner};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // VERSION is populated from CARGO_PKG_VERSION at compile time
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "eps2pdf");
    }
}
