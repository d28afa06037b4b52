//! End-to-end EPS to PDF conversion.
//!
//! A conversion runs in two phases:
//!
//! 1. [`ConversionPlan::prepare`] resolves the interpreter, reads the input and
//!    rewrites its header in memory. Nothing is written to disk, so every
//!    validation or parse failure leaves the file system untouched.
//! 2. [`ConversionPlan::execute`] stages the rewritten copy next to the input,
//!    runs the interpreter on it and removes the copy again on every path.
//!
//! [`convert`] chains both; [`convert_with_status`] wraps the result in the
//! status-code-plus-message contract used by the command-line tool.

use crate::config::ConversionOptions;
use crate::dsc::BoundingBox;
use crate::error::{Error, Result};
use crate::interpreter::{CommandOutput, CommandRunner, Interpreter, SystemRunner};
use crate::paths::TempFile;
use crate::rewriter::{rewrite_header, RewrittenHeader};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything needed to run a conversion, computed without touching disk.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    input: PathBuf,
    output: PathBuf,
    temp: PathBuf,
    interpreter: Interpreter,
    header: RewrittenHeader,
}

impl ConversionPlan {
    /// Validate `options` and rewrite the input header in memory.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInterpreterPath`], [`Error::FileRead`],
    /// [`Error::DirectiveNotFound`] or [`Error::BoundingBoxParse`].
    pub fn prepare(options: &ConversionOptions) -> Result<Self> {
        let interpreter =
            Interpreter::resolve(options.interpreter())?.with_resolution(options.resolution);

        let document = fs::read(&options.input).map_err(|source| Error::FileRead {
            path: options.input.clone(),
            source,
        })?;
        log::debug!("Read {} bytes from {}", document.len(), options.input.display());

        let header = rewrite_header(&document, options.orientation)?;

        Ok(Self {
            input: options.input.clone(),
            output: options.output_path(),
            temp: options.temp_path(),
            interpreter,
            header,
        })
    }

    /// The EPS being converted.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Where the PDF will be written.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Where the rewritten copy will be staged.
    pub fn temp(&self) -> &Path {
        &self.temp
    }

    /// The interpreter that will run.
    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// The rewritten document.
    pub fn header(&self) -> &RewrittenHeader {
        &self.header
    }

    /// The interpreter command line this plan will run.
    pub fn command_line(&self) -> String {
        self.interpreter.command_line(&self.output, &self.temp)
    }

    /// Stage the rewritten copy and run the interpreter with `runner`.
    ///
    /// The staged copy is removed before this returns, whatever the outcome.
    /// If the interpreter fails, an output file it created is removed as well;
    /// one that existed before the run is left alone.
    ///
    /// # Errors
    ///
    /// [`Error::TempFileWrite`] or [`Error::InterpreterInvocation`].
    pub fn execute(self, runner: &dyn CommandRunner) -> Result<Conversion> {
        let temp = TempFile::create(&self.temp, &self.header.data)?;
        let partial_output = self.guard_new_output();

        let interpreter_output = self.interpreter.run(runner, &self.output, temp.path())?;
        drop(temp);
        if let Some(guard) = partial_output {
            guard.keep();
        }

        Ok(Conversion {
            input: self.input,
            output: self.output,
            bounding_box: self.header.bounding_box,
            orientation: self.header.orientation,
            interpreter_output,
        })
    }

    /// Guard the output path if nothing is there yet.
    fn guard_new_output(&self) -> Option<TempFile> {
        if self.output.exists() {
            return None;
        }
        match TempFile::adopt(&self.output) {
            Ok(guard) => Some(guard),
            Err(e) => {
                log::warn!("Cannot guard {}: {}", self.output.display(), e);
                None
            },
        }
    }
}

/// A finished conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The EPS that was converted
    pub input: PathBuf,
    /// The PDF that was written
    pub output: PathBuf,
    /// Bounding box the page was sized to
    pub bounding_box: BoundingBox,
    /// New orientation value, if it was changed
    pub orientation: Option<&'static str>,
    /// What the interpreter printed
    pub interpreter_output: CommandOutput,
}

impl Conversion {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Converted {} to {} ({}x{} pt)",
            self.input.display(),
            self.output.display(),
            self.bounding_box.page_width(),
            self.bounding_box.page_height()
        )
    }
}

/// Convert an EPS file to PDF using the system interpreter.
pub fn convert(options: &ConversionOptions) -> Result<Conversion> {
    convert_with(options, &SystemRunner)
}

/// Convert an EPS file to PDF, running the interpreter through `runner`.
pub fn convert_with(options: &ConversionOptions, runner: &dyn CommandRunner) -> Result<Conversion> {
    log::info!("Converting {}", options.input.display());
    let conversion = ConversionPlan::prepare(options)?.execute(runner)?;
    log::info!("Wrote {}", conversion.output.display());
    Ok(conversion)
}

/// Convert and report the outcome as a status code and message.
///
/// Returns `0` on success and the error's
/// [`status_code`](Error::status_code) otherwise. The message goes into
/// `message` when given; otherwise it is printed, to stdout on success and to
/// stderr on failure.
pub fn convert_with_status(options: &ConversionOptions, message: Option<&mut String>) -> i32 {
    convert_with_status_using(options, &SystemRunner, message)
}

/// [`convert_with_status`] with a custom [`CommandRunner`].
pub fn convert_with_status_using(
    options: &ConversionOptions,
    runner: &dyn CommandRunner,
    message: Option<&mut String>,
) -> i32 {
    let (status, text) = match convert_with(options, runner) {
        Ok(conversion) => (0, conversion.summary()),
        Err(e) => (
            e.status_code(),
            format!("Failed to convert {}: {}", options.input.display(), e),
        ),
    };

    match message {
        Some(out) => *out = text,
        None if status == 0 => println!("{}", text),
        None => eprintln!("{}", text),
    }
    status
}
