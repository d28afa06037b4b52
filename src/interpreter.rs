//! Ghostscript invocation.
//!
//! The interpreter is a black box: it gets a fixed set of flags, an output
//! path and an input path, and only its exit status is interpreted.
//!
//! Process execution goes through the [`CommandRunner`] trait so callers can
//! substitute the real subprocess with something else.

use crate::error::{Error, Result};
use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default rendering resolution in DPI.
pub const DEFAULT_RESOLUTION: u32 = 1200;

/// Environment variable naming the interpreter when none is given explicitly.
pub const INTERPRETER_ENV: &str = "EPS2PDF_GHOSTSCRIPT";

/// Flags passed ahead of the resolution, output and input arguments.
const FIXED_FLAGS: [&str; 6] = [
    "-q",
    "-dNOPAUSE",
    "-dBATCH",
    "-dDOINTERPOLATE",
    "-dUseFlateCompression=true",
    "-sDEVICE=pdfwrite",
];

/// Console executable names, in order of preference.
#[cfg(windows)]
const PROGRAM_NAMES: &[&str] = &["gswin64c.exe", "gswin32c.exe"];
#[cfg(not(windows))]
const PROGRAM_NAMES: &[&str] = &["gs"];

/// Captured result of a finished process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// True if the process exited with status zero
    pub success: bool,
    /// Exit code, if the process exited normally
    pub code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    /// Whatever the process printed, stderr first, trimmed.
    pub fn diagnostics(&self) -> String {
        let mut text = self.stderr.trim().to_string();
        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(stdout);
        }
        text
    }
}

/// Runs an external program to completion.
pub trait CommandRunner {
    /// Run `program` with `args`, blocking until it exits.
    fn run(&self, program: &Path, args: &[OsString]) -> std::io::Result<CommandOutput>;
}

/// [`CommandRunner`] backed by [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[OsString]) -> std::io::Result<CommandOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Look for `program` in each directory of a `PATH`-style list.
pub fn find_in_path(program: &str, path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// A resolved PostScript interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreter {
    program: PathBuf,
    resolution: u32,
}

impl Interpreter {
    /// Use `program` as the interpreter, without any validation.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            resolution: DEFAULT_RESOLUTION,
        }
    }

    /// Set the rendering resolution.
    pub fn with_resolution(mut self, dpi: u32) -> Self {
        self.resolution = dpi;
        self
    }

    /// Find the interpreter to use.
    ///
    /// An explicit path wins and must exist. Otherwise `EPS2PDF_GHOSTSCRIPT`
    /// is consulted (and must exist if set), then `PATH` is searched for the
    /// Ghostscript console executable. If nothing is found, the bare program
    /// name is returned and any launch failure is reported when it runs.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInterpreterPath`] if an explicit or environment path
    /// does not exist.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        Self::resolve_from(explicit, env::var_os(INTERPRETER_ENV), env::var_os("PATH"))
    }

    fn resolve_from(
        explicit: Option<&Path>,
        from_env: Option<OsString>,
        path_var: Option<OsString>,
    ) -> Result<Self> {
        let configured = explicit
            .map(Path::to_path_buf)
            .or_else(|| from_env.filter(|v| !v.is_empty()).map(PathBuf::from));

        if let Some(program) = configured {
            if !program.exists() {
                return Err(Error::InvalidInterpreterPath(program));
            }
            log::debug!("Using interpreter {}", program.display());
            return Ok(Self::new(program));
        }

        let found = path_var.and_then(|path_var| {
            PROGRAM_NAMES
                .iter()
                .find_map(|name| find_in_path(name, &path_var))
        });
        match found {
            Some(program) => {
                log::debug!("Found interpreter {} on PATH", program.display());
                Ok(Self::new(program))
            },
            None => {
                log::debug!("No interpreter found on PATH, falling back to {}", PROGRAM_NAMES[0]);
                Ok(Self::new(PROGRAM_NAMES[0]))
            },
        }
    }

    /// Path or name of the interpreter executable.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Rendering resolution in DPI.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Arguments converting `input` into the PDF `output`.
    pub fn arguments(&self, output: &Path, input: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = FIXED_FLAGS.iter().map(|flag| OsString::from(*flag)).collect();
        args.push(format!("-r{}", self.resolution).into());

        let mut output_arg = OsString::from("-sOutputFile=");
        output_arg.push(output);
        args.push(output_arg);

        args.push("-f".into());
        args.push(input.into());
        args
    }

    /// The full command line, for display.
    pub fn command_line(&self, output: &Path, input: &Path) -> String {
        std::iter::once(self.program.as_os_str().to_os_string())
            .chain(self.arguments(output, input))
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Convert `input` to `output` with `runner`.
    ///
    /// # Errors
    ///
    /// [`Error::InterpreterInvocation`] if the program cannot be launched or
    /// exits unsuccessfully. The message carries the interpreter's output.
    pub fn run(
        &self,
        runner: &dyn CommandRunner,
        output: &Path,
        input: &Path,
    ) -> Result<CommandOutput> {
        log::debug!("Running {}", self.command_line(output, input));

        let result = runner
            .run(&self.program, &self.arguments(output, input))
            .map_err(|e| {
                Error::InterpreterInvocation(format!(
                    "failed to launch {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        if !result.success {
            let status = result
                .code
                .map_or_else(|| "terminated by signal".to_string(), |c| format!("exit status {}", c));
            let diagnostics = result.diagnostics();
            let message = if diagnostics.is_empty() {
                format!("{} failed with {}", self.program.display(), status)
            } else {
                format!("{} failed with {}: {}", self.program.display(), status, diagnostics)
            };
            return Err(Error::InterpreterInvocation(message));
        }

        Ok(result)
    }
}
