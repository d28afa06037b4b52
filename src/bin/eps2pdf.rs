//! Convert EPS files to PDF, sizing each page to the image bounding box.
//!
//! Usage:
//!   eps2pdf figure.eps
//!   eps2pdf --orientation flip --ghostscript /usr/local/bin/gs a.eps b.eps
//!   eps2pdf --dry-run figure.eps

use clap::{CommandFactory, Parser};
use eps2pdf::config::ConversionOptions;
use eps2pdf::converter::{convert_with_status, ConversionPlan};
use eps2pdf::interpreter::DEFAULT_RESOLUTION;
use eps2pdf::OrientationMode;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// EPS files to convert
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Ghostscript executable (default: $EPS2PDF_GHOSTSCRIPT, then PATH)
    #[arg(short = 'g', long = "ghostscript")]
    ghostscript: Option<PathBuf>,

    /// Orientation handling: 0/none, 1/flip, 2/remove
    #[arg(short = 'r', long = "orientation", default_value = "none")]
    orientation: OrientationMode,

    /// Output file (only valid with a single input)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Rendering resolution in DPI
    #[arg(long = "resolution", default_value_t = DEFAULT_RESOLUTION)]
    resolution: u32,

    /// Show the rewritten header and interpreter command without running it
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    fn options_for(&self, input: &Path) -> ConversionOptions {
        let mut options = ConversionOptions::new(input)
            .with_orientation(self.orientation)
            .with_resolution(self.resolution);
        if let Some(gs) = &self.ghostscript {
            options = options.with_interpreter(gs);
        }
        if let Some(output) = &self.output {
            options = options.with_output(output);
        }
        options
    }
}

/// Status for a dry run whose report could not be written to stdout.
const REPORT_WRITE_FAILED: i32 = 1;

fn print_plan(out: &mut impl Write, plan: &ConversionPlan) -> io::Result<()> {
    writeln!(out, "# {}", plan.input().display())?;
    out.write_all(plan.header().edited_region())?;
    writeln!(out)?;
    writeln!(out, "# {}", plan.command_line())?;
    out.flush()
}

fn dry_run(options: &ConversionOptions) -> i32 {
    match ConversionPlan::prepare(options) {
        Ok(plan) => match print_plan(&mut io::stdout().lock(), &plan) {
            Ok(()) => 0,
            Err(e) => {
                log::error!("Failed to write dry-run report: {}", e);
                REPORT_WRITE_FAILED
            },
        },
        Err(e) => {
            eprintln!("Failed to convert {}: {}", options.input.display(), e);
            e.status_code()
        },
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.output.is_some() && args.inputs.len() > 1 {
        Args::command()
            .error(
                clap::error::ErrorKind::ArgumentConflict,
                "--output can only be used with a single input file",
            )
            .exit();
    }

    let mut first_failure = 0;
    for input in &args.inputs {
        let options = args.options_for(input);
        let status = if args.dry_run {
            dry_run(&options)
        } else {
            convert_with_status(&options, None)
        };
        if status != 0 && first_failure == 0 {
            first_failure = status;
        }
    }

    ExitCode::from(first_failure.clamp(0, 255) as u8)
}
