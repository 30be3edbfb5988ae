//! Command-line interface for the LDML transformer.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{LdmlError, Result};
use crate::profile::Profile;
use crate::transformer::{load_documentation_unit, transform_file};

/// Caselaw LDML - Transform court decisions into Akoma Ntoso judgments.
#[derive(Parser)]
#[command(name = "caselaw-ldml")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transform documentation units and write one XML file per unit.
    Transform {
        /// Input files (.json, .yaml or .yml)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output profile
        #[arg(short, long, value_enum, default_value_t = Profile::Full)]
        profile: Profile,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Indent the XML output. Adds whitespace between inline elements
        /// of the judgment text, so use it for inspection, not publishing.
        #[arg(long)]
        pretty: bool,
    },

    /// Check that documentation units transform without writing output.
    Validate {
        /// Input files (.json, .yaml or .yml)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output profile
        #[arg(short, long, value_enum, default_value_t = Profile::Full)]
        profile: Profile,
    },
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Inputs that were processed successfully.
    pub succeeded: Vec<PathBuf>,
    /// Inputs that were skipped, with the reason.
    pub failed: Vec<(PathBuf, LdmlError)>,
}

/// Run the CLI.
pub fn run() -> Result<BatchReport> {
    execute(Cli::parse())
}

/// Execute a parsed command line.
///
/// Failing inputs are skipped and reported; only problems that affect the
/// whole batch (such as an unusable output directory) are returned as `Err`.
pub fn execute(cli: Cli) -> Result<BatchReport> {
    match cli.command {
        Commands::Transform {
            inputs,
            profile,
            output,
            pretty,
        } => transform_command(&inputs, profile, output.as_deref(), pretty),
        Commands::Validate { inputs, profile } => Ok(validate_command(&inputs, profile)),
    }
}

/// Execute the transform command.
fn transform_command(
    inputs: &[PathBuf],
    profile: Profile,
    output: Option<&Path>,
    pretty: bool,
) -> Result<BatchReport> {
    let output_dir = output.unwrap_or_else(|| Path::new("."));

    if output_dir.exists() && !output_dir.is_dir() {
        return Err(LdmlError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Output path is not a directory: {}", output_dir.display()),
        )));
    }

    println!(
        "{} {} documentation units with profile {}",
        style("Transforming").bold(),
        inputs.len(),
        style(profile).cyan()
    );

    let report = process_batch(inputs, |input| {
        transform_file(input, profile, output_dir, pretty).map(Some)
    });

    print_summary("Transformed", inputs.len(), &report);
    if !report.succeeded.is_empty() {
        println!(
            "{} {}",
            style("Saved to:").green().bold(),
            output_dir.display()
        );
    }

    Ok(report)
}

/// Execute the validate command.
fn validate_command(inputs: &[PathBuf], profile: Profile) -> BatchReport {
    println!(
        "{} {} documentation units with profile {}",
        style("Validating").bold(),
        inputs.len(),
        style(profile).cyan()
    );

    let report = process_batch(inputs, |input| {
        let unit = load_documentation_unit(input)?;
        profile.transform(&unit)?;
        Ok(None)
    });

    print_summary("Valid", inputs.len(), &report);
    report
}

/// Run `step` for every input, skipping and logging failures.
///
/// `step` returns the output path if it wrote one.
fn process_batch<F>(inputs: &[PathBuf], mut step: F) -> BatchReport
where
    F: FnMut(&Path) -> Result<Option<PathBuf>>,
{
    let pb = ProgressBar::new(inputs.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let mut report = BatchReport::default();
    for input in inputs {
        pb.set_message(input.display().to_string());

        match step(input) {
            Ok(output) => {
                if let Some(output) = &output {
                    tracing::debug!(input = %input.display(), output = %output.display(), "processed");
                }
                report.succeeded.push(input.clone());
            }
            Err(e) => {
                pb.suspend(|| {
                    tracing::warn!(
                        input = %input.display(),
                        kind = e.kind().as_str(),
                        error = %e,
                        "skipping documentation unit"
                    );
                });
                report.failed.push((input.clone(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    report
}

fn print_summary(verb: &str, total: usize, report: &BatchReport) {
    println!();
    println!(
        "{} {} of {}",
        style(verb).green().bold(),
        report.succeeded.len(),
        total
    );

    if report.failed.is_empty() {
        return;
    }
    println!("{} {}", style("Failed:").red().bold(), report.failed.len());
    for (input, error) in &report.failed {
        println!(
            "  {} [{}] {}",
            input.display(),
            style(error.kind().as_str()).yellow(),
            error
        );
    }
}
