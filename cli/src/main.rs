//! pdfguard CLI - pre-flight PDF structural risk gate

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfguard::{ConfigOverrides, Gate, JsonFormat, SafetySummary};

#[derive(Parser)]
#[command(name = "pdfguard")]
#[command(version)]
#[command(about = "Classify PDF pages as safe or unsafe for rasterization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full file analysis: every page's verdict, metrics, and summary
    Analyze {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Analyze a single page (1-based)
    Page {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number, 1-based
        #[arg(value_name = "PAGE")]
        page: u32,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },

    /// Safety-only summary; exits 1 when the file is unsafe
    Check {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Quiet mode: one-line status instead of JSON
        #[arg(short, long)]
        quiet: bool,

        #[command(flatten)]
        thresholds: ThresholdArgs,
    },
}

/// Default-tier threshold overrides.
#[derive(Args)]
struct ThresholdArgs {
    /// Maximum page edge length in points
    #[arg(long, value_name = "PT")]
    max_page_size: Option<f64>,

    /// Maximum pixel count for a single embedded image
    #[arg(long, value_name = "PIXELS")]
    max_image_pixels: Option<u64>,

    /// Maximum number of vector drawing paths per page
    #[arg(long, value_name = "COUNT")]
    max_vector_ops: Option<u32>,

    /// Maximum projected pixel count at 300 DPI
    #[arg(long, value_name = "PIXELS")]
    max_raster_pixels: Option<u64>,
}

impl From<&ThresholdArgs> for ConfigOverrides {
    fn from(args: &ThresholdArgs) -> Self {
        ConfigOverrides {
            max_page_size: args.max_page_size,
            max_image_pixels: args.max_image_pixels,
            max_vectors_operations: args.max_vector_ops,
            max_raster_pixels: args.max_raster_pixels,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            input,
            output,
            compact,
            thresholds,
        } => cmd_analyze(&input, output.as_deref(), compact, &thresholds),
        Commands::Page {
            input,
            page,
            compact,
            thresholds,
        } => cmd_page(&input, page, compact, &thresholds),
        Commands::Check {
            input,
            compact,
            quiet,
            thresholds,
        } => cmd_check(&input, compact, quiet, &thresholds),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn format_of(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb
}

fn cmd_analyze(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    thresholds: &ThresholdArgs,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let pb = spinner("Analyzing...");
    let gate = Gate::with_overrides(&thresholds.into());
    let verdict = gate.file_analysis(input)?;
    pb.finish_and_clear();

    let json = pdfguard::report::to_json(&verdict, format_of(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{json}");
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_page(
    input: &Path,
    page: u32,
    compact: bool,
    thresholds: &ThresholdArgs,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let gate = Gate::with_overrides(&thresholds.into());
    let verdict = gate.page_analysis(input, page)?;

    let json = pdfguard::report::to_json(&verdict, format_of(compact))?;
    println!("{json}");

    Ok(ExitCode::SUCCESS)
}

fn cmd_check(
    input: &Path,
    compact: bool,
    quiet: bool,
    thresholds: &ThresholdArgs,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let pb = spinner("Checking...");
    let gate = Gate::with_overrides(&thresholds.into());
    let verdict = gate.file_analysis(input)?;
    pb.finish_and_clear();

    let summary = SafetySummary::from_verdict(&verdict);

    if !quiet {
        let json = pdfguard::report::to_json(&summary, format_of(compact))?;
        println!("{json}");
    } else if summary.is_file_safety {
        println!("{} {}", summary.file_name, "safe".green());
    } else {
        println!(
            "{} {} (pages {})",
            summary.file_name,
            "unsafe".red().bold(),
            verdict.unsafe_pages
        );
    }

    // Gate semantics for shell pipelines: unsafe at the default tier fails
    if summary.is_file_safety {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
