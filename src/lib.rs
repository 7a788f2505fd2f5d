//! # pdfguard
//!
//! Pre-flight structural risk gate for PDF rendering pipelines.
//!
//! pdfguard classifies PDF pages and files as safe or unsafe for
//! downstream rasterization based on structural heuristics: oversized
//! pages, huge embedded images, excessive vector-path complexity, parse
//! failures, and projected raster memory cost. It is a risk gate, not a
//! renderer — nothing is rendered, repaired, or modified.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfguard::{Gate, JsonFormat};
//!
//! fn main() -> pdfguard::Result<()> {
//!     let gate = Gate::new();
//!     let verdict = gate.file_analysis("document.pdf")?;
//!
//!     if !verdict.is_file_safety {
//!         println!("unsafe pages: {}", verdict.unsafe_pages);
//!     }
//!     println!("{}", pdfguard::report::to_json(&verdict, JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## How it works
//!
//! Extraction (lopdf-backed, behind [`extract::MetricSource`]) turns each
//! page into four metric bundles; the pure evaluation engine turns bundles
//! and thresholds into error codes at two independent tiers; the
//! aggregator derives file-level verdicts; the report module shapes
//! responses. Extraction degrades to sentinels instead of failing, so
//! every page of an openable document always gets a verdict.

pub mod analyze;
pub mod config;
pub mod detect;
pub mod error;
pub mod evaluate;
pub mod extract;
pub mod metrics;
pub mod report;
pub mod verdict;

// Re-export commonly used types
pub use analyze::Gate;
pub use config::{AdvancedConfig, BaseConfig, ConfigOverrides};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use extract::{GateDocument, MetricSource};
pub use metrics::{ImageInfo, PageMetrics, PhysicalMetrics, TextMetrics, VectorDna};
pub use report::{JsonFormat, SafetySummary};
pub use verdict::{FileVerdict, PageSummary, PageVerdict};

use std::path::Path;

/// Analyze every page of a PDF file with default thresholds.
///
/// # Example
///
/// ```no_run
/// let verdict = pdfguard::analyze_file("document.pdf").unwrap();
/// println!("pages: {}, safe: {}", verdict.pages, verdict.is_file_safety);
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<FileVerdict> {
    Gate::new().file_analysis(path)
}

/// Analyze a PDF file with threshold overrides for the default tier.
///
/// # Example
///
/// ```no_run
/// use pdfguard::ConfigOverrides;
///
/// let overrides = ConfigOverrides::new().with_max_page_size(1000.0);
/// let verdict = pdfguard::analyze_file_with_config("document.pdf", &overrides).unwrap();
/// ```
pub fn analyze_file_with_config<P: AsRef<Path>>(
    path: P,
    overrides: &ConfigOverrides,
) -> Result<FileVerdict> {
    Gate::with_overrides(overrides).file_analysis(path)
}

/// Analyze a single page (1-based) of a PDF file.
///
/// An out-of-range page returns the synthetic `invalid_page` verdict, not
/// an error.
pub fn analyze_page<P: AsRef<Path>>(path: P, page: u32) -> Result<PageVerdict> {
    Gate::new().page_analysis(path, page)
}

/// Analyze a file and return the safety-only summary.
///
/// # Example
///
/// ```no_run
/// let summary = pdfguard::check_file("document.pdf").unwrap();
/// if !summary.is_file_safety {
///     for p in &summary.unsafety_pages {
///         eprintln!("page {}: {:?}", p.page, p.errors);
///     }
/// }
/// ```
pub fn check_file<P: AsRef<Path>>(path: P) -> Result<SafetySummary> {
    let verdict = Gate::new().file_analysis(path)?;
    Ok(SafetySummary::from_verdict(&verdict))
}

/// Analyze a file and return the safety-only summary with overrides.
pub fn check_file_with_config<P: AsRef<Path>>(
    path: P,
    overrides: &ConfigOverrides,
) -> Result<SafetySummary> {
    let verdict = Gate::with_overrides(overrides).file_analysis(path)?;
    Ok(SafetySummary::from_verdict(&verdict))
}
