//! Verdict types produced by the aggregator.

use serde::{Deserialize, Serialize};

use crate::metrics::PageMetrics;

/// Numeric summary reported with every page verdict, populated regardless
/// of which (if any) rules fired.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSummary {
    /// Visible page width in points.
    pub page_width_pt: f64,

    /// Visible page height in points.
    pub page_height_pt: f64,

    /// Largest embedded-image pixel count on the page (0 if no images).
    pub max_embedded_image_pixels: u64,

    /// Number of vector drawing paths.
    pub vector_path_count: u32,

    /// Projected pixel count when rasterizing the page at 300 DPI.
    pub raster_estimate_pixels_300dpi: u64,
}

/// Per-page verdict: both tiers' pass/fail flags and error codes, plus the
/// metric bundles they were derived from. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageVerdict {
    /// Page number, 1-based.
    pub page: u32,

    /// True iff `errors` is empty.
    pub is_page_safety: bool,

    /// Default-tier error codes, in rule order.
    pub errors: Vec<String>,

    /// True iff `errors_advanced` is empty.
    pub is_page_safety_advanced: bool,

    /// Advanced-tier error codes, in rule order.
    pub errors_advanced: Vec<String>,

    /// Echo of the metric bundles the verdict was derived from.
    pub metrics: PageMetrics,

    /// Numeric summary, always fully populated.
    pub summary: PageSummary,

    /// Set on single-page analysis responses only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl PageVerdict {
    /// Synthetic verdict for an out-of-range page request.
    ///
    /// Both tiers fail with `invalid_page:{page}`; metrics and summary are
    /// zeroed and no extraction is attempted.
    pub fn invalid_page(file_name: &str, page: u32) -> Self {
        let code = format!("invalid_page:{page}");
        Self {
            page,
            is_page_safety: false,
            errors: vec![code.clone()],
            is_page_safety_advanced: false,
            errors_advanced: vec![code],
            metrics: PageMetrics::default(),
            summary: PageSummary::default(),
            file_name: Some(file_name.to_string()),
        }
    }
}

/// File-level verdict: the AND of all page verdicts, independently per tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileVerdict {
    /// Analyzed file name (no directory components).
    pub file_name: String,

    /// Total page count.
    pub pages: u32,

    /// True iff no page failed the default tier.
    pub is_file_safety: bool,

    /// Comma-joined 1-based numbers of pages failing the default tier, in
    /// ascending page order.
    pub unsafe_pages: String,

    /// True iff no page failed the advanced tier.
    pub is_file_safety_advanced: bool,

    /// Comma-joined 1-based numbers of pages failing the advanced tier.
    pub unsafe_pages_advanced: String,

    /// Per-page verdicts in page order.
    pub results: Vec<PageVerdict>,
}

impl FileVerdict {
    /// Derive file-level safety from per-page verdicts.
    pub fn from_pages(file_name: String, pages: u32, results: Vec<PageVerdict>) -> Self {
        let unsafe_pages = join_pages(&results, |p| !p.is_page_safety);
        let unsafe_pages_advanced = join_pages(&results, |p| !p.is_page_safety_advanced);

        Self {
            file_name,
            pages,
            is_file_safety: unsafe_pages.is_empty(),
            unsafe_pages,
            is_file_safety_advanced: unsafe_pages_advanced.is_empty(),
            unsafe_pages_advanced,
            results,
        }
    }
}

fn join_pages<F: Fn(&PageVerdict) -> bool>(results: &[PageVerdict], failed: F) -> String {
    results
        .iter()
        .filter(|p| failed(p))
        .map(|p| p.page.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
