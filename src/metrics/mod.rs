//! Per-page metric bundles consumed by the evaluation engine.
//!
//! Each bundle is produced once per page by the extraction layer and is
//! immutable afterwards. Extraction failure never raises: a bundle that
//! could not be read arrives as its degraded sentinel (zeroed counters plus
//! an `error` tag) so the engine always receives well-formed input.

mod image;
mod physical;
mod text;
mod vector;

pub use image::ImageInfo;
pub use physical::PhysicalMetrics;
pub use text::TextMetrics;
pub use vector::VectorDna;

use serde::{Deserialize, Serialize};

/// Tag value carried by a degraded bundle.
pub const PARSE_FAILURE: &str = "parse_failure";

/// The four metric bundles for one page, as echoed in a page verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMetrics {
    /// Page geometry.
    pub physical: PhysicalMetrics,
    /// One entry per embedded image reference on the page.
    pub images: Vec<ImageInfo>,
    /// Aggregate vector-drawing fingerprint.
    pub vector: VectorDna,
    /// Font and text volume metrics.
    pub text: TextMetrics,
}
