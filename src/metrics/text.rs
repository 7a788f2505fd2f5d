//! Font and text volume metrics.

use serde::{Deserialize, Serialize};

use super::PARSE_FAILURE;

/// Per-page text metrics.
///
/// Degrades the same way as [`super::VectorDna`]: on total extraction
/// failure the bundle is the zeroed sentinel with the `error` tag set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextMetrics {
    /// Number of fonts referenced by the page.
    pub font_count: u32,

    /// Sum of visible text span lengths, in characters.
    pub char_count: u64,

    /// True when any font references a CJK or Identity-* encoding.
    pub is_complex_font_system: bool,

    /// Set to "parse_failure" when text extraction aborted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TextMetrics {
    /// The degraded sentinel: zeroed counters plus the error tag.
    pub fn parse_failure() -> Self {
        Self {
            error: Some(PARSE_FAILURE.to_string()),
            ..Self::default()
        }
    }

    /// Whether this bundle is the degraded sentinel.
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}
