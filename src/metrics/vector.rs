//! Aggregate vector-drawing metrics ("vector DNA").

use serde::{Deserialize, Serialize};

use super::PARSE_FAILURE;

/// Aggregate structural fingerprint of a page's vector drawing operations.
///
/// One bundle per page, not per path. When the content stream cannot be
/// parsed at all, the bundle is the [`VectorDna::parse_failure`] sentinel:
/// `error` is set and every counter is exactly zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorDna {
    /// Number of drawing paths (0 if unparseable).
    pub path_count: u32,

    /// Total coordinate points across path segments.
    pub total_points: u64,

    /// Number of Bezier curve segments.
    pub curve_segments: u32,

    /// Number of rectangle segments.
    pub rect_segments: u32,

    /// Number of clipping-path operations.
    pub clipping_paths: u32,

    /// Number of fill/stroke paint operations.
    pub total_paint_ops: u32,

    /// Any non-opaque fill or stroke observed.
    pub has_transparency: bool,

    /// Any blend mode other than Normal observed.
    pub has_blend_modes: bool,

    /// Any tiling pattern referenced by the page.
    pub has_tiling_patterns: bool,

    /// Any even-odd winding fill or clip observed.
    pub has_even_odd_winding: bool,

    /// Widest stroke width observed, in points.
    pub max_stroke_width: f64,

    /// Set to "parse_failure" when content-stream parsing aborted before
    /// accumulating anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for VectorDna {
    fn default() -> Self {
        Self {
            path_count: 0,
            total_points: 0,
            curve_segments: 0,
            rect_segments: 0,
            clipping_paths: 0,
            total_paint_ops: 0,
            has_transparency: false,
            has_blend_modes: false,
            has_tiling_patterns: false,
            has_even_odd_winding: false,
            max_stroke_width: 0.0,
            error: None,
        }
    }
}

impl VectorDna {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_zeroes_all_counters() {
        let dna = VectorDna::parse_failure();
        assert!(dna.is_degraded());
        assert_eq!(dna.error.as_deref(), Some("parse_failure"));
        assert_eq!(dna.path_count, 0);
        assert_eq!(dna.total_points, 0);
        assert_eq!(dna.total_paint_ops, 0);
        assert_eq!(dna.max_stroke_width, 0.0);
        assert!(!dna.has_transparency);
    }

    #[test]
    fn test_error_omitted_when_healthy() {
        let json = serde_json::to_string(&VectorDna::default()).unwrap();
        assert!(!json.contains("error"));
    }
}
