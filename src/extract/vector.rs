//! Vector-drawing fingerprint extraction.
//!
//! Walks the page's content stream once and accumulates the aggregate
//! counters the engine evaluates. Only drawing-related operators are
//! interpreted; everything else passes through uncounted.

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::metrics::VectorDna;

use super::{as_dict, number, page_content_bytes, page_resources, resolve, PageId};

/// Extract the vector fingerprint for a page.
///
/// A page with no content stream yields a healthy all-zero bundle. A
/// content stream that cannot be read or decoded yields the degraded
/// sentinel. Never fails.
pub fn vector_metrics(doc: &LopdfDocument, page_id: PageId) -> VectorDna {
    let bytes = match page_content_bytes(doc, page_id) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return VectorDna::default(),
        Err(()) => {
            log::debug!("content stream unreadable for page object {page_id:?}");
            return VectorDna::parse_failure();
        }
    };

    let content = match Content::decode(&bytes) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("content decode failed for page object {page_id:?}: {e}");
            return VectorDna::parse_failure();
        }
    };

    let resources = page_resources(doc, page_id);
    let mut dna = VectorDna::default();

    for op in &content.operations {
        match op.operator.as_str() {
            // Path segments
            "l" => dna.total_points += 2,
            "c" | "v" | "y" => {
                dna.total_points += 4;
                dna.curve_segments += 1;
            }
            "re" => {
                dna.total_points += 4;
                dna.rect_segments += 1;
            }

            // Clipping
            "W" => dna.clipping_paths += 1,
            "W*" => {
                dna.clipping_paths += 1;
                dna.has_even_odd_winding = true;
            }

            // Path-painting operators terminate a path
            "S" | "s" => {
                dna.path_count += 1;
                dna.total_paint_ops += 1;
            }
            "f" | "F" => {
                dna.path_count += 1;
                dna.total_paint_ops += 1;
            }
            "f*" => {
                dna.path_count += 1;
                dna.total_paint_ops += 1;
                dna.has_even_odd_winding = true;
            }
            "B" | "b" => {
                dna.path_count += 1;
                dna.total_paint_ops += 2;
            }
            "B*" | "b*" => {
                dna.path_count += 1;
                dna.total_paint_ops += 2;
                dna.has_even_odd_winding = true;
            }
            "n" => dna.path_count += 1,

            // Stroke width
            "w" => {
                if let Some(width) = op.operands.first().and_then(number) {
                    if width > dna.max_stroke_width {
                        dna.max_stroke_width = width;
                    }
                }
            }

            // Graphics state: transparency and blend modes
            "gs" => {
                if let (Some(res), Some(Object::Name(name))) = (resources, op.operands.first()) {
                    inspect_ext_gstate(doc, res, name, &mut dna);
                }
            }

            // Pattern paint operands
            "scn" | "SCN" => {
                if let (Some(res), Some(Object::Name(name))) = (resources, op.operands.last()) {
                    if is_tiling_pattern(doc, res, name) {
                        dna.has_tiling_patterns = true;
                    }
                }
            }

            _ => {}
        }
    }

    dna
}

/// Read transparency/blend-mode signals from a named ExtGState.
fn inspect_ext_gstate(doc: &LopdfDocument, resources: &Dictionary, name: &[u8], dna: &mut VectorDna) {
    let Some(gs) = resources
        .get(b"ExtGState")
        .ok()
        .and_then(|o| as_dict(doc, o))
        .and_then(|d| d.get(name).ok())
        .and_then(|o| as_dict(doc, o))
    else {
        return;
    };

    for key in [&b"ca"[..], &b"CA"[..]] {
        if let Some(alpha) = gs.get(key).ok().and_then(|o| number(resolve(doc, o))) {
            if alpha < 0.999 {
                dna.has_transparency = true;
            }
        }
    }

    if let Ok(obj) = gs.get(b"SMask") {
        // /SMask /None is the explicit reset, anything else masks
        if !matches!(resolve(doc, obj), Object::Name(n) if n == b"None") {
            dna.has_transparency = true;
        }
    }

    if let Some(Object::Name(bm)) = gs.get(b"BM").ok().map(|o| resolve(doc, o)) {
        if bm != b"Normal" && bm != b"Compatible" {
            dna.has_blend_modes = true;
        }
    }
}

/// Whether a named pattern resource is a tiling pattern (PatternType 1).
fn is_tiling_pattern(doc: &LopdfDocument, resources: &Dictionary, name: &[u8]) -> bool {
    resources
        .get(b"Pattern")
        .ok()
        .and_then(|o| as_dict(doc, o))
        .and_then(|d| d.get(name).ok())
        .and_then(|o| as_dict(doc, o))
        .and_then(|d| d.get(b"PatternType").ok())
        .and_then(|o| number(resolve(doc, o)))
        .map(|t| t == 1.0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Stream};

    fn page_with_content(content: &str, resources: Option<Dictionary>) -> (LopdfDocument, PageId) {
        let mut doc = LopdfDocument::with_version("1.5");
        let content_id = doc.add_object(Object::Stream(Stream::new(
            dictionary! {},
            content.as_bytes().to_vec(),
        )));
        let mut page = dictionary! {
            "Type" => "Page",
            "Contents" => Object::Reference(content_id),
        };
        if let Some(res) = resources {
            page.set("Resources", res);
        }
        let page_id = doc.add_object(Object::Dictionary(page));
        (doc, page_id)
    }

    #[test]
    fn test_empty_page_is_healthy_zero() {
        let mut doc = LopdfDocument::with_version("1.5");
        let page_id = doc.add_object(Object::Dictionary(dictionary! { "Type" => "Page" }));
        let dna = vector_metrics(&doc, page_id);
        assert!(dna.error.is_none());
        assert_eq!(dna.path_count, 0);
    }

    #[test]
    fn test_path_and_segment_counting() {
        let content = "0 0 m 10 10 l 20 20 l S \
                       1 1 m 2 2 3 3 4 4 c f \
                       0 0 50 50 re f* \
                       5 5 m 6 6 l B";
        let (doc, page_id) = page_with_content(content, None);
        let dna = vector_metrics(&doc, page_id);

        assert_eq!(dna.path_count, 4);
        // 3 lines (2 pts each) + 1 curve (4) + 1 rect (4)
        assert_eq!(dna.total_points, 14);
        assert_eq!(dna.curve_segments, 1);
        assert_eq!(dna.rect_segments, 1);
        // S + f + f* + B(2)
        assert_eq!(dna.total_paint_ops, 5);
        assert!(dna.has_even_odd_winding);
        assert!(!dna.has_transparency);
    }

    #[test]
    fn test_clipping_paths() {
        let content = "0 0 100 100 re W n 0 0 50 50 re W* n";
        let (doc, page_id) = page_with_content(content, None);
        let dna = vector_metrics(&doc, page_id);
        assert_eq!(dna.clipping_paths, 2);
        assert_eq!(dna.path_count, 2);
        assert!(dna.has_even_odd_winding);
    }

    #[test]
    fn test_stroke_width_tracking() {
        let content = "2 w 0 0 m 1 1 l S 12.5 w 0 0 m 2 2 l S 1 w";
        let (doc, page_id) = page_with_content(content, None);
        let dna = vector_metrics(&doc, page_id);
        assert_eq!(dna.max_stroke_width, 12.5);
    }

    #[test]
    fn test_ext_gstate_transparency_and_blend() {
        let resources = dictionary! {
            "ExtGState" => dictionary! {
                "GS0" => dictionary! { "ca" => Object::Real(0.5) },
                "GS1" => dictionary! { "BM" => "Multiply" },
            },
        };
        let (doc, page_id) = page_with_content("/GS0 gs /GS1 gs", Some(resources));
        let dna = vector_metrics(&doc, page_id);
        assert!(dna.has_transparency);
        assert!(dna.has_blend_modes);
    }

    #[test]
    fn test_opaque_gstate_sets_nothing() {
        let resources = dictionary! {
            "ExtGState" => dictionary! {
                "GS0" => dictionary! { "ca" => 1, "CA" => 1, "BM" => "Normal", "SMask" => "None" },
            },
        };
        let (doc, page_id) = page_with_content("/GS0 gs", Some(resources));
        let dna = vector_metrics(&doc, page_id);
        assert!(!dna.has_transparency);
        assert!(!dna.has_blend_modes);
    }

    #[test]
    fn test_tiling_pattern() {
        let resources = dictionary! {
            "Pattern" => dictionary! {
                "P0" => dictionary! { "PatternType" => 1 },
            },
        };
        let (doc, page_id) = page_with_content(
            "/Pattern cs /P0 scn 0 0 10 10 re f",
            Some(resources),
        );
        let dna = vector_metrics(&doc, page_id);
        assert!(dna.has_tiling_patterns);
    }

    #[test]
    fn test_unreadable_contents_is_parse_failure() {
        // Contents must resolve to a stream (or array of streams); a bare
        // integer there is unreadable by construction.
        let mut doc = LopdfDocument::with_version("1.5");
        let page_id = doc.add_object(Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Contents" => 42,
        }));
        let dna = vector_metrics(&doc, page_id);
        assert_eq!(dna, VectorDna::parse_failure());
    }
}
