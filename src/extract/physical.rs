//! Page geometry extraction.

use lopdf::{Document as LopdfDocument, Object};

use crate::metrics::PhysicalMetrics;

use super::{inherited, number, resolve, PageId};

// US Letter, the conventional fallback when a page tree carries no usable
// MediaBox.
const DEFAULT_WIDTH_PT: f64 = 612.0;
const DEFAULT_HEIGHT_PT: f64 = 792.0;

/// Extract page geometry. Never fails: every field falls back to a default
/// independently.
pub fn physical_metrics(doc: &LopdfDocument, page_id: PageId) -> PhysicalMetrics {
    let (mediabox_width, mediabox_height) = inherited(doc, page_id, b"MediaBox")
        .and_then(|obj| rect_dims(doc, obj))
        .unwrap_or((DEFAULT_WIDTH_PT, DEFAULT_HEIGHT_PT));

    // Visible extent is the CropBox when present, clamped nowhere — this is
    // a metric, not a render.
    let (mut width_pt, mut height_pt) = inherited(doc, page_id, b"CropBox")
        .and_then(|obj| rect_dims(doc, obj))
        .unwrap_or((mediabox_width, mediabox_height));

    let rotation = inherited(doc, page_id, b"Rotate")
        .and_then(number)
        .map(|r| r as i32)
        .unwrap_or(0);

    // A 90/270 rotation swaps the visible width and height.
    let normalized = rotation.rem_euclid(360);
    if normalized == 90 || normalized == 270 {
        std::mem::swap(&mut width_pt, &mut height_pt);
    }

    let user_unit = doc
        .get_dictionary(page_id)
        .ok()
        .and_then(|d| d.get(b"UserUnit").ok())
        .and_then(number)
        .unwrap_or(1.0);

    PhysicalMetrics {
        width_pt,
        height_pt,
        width_in: width_pt / 72.0,
        height_in: height_pt / 72.0,
        mediabox_width,
        mediabox_height,
        rotation,
        user_unit,
    }
}

/// Width and height of a `[x0 y0 x1 y1]` rectangle object.
fn rect_dims(doc: &LopdfDocument, obj: &Object) -> Option<(f64, f64)> {
    let arr = match resolve(doc, obj) {
        Object::Array(arr) if arr.len() == 4 => arr,
        _ => return None,
    };

    let mut vals = [0.0f64; 4];
    for (i, item) in arr.iter().enumerate() {
        vals[i] = number(resolve(doc, item))?;
    }

    Some(((vals[2] - vals[0]).abs(), (vals[3] - vals[1]).abs()))
}
