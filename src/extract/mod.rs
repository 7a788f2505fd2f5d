//! Metric extraction over lopdf.
//!
//! This module is the only place that touches lopdf types; the engine sees
//! nothing but the metric bundles. Extraction is defensive throughout:
//! per-field failures fall back to defaults, per-item failures drop the
//! item, and whole-bundle failures return the bundle's degraded sentinel.
//! Opening the document is the single operation allowed to fail outward.

mod document;
mod images;
mod physical;
mod text;
mod vector;

pub use document::GateDocument;
pub use images::image_metadata;
pub use physical::physical_metrics;
pub use text::text_metrics;
pub use vector::vector_metrics;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::metrics::PageMetrics;

/// Page identifier: (object number, generation number).
pub type PageId = ObjectId;

/// Source of per-page metric bundles.
///
/// The aggregator is generic over this seam so tests (or callers with
/// their own PDF stack) can feed synthetic metrics through the engine.
/// Both operations are infallible: a page that cannot be read must come
/// back as degraded bundles, not an error.
pub trait MetricSource {
    /// Total number of pages.
    fn page_count(&self) -> u32;

    /// Metric bundles for the page at `index` (0-based).
    fn page_metrics(&self, index: u32) -> PageMetrics;
}

/// Follow reference chains until a non-reference object (or give up).
pub(crate) fn resolve<'a>(doc: &'a LopdfDocument, mut obj: &'a Object) -> &'a Object {
    // Reference cycles exist in hostile files; cap the walk.
    for _ in 0..32 {
        match obj {
            Object::Reference(id) => match doc.get_object(*id) {
                Ok(next) => obj = next,
                Err(_) => return obj,
            },
            _ => return obj,
        }
    }
    obj
}

/// Numeric value of an Integer or Real object.
pub(crate) fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Resolve an object down to a dictionary, looking through streams too.
pub(crate) fn as_dict<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Dictionary> {
    match resolve(doc, obj) {
        Object::Dictionary(d) => Some(d),
        Object::Stream(s) => Some(&s.dict),
        _ => None,
    }
}

/// Look up an inheritable page attribute, walking the Parent chain.
pub(crate) fn inherited<'a>(
    doc: &'a LopdfDocument,
    page_id: PageId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut dict = doc.get_dictionary(page_id).ok()?;
    for _ in 0..32 {
        if let Ok(obj) = dict.get(key) {
            return Some(resolve(doc, obj));
        }
        let parent = dict.get(b"Parent").ok()?;
        dict = as_dict(doc, parent)?;
    }
    None
}

/// The page's Resources dictionary, if any (inheritable).
pub(crate) fn page_resources<'a>(
    doc: &'a LopdfDocument,
    page_id: PageId,
) -> Option<&'a Dictionary> {
    inherited(doc, page_id, b"Resources").and_then(|obj| as_dict(doc, obj))
}

/// Decompressed content-stream bytes for a page.
///
/// `Ok(None)` means the page simply has no content stream (an empty page,
/// not a failure). `Err` means the stream exists but could not be read.
pub(crate) fn page_content_bytes(
    doc: &LopdfDocument,
    page_id: PageId,
) -> Result<Option<Vec<u8>>, ()> {
    let page_dict = doc.get_dictionary(page_id).map_err(|_| ())?;

    let contents = match page_dict.get(b"Contents") {
        Ok(obj) => obj,
        Err(_) => return Ok(None),
    };

    match resolve(doc, contents) {
        Object::Stream(s) => Ok(Some(stream_bytes(s))),
        Object::Array(arr) => {
            let mut content = Vec::new();
            for obj in arr {
                if let Object::Stream(s) = resolve(doc, obj) {
                    content.extend_from_slice(&stream_bytes(s));
                    content.push(b' ');
                }
            }
            Ok(Some(content))
        }
        _ => Err(()),
    }
}

/// Decompressed stream bytes, falling back to the raw content when the
/// stream carries no filter (or decompression fails).
fn stream_bytes(stream: &lopdf::Stream) -> Vec<u8> {
    stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone())
}
