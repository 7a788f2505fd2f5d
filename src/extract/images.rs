//! Embedded image enumeration.

use std::collections::HashSet;

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::metrics::ImageInfo;

use super::{as_dict, number, page_resources, resolve, PageId};

// Form XObjects can nest; hostile files can nest them deeply.
const MAX_FORM_DEPTH: u32 = 4;

/// Enumerate image references for a page, recursing through Form XObjects.
///
/// Individually malformed entries are dropped; a missing or unreadable
/// XObject table yields an empty list. Never fails.
pub fn image_metadata(doc: &LopdfDocument, page_id: PageId) -> Vec<ImageInfo> {
    let mut images = Vec::new();
    let mut seen = HashSet::new();

    if let Some(resources) = page_resources(doc, page_id) {
        collect_from_resources(doc, resources, &mut images, &mut seen, 0);
    }

    images
}

fn collect_from_resources(
    doc: &LopdfDocument,
    resources: &Dictionary,
    images: &mut Vec<ImageInfo>,
    seen: &mut HashSet<(u32, u16)>,
    depth: u32,
) {
    let Some(xobjects) = resources.get(b"XObject").ok().and_then(|o| as_dict(doc, o)) else {
        return;
    };

    for (_name, entry) in xobjects.iter() {
        // Direct (non-reference) streams get xref 0, which marks them inline.
        let xref = entry.as_reference().ok();

        if let Some(id) = xref {
            if !seen.insert(id) {
                continue;
            }
        }

        let Object::Stream(stream) = resolve(doc, entry) else {
            continue;
        };
        let dict = &stream.dict;

        match dict.get(b"Subtype").ok().and_then(|o| o.as_name().ok()) {
            Some(b"Image") => {
                images.push(image_info(doc, dict, xref.map(|id| id.0).unwrap_or(0)));
            }
            Some(b"Form") if depth < MAX_FORM_DEPTH => {
                if let Some(inner) = dict.get(b"Resources").ok().and_then(|o| as_dict(doc, o)) {
                    collect_from_resources(doc, inner, images, seen, depth + 1);
                }
            }
            _ => {}
        }
    }
}

fn image_info(doc: &LopdfDocument, dict: &Dictionary, xref: u32) -> ImageInfo {
    let width = dict_u32(doc, dict, b"Width").unwrap_or(0);
    let height = dict_u32(doc, dict, b"Height").unwrap_or(0);
    let bpc = dict_u32(doc, dict, b"BitsPerComponent").unwrap_or(8);

    let smask_xref = dict
        .get(b"SMask")
        .ok()
        .and_then(|o| o.as_reference().ok())
        .map(|id| id.0)
        .unwrap_or(0);

    let colorspace_name = dict
        .get(b"ColorSpace")
        .ok()
        .map(|o| colorspace_name(doc, o))
        .unwrap_or_else(|| "Unknown".to_string());

    ImageInfo {
        xref,
        smask_xref,
        width,
        height,
        bpc,
        colorspace_name,
        pixel_count: u64::from(width) * u64::from(height),
        is_inline: xref == 0,
        ..ImageInfo::default()
    }
}

fn dict_u32(doc: &LopdfDocument, dict: &Dictionary, key: &[u8]) -> Option<u32> {
    let n = number(resolve(doc, dict.get(key).ok()?))?;
    if n < 0.0 {
        return None;
    }
    Some(n as u32)
}

/// Human-readable colorspace name; "Unknown" for anything unreadable.
fn colorspace_name(doc: &LopdfDocument, obj: &Object) -> String {
    match resolve(doc, obj) {
        Object::Name(name) => String::from_utf8_lossy(name).to_string(),
        // Family colorspaces ([/ICCBased ref], [/Indexed base hival lookup], ...)
        Object::Array(arr) => match arr.first().map(|o| resolve(doc, o)) {
            Some(Object::Name(name)) => String::from_utf8_lossy(name).to_string(),
            _ => "Unknown".to_string(),
        },
        _ => "Unknown".to_string(),
    }
}
