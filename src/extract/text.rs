//! Font and text volume extraction.

use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object};

use crate::metrics::TextMetrics;

use super::{page_content_bytes, PageId};

/// Extract font and text metrics for a page.
///
/// Mirrors the degradation contract of the other bundles: any failure to
/// read the font table or the content stream yields the sentinel. Never
/// fails outward.
pub fn text_metrics(doc: &LopdfDocument, page_id: PageId) -> TextMetrics {
    let fonts = match doc.get_page_fonts(page_id) {
        Ok(fonts) => fonts,
        Err(e) => {
            log::debug!("font table unreadable for page object {page_id:?}: {e}");
            return TextMetrics::parse_failure();
        }
    };

    let font_count = fonts.len() as u32;
    let is_complex_font_system = fonts.values().any(|font| {
        font_name_is_complex(font.get(b"BaseFont").ok())
            || font_name_is_complex(font.get(b"Encoding").ok())
    });

    let bytes = match page_content_bytes(doc, page_id) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            return TextMetrics {
                font_count,
                char_count: 0,
                is_complex_font_system,
                error: None,
            }
        }
        Err(()) => return TextMetrics::parse_failure(),
    };

    let content = match Content::decode(&bytes) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("content decode failed for page object {page_id:?}: {e}");
            return TextMetrics::parse_failure();
        }
    };

    let mut char_count: u64 = 0;
    let mut current_font: Option<Vec<u8>> = None;

    for op in &content.operations {
        match op.operator.as_str() {
            "Tf" => {
                if let Some(Object::Name(name)) = op.operands.first() {
                    current_font = Some(name.clone());
                }
            }
            "Tj" | "'" => {
                if let Some(Object::String(bytes, _)) = op.operands.last() {
                    char_count += decoded_len(doc, &fonts, current_font.as_deref(), bytes);
                }
            }
            "\"" => {
                if let Some(Object::String(bytes, _)) = op.operands.get(2) {
                    char_count += decoded_len(doc, &fonts, current_font.as_deref(), bytes);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    for item in items {
                        if let Object::String(bytes, _) = item {
                            char_count += decoded_len(doc, &fonts, current_font.as_deref(), bytes);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    TextMetrics {
        font_count,
        char_count,
        is_complex_font_system,
        error: None,
    }
}

/// Character count of a shown string, decoded with the current font's
/// encoding where available.
fn decoded_len(
    doc: &LopdfDocument,
    fonts: &std::collections::BTreeMap<Vec<u8>, &lopdf::Dictionary>,
    font_name: Option<&[u8]>,
    bytes: &[u8],
) -> u64 {
    if let Some(name) = font_name {
        if let Some(font) = fonts.get(name) {
            if let Ok(enc) = font.get_font_encoding(doc) {
                if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                    return text.chars().count() as u64;
                }
            }
        }
    }
    decode_text_simple(bytes).chars().count() as u64
}

/// Whether a font/encoding name marks a complex font system.
fn font_name_is_complex(obj: Option<&Object>) -> bool {
    let Some(Object::Name(name)) = obj else {
        return false;
    };
    let name = String::from_utf8_lossy(name);
    name.contains("CJK") || name.contains("Identity-")
}

/// Simple text decoding fallback when no encoding is available.
fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}
