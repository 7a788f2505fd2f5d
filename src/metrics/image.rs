//! Embedded image metadata.

use serde::{Deserialize, Serialize};

/// Metadata for one embedded image reference on a page.
///
/// Individually corrupt entries are dropped during extraction rather than
/// failing the page, so a page's image list may be shorter than the number
/// of references in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Object id of the image stream; 0 for inline images.
    pub xref: u32,

    /// Object id of the image's soft mask, 0 if none.
    pub smask_xref: u32,

    /// Image width in pixels.
    pub width: u32,

    /// Image height in pixels.
    pub height: u32,

    /// Bits per component (8 when unreadable).
    pub bpc: u32,

    /// Colorspace name, "Unknown" when unreadable.
    pub colorspace_name: String,

    /// `width * height`.
    pub pixel_count: u64,

    /// True iff `xref == 0`.
    pub is_inline: bool,

    // Legacy soft-mask signal fields. The current extractor reports soft
    // masks only through `smask_xref` and never sets these, but sources
    // implementing their own extraction may, and the advanced image rule
    // still honors them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_smask: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smask: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_smask: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smask_ref: Option<i64>,
}

impl ImageInfo {
    /// Build from pixel dimensions, deriving `pixel_count`.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bpc: 8,
            colorspace_name: "Unknown".to_string(),
            pixel_count: u64::from(width) * u64::from(height),
            ..Self::default()
        }
    }

    /// Whether any of the legacy soft-mask signal fields is set.
    pub fn smask_signal(&self) -> bool {
        self.has_smask == Some(true)
            || self.smask == Some(true)
            || self.is_smask == Some(true)
            || self.smask_ref.is_some()
    }
}
