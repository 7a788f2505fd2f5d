//! Document handle for analysis.

use std::io::Read;
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::metrics::PageMetrics;

use super::{image_metadata, physical_metrics, text_metrics, vector_metrics, MetricSource, PageId};

/// An open PDF document, scoped to one analysis.
///
/// Opening is the only fallible step; every per-page operation afterwards
/// degrades to sentinels instead of failing.
pub struct GateDocument {
    doc: LopdfDocument,
    page_ids: Vec<PageId>,
}

impl GateDocument {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Cheap header check first, for a clearer error than a backend
        // parse failure on arbitrary files.
        detect_format_from_path(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Self::from_document(doc)
    }

    /// Open a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Self::from_document(doc)
    }

    /// Open a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let page_ids = doc.get_pages().into_values().collect();
        Ok(Self { doc, page_ids })
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Object id of the page at `index` (0-based), if in range.
    pub(crate) fn page_id(&self, index: u32) -> Option<PageId> {
        self.page_ids.get(index as usize).copied()
    }

    /// Direct access to the underlying `lopdf::Document`.
    pub(crate) fn raw(&self) -> &LopdfDocument {
        &self.doc
    }
}

impl MetricSource for GateDocument {
    fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    fn page_metrics(&self, index: u32) -> PageMetrics {
        let Some(page_id) = self.page_id(index) else {
            // The aggregator bounds indexes by page_count; an unknown page
            // here means a truncated page tree. Degrade, never fail.
            log::warn!("page index {index} has no page object");
            return PageMetrics::default();
        };

        PageMetrics {
            physical: physical_metrics(self.raw(), page_id),
            images: image_metadata(self.raw(), page_id),
            vector: vector_metrics(self.raw(), page_id),
            text: text_metrics(self.raw(), page_id),
        }
    }
}
