//! Response shaping and JSON text serialization.
//!
//! Everything here is derived purely from an existing [`FileVerdict`];
//! nothing re-evaluates.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::verdict::FileVerdict;

/// JSON output format for the serialized-text response forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed with 4-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Safety-only summary: verdicts and fired codes, metrics stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetySummary {
    /// Analyzed file name.
    pub file_name: String,

    /// Total page count.
    pub pages: u32,

    /// True iff no page failed the default tier.
    pub is_file_safety: bool,

    /// Pages failing the default tier, with their codes.
    pub unsafety_pages: Vec<UnsafePage>,

    /// True iff no page failed the advanced tier.
    pub is_file_safety_advanced: bool,

    /// Pages failing the advanced tier, with their codes.
    pub unsafety_pages_advanced: Vec<UnsafePageAdvanced>,
}

/// One default-tier-unsafe page in a safety summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsafePage {
    /// Page number, 1-based.
    pub page: u32,
    /// Default-tier error codes.
    pub errors: Vec<String>,
}

/// One advanced-tier-unsafe page in a safety summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsafePageAdvanced {
    /// Page number, 1-based.
    pub page: u32,
    /// Advanced-tier error codes.
    pub errors_advanced: Vec<String>,
}

impl SafetySummary {
    /// Strip a file verdict down to the safety-only shape.
    pub fn from_verdict(verdict: &FileVerdict) -> Self {
        let unsafety_pages = verdict
            .results
            .iter()
            .filter(|p| !p.is_page_safety)
            .map(|p| UnsafePage {
                page: p.page,
                errors: p.errors.clone(),
            })
            .collect();

        let unsafety_pages_advanced = verdict
            .results
            .iter()
            .filter(|p| !p.is_page_safety_advanced)
            .map(|p| UnsafePageAdvanced {
                page: p.page,
                errors_advanced: p.errors_advanced.clone(),
            })
            .collect();

        Self {
            file_name: verdict.file_name.clone(),
            pages: verdict.pages,
            is_file_safety: verdict.is_file_safety,
            unsafety_pages,
            is_file_safety_advanced: verdict.is_file_safety_advanced,
            unsafety_pages_advanced,
        }
    }
}

/// Serialize any response shape to JSON text.
///
/// The pretty form uses 4-space indentation and preserves non-ASCII
/// characters as-is; field order follows struct declaration order, so the
/// output is stable across runs.
pub fn to_json<T: Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => {
            let mut out = Vec::new();
            let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut out, fmt);
            value
                .serialize(&mut ser)
                .map(|()| String::from_utf8_lossy(&out).to_string())
        }
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Report(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::PageMetrics;
    use crate::verdict::{PageSummary, PageVerdict};

    fn verdict_with_unsafe_page() -> FileVerdict {
        let safe = PageVerdict {
            page: 1,
            is_page_safety: true,
            errors: vec![],
            is_page_safety_advanced: true,
            errors_advanced: vec![],
            metrics: PageMetrics::default(),
            summary: PageSummary::default(),
            file_name: None,
        };
        let mut bad = safe.clone();
        bad.page = 2;
        bad.is_page_safety = false;
        bad.errors = vec!["page_too_large:2500.0x100.0_pt".to_string()];
        bad.is_page_safety_advanced = false;
        bad.errors_advanced = vec!["render:physical_max_dim>=2400".to_string()];

        FileVerdict::from_pages("döc.pdf".to_string(), 2, vec![safe, bad])
    }

    #[test]
    fn test_safety_summary_strips_metrics() {
        let summary = SafetySummary::from_verdict(&verdict_with_unsafe_page());
        assert_eq!(summary.pages, 2);
        assert!(!summary.is_file_safety);
        assert_eq!(summary.unsafety_pages.len(), 1);
        assert_eq!(summary.unsafety_pages[0].page, 2);
        assert_eq!(
            summary.unsafety_pages[0].errors,
            vec!["page_too_large:2500.0x100.0_pt"]
        );
        assert_eq!(summary.unsafety_pages_advanced.len(), 1);

        let json = to_json(&summary, JsonFormat::Compact).unwrap();
        assert!(!json.contains("metrics"));
        assert!(!json.contains("summary"));
    }

    #[test]
    fn test_pretty_json_four_space_indent() {
        let summary = SafetySummary::from_verdict(&verdict_with_unsafe_page());
        let json = to_json(&summary, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\n    \"file_name\""));
        // Non-ASCII preserved, not \u-escaped
        assert!(json.contains("döc.pdf"));
    }

    #[test]
    fn test_compact_json_has_no_newlines() {
        let summary = SafetySummary::from_verdict(&verdict_with_unsafe_page());
        let json = to_json(&summary, JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
    }

    #[test]
    fn test_full_verdict_field_order() {
        let json = to_json(&verdict_with_unsafe_page(), JsonFormat::Compact).unwrap();
        let file_name = json.find("\"file_name\"").unwrap();
        let pages = json.find("\"pages\"").unwrap();
        let results = json.find("\"results\"").unwrap();
        assert!(file_name < pages && pages < results);
    }
}
