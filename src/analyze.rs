//! File-level aggregation: runs every page through both evaluation tiers.

use std::path::Path;

use rayon::prelude::*;

use crate::config::{AdvancedConfig, BaseConfig, ConfigOverrides};
use crate::error::Result;
use crate::evaluate::{evaluate_advanced, evaluate_default};
use crate::extract::{GateDocument, MetricSource};
use crate::metrics::PageMetrics;
use crate::verdict::{FileVerdict, PageVerdict};

/// The risk gate: holds the effective thresholds and drives analysis.
///
/// Evaluations are independent per page, so file analysis fans out across
/// pages by default; results are always reported in page order.
#[derive(Debug, Clone)]
pub struct Gate {
    base: BaseConfig,
    advanced: AdvancedConfig,
    parallel: bool,
}

impl Gate {
    /// Create a gate with the built-in default thresholds.
    pub fn new() -> Self {
        Self {
            base: BaseConfig::default(),
            advanced: AdvancedConfig::default(),
            parallel: true,
        }
    }

    /// Create a gate with overrides applied to the default-tier thresholds.
    ///
    /// The advanced tier always runs with its fixed defaults.
    pub fn with_overrides(overrides: &ConfigOverrides) -> Self {
        Self {
            base: BaseConfig::default().merged(overrides),
            ..Self::new()
        }
    }

    /// Disable the per-page parallel fan-out.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Effective default-tier thresholds.
    pub fn base_config(&self) -> &BaseConfig {
        &self.base
    }

    /// Analyze every page of a file at both tiers.
    pub fn file_analysis<P: AsRef<Path>>(&self, path: P) -> Result<FileVerdict> {
        self.file_analysis_with(path, &ConfigOverrides::default())
    }

    /// Analyze a file with additional per-call threshold overrides.
    pub fn file_analysis_with<P: AsRef<Path>>(
        &self,
        path: P,
        overrides: &ConfigOverrides,
    ) -> Result<FileVerdict> {
        let path = path.as_ref();
        let doc = GateDocument::open(path)?;
        let config = self.base.merged(overrides);
        Ok(self.analyze_source(&file_name_of(path), &doc, &config))
    }

    /// Analyze a single page (1-based) of a file.
    ///
    /// An out-of-range page yields the synthetic `invalid_page` verdict
    /// without attempting extraction.
    pub fn page_analysis<P: AsRef<Path>>(&self, path: P, page: u32) -> Result<PageVerdict> {
        self.page_analysis_with(path, page, &ConfigOverrides::default())
    }

    /// Single-page analysis with per-call threshold overrides.
    pub fn page_analysis_with<P: AsRef<Path>>(
        &self,
        path: P,
        page: u32,
        overrides: &ConfigOverrides,
    ) -> Result<PageVerdict> {
        let path = path.as_ref();
        let doc = GateDocument::open(path)?;
        let file_name = file_name_of(path);

        if page < 1 || page > doc.page_count() {
            log::debug!("page {page} out of range for {file_name}");
            return Ok(PageVerdict::invalid_page(&file_name, page));
        }

        let config = self.base.merged(overrides);
        let mut verdict = self.evaluate_page(page - 1, doc.page_metrics(page - 1), &config);
        verdict.file_name = Some(file_name);
        Ok(verdict)
    }

    /// Run the engine over an already-open metric source.
    ///
    /// This is the whole aggregation: everything above it is document
    /// opening and configuration plumbing.
    pub fn analyze_source<S: MetricSource + Sync>(
        &self,
        file_name: &str,
        source: &S,
        config: &BaseConfig,
    ) -> FileVerdict {
        let total_pages = source.page_count();

        let results: Vec<PageVerdict> = if self.parallel {
            (0..total_pages)
                .into_par_iter()
                .map(|idx| self.evaluate_page(idx, source.page_metrics(idx), config))
                .collect()
        } else {
            (0..total_pages)
                .map(|idx| self.evaluate_page(idx, source.page_metrics(idx), config))
                .collect()
        };

        FileVerdict::from_pages(file_name.to_string(), total_pages, results)
    }

    fn evaluate_page(&self, index: u32, metrics: PageMetrics, config: &BaseConfig) -> PageVerdict {
        let (errors, summary) = evaluate_default(
            &metrics.physical,
            &metrics.images,
            &metrics.vector,
            &metrics.text,
            config,
        );
        let errors_advanced = evaluate_advanced(&metrics.physical, &metrics.images, &self.advanced);

        PageVerdict {
            page: index + 1,
            is_page_safety: errors.is_empty(),
            errors,
            is_page_safety_advanced: errors_advanced.is_empty(),
            errors_advanced,
            metrics,
            summary,
            file_name: None,
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
