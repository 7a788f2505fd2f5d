//! Threshold configuration for the two evaluation tiers.
//!
//! The default tier reads [`BaseConfig`], which callers may override per
//! gate or per call. The advanced tier reads [`AdvancedConfig`], which is
//! a fixed set of tuned constants and is not exposed for override.

use serde::{Deserialize, Serialize};

/// Thresholds for the default evaluation tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseConfig {
    /// Maximum page edge length in PDF points.
    pub max_page_size: f64,

    /// Maximum pixel count for a single embedded image.
    pub max_image_pixels: u64,

    /// Maximum number of vector drawing paths on a page.
    pub max_vectors_operations: u32,

    /// Maximum projected pixel count when rasterizing the page at 300 DPI.
    pub max_raster_pixels: u64,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            max_page_size: 2000.0,
            max_image_pixels: 20_000_000,
            max_vectors_operations: 1500,
            max_raster_pixels: 30_000_000,
        }
    }
}

impl BaseConfig {
    /// Create the built-in default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with the given overrides applied.
    ///
    /// Only thresholds the override actually carries are replaced; absent
    /// values keep their current setting.
    pub fn merged(&self, overrides: &ConfigOverrides) -> Self {
        let mut cfg = self.clone();
        if let Some(v) = overrides.max_page_size {
            cfg.max_page_size = v;
        }
        if let Some(v) = overrides.max_image_pixels {
            cfg.max_image_pixels = v;
        }
        if let Some(v) = overrides.max_vectors_operations {
            cfg.max_vectors_operations = v;
        }
        if let Some(v) = overrides.max_raster_pixels {
            cfg.max_raster_pixels = v;
        }
        cfg
    }
}

/// Thresholds for the advanced evaluation tier.
///
/// These are tuned constants. The public entry points always use
/// [`AdvancedConfig::default`]; the struct is public so the pure evaluator
/// can be exercised directly in tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedConfig {
    /// Render-risk cutoff on the larger page dimension, in points.
    pub render_max_dim: f64,

    /// Memory-risk cutoff on page width, in points.
    pub rss_width_huge: f64,

    /// Minimum image count for the composite image-risk rule.
    pub rss_img_count: usize,

    /// Total-pixel arm of the composite image-risk rule.
    pub rss_img_total_pixels: u64,

    /// Single-image-pixel arm of the composite image-risk rule.
    pub rss_img_max_pixels: u64,

    /// Maximum soft-masked image count tolerated by the composite rule.
    pub rss_img_smask_max: usize,
}

impl Default for AdvancedConfig {
    fn default() -> Self {
        Self {
            render_max_dim: 2400.0,
            rss_width_huge: 1650.0,
            rss_img_count: 110,
            rss_img_total_pixels: 3_000_000,
            rss_img_max_pixels: 500_000,
            rss_img_smask_max: 0,
        }
    }
}

/// Caller-supplied threshold overrides for the default tier.
///
/// Deserializes from a flat JSON mapping; unrecognized keys are ignored and
/// `null` values leave the built-in default in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigOverrides {
    /// Override for [`BaseConfig::max_page_size`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_page_size: Option<f64>,

    /// Override for [`BaseConfig::max_image_pixels`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_image_pixels: Option<u64>,

    /// Override for [`BaseConfig::max_vectors_operations`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vectors_operations: Option<u32>,

    /// Override for [`BaseConfig::max_raster_pixels`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_raster_pixels: Option<u64>,
}

impl ConfigOverrides {
    /// Create an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page-size threshold.
    pub fn with_max_page_size(mut self, pt: f64) -> Self {
        self.max_page_size = Some(pt);
        self
    }

    /// Set the per-image pixel threshold.
    pub fn with_max_image_pixels(mut self, pixels: u64) -> Self {
        self.max_image_pixels = Some(pixels);
        self
    }

    /// Set the vector-path threshold.
    pub fn with_max_vectors_operations(mut self, count: u32) -> Self {
        self.max_vectors_operations = Some(count);
        self
    }

    /// Set the projected-raster pixel threshold.
    pub fn with_max_raster_pixels(mut self, pixels: u64) -> Self {
        self.max_raster_pixels = Some(pixels);
        self
    }

    /// Check whether no override is present.
    pub fn is_empty(&self) -> bool {
        self.max_page_size.is_none()
            && self.max_image_pixels.is_none()
            && self.max_vectors_operations.is_none()
            && self.max_raster_pixels.is_none()
    }
}
