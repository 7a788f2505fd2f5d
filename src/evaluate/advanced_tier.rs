//! Advanced-tier evaluation rules.
//!
//! These rules gate on render/memory risk using only the physical and
//! image bundles. Their error codes are fixed rule labels: the numbers in
//! the label text are the tuned default thresholds, kept verbatim even if
//! a caller exercises the evaluator with different values. Downstream
//! consumers match on these strings.

use crate::config::AdvancedConfig;
use crate::metrics::{ImageInfo, PhysicalMetrics};

/// Label for the oversized-render-dimension rule.
pub const RENDER_MAX_DIM_CODE: &str = "render:physical_max_dim>=2400";

/// Label for the huge-mediabox-width rule.
pub const RSS_WIDTH_CODE: &str = "rss:physical_mediabox_width>=1650";

/// Label for the composite image-volume rule.
pub const IMG_COMPOSITE_CODE: &str =
    "rss:img_count>=110+smask<=0+(img_total_pixels>=3000000 OR img_max_pixels>=500000)";

/// Evaluate one page at the advanced tier.
pub fn evaluate_advanced(
    physical: &PhysicalMetrics,
    images: &[ImageInfo],
    config: &AdvancedConfig,
) -> Vec<String> {
    let mut errors = Vec::new();

    if physical.max_dim_pt() >= config.render_max_dim {
        errors.push(RENDER_MAX_DIM_CODE.to_string());
    }

    if physical.width_pt >= config.rss_width_huge {
        errors.push(RSS_WIDTH_CODE.to_string());
    }

    let img_count = images.len();
    let mut img_total_pixels: u64 = 0;
    let mut img_max_pixels: u64 = 0;
    let mut img_smask_count: usize = 0;

    for img in images {
        img_total_pixels += img.pixel_count;
        if img.pixel_count > img_max_pixels {
            img_max_pixels = img.pixel_count;
        }
        if img.smask_signal() {
            img_smask_count += 1;
        }
    }

    if img_count >= config.rss_img_count
        && img_smask_count <= config.rss_img_smask_max
        && (img_total_pixels >= config.rss_img_total_pixels
            || img_max_pixels >= config.rss_img_max_pixels)
    {
        errors.push(IMG_COMPOSITE_CODE.to_string());
    }

    errors
}
