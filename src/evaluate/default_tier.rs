//! Default-tier evaluation rules.

use crate::config::BaseConfig;
use crate::metrics::{ImageInfo, PhysicalMetrics, TextMetrics, VectorDna};
use crate::verdict::PageSummary;

/// Reference resolution for the raster-cost estimate.
const RASTER_DPI: f64 = 300.0;

/// Evaluate one page at the default tier.
///
/// Every rule runs; each violation appends its own code in rule order. The
/// summary is populated unconditionally, whether or not any rule fired.
pub fn evaluate_default(
    physical: &PhysicalMetrics,
    images: &[ImageInfo],
    vector: &VectorDna,
    text: &TextMetrics,
    config: &BaseConfig,
) -> (Vec<String>, PageSummary) {
    let mut errors = Vec::new();

    let width_pt = physical.width_pt;
    let height_pt = physical.height_pt;

    // Rule 1: oversized page
    if width_pt > config.max_page_size || height_pt > config.max_page_size {
        errors.push(format!("page_too_large:{width_pt:.1}x{height_pt:.1}_pt"));
    }

    // Rule 2: per-image pixel budget. The maximum pixel count is tracked
    // for the summary even when no image exceeds the threshold.
    let mut max_img_px_on_page: u64 = 0;
    for img in images {
        if img.pixel_count > max_img_px_on_page {
            max_img_px_on_page = img.pixel_count;
        }

        if img.pixel_count > config.max_image_pixels {
            if img.width != 0 && img.height != 0 {
                errors.push(format!(
                    "embedded_image_too_big:{}x{}",
                    img.width, img.height
                ));
            } else {
                errors.push(format!("embedded_image_too_big_pixels:{}", img.pixel_count));
            }
        }
    }

    // Rule 3: vector complexity. A degraded bundle and an over-budget path
    // count are independent findings.
    if let Some(err) = &vector.error {
        errors.push(format!("vector_parse_failure:{err}"));
    }
    if vector.path_count > config.max_vectors_operations {
        errors.push(format!("too_many_vector_ops:{}", vector.path_count));
    }

    // Rule 4: text extraction degraded
    if let Some(err) = &text.error {
        errors.push(format!("text_parse_failure:{err}"));
    }

    // Rule 5: projected raster cost at 300 DPI. Each dimension is truncated
    // toward zero before multiplying.
    let est_pixels =
        (physical.width_in * RASTER_DPI) as u64 * (physical.height_in * RASTER_DPI) as u64;
    if est_pixels > config.max_raster_pixels {
        errors.push(format!("raster_estimate_too_big:{est_pixels}"));
    }

    let summary = PageSummary {
        page_width_pt: width_pt,
        page_height_pt: height_pt,
        max_embedded_image_pixels: max_img_px_on_page,
        vector_path_count: vector.path_count,
        raster_estimate_pixels_300dpi: est_pixels,
    };

    (errors, summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_inputs() -> (PhysicalMetrics, Vec<ImageInfo>, VectorDna, TextMetrics) {
        (
            PhysicalMetrics::from_points(612.0, 792.0),
            Vec::new(),
            VectorDna::default(),
            TextMetrics::default(),
        )
    }

    #[test]
    fn test_clean_page_is_safe() {
        let (phys, images, vector, text) = clean_inputs();
        let (errors, summary) =
            evaluate_default(&phys, &images, &vector, &text, &BaseConfig::default());
        assert!(errors.is_empty());
        assert_eq!(summary.page_width_pt, 612.0);
        assert_eq!(summary.max_embedded_image_pixels, 0);
    }

    #[test]
    fn test_page_too_large_format() {
        let (_, images, vector, text) = clean_inputs();
        let phys = PhysicalMetrics::from_points(2500.0, 100.0);
        let config = BaseConfig::default(); // max_page_size 2000.0
        let (errors, _) = evaluate_default(&phys, &images, &vector, &text, &config);
        assert!(errors.contains(&"page_too_large:2500.0x100.0_pt".to_string()));
    }

    #[test]
    fn test_image_code_variants() {
        let (phys, _, vector, text) = clean_inputs();
        let config = BaseConfig::default(); // max_image_pixels 20M

        // Both dimensions known: dimension form
        let images = vec![ImageInfo::with_dimensions(5000, 5000)];
        let (errors, summary) = evaluate_default(&phys, &images, &vector, &text, &config);
        assert_eq!(errors, vec!["embedded_image_too_big:5000x5000"]);
        assert_eq!(summary.max_embedded_image_pixels, 25_000_000);

        // A dimension missing: pixel form
        let images = vec![ImageInfo {
            width: 0,
            height: 0,
            pixel_count: 30_000_000,
            ..ImageInfo::default()
        }];
        let (errors, _) = evaluate_default(&phys, &images, &vector, &text, &config);
        assert_eq!(errors, vec!["embedded_image_too_big_pixels:30000000"]);
    }

    #[test]
    fn test_max_image_pixels_tracked_without_violation() {
        let (phys, _, vector, text) = clean_inputs();
        let images = vec![
            ImageInfo::with_dimensions(100, 100),
            ImageInfo::with_dimensions(800, 600),
        ];
        let (errors, summary) =
            evaluate_default(&phys, &images, &vector, &text, &BaseConfig::default());
        assert!(errors.is_empty());
        assert_eq!(summary.max_embedded_image_pixels, 480_000);
    }

    #[test]
    fn test_vector_failure_and_count_are_independent() {
        let (phys, images, _, text) = clean_inputs();
        // A degraded bundle has zero counters, so only the failure code fires.
        let vector = VectorDna::parse_failure();
        let (errors, _) =
            evaluate_default(&phys, &images, &vector, &text, &BaseConfig::default());
        assert_eq!(errors, vec!["vector_parse_failure:parse_failure"]);

        // A healthy bundle over budget only reports the count.
        let vector = VectorDna {
            path_count: 2000,
            ..VectorDna::default()
        };
        let (errors, summary) =
            evaluate_default(&phys, &images, &vector, &text, &BaseConfig::default());
        assert_eq!(errors, vec!["too_many_vector_ops:2000"]);
        assert_eq!(summary.vector_path_count, 2000);
    }

    #[test]
    fn test_text_parse_failure() {
        let (phys, images, vector, _) = clean_inputs();
        let text = TextMetrics::parse_failure();
        let (errors, _) =
            evaluate_default(&phys, &images, &vector, &text, &BaseConfig::default());
        assert_eq!(errors, vec!["text_parse_failure:parse_failure"]);
    }

    #[test]
    fn test_raster_estimate_truncates_each_dimension() {
        let (_, images, vector, text) = clean_inputs();
        // A4: 8.27in x 11.69in -> 2481 * 3507 = 8,700,867
        let phys = PhysicalMetrics::from_points(8.27 * 72.0, 11.69 * 72.0);
        let (errors, summary) =
            evaluate_default(&phys, &images, &vector, &text, &BaseConfig::default());
        assert_eq!(summary.raster_estimate_pixels_300dpi, 2481 * 3507);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_raster_estimate_over_budget() {
        let (_, images, vector, text) = clean_inputs();
        let phys = PhysicalMetrics::from_points(8.27 * 72.0, 11.69 * 72.0);
        let config = BaseConfig {
            max_raster_pixels: 8_000_000,
            ..BaseConfig::default()
        };
        let (errors, _) = evaluate_default(&phys, &images, &vector, &text, &config);
        assert_eq!(errors, vec!["raster_estimate_too_big:8700867"]);
    }

    #[test]
    fn test_violations_accumulate_in_rule_order() {
        let phys = PhysicalMetrics::from_points(3000.0, 3000.0);
        let images = vec![ImageInfo::with_dimensions(6000, 6000)];
        let vector = VectorDna {
            path_count: 5000,
            ..VectorDna::default()
        };
        let text = TextMetrics::parse_failure();
        let (errors, _) =
            evaluate_default(&phys, &images, &vector, &text, &BaseConfig::default());

        assert_eq!(
            errors,
            vec![
                "page_too_large:3000.0x3000.0_pt",
                "embedded_image_too_big:6000x6000",
                "too_many_vector_ops:5000",
                "text_parse_failure:parse_failure",
                "raster_estimate_too_big:156250000",
            ]
        );
    }
}
