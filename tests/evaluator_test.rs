//! Property-style tests for the evaluation engine.

use pdfguard::config::{AdvancedConfig, BaseConfig, ConfigOverrides};
use pdfguard::evaluate::{evaluate_advanced, evaluate_default, IMG_COMPOSITE_CODE};
use pdfguard::metrics::{ImageInfo, PhysicalMetrics, TextMetrics, VectorDna};

fn clean() -> (Vec<ImageInfo>, VectorDna, TextMetrics) {
    (Vec::new(), VectorDna::default(), TextMetrics::default())
}

#[test]
fn pages_within_size_budget_never_flag_size() {
    let (images, vector, text) = clean();
    let config = BaseConfig::default();

    for (w, h) in [
        (1.0, 1.0),
        (612.0, 792.0),
        (2000.0, 2000.0), // threshold is strict greater-than
        (1999.9, 100.0),
    ] {
        let phys = PhysicalMetrics::from_points(w, h);
        let (errors, _) = evaluate_default(&phys, &images, &vector, &text, &config);
        assert!(
            !errors.iter().any(|e| e.starts_with("page_too_large")),
            "unexpected size code for {w}x{h}: {errors:?}"
        );
    }
}

#[test]
fn oversized_image_yields_exactly_one_code_per_image() {
    let (_, vector, text) = clean();
    let phys = PhysicalMetrics::from_points(612.0, 792.0);
    let config = BaseConfig::default();

    let images = vec![
        ImageInfo::with_dimensions(5000, 5000), // 25M, over
        ImageInfo::with_dimensions(100, 100),   // under
        ImageInfo {
            pixel_count: 21_000_000, // over, no dimensions
            ..ImageInfo::default()
        },
    ];
    let (errors, summary) = evaluate_default(&phys, &images, &vector, &text, &config);

    let image_codes: Vec<_> = errors
        .iter()
        .filter(|e| e.starts_with("embedded_image_too_big"))
        .collect();
    assert_eq!(image_codes.len(), 2);
    assert_eq!(image_codes[0], "embedded_image_too_big:5000x5000");
    assert_eq!(image_codes[1], "embedded_image_too_big_pixels:21000000");
    assert_eq!(summary.max_embedded_image_pixels, 25_000_000);
}

#[test]
fn evaluation_is_idempotent() {
    let phys = PhysicalMetrics::from_points(2500.0, 3100.0);
    let images = vec![ImageInfo::with_dimensions(6000, 4000)];
    let vector = VectorDna {
        path_count: 1501,
        ..VectorDna::default()
    };
    let text = TextMetrics::parse_failure();
    let config = BaseConfig::default();

    let (e1, s1) = evaluate_default(&phys, &images, &vector, &text, &config);
    let (e2, s2) = evaluate_default(&phys, &images, &vector, &text, &config);
    assert_eq!(e1, e2);
    assert_eq!(s1, s2);

    let a1 = evaluate_advanced(&phys, &images, &AdvancedConfig::default());
    let a2 = evaluate_advanced(&phys, &images, &AdvancedConfig::default());
    assert_eq!(a1, a2);
}

#[test]
fn lowering_vector_budget_only_adds_the_vector_code() {
    let phys = PhysicalMetrics::from_points(2500.0, 100.0);
    let (images, _, text) = clean();
    let vector = VectorDna {
        path_count: 800,
        ..VectorDna::default()
    };

    let relaxed = BaseConfig::default();
    let (before, _) = evaluate_default(&phys, &images, &vector, &text, &relaxed);
    assert!(before.iter().any(|e| e.starts_with("page_too_large")));
    assert!(!before.iter().any(|e| e.starts_with("too_many_vector_ops")));

    let tightened = BaseConfig::default()
        .merged(&ConfigOverrides::new().with_max_vectors_operations(700));
    let (after, _) = evaluate_default(&phys, &images, &vector, &text, &tightened);

    assert!(after.contains(&"too_many_vector_ops:800".to_string()));
    // Every previously present code survives
    for code in &before {
        assert!(after.contains(code), "lost code {code}");
    }
}

#[test]
fn spec_example_page_too_large() {
    let (images, vector, text) = clean();
    let phys = PhysicalMetrics::from_points(2500.0, 100.0);
    let config = BaseConfig::default(); // max_page_size 2000
    let (errors, _) = evaluate_default(&phys, &images, &vector, &text, &config);
    assert_eq!(errors, vec!["page_too_large:2500.0x100.0_pt"]);
}

#[test]
fn spec_example_a4_raster_estimate() {
    let (images, vector, text) = clean();
    // A4 in inches: 8.27 x 11.69
    let phys = PhysicalMetrics::from_points(8.27 * 72.0, 11.69 * 72.0);
    let config = BaseConfig::default(); // max_raster_pixels 30M
    let (errors, summary) = evaluate_default(&phys, &images, &vector, &text, &config);

    assert_eq!(summary.raster_estimate_pixels_300dpi, 8_700_867);
    assert_eq!(summary.raster_estimate_pixels_300dpi, 2481 * 3507);
    assert!(!errors.iter().any(|e| e.starts_with("raster_estimate_too_big")));
}

#[test]
fn spec_example_advanced_composite_rule() {
    let phys = PhysicalMetrics::from_points(612.0, 792.0);
    // 120 images, no soft-mask signals, total ~3.5M pixels
    let images: Vec<ImageInfo> = (0..120)
        .map(|_| ImageInfo::with_dimensions(171, 171))
        .collect();
    let total: u64 = images.iter().map(|i| i.pixel_count).sum();
    assert!(total >= 3_500_000);

    let errors = evaluate_advanced(&phys, &images, &AdvancedConfig::default());
    assert!(errors.contains(&IMG_COMPOSITE_CODE.to_string()));
}

#[test]
fn degraded_bundles_always_convert_to_codes() {
    let phys = PhysicalMetrics::from_points(612.0, 792.0);
    let (errors, summary) = evaluate_default(
        &phys,
        &[],
        &VectorDna::parse_failure(),
        &TextMetrics::parse_failure(),
        &BaseConfig::default(),
    );
    assert_eq!(
        errors,
        vec![
            "vector_parse_failure:parse_failure",
            "text_parse_failure:parse_failure",
        ]
    );
    // Sentinel counters are zero, and the summary reflects that
    assert_eq!(summary.vector_path_count, 0);
}
