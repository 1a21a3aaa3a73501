//! Integration tests for the complete analysis pipeline
//!
//! These tests exercise the public API end to end:
//! - Skin sampling from synthetic face regions
//! - Quantization determinism and ranking invariants
//! - Colorimetric and season classification
//! - Whole-image palettes loaded from disk
//! - Error handling for empty and undersized regions

use image::{Rgb as Px, RgbImage};
use season_palette::{
    analyze_image, analyze_skin_region, AnalysisError, Chroma, ClassificationLabel,
    ColorConverter, ColorQuantizer, ColorSample, ColorimetricClassifier, HarmonyGenerator,
    PaletteAnalyzer, PipelineConfig, PixelSampler, Rgb, Season, SeasonClassifier, SeasonTable,
    Undertone, Value,
};

const LIGHT_SKIN: Px<u8> = Px([224, 172, 140]);
const TAN_SKIN: Px<u8> = Px([180, 120, 90]);

/// 60x20 region: left half light skin, right half tan skin
fn two_tone_face() -> RgbImage {
    RgbImage::from_fn(60, 20, |x, _| if x < 30 { LIGHT_SKIN } else { TAN_SKIN })
}

fn striped_outfit() -> RgbImage {
    RgbImage::from_fn(300, 300, |x, _| match x / 100 {
        0 => Px([20, 30, 120]),
        1 => Px([240, 240, 230]),
        _ => Px([150, 30, 40]),
    })
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[test]
fn test_uniform_pixels_single_cluster() {
    let pixels = vec![Rgb::new(200, 150, 100); 1000];
    let ranked = ColorQuantizer::new(42).quantize(&pixels, 1).unwrap();

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].rgb, Rgb::new(200, 150, 100));
    assert_eq!(ranked[0].percentage, 100.0);
}

#[test]
fn test_pure_red_resolves_to_transitional() {
    let converter = ColorConverter::new();
    let hsv = converter.rgb_to_hsv(Rgb::new(255, 0, 0));
    assert!(hsv.hue.abs() < 1e-4);
    assert!((hsv.value - 1.0).abs() < 1e-6);
    assert!((hsv.chroma - 1.0).abs() < 1e-6);

    let label = ColorimetricClassifier::new().classify(&ColorSample::new(Rgb::new(255, 0, 0)));
    assert_eq!(
        label,
        ClassificationLabel::new(Undertone::Warm, Value::Light, Chroma::Bright)
    );

    let season = SeasonClassifier::new(SeasonTable::standard()).resolve_season(&label);
    assert_eq!(season, Season::NeutralTransitional);
}

#[test]
fn test_all_black_region_has_no_foreground() {
    let region = RgbImage::from_pixel(40, 40, Px([0, 0, 0]));
    assert!(PixelSampler::new().sample(&region).is_empty());

    match analyze_skin_region(&region) {
        Err(AnalysisError::NoForegroundDetected { .. }) => {}
        other => panic!("Expected NoForegroundDetected, got {:?}", other),
    }
}

// ============================================================================
// Skin Analysis
// ============================================================================

#[test]
fn test_two_tone_face_palette() {
    let analyzer = PaletteAnalyzer::new(PipelineConfig::default().with_clusters(2)).unwrap();
    let report = analyzer.analyze_skin(&two_tone_face()).unwrap();

    assert_eq!(report.sample_count, 1200);
    assert_eq!(report.colors.len(), 2);

    // Equal shares: ties broken by RGB order
    assert_eq!(report.colors[0].color.rgb, Rgb::new(180, 120, 90));
    assert_eq!(report.colors[1].color.rgb, Rgb::new(224, 172, 140));
    assert!((report.colors[0].color.percentage - 50.0).abs() < 1e-9);

    // (180,120,90): hue 20, value 0.71, saturation 0.5
    assert_eq!(report.colors[0].classification.season, Season::WarmSpring);
    // (224,172,140): hue 22.9, value 0.88, saturation 0.375
    assert_eq!(report.colors[1].classification.season, Season::LightSpring);

    assert_eq!(report.mean_color.rgb, Rgb::new(202, 146, 115));
    assert_eq!(report.aggregate.undertone, Undertone::Warm);
    assert_eq!(report.harmonies.len(), 2);
    assert_eq!(report.harmonies[0].complementary, Rgb::new(75, 135, 165));
}

#[test]
fn test_small_region_is_insufficient() {
    let region = RgbImage::from_pixel(10, 10, LIGHT_SKIN);

    match analyze_skin_region(&region) {
        Err(AnalysisError::InsufficientSamples { found, required }) => {
            assert_eq!(found, 100);
            assert_eq!(required, 300);
        }
        other => panic!("Expected InsufficientSamples, got {:?}", other),
    }
}

#[test]
fn test_non_skin_region_has_no_foreground() {
    let region = RgbImage::from_pixel(30, 30, Px([30, 90, 220]));
    let err = analyze_skin_region(&region).unwrap_err();
    assert!(matches!(err, AnalysisError::NoForegroundDetected { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn test_skin_analysis_is_deterministic() {
    let mut face = two_tone_face();
    for x in 0..60 {
        face.put_pixel(x, 10, Px([200, 140, 110]));
    }

    let analyzer = PaletteAnalyzer::new(PipelineConfig::default().with_clusters(3)).unwrap();
    let first = analyzer.analyze_skin(&face).unwrap();
    let second = analyzer.analyze_skin(&face).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

// ============================================================================
// Whole-Image Palettes
// ============================================================================

#[test]
fn test_striped_outfit_palette() {
    let analyzer = PaletteAnalyzer::new(PipelineConfig::outfit()).unwrap();
    let report = analyzer.analyze_palette(&striped_outfit()).unwrap();

    assert_eq!(report.colors.len(), 6);
    let sum: f64 = report.colors.iter().map(|c| c.color.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9);
    assert!(report.colors.iter().all(|c| c.color.percentage >= 0.0));

    let mut top: Vec<Rgb> = report.colors[..3].iter().map(|c| c.color.rgb).collect();
    top.sort();
    assert_eq!(
        top,
        vec![Rgb::new(20, 30, 120), Rgb::new(150, 30, 40), Rgb::new(240, 240, 230)]
    );
    assert_eq!(report.colors[0].color.rgb, Rgb::new(20, 30, 120));
}

#[test]
fn test_analyze_image_from_file() {
    let path = std::env::temp_dir().join(format!("season_palette_it_{}.png", std::process::id()));
    striped_outfit().save(&path).unwrap();

    let report = analyze_image(&path);
    std::fs::remove_file(&path).ok();

    let report = report.unwrap();
    assert_eq!(report.sample_count, 90_000);
    assert_eq!(report.colors.len(), 6);
    assert!(report.colors[0].color.hex.starts_with('#'));
    assert_eq!(report.colors[0].color.hex.len(), 7);
}

#[test]
fn test_analyze_image_file_not_found() {
    let result = analyze_image(std::path::Path::new("nonexistent_file.jpg"));
    assert!(matches!(result, Err(AnalysisError::ImageLoadError { .. })));
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_hex_round_trip_grid() {
    let converter = ColorConverter::new();
    for r in (0..=255u8).step_by(15) {
        for g in (0..=255u8).step_by(15) {
            for b in (0..=255u8).step_by(15) {
                let c = Rgb::new(r, g, b);
                assert_eq!(converter.hex_to_rgb(&converter.rgb_to_hex(c)).unwrap(), c);
            }
        }
    }
}

#[test]
fn test_complementary_involution_grid() {
    let harmony = HarmonyGenerator::new();
    for r in (0..=255u8).step_by(17) {
        for g in (0..=255u8).step_by(17) {
            for b in (0..=255u8).step_by(17) {
                let c = Rgb::new(r, g, b);
                assert_eq!(harmony.complementary(harmony.complementary(c)), c);
            }
        }
    }
}

#[test]
fn test_classification_boundaries() {
    use season_palette::color::Hsv;

    let classifier = ColorimetricClassifier::new();
    let label = |h, v, c| classifier.classify_hsv(Hsv::new(h, v, c));

    assert_eq!(label(30.0, 0.5, 0.5).undertone, Undertone::Cool);
    // Strict comparison: 330 is neutral, never cool
    assert_eq!(label(330.0, 0.5, 0.5).undertone, Undertone::Neutral);

    // The same boundaries reached from integer RGB
    let rgb = |r, g, b| classifier.classify(&ColorSample::new(Rgb::new(r, g, b)));
    assert_eq!(rgb(200, 150, 100).undertone, Undertone::Cool);
    assert_eq!(rgb(100, 150, 200).undertone, Undertone::Cool);
    assert_eq!(rgb(200, 100, 150).undertone, Undertone::Neutral);
    assert_eq!(rgb(250, 150, 150).chroma, Chroma::Muted);
    assert_eq!(label(0.5, 0.75, 0.5).value, Value::Medium);
    assert_eq!(label(0.5, 0.35, 0.5).value, Value::Medium);
    assert_eq!(label(0.5, 0.5, 0.40).chroma, Chroma::Muted);
}

#[test]
fn test_invalid_channel_is_reported_not_clamped() {
    match Rgb::try_new(128, 256, 0) {
        Err(AnalysisError::InvalidColor { channel, value }) => {
            assert_eq!(channel, "green");
            assert_eq!(value, 256);
        }
        other => panic!("Expected InvalidColor, got {:?}", other),
    }
}

#[test]
fn test_custom_season_table_injection() {
    let json = r#"{
        "quantization": {
            "clusters": 1, "restarts": 1, "max_iterations": 10,
            "epsilon": 0.0001, "seed": 1, "exclude_extremes": false,
            "near_black": 20, "near_white": 235
        },
        "season_table": [
            {"undertone": "Warm", "value": "Light", "chroma": "Bright", "season": "Bright Winter"}
        ]
    }"#;
    let analyzer = PaletteAnalyzer::new(PipelineConfig::from_json_str(json).unwrap()).unwrap();

    assert_eq!(analyzer.classify(Rgb::new(255, 0, 0)).season, Season::BrightWinter);
    // Standard entries are gone in this taxonomy
    assert_eq!(
        analyzer.classify(Rgb::new(180, 120, 90)).season,
        Season::NeutralTransitional
    );
}
