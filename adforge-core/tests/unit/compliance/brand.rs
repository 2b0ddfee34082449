use image::{Rgba, RgbaImage};

use super::*;
use crate::compliance::policy::{ColorPolicy, ImageryPolicy, LogoPolicy};

fn solid(color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(64, 64, Rgba(color))
}

#[test]
fn empty_policy_passes() {
    let policy = BrandPolicy::default();
    let result =
        evaluate_brand_compliance(&solid([10, 20, 200, 255]), &policy, None, "any prompt").unwrap();
    assert!(result.passed);
    assert_eq!(result.checks.get("logo_present"), Some(&false));
}

#[test]
fn warnings_never_fail_the_check() {
    let policy = BrandPolicy {
        colors: ColorPolicy {
            required_palette: vec!["#FF0000".to_string()],
            tolerance: 10,
            min_coverage: 0.5,
        },
        imagery: ImageryPolicy {
            required_keywords: vec!["sunrise".to_string()],
            avoid_keywords: vec![],
        },
        ..BrandPolicy::default()
    };
    let result =
        evaluate_brand_compliance(&solid([10, 20, 200, 255]), &policy, None, "a plain prompt")
            .unwrap();
    assert!(result.passed, "palette and required-imagery misses are advisory");
    assert_eq!(result.warnings.len(), 2);
    assert_eq!(result.checks.get("palette_compliant"), Some(&false));
    assert_eq!(result.checks.get("imagery_required_sunrise"), Some(&false));
}

#[test]
fn matching_palette_color_is_counted() {
    let policy = BrandPolicy {
        colors: ColorPolicy {
            required_palette: vec!["#0A14C8".to_string()],
            tolerance: 35,
            min_coverage: 0.5,
        },
        ..BrandPolicy::default()
    };
    let result =
        evaluate_brand_compliance(&solid([10, 20, 200, 255]), &policy, None, "prompt").unwrap();
    assert_eq!(result.checks.get("color_#0a14c8"), Some(&true));
    assert_eq!(result.checks.get("palette_compliant"), Some(&true));
    assert!(result.warnings.is_empty());
}

#[test]
fn prohibited_imagery_keyword_is_a_violation() {
    let policy = BrandPolicy {
        imagery: ImageryPolicy {
            required_keywords: vec![],
            avoid_keywords: vec!["alcohol".to_string()],
        },
        ..BrandPolicy::default()
    };
    let result = evaluate_brand_compliance(
        &solid([0, 0, 0, 255]),
        &policy,
        None,
        "a bottle of Alcohol on a bar",
    )
    .unwrap();
    assert!(!result.passed);
    assert_eq!(result.checks.get("imagery_avoid_alcohol"), Some(&false));
}

#[test]
fn required_logo_missing_is_a_violation() {
    let policy = BrandPolicy {
        logo: LogoPolicy {
            required: true,
            ..LogoPolicy::default()
        },
        ..BrandPolicy::default()
    };
    let result = evaluate_brand_compliance(&solid([0, 0, 0, 255]), &policy, None, "p").unwrap();
    assert!(!result.passed);
    assert_eq!(result.checks.get("logo_present"), Some(&false));
}

#[test]
fn logo_filename_must_be_in_the_allowed_set() {
    let dir = tempfile::tempdir().unwrap();
    let odd_name = dir.path().join("brand.png");
    std::fs::write(&odd_name, b"png").unwrap();
    let expected_name = dir.path().join("logo.png");
    std::fs::write(&expected_name, b"png").unwrap();

    let policy = BrandPolicy {
        logo: LogoPolicy {
            required: true,
            ..LogoPolicy::default()
        },
        ..BrandPolicy::default()
    };

    let mismatch =
        evaluate_brand_compliance(&solid([0, 0, 0, 255]), &policy, Some(&odd_name), "p").unwrap();
    assert!(!mismatch.passed);
    assert_eq!(mismatch.checks.get("logo_expected_filename"), Some(&false));

    let ok = evaluate_brand_compliance(&solid([0, 0, 0, 255]), &policy, Some(&expected_name), "p")
        .unwrap();
    assert!(ok.passed);
    assert_eq!(ok.checks.get("logo_expected_filename"), Some(&true));
}

#[test]
fn invalid_palette_hex_is_an_error() {
    let policy = BrandPolicy {
        colors: ColorPolicy {
            required_palette: vec!["#XYZ".to_string()],
            ..ColorPolicy::default()
        },
        ..BrandPolicy::default()
    };
    let err = evaluate_brand_compliance(&solid([0, 0, 0, 255]), &policy, None, "p").unwrap_err();
    assert!(err.to_string().contains("Invalid hex color"), "{err}");
}
