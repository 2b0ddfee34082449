use std::collections::BTreeMap;
use std::path::Path;

use image::{RgbaImage, imageops};
use serde::Serialize;

use crate::{
    compliance::policy::BrandPolicy,
    foundation::color::parse_hex_rgb,
    foundation::error::{AdforgeError, AdforgeResult},
};

const SAMPLE_GRID: u32 = 120;

/// Outcome of one brand evaluation call; immutable after construction.
#[derive(Clone, Debug, Serialize)]
pub struct BrandCheckResult {
    /// True iff there are zero violations; warnings never affect this.
    pub passed: bool,
    /// Named sub-check outcomes.
    pub checks: BTreeMap<String, bool>,
    /// Advisory findings (palette coverage, missing required imagery).
    pub warnings: Vec<String>,
    /// Blocking findings (missing/misnamed logo, banned imagery).
    pub violations: Vec<String>,
}

fn channel_distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| u32::from(x.abs_diff(y)))
        .sum()
}

/// Fraction of sampled pixels within `tolerance * 3` summed channel distance
/// of `target`, over a fixed bilinear downsample of the image.
fn palette_coverage(image: &RgbaImage, target: [u8; 3], tolerance: u8) -> f64 {
    let sample = imageops::resize(image, SAMPLE_GRID, SAMPLE_GRID, imageops::FilterType::Triangle);
    let threshold = u32::from(tolerance) * 3;

    let total = u64::from(SAMPLE_GRID) * u64::from(SAMPLE_GRID);
    let matching = sample
        .pixels()
        .filter(|px| channel_distance([px.0[0], px.0[1], px.0[2]], target) <= threshold)
        .count() as u64;
    matching as f64 / total as f64
}

/// Evaluate the final composed creative against the brand policy.
///
/// Logo absence or misnaming and banned imagery keywords are violations;
/// palette coverage and missing required imagery keywords are warnings.
/// Aesthetic drift is advisory, brand-safety and explicit bans are blocking.
pub fn evaluate_brand_compliance(
    final_image: &RgbaImage,
    policy: &BrandPolicy,
    logo_path: Option<&Path>,
    prompt_text: &str,
) -> AdforgeResult<BrandCheckResult> {
    let mut checks: BTreeMap<String, bool> = BTreeMap::new();
    let mut warnings: Vec<String> = Vec::new();
    let mut violations: Vec<String> = Vec::new();

    let logo_on_disk = logo_path.filter(|path| path.exists());
    if policy.logo.required {
        let has_logo = logo_on_disk.is_some();
        checks.insert("logo_present".to_string(), has_logo);
        match logo_on_disk {
            None => violations.push("Required logo is missing.".to_string()),
            Some(path) if !policy.logo.expected_filenames.is_empty() => {
                let actual_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                let expected: Vec<String> = policy
                    .logo
                    .expected_filenames
                    .iter()
                    .map(|name| name.to_lowercase())
                    .collect();
                let matches_expected = expected.contains(&actual_name);
                checks.insert("logo_expected_filename".to_string(), matches_expected);
                if !matches_expected {
                    violations.push(format!(
                        "Logo filename '{actual_name}' is not in allowed set: {expected:?}."
                    ));
                }
            }
            Some(_) => {}
        }
    } else {
        checks.insert("logo_present".to_string(), logo_on_disk.is_some());
    }

    if !policy.colors.required_palette.is_empty() {
        let mut palette_ok = true;
        for hex_color in &policy.colors.required_palette {
            let rgb = parse_hex_rgb(hex_color).ok_or_else(|| {
                AdforgeError::validation(format!("Invalid hex color: {hex_color}"))
            })?;
            let coverage = palette_coverage(final_image, rgb, policy.colors.tolerance);
            let color_ok = coverage >= f64::from(policy.colors.min_coverage);
            checks.insert(format!("color_{}", hex_color.to_lowercase()), color_ok);
            if !color_ok {
                palette_ok = false;
                warnings.push(format!(
                    "Palette color {hex_color} coverage {coverage:.3} is below threshold {:.3}.",
                    policy.colors.min_coverage
                ));
            }
        }
        checks.insert("palette_compliant".to_string(), palette_ok);
    }

    let prompt_lower = prompt_text.to_lowercase();
    if !policy.imagery.required_keywords.is_empty() {
        let mut required_ok = true;
        for keyword in &policy.imagery.required_keywords {
            let present = prompt_lower.contains(&keyword.to_lowercase());
            checks.insert(format!("imagery_required_{keyword}"), present);
            if !present {
                required_ok = false;
                warnings.push(format!("Imagery keyword '{keyword}' not found in prompt."));
            }
        }
        checks.insert("imagery_required_keywords".to_string(), required_ok);
    }

    for keyword in &policy.imagery.avoid_keywords {
        let present = prompt_lower.contains(&keyword.to_lowercase());
        checks.insert(format!("imagery_avoid_{keyword}"), !present);
        if present {
            violations.push(format!(
                "Prohibited imagery keyword '{keyword}' present in prompt."
            ));
        }
    }

    Ok(BrandCheckResult {
        passed: violations.is_empty(),
        checks,
        warnings,
        violations,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compliance/brand.rs"]
mod tests;
