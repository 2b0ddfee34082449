use std::path::Path;

use anyhow::Context as _;
use image::{RgbaImage, imageops};

use crate::foundation::error::AdforgeResult;

/// Logo width cap as a fraction of the creative width.
pub const DEFAULT_LOGO_RELATIVE_WIDTH: f32 = 0.18;

/// Composite the product logo into the top-right corner with a safe margin.
///
/// The logo is only ever scaled down, preserving aspect ratio. A missing
/// file is a silent no-op, not an error.
pub fn overlay_logo(
    image: &RgbaImage,
    logo_path: &Path,
    max_relative_width: f32,
) -> AdforgeResult<RgbaImage> {
    if !logo_path.exists() {
        return Ok(image.clone());
    }

    let mut base = image.clone();
    let logo = image::open(logo_path)
        .with_context(|| format!("open logo '{}'", logo_path.display()))?
        .to_rgba8();
    let width = base.width();

    let max_logo_width = (width as f32 * max_relative_width) as u32;
    let logo = if max_logo_width > 0 && logo.width() > max_logo_width {
        let scale = max_logo_width as f32 / logo.width() as f32;
        let scaled_height = ((logo.height() as f32 * scale) as u32).max(1);
        imageops::resize(
            &logo,
            max_logo_width,
            scaled_height,
            imageops::FilterType::Lanczos3,
        )
    } else {
        logo
    };

    let safe_margin = (width as f32 * 0.04) as u32;
    let pos_x = i64::from(width) - i64::from(logo.width()) - i64::from(safe_margin);
    imageops::overlay(&mut base, &logo, pos_x, i64::from(safe_margin));
    Ok(base)
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/logo_overlay.rs"]
mod tests;
