use anyhow::Context as _;
use image::{Rgba, RgbaImage, imageops};

use crate::{
    assets::resolver::ResolvedProductAssets,
    foundation::error::{AdforgeError, AdforgeResult},
};

/// The three deliverable aspect ratios, in render order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AspectRatio {
    /// 1:1, 1080x1080.
    Square,
    /// 9:16, 1080x1920.
    Portrait,
    /// 16:9, 1920x1080.
    Landscape,
}

impl AspectRatio {
    /// All ratios in the fixed render order.
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Square,
        AspectRatio::Portrait,
        AspectRatio::Landscape,
    ];

    /// Manifest and path key for this ratio.
    pub fn key(self) -> &'static str {
        match self {
            AspectRatio::Square => "1x1",
            AspectRatio::Portrait => "9x16",
            AspectRatio::Landscape => "16x9",
        }
    }

    /// Fixed output dimensions for generated-hero variants.
    pub fn target_size(self) -> (u32, u32) {
        match self {
            AspectRatio::Square => (1080, 1080),
            AspectRatio::Portrait => (1080, 1920),
            AspectRatio::Landscape => (1920, 1080),
        }
    }
}

/// Scale to cover `target_size`, then crop centered to it exactly.
pub fn cover_and_center_crop(image: &RgbaImage, target_size: (u32, u32)) -> RgbaImage {
    let (target_width, target_height) = target_size;
    let (src_width, src_height) = image.dimensions();

    let scale = (target_width as f32 / src_width as f32)
        .max(target_height as f32 / src_height as f32);
    let resized_width = target_width.max((src_width as f32 * scale).round() as u32);
    let resized_height = target_height.max((src_height as f32 * scale).round() as u32);

    let resized = imageops::resize(
        image,
        resized_width,
        resized_height,
        imageops::FilterType::Lanczos3,
    );
    let left = (resized_width - target_width) / 2;
    let top = (resized_height - target_height) / 2;
    imageops::crop_imm(&resized, left, top, target_width, target_height).to_image()
}

/// Center-crop-and-fill a generated hero to the ratio's fixed target size.
pub fn create_variant(base_image: &RgbaImage, ratio: AspectRatio) -> RgbaImage {
    cover_and_center_crop(base_image, ratio.target_size())
}

/// Derive a variant size from the product image's own dimensions.
///
/// Square uses the larger side; portrait keeps the width and derives the
/// height from 9:16; landscape keeps the height and derives the width from
/// 16:9. Reused product shots keep their pixels, so the deliverable size
/// follows the source instead of the fixed generated-hero targets.
pub fn target_size_from_product(product_size: (u32, u32), ratio: AspectRatio) -> (u32, u32) {
    let (product_width, product_height) = product_size;
    match ratio {
        AspectRatio::Square => {
            let side = product_width.max(product_height);
            (side, side)
        }
        AspectRatio::Portrait => {
            let height = ((product_width as f32 * 16.0 / 9.0).round() as u32).max(1);
            (product_width, height)
        }
        AspectRatio::Landscape => {
            let width = ((product_height as f32 * 16.0 / 9.0).round() as u32).max(1);
            (width, product_height)
        }
    }
}

/// Compose a reused (possibly transparent) product image over its background
/// for one ratio, without distorting the product shot.
///
/// The background is cover-cropped to the product-derived target size (white
/// when no background resolved) and the product is alpha-composited centered
/// on top.
pub fn compose_reused_variant(
    resolved: &ResolvedProductAssets,
    ratio: AspectRatio,
) -> AdforgeResult<RgbaImage> {
    let hero_path = resolved.hero_path.as_ref().ok_or_else(|| {
        AdforgeError::validation("expected hero_path for reused asset composition")
    })?;

    let product = image::open(hero_path)
        .with_context(|| format!("open product image '{}'", hero_path.display()))?
        .to_rgba8();
    let target_size = target_size_from_product(product.dimensions(), ratio);

    let mut canvas = match resolved
        .background_path
        .as_ref()
        .filter(|path| path.exists())
    {
        Some(background_path) => {
            let background = image::open(background_path)
                .with_context(|| format!("open background '{}'", background_path.display()))?
                .to_rgba8();
            cover_and_center_crop(&background, target_size)
        }
        None => RgbaImage::from_pixel(target_size.0, target_size.1, Rgba([255, 255, 255, 255])),
    };

    let product_x = (i64::from(target_size.0) - i64::from(product.width())) / 2;
    let product_y = (i64::from(target_size.1) - i64::from(product.height())) / 2;
    imageops::overlay(&mut canvas, &product, product_x, product_y);
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/variants.rs"]
mod tests;
