use image::{Rgba, RgbaImage};
use sha2::{Digest, Sha256};

use crate::{
    foundation::error::AdforgeResult,
    providers::ImageProvider,
};

const BADGE_MARGIN: u32 = 20;
const BADGE_WIDTH: u32 = 220;
const BADGE_HEIGHT: u32 = 64;

/// Deterministic offline provider: renders a prompt-seeded vertical gradient
/// with a dark badge marker, so runs are reproducible without a backend.
pub struct MockImageProvider;

impl ImageProvider for MockImageProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn generate_base_hero(
        &self,
        prompt: &str,
        size: (u32, u32),
        _negative_prompt: Option<&str>,
    ) -> AdforgeResult<RgbaImage> {
        let (width, height) = size;
        let digest = Sha256::digest(prompt.as_bytes());
        let color_a = [digest[0], digest[1], digest[2]];
        let color_b = [digest[3], digest[4], digest[5]];

        let mut image = RgbaImage::new(width, height);
        for y in 0..height {
            let blend = y as f32 / (height.saturating_sub(1)).max(1) as f32;
            let row = [
                lerp_u8(color_a[0], color_b[0], blend),
                lerp_u8(color_a[1], color_b[1], blend),
                lerp_u8(color_a[2], color_b[2], blend),
                255,
            ];
            for x in 0..width {
                image.put_pixel(x, y, Rgba(row));
            }
        }

        draw_badge(&mut image);
        Ok(image)
    }
}

fn lerp_u8(a: u8, b: u8, t: f32) -> u8 {
    (f32::from(a) * (1.0 - t) + f32::from(b) * t) as u8
}

/// Dark marker in the top-left corner so mock heroes are recognizable at a
/// glance; skipped when the canvas is too small to hold it.
fn draw_badge(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    if width < BADGE_MARGIN + BADGE_WIDTH || height < BADGE_MARGIN + BADGE_HEIGHT {
        return;
    }
    for y in BADGE_MARGIN..BADGE_MARGIN + BADGE_HEIGHT {
        for x in BADGE_MARGIN..BADGE_MARGIN + BADGE_WIDTH {
            image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/providers/mock.rs"]
mod tests;
