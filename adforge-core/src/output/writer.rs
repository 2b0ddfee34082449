use std::path::Path;

use anyhow::Context as _;
use image::RgbaImage;
use serde::Serialize;

use crate::foundation::error::AdforgeResult;

/// Write an image as PNG, creating parent directories as needed.
pub fn save_image(image: &RgbaImage, output_path: &Path) -> AdforgeResult<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        output_path,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", output_path.display()))?;
    Ok(())
}

/// Write a payload as pretty JSON, creating parent directories as needed.
pub fn write_json<T: Serialize>(payload: &T, output_path: &Path) -> AdforgeResult<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let rendered = serde_json::to_string_pretty(payload).context("serialize json payload")?;
    std::fs::write(output_path, rendered)
        .with_context(|| format!("write json '{}'", output_path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/output/writer.rs"]
mod tests;
