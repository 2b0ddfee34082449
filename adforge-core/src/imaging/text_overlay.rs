use image::{Rgba, RgbaImage, imageops};

use crate::{
    compliance::policy::MessageCase,
    foundation::color::hex_rgb_or_white,
    imaging::font::FontMeasurer,
};

/// Smallest readable message size; the fit never goes below it.
pub const MIN_MESSAGE_FONT_SIZE_PX: u32 = 24;
/// Upper fit bound as a fraction of the available text box height.
const MAX_FONT_BOX_HEIGHT_RATIO: f32 = 0.45;
/// Extra spacing between wrapped lines as a fraction of the line height.
const LINE_SPACING_RATIO: f32 = 0.35;

const PANEL_CORNER_RADIUS: f32 = 24.0;
const PANEL_BLUR_SIGMA: f32 = 15.0;
const PANEL_TINT: [u8; 4] = [176, 248, 255, 13];
const TEXT_ALPHA: u8 = 240;

/// Measurement contract the wrapping and fitting algorithms run against.
///
/// Production uses the rusttype-backed [`FontMeasurer`]; tests substitute
/// deterministic metrics.
pub trait TextMeasurer {
    /// Ink width of a single line at `font_size`.
    fn line_width(&self, text: &str, font_size: f32) -> f32;
    /// Height of one line at `font_size`.
    fn line_height(&self, font_size: f32) -> f32;
}

fn split_oversized_word(
    measurer: &dyn TextMeasurer,
    word: &str,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    for character in word.chars() {
        let mut candidate = current.clone();
        candidate.push(character);
        if measurer.line_width(&candidate, font_size) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            chunks.push(current);
            current = character.to_string();
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Greedy word wrap: append words while the line fits, splitting a single
/// word character-by-character when it exceeds the available width alone.
pub fn wrap_text(
    measurer: &dyn TextMeasurer,
    text: &str,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    if max_width <= 0.0 {
        return if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        };
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current_line: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        let candidate = if current_line.is_empty() {
            word.to_string()
        } else {
            format!("{} {word}", current_line.join(" "))
        };
        if measurer.line_width(&candidate, font_size) <= max_width {
            current_line.push(word);
        } else if current_line.is_empty() {
            lines.extend(split_oversized_word(measurer, word, font_size, max_width));
        } else {
            lines.push(current_line.join(" "));
            current_line = vec![word];
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line.join(" "));
    }
    lines
}

/// Total height of `line_count` wrapped lines including inter-line spacing.
pub fn wrapped_text_total_height(line_height: f32, line_count: usize) -> f32 {
    if line_count == 0 {
        return 0.0;
    }
    let gaps = (line_count - 1) as f32;
    line_height * line_count as f32 + gaps * line_height * LINE_SPACING_RATIO
}

/// The outcome of the adaptive font fit: a size and its wrapped lines.
#[derive(Clone, Debug)]
pub struct FittedMessage {
    /// Chosen font size in pixels.
    pub font_size: f32,
    /// Wrapped lines at that size.
    pub lines: Vec<String>,
    /// Line height at that size.
    pub line_height: f32,
}

/// Binary-search the largest font size whose wrapped message fits the box.
///
/// The search runs between [`MIN_MESSAGE_FONT_SIZE_PX`] and a fraction of the
/// box height. When even the minimum size overflows, the minimum is used
/// anyway: the overlay is best-effort and never fails on long messages.
pub fn choose_fitting_font_size(
    measurer: &dyn TextMeasurer,
    message: &str,
    max_text_width: f32,
    max_text_height: f32,
) -> FittedMessage {
    let fit_at = |font_size: u32| {
        let size = font_size as f32;
        let lines = wrap_text(measurer, message, size, max_text_width);
        let line_height = measurer.line_height(size);
        FittedMessage {
            font_size: size,
            lines,
            line_height,
        }
    };

    let max_candidate =
        MIN_MESSAGE_FONT_SIZE_PX.max((max_text_height * MAX_FONT_BOX_HEIGHT_RATIO) as u32);
    let mut best = fit_at(MIN_MESSAGE_FONT_SIZE_PX);

    let mut low = MIN_MESSAGE_FONT_SIZE_PX;
    let mut high = max_candidate;
    while low <= high {
        let font_size = low.midpoint(high);
        let candidate = fit_at(font_size);
        let total_height = wrapped_text_total_height(candidate.line_height, candidate.lines.len());
        if total_height <= max_text_height {
            best = candidate;
            low = font_size + 1;
        } else {
            high = font_size - 1;
        }
    }
    best
}

fn inside_rounded_rect(x: u32, y: u32, width: u32, height: u32, radius: f32) -> bool {
    let r = radius.min(width as f32 / 2.0).min(height as f32 / 2.0);
    let fx = x as f32 + 0.5;
    let fy = y as f32 + 0.5;
    let dx = if fx < r {
        r - fx
    } else if fx > width as f32 - r {
        fx - (width as f32 - r)
    } else {
        0.0
    };
    let dy = if fy < r {
        r - fy
    } else if fy > height as f32 - r {
        fy - (height as f32 - r)
    } else {
        0.0
    };
    dx * dx + dy * dy <= r * r
}

fn blend_over(dst: &mut Rgba<u8>, src: [u8; 4]) {
    let alpha = f32::from(src[3]) / 255.0;
    let inv = 1.0 - alpha;
    for channel in 0..3 {
        dst.0[channel] = (f32::from(src[channel]) * alpha + f32::from(dst.0[channel]) * inv) as u8;
    }
    dst.0[3] = 255;
}

/// Overlay the campaign message on a blurred, tinted glass panel anchored to
/// the image's lower band.
///
/// When no usable font was resolved the panel is still rendered and the text
/// is skipped with a warning; a message overlay never fails a run.
pub fn overlay_campaign_message(
    image: &RgbaImage,
    message: &str,
    font: Option<&FontMeasurer>,
    message_case: MessageCase,
    text_color: &str,
) -> RgbaImage {
    let mut composed = image.clone();
    let (width, height) = composed.dimensions();

    let side_padding = (width as f32 * 0.05) as u32;
    let bottom_padding = (height as f32 * 0.04) as u32;
    let container_height = (height as f32 * 0.28) as u32;
    let x1 = side_padding;
    let x2 = width.saturating_sub(side_padding);
    let y2 = height.saturating_sub(bottom_padding);
    let y1 = y2.saturating_sub(container_height);
    if x2 <= x1 || y2 <= y1 {
        return composed;
    }
    let container_width = x2 - x1;
    let container_height = y2 - y1;

    let region = imageops::crop_imm(&composed, x1, y1, container_width, container_height).to_image();
    let blurred = imageops::fast_blur(&region, PANEL_BLUR_SIGMA);
    for py in 0..container_height {
        for px in 0..container_width {
            if !inside_rounded_rect(px, py, container_width, container_height, PANEL_CORNER_RADIUS)
            {
                continue;
            }
            let mut pixel = *blurred.get_pixel(px, py);
            blend_over(&mut pixel, PANEL_TINT);
            composed.put_pixel(x1 + px, y1 + py, pixel);
        }
    }

    let Some(font) = font else {
        tracing::warn!("no usable font found; rendering message panel without text");
        return composed;
    };

    let text_padding_x = (container_width as f32 * 0.08) as u32;
    let text_padding_y = (container_height as f32 * 0.18) as u32;
    let text_area_x1 = x1 + text_padding_x;
    let text_area_width = container_width.saturating_sub(2 * text_padding_x);
    let max_text_height = container_height.saturating_sub(2 * text_padding_y).max(1);

    let rendered_message = message_case.apply(message);
    let fitted = choose_fitting_font_size(
        font,
        &rendered_message,
        text_area_width as f32,
        max_text_height as f32,
    );
    let total_text_height = wrapped_text_total_height(fitted.line_height, fitted.lines.len());

    let rgb = hex_rgb_or_white(text_color);
    let color = [rgb[0], rgb[1], rgb[2], TEXT_ALPHA];
    let block_offset = ((max_text_height as f32 - total_text_height) / 2.0).max(0.0);
    let mut current_y = (y1 + text_padding_y) as f32 + block_offset;

    for line in &fitted.lines {
        let line_width = font.line_width(line, fitted.font_size);
        let centering = ((text_area_width as f32 - line_width) / 2.0).max(0.0);
        let text_x = text_area_x1 as f32 + centering;
        font.draw_line(
            &mut composed,
            line,
            fitted.font_size,
            text_x as i32,
            current_y as i32,
            color,
        );
        current_y += fitted.line_height * (1.0 + LINE_SPACING_RATIO);
    }

    composed
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/text_overlay.rs"]
mod tests;
