use std::path::{Path, PathBuf};

use image::RgbaImage;
use rusttype::{Font, Scale, point};

use crate::imaging::text_overlay::TextMeasurer;

const DEFAULT_TYPEFACES: [&str; 2] = ["arial.ttf", "segoeui.ttf"];
const MAX_SCAN_DEPTH: usize = 3;

/// A loaded typeface that can measure and rasterize message lines.
pub struct FontMeasurer {
    font: Font<'static>,
}

impl FontMeasurer {
    /// Wrap an already loaded font.
    pub fn new(font: Font<'static>) -> Self {
        Self { font }
    }

    /// Rasterize one line at `(x, y)` (top of the line box) onto `image`.
    ///
    /// Glyph coverage is multiplied by the color's alpha and blended straight
    /// over the destination, which is opaque at this point in the pipeline.
    pub(crate) fn draw_line(
        &self,
        image: &mut RgbaImage,
        text: &str,
        font_size: f32,
        x: i32,
        y: i32,
        color: [u8; 4],
    ) {
        let scale = Scale::uniform(font_size);
        let v_metrics = self.font.v_metrics(scale);
        let baseline = y as f32 + v_metrics.ascent;
        let (width, height) = image.dimensions();

        for glyph in self.font.layout(text, scale, point(x as f32, baseline)) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 || px as u32 >= width || py as u32 >= height {
                    return;
                }
                let alpha = coverage * f32::from(color[3]) / 255.0;
                if alpha <= 0.0 {
                    return;
                }
                let dst = image.get_pixel_mut(px as u32, py as u32);
                let inv = 1.0 - alpha;
                for channel in 0..3 {
                    dst.0[channel] =
                        (f32::from(color[channel]) * alpha + f32::from(dst.0[channel]) * inv) as u8;
                }
                dst.0[3] = 255;
            });
        }
    }
}

impl TextMeasurer for FontMeasurer {
    fn line_width(&self, text: &str, font_size: f32) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let scale = Scale::uniform(font_size);
        let v_metrics = self.font.v_metrics(scale);
        self.font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .filter_map(|glyph| glyph.pixel_bounding_box())
            .map(|bb| bb.max.x as f32)
            .fold(0.0, f32::max)
    }

    fn line_height(&self, font_size: f32) -> f32 {
        let v_metrics = self.font.v_metrics(Scale::uniform(font_size));
        (v_metrics.ascent - v_metrics.descent).ceil()
    }
}

fn ordered_font_candidates(preferred: &[String]) -> Vec<String> {
    let mut ordered: Vec<String> = Vec::new();
    for name in preferred
        .iter()
        .map(String::as_str)
        .chain(DEFAULT_TYPEFACES.into_iter())
    {
        if !name.is_empty() && !ordered.iter().any(|seen| seen.eq_ignore_ascii_case(name)) {
            ordered.push(name.to_string());
        }
    }
    ordered
}

fn load_font_file(path: &Path) -> Option<Font<'static>> {
    let bytes = std::fs::read(path).ok()?;
    Font::try_from_vec(bytes)
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            ext == "ttf" || ext == "otf" || ext == "ttc"
        })
        .unwrap_or(false)
}

fn find_named_font(dir: &Path, file_name: &str, depth: usize) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut subdirs: Vec<PathBuf> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.eq_ignore_ascii_case(file_name))
        {
            return Some(path);
        }
    }
    if depth > 0 {
        for subdir in subdirs {
            if let Some(found) = find_named_font(&subdir, file_name, depth - 1) {
                return Some(found);
            }
        }
    }
    None
}

fn first_font_in_dir(dir: &Path, depth: usize) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    let mut files: Vec<PathBuf> = Vec::new();
    let mut subdirs: Vec<PathBuf> = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if is_font_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    if let Some(first) = files.into_iter().next() {
        return Some(first);
    }
    if depth > 0 {
        subdirs.sort();
        for subdir in subdirs {
            if let Some(found) = first_font_in_dir(&subdir, depth - 1) {
                return Some(found);
            }
        }
    }
    None
}

fn font_search_dirs(fonts_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    if let Some(dir) = fonts_dir {
        dirs.push(dir.to_path_buf());
    }
    dirs.push(PathBuf::from("assets/fonts"));
    if let Some(home) = std::env::var_os("HOME") {
        dirs.push(PathBuf::from(home).join(".fonts"));
    }
    for system in [
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/System/Library/Fonts",
        "/Library/Fonts",
        "C:\\Windows\\Fonts",
    ] {
        dirs.push(PathBuf::from(system));
    }
    dirs
}

/// Resolve the best available message typeface.
///
/// Search order: each preferred candidate (then the built-in defaults) by
/// name across the configured fonts directory and the system font locations,
/// then the candidate taken as a literal path, then any font file found in
/// the search directories. Returns `None` when nothing loads; callers degrade
/// to rendering without text rather than failing.
pub fn resolve_message_font(
    preferred: &[String],
    fonts_dir: Option<&Path>,
) -> Option<FontMeasurer> {
    let dirs = font_search_dirs(fonts_dir);

    for candidate in ordered_font_candidates(preferred) {
        for dir in &dirs {
            if let Some(path) = find_named_font(dir, &candidate, MAX_SCAN_DEPTH)
                && let Some(font) = load_font_file(&path)
            {
                return Some(FontMeasurer::new(font));
            }
        }
        let direct = PathBuf::from(&candidate);
        if direct.is_file()
            && let Some(font) = load_font_file(&direct)
        {
            return Some(FontMeasurer::new(font));
        }
    }

    for dir in &dirs {
        if let Some(path) = first_font_in_dir(dir, MAX_SCAN_DEPTH)
            && let Some(font) = load_font_file(&path)
        {
            return Some(FontMeasurer::new(font));
        }
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/font.rs"]
mod tests;
