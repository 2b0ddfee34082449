//! Raster composition: message panel, logo placement, aspect-ratio variants.

pub mod font;
pub mod logo_overlay;
pub mod text_overlay;
pub mod variants;
