use std::path::PathBuf;

use image::{Rgba, RgbaImage};

use super::*;
use crate::{
    assets::resolver::HeroSource,
    brief::model::ProductBrief,
    output::writer::save_image,
};

#[test]
fn generated_variants_hit_the_fixed_target_sizes_exactly() {
    let base = RgbaImage::from_pixel(300, 200, Rgba([50, 60, 70, 255]));
    for ratio in AspectRatio::ALL {
        let variant = create_variant(&base, ratio);
        assert_eq!(variant.dimensions(), ratio.target_size(), "{}", ratio.key());
    }
}

#[test]
fn target_sizes_follow_product_dimension_heuristics() {
    assert_eq!(target_size_from_product((500, 300), AspectRatio::Square), (500, 500));
    assert_eq!(target_size_from_product((500, 300), AspectRatio::Portrait), (500, 889));
    assert_eq!(target_size_from_product((500, 300), AspectRatio::Landscape), (533, 300));
}

#[test]
fn cover_crop_output_matches_the_target() {
    let image = RgbaImage::from_pixel(30, 10, Rgba([1, 2, 3, 255]));
    let cropped = cover_and_center_crop(&image, (20, 20));
    assert_eq!(cropped.dimensions(), (20, 20));
}

fn reused_record(
    dir: &std::path::Path,
    hero: Option<PathBuf>,
    background: Option<PathBuf>,
) -> ResolvedProductAssets {
    ResolvedProductAssets {
        product: ProductBrief {
            id: "p1".to_string(),
            name: "Product One".to_string(),
            prompt: None,
            image: None,
            logo: None,
        },
        product_dir: dir.to_path_buf(),
        hero_path: hero,
        logo_path: None,
        background_path: background,
        hero_source: HeroSource::Reused,
    }
}

#[test]
fn transparent_product_composites_over_the_background() {
    let dir = tempfile::tempdir().unwrap();
    let product_path = dir.path().join("product.png");
    let background_path = dir.path().join("background.png");

    save_image(
        &RgbaImage::from_pixel(2, 3, Rgba([10, 20, 200, 255])),
        &background_path,
    )
    .unwrap();

    let mut product = RgbaImage::from_pixel(6, 4, Rgba([255, 0, 0, 0]));
    product.put_pixel(2, 2, Rgba([255, 0, 0, 255]));
    save_image(&product, &product_path).unwrap();

    let resolved = reused_record(dir.path(), Some(product_path), Some(background_path));
    let composed = compose_reused_variant(&resolved, AspectRatio::Square).unwrap();

    assert_eq!(composed.dimensions(), (6, 6));
    assert_eq!(composed.get_pixel(0, 0), &Rgba([10, 20, 200, 255]));
    // Product is centered vertically: its (2, 2) lands at (2, 3).
    assert_eq!(composed.get_pixel(2, 3), &Rgba([255, 0, 0, 255]));
}

#[test]
fn missing_background_composites_over_white() {
    let dir = tempfile::tempdir().unwrap();
    let product_path = dir.path().join("product.png");
    save_image(
        &RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0])),
        &product_path,
    )
    .unwrap();

    let resolved = reused_record(dir.path(), Some(product_path), None);
    let composed = compose_reused_variant(&resolved, AspectRatio::Square).unwrap();
    assert_eq!(composed.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
}

#[test]
fn reused_composition_without_a_hero_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let resolved = reused_record(dir.path(), None, None);
    assert!(compose_reused_variant(&resolved, AspectRatio::Square).is_err());
}
