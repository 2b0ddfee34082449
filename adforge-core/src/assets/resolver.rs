use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::brief::model::{CampaignBrief, ProductBrief};

/// Where a product's base hero image came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroSource {
    /// A pre-existing file found under the assets root.
    Reused,
    /// Freshly generated by the configured provider during this run.
    GeneratedNew,
    /// Most recent previously generated image for the product.
    GeneratedLast,
    /// Previously generated image selected by explicit identifier.
    GeneratedId,
}

impl HeroSource {
    /// Manifest tag for this source.
    pub fn as_str(self) -> &'static str {
        match self {
            HeroSource::Reused => "reused",
            HeroSource::GeneratedNew => "generated_new",
            HeroSource::GeneratedLast => "generated_last",
            HeroSource::GeneratedId => "generated_id",
        }
    }

    /// True when the hero did not require a fresh generation call.
    pub fn is_reuse(self) -> bool {
        !matches!(self, HeroSource::GeneratedNew)
    }
}

/// Per-product working record of resolved (or still missing) asset files.
///
/// Owned exclusively by the pipeline step processing the product and mutated
/// in place as missing assets are filled in; never shared across products.
#[derive(Clone, Debug)]
pub struct ResolvedProductAssets {
    /// The product this record belongs to.
    pub product: ProductBrief,
    /// The product's directory under the assets root.
    pub product_dir: PathBuf,
    /// Resolved hero image path, if any file matched.
    pub hero_path: Option<PathBuf>,
    /// Resolved logo path, if any file matched.
    pub logo_path: Option<PathBuf>,
    /// Resolved background path, if any file matched.
    pub background_path: Option<PathBuf>,
    /// Reused when the hero resolved, otherwise a generation is pending.
    pub hero_source: HeroSource,
}

fn resolve_file(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

fn resolve_hero(product_dir: &Path, product: &ProductBrief) -> Option<PathBuf> {
    if let Some(name) = &product.image {
        return resolve_file(product_dir.join(name));
    }
    resolve_file(product_dir.join("product.png"))
        .or_else(|| resolve_file(product_dir.join(format!("product_{}.png", product.id))))
}

fn resolve_logo(product_dir: &Path, product: &ProductBrief) -> Option<PathBuf> {
    if let Some(name) = &product.logo {
        return resolve_file(product_dir.join(name));
    }
    resolve_file(product_dir.join("logo.png"))
        .or_else(|| resolve_file(product_dir.join(format!("logo_{}.png", product.id))))
}

fn resolve_background(product_dir: &Path, product: &ProductBrief) -> Option<PathBuf> {
    resolve_file(product_dir.join("background.png"))
        .or_else(|| resolve_file(product_dir.join(format!("background_{}.png", product.id))))
}

/// Probe the assets root for each product's hero, logo, and background files.
///
/// Pure file-existence probing: absence is a valid outcome, not a failure.
/// Explicit filenames from the brief win over the conventional names.
pub fn resolve_product_assets(
    assets_root: &Path,
    brief: &CampaignBrief,
) -> Vec<ResolvedProductAssets> {
    brief
        .products
        .iter()
        .map(|product| {
            let product_dir = assets_root.join(&product.id);
            let hero_path = resolve_hero(&product_dir, product);
            let logo_path = resolve_logo(&product_dir, product);
            let background_path = resolve_background(&product_dir, product);
            let hero_source = if hero_path.is_some() {
                HeroSource::Reused
            } else {
                HeroSource::GeneratedNew
            };

            ResolvedProductAssets {
                product: product.clone(),
                product_dir,
                hero_path,
                logo_path,
                background_path,
                hero_source,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
