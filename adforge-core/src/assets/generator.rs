use tracing::info;

use crate::{
    assets::resolver::{HeroSource, ResolvedProductAssets},
    brief::model::CampaignBrief,
    foundation::error::AdforgeResult,
    prompts::builder::{build_background_prompt, build_logo_prompt, build_product_prompt},
    providers::ImageProvider,
    storage::generated_store::GeneratedImageStore,
};

const PRODUCT_SIZE: (u32, u32) = (1024, 1024);
const LOGO_SIZE: (u32, u32) = (512, 512);
const BACKGROUND_SIZE: (u32, u32) = (1920, 1080);

/// Generate and save any missing product assets (hero, logo, background).
///
/// Each missing asset is generated via `provider` and saved flat into the
/// store as `{type}_{product_id}.png` (mirrored when a mirror is configured).
/// The resolution record is updated in place so the rest of the pipeline
/// picks the new files up without further changes; a hero filled in this way
/// counts as reused from then on.
pub fn ensure_product_assets(
    resolved: &mut ResolvedProductAssets,
    brief: &CampaignBrief,
    provider: &dyn ImageProvider,
    store: &GeneratedImageStore,
    negative_prompt: Option<&str>,
) -> AdforgeResult<()> {
    let product_id = resolved.product.id.clone();

    if resolved.hero_path.is_none() {
        let filename = format!("product_{product_id}.png");
        info!(%product_id, %filename, "generating product asset");
        let image = provider.generate_base_hero(
            &build_product_prompt(brief, resolved),
            PRODUCT_SIZE,
            negative_prompt,
        )?;
        let dest = store.save_asset(&filename, &image)?;
        info!(path = %dest.display(), "saved generated product asset");
        resolved.hero_path = Some(dest);
        resolved.hero_source = HeroSource::Reused;
    }

    if resolved.logo_path.is_none() {
        let filename = format!("logo_{product_id}.png");
        info!(%product_id, %filename, "generating logo asset");
        let image = provider.generate_base_hero(&build_logo_prompt(resolved), LOGO_SIZE, None)?;
        let dest = store.save_asset(&filename, &image)?;
        info!(path = %dest.display(), "saved generated logo asset");
        resolved.logo_path = Some(dest);
    }

    if resolved.background_path.is_none() {
        let filename = format!("background_{product_id}.png");
        info!(%product_id, %filename, "generating background asset");
        let image = provider.generate_base_hero(
            &build_background_prompt(brief, resolved),
            BACKGROUND_SIZE,
            negative_prompt,
        )?;
        let dest = store.save_asset(&filename, &image)?;
        info!(path = %dest.display(), "saved generated background asset");
        resolved.background_path = Some(dest);
    }

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/generator.rs"]
mod tests;
