use crate::{assets::resolver::ResolvedProductAssets, brief::model::CampaignBrief};

fn style_keywords(brief: &CampaignBrief) -> String {
    brief
        .visual_style
        .as_ref()
        .map(|style| style.keywords.join(", "))
        .unwrap_or_default()
}

fn mood(brief: &CampaignBrief) -> String {
    brief
        .visual_style
        .as_ref()
        .and_then(|style| style.mood.clone())
        .unwrap_or_default()
}

/// Build the hero generation prompt for a product.
///
/// An explicit per-product prompt from the brief wins over the assembled one.
pub fn build_generation_prompt(brief: &CampaignBrief, resolved: &ResolvedProductAssets) -> String {
    let product = &resolved.product;
    if let Some(prompt) = &product.prompt {
        return prompt.clone();
    }

    let keywords = style_keywords(brief);
    let mood = mood(brief);

    let mut parts = vec![
        format!(
            "Create a premium advertising hero image for product: {}.",
            product.name
        ),
        format!("Target audience: {}.", brief.target_audience),
        format!("Target region: {}.", brief.target_region),
    ];
    if !keywords.is_empty() {
        parts.push(format!("Visual style keywords: {keywords}."));
    }
    if !mood.is_empty() {
        parts.push(format!("Mood: {mood}."));
    }
    parts.push("No text overlays in the generated image.".to_string());
    parts.join(" ")
}

/// Build the packshot prompt used when pre-provisioning a missing product image.
pub fn build_product_prompt(brief: &CampaignBrief, resolved: &ResolvedProductAssets) -> String {
    let product = &resolved.product;
    if let Some(prompt) = &product.prompt {
        return prompt.clone();
    }

    let keywords = style_keywords(brief);
    let mood = mood(brief);

    let mut parts = vec![
        format!(
            "Create a clean product packshot of '{}' on a plain white background.",
            product.name
        ),
        format!("Target audience: {}.", brief.target_audience),
        format!("Target region: {}.", brief.target_region),
        "Centered composition, professional product photography style.".to_string(),
    ];
    if !keywords.is_empty() {
        parts.push(format!("Visual style: {keywords}."));
    }
    if !mood.is_empty() {
        parts.push(format!("Mood: {mood}."));
    }
    parts.push("No text overlays.".to_string());
    parts.join(" ")
}

/// Build the prompt used when pre-provisioning a missing logo.
pub fn build_logo_prompt(resolved: &ResolvedProductAssets) -> String {
    format!(
        "Create a clean, minimal brand logo icon for '{}'. Plain white background, \
         no text, simple icon or symbol, professional graphic design, suitable for \
         placement on advertising imagery.",
        resolved.product.name
    )
}

/// Build the prompt used when pre-provisioning a missing background.
pub fn build_background_prompt(brief: &CampaignBrief, resolved: &ResolvedProductAssets) -> String {
    let keywords = {
        let kw = style_keywords(brief);
        if kw.is_empty() {
            "premium, modern".to_string()
        } else {
            kw
        }
    };
    let mood = mood(brief);

    let mut parts = vec![
        format!(
            "Create a premium advertising background image for a '{}' campaign.",
            resolved.product.name
        ),
        format!("Target audience: {}.", brief.target_audience),
        format!("Target region: {}.", brief.target_region),
        format!("Visual style: {keywords}."),
    ];
    if !mood.is_empty() {
        parts.push(format!("Mood: {mood}."));
    }
    parts.push(
        "No products, no people, no text overlays. Full-bleed background suitable for advertising."
            .to_string(),
    );
    parts.join(" ")
}

#[cfg(test)]
#[path = "../../tests/unit/prompts/builder.rs"]
mod tests;
