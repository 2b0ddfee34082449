use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{AdforgeError, AdforgeResult};

/// Optional creative-direction hints attached to a brief.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct VisualStyle {
    /// Style keywords folded into generation prompts.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Overall mood, e.g. "energetic".
    #[serde(default)]
    pub mood: Option<String>,
    /// Suggested palette hex values.
    #[serde(default)]
    pub palette: Vec<String>,
}

/// One product entry in a campaign brief.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProductBrief {
    /// Unique product identifier within the campaign.
    pub id: String,
    /// Display name used in prompts and manifests.
    pub name: String,
    /// Explicit generation prompt override.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Explicit hero image filename under the product's asset directory.
    #[serde(default)]
    pub image: Option<String>,
    /// Explicit logo filename under the product's asset directory.
    #[serde(default)]
    pub logo: Option<String>,
}

/// Immutable description of one campaign run input.
///
/// Deserialized from YAML or JSON by [`crate::brief::loader::load_and_validate_brief`],
/// which also enforces the structural invariants serde cannot express
/// (see [`CampaignBrief::validate`]).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CampaignBrief {
    /// Campaign identifier, used as the output directory name.
    pub campaign_id: String,
    /// Headline message overlaid onto every creative.
    pub message: String,
    /// Target region, folded into generation prompts.
    pub target_region: String,
    /// Target audience, folded into generation prompts.
    pub target_audience: String,
    /// Additional output locales rendered when localization is enabled.
    #[serde(default)]
    pub locals: Vec<String>,
    /// Products to render; at least two, with unique non-empty ids.
    pub products: Vec<ProductBrief>,
    /// Optional creative-direction hints.
    #[serde(default)]
    pub visual_style: Option<VisualStyle>,
    /// Optional per-locale message overrides.
    #[serde(default)]
    pub prompts: Option<BTreeMap<String, String>>,
    /// Optional campaign-level palette hints.
    #[serde(default)]
    pub palette: Option<Vec<String>>,
    /// Optional negative prompt forwarded to generation backends.
    #[serde(default)]
    pub negative_prompt: Option<String>,
}

impl CampaignBrief {
    /// Check the structural invariants serde cannot express.
    ///
    /// All problems are collected so a single error reports every issue.
    pub fn validate(&self) -> AdforgeResult<()> {
        let mut problems: Vec<String> = Vec::new();

        for (field, value) in [
            ("campaign_id", &self.campaign_id),
            ("message", &self.message),
            ("target_region", &self.target_region),
            ("target_audience", &self.target_audience),
        ] {
            if value.trim().is_empty() {
                problems.push(format!("- {field}: must be non-empty"));
            }
        }

        if self.products.len() < 2 {
            problems.push(format!(
                "- products: at least 2 products required, found {}",
                self.products.len()
            ));
        }

        let mut seen_ids: BTreeSet<&str> = BTreeSet::new();
        for (index, product) in self.products.iter().enumerate() {
            if product.id.trim().is_empty() {
                problems.push(format!("- products.{index}.id: must be non-empty"));
            } else if !seen_ids.insert(product.id.as_str()) {
                problems.push(format!(
                    "- products.{index}.id: duplicate product id '{}'",
                    product.id
                ));
            }
            if product.name.trim().is_empty() {
                problems.push(format!("- products.{index}.name: must be non-empty"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AdforgeError::brief_validation(format!(
                "Brief validation failed:\n{}",
                problems.join("\n")
            )))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/brief/model.rs"]
mod tests;
