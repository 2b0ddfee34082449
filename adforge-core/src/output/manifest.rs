use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;

use crate::{
    assets::resolver::HeroSource,
    compliance::{brand::BrandCheckResult, legal::LegalCheckResult},
};

/// Current UTC time as an RFC 3339 string.
pub fn utc_now_iso() -> String {
    Utc::now().to_rfc3339()
}

/// Per-product audit record: chosen hero source, output paths, and the
/// compliance/legal results keyed by `"{ratio}"` or `"{ratio}_{locale}"`.
#[derive(Clone, Debug, Serialize)]
pub struct ProductManifestEntry {
    /// Product identifier from the brief.
    pub product_id: String,
    /// Product display name from the brief.
    pub product_name: String,
    /// How the base hero image was obtained.
    pub hero_source: HeroSource,
    /// Output file paths by ratio/locale key.
    pub output_files: BTreeMap<String, String>,
    /// Brand results by ratio/locale key.
    pub compliance: BTreeMap<String, BrandCheckResult>,
    /// Legal results by `prompt` / `message_en` / `message_{locale}` key.
    pub legal: BTreeMap<String, LegalCheckResult>,
    /// True when the product was skipped rather than rendered.
    pub skipped: bool,
    /// Why the product was skipped, when it was.
    pub skip_reason: Option<String>,
}

impl ProductManifestEntry {
    /// Start an entry for a product whose hero came from `hero_source`.
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        hero_source: HeroSource,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            product_name: product_name.into(),
            hero_source,
            output_files: BTreeMap::new(),
            compliance: BTreeMap::new(),
            legal: BTreeMap::new(),
            skipped: false,
            skip_reason: None,
        }
    }
}

/// Run-level brand compliance totals.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct BrandComplianceSummary {
    /// Variants evaluated against the brand policy.
    pub variants_checked: u32,
    /// Variants that passed.
    pub variants_passed: u32,
    /// Variants with at least one violation.
    pub variants_failed: u32,
}

/// Run-level legal compliance totals.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LegalComplianceSummary {
    /// Legal evaluations executed.
    pub checks_executed: u32,
    /// Evaluations with at least one matched rule.
    pub checks_flagged: u32,
    /// Evaluations whose match blocked the run.
    pub checks_blocked: u32,
}

/// Append-only audit record of one run, finalized and serialized at the end.
#[derive(Clone, Debug, Serialize)]
pub struct CampaignManifest {
    /// Campaign identifier from the brief.
    pub campaign_id: String,
    /// Brief target region.
    pub target_region: String,
    /// Brief target audience.
    pub target_audience: String,
    /// Campaign headline message.
    pub message: String,
    /// Name of the provider that served this run.
    pub provider: String,
    /// Whether image writes were skipped.
    pub dry_run: bool,
    /// Run start time, RFC 3339.
    pub started_at: String,
    /// Locales rendered, English first.
    pub locales_processed: Vec<String>,
    /// Brand policy file in effect, if any.
    pub brand_policy_path: Option<String>,
    /// Whether brand violations aborted the run.
    pub strict_brand: bool,
    /// Legal policy file in effect, if any.
    pub legal_policy_path: Option<String>,
    /// Whether legal matches aborted the run.
    pub strict_legal: bool,
    /// Run end time, RFC 3339.
    pub finished_at: Option<String>,
    /// Brand totals, present when a brand policy was configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_compliance_summary: Option<BrandComplianceSummary>,
    /// Legal totals, present when a legal policy was configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_compliance_summary: Option<LegalComplianceSummary>,
    /// Per-product entries in brief order.
    pub products: Vec<ProductManifestEntry>,
}

#[cfg(test)]
#[path = "../../tests/unit/output/manifest.rs"]
mod tests;
