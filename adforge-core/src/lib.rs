//! Adforge turns a structured campaign brief into compliant, localized
//! advertising creatives.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: probe the assets root for each product's hero, logo, and
//!    background files ([`resolve_product_assets`])
//! 2. **Generate**: obtain a base hero for products without reusable assets,
//!    via the configured [`ImageProvider`] or the generated-image store
//! 3. **Compose**: build the three aspect-ratio variants, overlay the
//!    localized message on a glass panel, and place the logo
//! 4. **Gate**: evaluate legal rules on prompts/messages and brand rules on
//!    the final creatives, with strict or permissive handling
//! 5. **Record**: write every variant, the campaign manifest, and run metrics
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-writer state**: each product's resolution record is owned by
//!   the step processing it; nothing is mutated concurrently.
//! - **Best-effort mirror**: remote mirror failures are logged, never raised.
//! - **Synchronous collaborators**: provider, localizer, and mirror calls are
//!   the only suspension points and are never retried by the core.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod brief;
mod compliance;
mod foundation;
mod imaging;
mod localization;
mod output;
mod prompts;
mod providers;
mod storage;

/// Pipeline orchestration: run configuration and entry points.
pub mod pipeline;

pub use assets::generator::ensure_product_assets;
pub use assets::resolver::{HeroSource, ResolvedProductAssets, resolve_product_assets};
pub use brief::loader::load_and_validate_brief;
pub use brief::model::{CampaignBrief, ProductBrief, VisualStyle};
pub use compliance::brand::{BrandCheckResult, evaluate_brand_compliance};
pub use compliance::legal::{LegalCheckResult, evaluate_legal_text};
pub use compliance::legal_policy::{LegalAction, LegalPolicy, LegalRuleSet, load_legal_policy};
pub use compliance::policy::{
    BrandPolicy, ColorPolicy, ImageryPolicy, LogoPolicy, MessageCase, SafeCorner,
    TypographyPolicy, load_brand_policy,
};
pub use foundation::color::{hex_rgb_or_white, parse_hex_rgb};
pub use foundation::error::{AdforgeError, AdforgeResult};
pub use imaging::font::{FontMeasurer, resolve_message_font};
pub use imaging::logo_overlay::{DEFAULT_LOGO_RELATIVE_WIDTH, overlay_logo};
pub use imaging::text_overlay::{
    FittedMessage, MIN_MESSAGE_FONT_SIZE_PX, TextMeasurer, choose_fitting_font_size,
    overlay_campaign_message, wrap_text, wrapped_text_total_height,
};
pub use imaging::variants::{
    AspectRatio, compose_reused_variant, cover_and_center_crop, create_variant,
    target_size_from_product,
};
pub use localization::translator::{
    MessageLocalizer, MockLocalizer, NoopLocalizer, build_localizer, is_english_locale,
    normalize_locale, resolve_output_locales,
};
pub use output::manifest::{
    BrandComplianceSummary, CampaignManifest, LegalComplianceSummary, ProductManifestEntry,
    utc_now_iso,
};
pub use output::metrics::{RunMetrics, Timer};
pub use output::writer::{save_image, write_json};
pub use pipeline::{
    GeneratedImageMode, LegalValidationSummary, ProductLegalReport, RunConfig, run_legal_validation_only,
    run_pipeline, run_pipeline_with,
};
pub use prompts::builder::{
    build_background_prompt, build_generation_prompt, build_logo_prompt, build_product_prompt,
};
pub use providers::mock::MockImageProvider;
pub use providers::{ImageProvider, ProviderKind, create_provider};
pub use storage::generated_store::GeneratedImageStore;
pub use storage::mirror::{RemoteMirror, generated_key};
