use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    assets::resolver::{HeroSource, ResolvedProductAssets, resolve_product_assets},
    brief::loader::load_and_validate_brief,
    brief::model::CampaignBrief,
    compliance::brand::evaluate_brand_compliance,
    compliance::legal::{LegalCheckResult, evaluate_legal_text},
    compliance::legal_policy::{LegalPolicy, load_legal_policy},
    compliance::policy::{BrandPolicy, MessageCase, load_brand_policy},
    foundation::error::{AdforgeError, AdforgeResult},
    imaging::font::{FontMeasurer, resolve_message_font},
    imaging::logo_overlay::{DEFAULT_LOGO_RELATIVE_WIDTH, overlay_logo},
    imaging::text_overlay::overlay_campaign_message,
    imaging::variants::{AspectRatio, compose_reused_variant, create_variant},
    localization::translator::{
        MessageLocalizer, build_localizer, normalize_locale, resolve_output_locales,
    },
    output::manifest::{
        BrandComplianceSummary, CampaignManifest, LegalComplianceSummary, ProductManifestEntry,
        utc_now_iso,
    },
    output::metrics::{RunMetrics, Timer},
    output::writer::{save_image, write_json},
    prompts::builder::build_generation_prompt,
    providers::{ImageProvider, ProviderKind, create_provider},
    storage::generated_store::GeneratedImageStore,
    storage::mirror::RemoteMirror,
};

const GENERATED_HERO_SIZE: (u32, u32) = (1536, 1536);

/// How the base hero is obtained when no reusable asset resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GeneratedImageMode {
    /// Always request a fresh generation (default).
    #[default]
    New,
    /// Reuse the most recent stored generation for the product, else generate.
    Last,
    /// Reuse the stored generation selected by explicit identifier.
    Id,
}

/// Configuration of one pipeline run; selected by the caller, read-only here.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Campaign brief file (.yaml/.yml/.json).
    pub brief_path: PathBuf,
    /// Root directory of pre-existing per-product assets.
    pub assets_root: PathBuf,
    /// Root directory campaign outputs are written under.
    pub output_root: PathBuf,
    /// Built-in provider selection.
    pub provider: ProviderKind,
    /// Optional extra locale appended to the brief's list.
    pub locale: Option<String>,
    /// Render the brief's locales in addition to English.
    pub localize: bool,
    /// Plan the run and skip all image writes.
    pub dry_run: bool,
    /// Brand policy file; `config/brand_policy.yaml` is probed when unset.
    pub brand_policy_path: Option<PathBuf>,
    /// Abort the run on any brand violation.
    pub strict_brand: bool,
    /// Legal policy file; `config/legal_policy.yaml` is probed when unset.
    pub legal_policy_path: Option<PathBuf>,
    /// Abort the run on any legal match.
    pub strict_legal: bool,
    /// Hero acquisition mode for products without reusable assets.
    pub generated_image_mode: GeneratedImageMode,
    /// Identifier for [`GeneratedImageMode::Id`].
    pub generated_image_id: Option<String>,
    /// Local storage root for generated images.
    pub storage_root: PathBuf,
    /// Directory searched first for message typefaces.
    pub fonts_dir: Option<PathBuf>,
}

impl RunConfig {
    /// Build a configuration with the default modes and storage root.
    pub fn new(
        brief_path: impl Into<PathBuf>,
        assets_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            brief_path: brief_path.into(),
            assets_root: assets_root.into(),
            output_root: output_root.into(),
            provider: ProviderKind::Mock,
            locale: None,
            localize: false,
            dry_run: false,
            brand_policy_path: None,
            strict_brand: false,
            legal_policy_path: None,
            strict_legal: false,
            generated_image_mode: GeneratedImageMode::New,
            generated_image_id: None,
            storage_root: PathBuf::from("./storage"),
            fonts_dir: None,
        }
    }
}

/// Counters and manifest entry produced by processing one product.
struct ProductOutcome {
    entry: ProductManifestEntry,
    assets_reused: u32,
    assets_generated: u32,
    variants_produced: u32,
    legal_checked: u32,
    legal_flagged: u32,
    legal_blocked: u32,
    compliance_passed: u32,
    compliance_failed: u32,
}

fn resolve_brand_policy(
    path: Option<&Path>,
) -> AdforgeResult<(Option<BrandPolicy>, Option<PathBuf>)> {
    let policy_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("config/brand_policy.yaml"));
    if policy_path.exists() {
        let policy = load_brand_policy(&policy_path)?;
        Ok((Some(policy), Some(policy_path)))
    } else {
        Ok((None, None))
    }
}

fn resolve_legal_policy(
    path: Option<&Path>,
) -> AdforgeResult<(Option<LegalPolicy>, Option<PathBuf>)> {
    let policy_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("config/legal_policy.yaml"));
    if policy_path.exists() {
        let policy = load_legal_policy(&policy_path)?;
        Ok((Some(policy), Some(policy_path)))
    } else {
        Ok((None, None))
    }
}

/// Obtain a base hero image for a product whose resolution found nothing:
/// reuse a prior generation per the configured mode, or generate fresh.
fn acquire_base_image(
    resolved: &ResolvedProductAssets,
    provider: &dyn ImageProvider,
    prompt: &str,
    negative_prompt: Option<&str>,
    store: &GeneratedImageStore,
    config: &RunConfig,
) -> AdforgeResult<(RgbaImage, HeroSource)> {
    let product_id = resolved.product.id.as_str();

    match config.generated_image_mode {
        GeneratedImageMode::Last => {
            if let Some((image_id, image)) = store.load_last_for_product(product_id)? {
                info!(product_id, %image_id, "reusing last generated image");
                return Ok((image, HeroSource::GeneratedLast));
            }
            info!(product_id, "no previous generated image found; generating new one");
        }
        GeneratedImageMode::Id => {
            let image_id = config.generated_image_id.as_deref().ok_or_else(|| {
                AdforgeError::configuration(
                    "generated_image_id is required when generated_image_mode is 'id'",
                )
            })?;
            let (image_id, image) = store.load_by_id(image_id)?.ok_or_else(|| {
                AdforgeError::validation(format!(
                    "Generated image id not found in storage: {image_id}"
                ))
            })?;
            info!(product_id, %image_id, "reusing generated image by id");
            return Ok((image, HeroSource::GeneratedId));
        }
        GeneratedImageMode::New => {}
    }

    info!(product_id, "generating hero image");
    let generated = provider.generate_base_hero(prompt, GENERATED_HERO_SIZE, negative_prompt)?;
    if !config.dry_run {
        let (image_id, image_path) = store.save_new(product_id, &generated)?;
        info!(product_id, %image_id, path = %image_path.display(), "stored generated image");
    }
    Ok((generated, HeroSource::GeneratedNew))
}

#[allow(clippy::too_many_arguments)]
fn process_product(
    resolved: &ResolvedProductAssets,
    brief: &CampaignBrief,
    provider: &dyn ImageProvider,
    localizer: &dyn MessageLocalizer,
    brand_policy: Option<&BrandPolicy>,
    legal_policy: Option<&LegalPolicy>,
    locales_to_render: &[String],
    config: &RunConfig,
    store: &GeneratedImageStore,
    mirror: Option<&Arc<dyn RemoteMirror>>,
    font: Option<&FontMeasurer>,
) -> AdforgeResult<ProductOutcome> {
    let product_id = resolved.product.id.as_str();
    let prompt = build_generation_prompt(brief, resolved);

    debug!(product_id, hero_source = resolved.hero_source.as_str(), "resolving");
    let (base_image, base_source) = if resolved.hero_source == HeroSource::Reused {
        (None, HeroSource::Reused)
    } else {
        let (image, source) = acquire_base_image(
            resolved,
            provider,
            &prompt,
            brief.negative_prompt.as_deref(),
            store,
            config,
        )?;
        (Some(image), source)
    };

    let mut entry = ProductManifestEntry::new(
        resolved.product.id.clone(),
        resolved.product.name.clone(),
        base_source,
    );

    let mut legal_checked = 0;
    let mut legal_flagged = 0;
    let mut legal_blocked = 0;
    let mut compliance_passed = 0;
    let mut compliance_failed = 0;

    if let Some(policy) = legal_policy {
        let prompt_legal = evaluate_legal_text(&prompt, "en", policy, config.strict_legal);
        legal_checked += 1;
        if prompt_legal.flagged {
            legal_flagged += 1;
        }
        let should_block = prompt_legal.should_block;
        let violations = prompt_legal.violations.clone();
        entry.legal.insert("prompt".to_string(), prompt_legal);
        if should_block {
            return Err(AdforgeError::compliance(
                format!(
                    "Legal compliance failed for product={product_id} prompt: {}",
                    violations.join("; ")
                ),
                violations,
            ));
        }
    }

    let assets_reused = u32::from(base_source.is_reuse());
    let mut variants_produced = 0;

    let (message_case, message_color) = brand_policy
        .map(|policy| (policy.typography.case, policy.typography.color.clone()))
        .unwrap_or((MessageCase::Normal, "#FFFFFF".to_string()));

    for ratio in AspectRatio::ALL {
        debug!(product_id, ratio = ratio.key(), "composing");
        let ratio_variant = if resolved.hero_source == HeroSource::Reused {
            compose_reused_variant(resolved, ratio)?
        } else {
            let base = base_image.as_ref().ok_or_else(|| {
                AdforgeError::validation("expected generated base image for non-reused asset")
            })?;
            create_variant(base, ratio)
        };

        for locale_code in locales_to_render {
            let localized_message = if locale_code == "en" {
                brief.message.clone()
            } else {
                localizer.translate(&brief.message, locale_code)
            };

            if let Some(policy) = legal_policy {
                let message_legal =
                    evaluate_legal_text(&localized_message, locale_code, policy, config.strict_legal);
                let legal_key = if locale_code == "en" {
                    "message_en".to_string()
                } else {
                    format!("message_{}", normalize_locale(locale_code))
                };
                legal_checked += 1;
                if message_legal.flagged {
                    legal_flagged += 1;
                }
                let should_block = message_legal.should_block;
                let violations = message_legal.violations.clone();
                entry.legal.insert(legal_key, message_legal);
                if should_block {
                    legal_blocked += 1;
                    return Err(AdforgeError::compliance(
                        format!(
                            "Legal compliance failed for product={product_id} \
                             locale={locale_code} message: {}",
                            violations.join("; ")
                        ),
                        violations,
                    ));
                }
            }

            let mut localized_variant = overlay_campaign_message(
                &ratio_variant,
                &localized_message,
                font,
                message_case,
                &message_color,
            );
            if let Some(logo_path) = &resolved.logo_path {
                localized_variant =
                    overlay_logo(&localized_variant, logo_path, DEFAULT_LOGO_RELATIVE_WIDTH)?;
            }

            let output_key = if locale_code == "en" {
                ratio.key().to_string()
            } else {
                format!("{}_{}", ratio.key(), normalize_locale(locale_code))
            };
            let locale_suffix = if locale_code == "en" {
                String::new()
            } else {
                format!("_{}", normalize_locale(locale_code))
            };
            let output_path = config
                .output_root
                .join(&brief.campaign_id)
                .join(&resolved.product.id)
                .join(ratio.key())
                .join(format!("final{locale_suffix}.png"));

            if let Some(policy) = brand_policy {
                let compliance = evaluate_brand_compliance(
                    &localized_variant,
                    policy,
                    resolved.logo_path.as_deref(),
                    &prompt,
                )?;
                let passed = compliance.passed;
                let violations = compliance.violations.clone();
                entry.compliance.insert(output_key.clone(), compliance);
                if passed {
                    compliance_passed += 1;
                } else {
                    compliance_failed += 1;
                    let violation_msg = format!(
                        "Brand compliance failed for product={product_id} ratio={} \
                         locale={locale_code}: {}",
                        ratio.key(),
                        violations.join("; ")
                    );
                    if config.strict_brand {
                        return Err(AdforgeError::compliance(violation_msg, violations));
                    }
                    warn!("{violation_msg}");
                }
            }

            if !config.dry_run {
                save_image(&localized_variant, &output_path)?;
                if let Some(mirror) = mirror {
                    mirror.upload_output_file(&output_path, &config.output_root);
                }
            }

            variants_produced += 1;
            entry
                .output_files
                .insert(output_key, output_path.display().to_string());
        }
    }

    debug!(product_id, "done");
    Ok(ProductOutcome {
        entry,
        assets_reused,
        assets_generated: 1 - assets_reused,
        variants_produced,
        legal_checked,
        legal_flagged,
        legal_blocked,
        compliance_passed,
        compliance_failed,
    })
}

/// Run the full pipeline with the built-in provider and localizer.
pub fn run_pipeline(config: &RunConfig) -> AdforgeResult<(CampaignManifest, RunMetrics)> {
    let provider = create_provider(config.provider);
    let localizer = build_localizer(config.localize, config.provider);
    run_pipeline_with(config, provider.as_ref(), localizer.as_ref(), None)
}

/// Run the full pipeline with caller-supplied collaborators.
///
/// This is the injection seam remote backends and tests use: any
/// [`ImageProvider`], [`MessageLocalizer`], and optional [`RemoteMirror`]
/// plug in here. Products are processed strictly in brief order; a
/// strict-mode compliance failure aborts the whole run.
pub fn run_pipeline_with(
    config: &RunConfig,
    provider: &dyn ImageProvider,
    localizer: &dyn MessageLocalizer,
    mirror: Option<Arc<dyn RemoteMirror>>,
) -> AdforgeResult<(CampaignManifest, RunMetrics)> {
    let timer = Timer::start();
    let brief = load_and_validate_brief(&config.brief_path)?;
    let store = GeneratedImageStore::new(&config.storage_root, mirror.clone())?;
    let resolved_assets = resolve_product_assets(&config.assets_root, &brief);
    let (brand_policy, brand_policy_path) =
        resolve_brand_policy(config.brand_policy_path.as_deref())?;
    let (legal_policy, legal_policy_path) =
        resolve_legal_policy(config.legal_policy_path.as_deref())?;
    let locales_to_render =
        resolve_output_locales(config.localize, &brief.locals, config.locale.as_deref());

    let preferred_typefaces: Vec<String> = brand_policy
        .as_ref()
        .map(|policy| {
            let mut names = vec![policy.typography.primary_typeface.clone()];
            names.extend(policy.typography.fallback_typefaces.iter().cloned());
            names
        })
        .unwrap_or_default();
    let font = resolve_message_font(&preferred_typefaces, config.fonts_dir.as_deref());

    let mut manifest = CampaignManifest {
        campaign_id: brief.campaign_id.clone(),
        target_region: brief.target_region.clone(),
        target_audience: brief.target_audience.clone(),
        message: brief.message.clone(),
        provider: provider.name().to_string(),
        dry_run: config.dry_run,
        started_at: utc_now_iso(),
        locales_processed: locales_to_render.clone(),
        brand_policy_path: brand_policy_path
            .as_ref()
            .map(|path| path.display().to_string()),
        strict_brand: config.strict_brand,
        legal_policy_path: legal_policy_path
            .as_ref()
            .map(|path| path.display().to_string()),
        strict_legal: config.strict_legal,
        finished_at: None,
        brand_compliance_summary: None,
        legal_compliance_summary: None,
        products: Vec::new(),
    };

    let mut metrics = RunMetrics::default();
    let mut compliance_passed = 0;
    let mut compliance_failed = 0;
    let mut legal_checked = 0;
    let mut legal_flagged = 0;
    let mut legal_blocked = 0;

    info!(campaign_id = %brief.campaign_id, "campaign started");
    if let Some(locale) = &config.locale {
        info!(%locale, "additional locale requested");
    }

    for resolved in &resolved_assets {
        let result = process_product(
            resolved,
            &brief,
            provider,
            localizer,
            brand_policy.as_ref(),
            legal_policy.as_ref(),
            &locales_to_render,
            config,
            &store,
            mirror.as_ref(),
            font.as_ref(),
        )?;
        manifest.products.push(result.entry);
        metrics.total_products_processed += 1;
        metrics.assets_reused += result.assets_reused;
        metrics.assets_generated += result.assets_generated;
        metrics.total_variants_produced += result.variants_produced;
        compliance_passed += result.compliance_passed;
        compliance_failed += result.compliance_failed;
        legal_checked += result.legal_checked;
        legal_flagged += result.legal_flagged;
        legal_blocked += result.legal_blocked;
    }

    metrics.execution_time_seconds = (timer.elapsed_seconds() * 1000.0).round() / 1000.0;
    manifest.finished_at = Some(utc_now_iso());
    if brand_policy.is_some() {
        manifest.brand_compliance_summary = Some(BrandComplianceSummary {
            variants_checked: compliance_passed + compliance_failed,
            variants_passed: compliance_passed,
            variants_failed: compliance_failed,
        });
    }
    if legal_policy.is_some() {
        manifest.legal_compliance_summary = Some(LegalComplianceSummary {
            checks_executed: legal_checked,
            checks_flagged: legal_flagged,
            checks_blocked: legal_blocked,
        });
    }

    let manifest_path = config
        .output_root
        .join(&brief.campaign_id)
        .join("manifest.json");
    let metrics_path = config
        .output_root
        .join(&brief.campaign_id)
        .join("metrics.json");
    write_json(&manifest, &manifest_path)?;
    write_json(&metrics, &metrics_path)?;
    if let Some(mirror) = &mirror {
        mirror.upload_output_file(&manifest_path, &config.output_root);
        mirror.upload_output_file(&metrics_path, &config.output_root);
    }

    info!(campaign_id = %brief.campaign_id, "campaign completed");
    Ok((manifest, metrics))
}

/// Per-product legal findings from a validation-only run.
#[derive(Clone, Debug, Serialize)]
pub struct ProductLegalReport {
    /// Product identifier from the brief.
    pub product_id: String,
    /// Result for the generation prompt.
    pub prompt: LegalCheckResult,
    /// Results for the localized message, keyed by locale.
    pub messages: BTreeMap<String, LegalCheckResult>,
}

/// Summary of a legal validation-only run.
#[derive(Clone, Debug, Serialize)]
pub struct LegalValidationSummary {
    /// Campaign identifier from the brief.
    pub campaign_id: String,
    /// Legal policy file in effect.
    pub legal_policy_path: String,
    /// Whether blocked checks abort the run.
    pub strict_legal: bool,
    /// Locales evaluated, English first.
    pub locales_checked: Vec<String>,
    /// Legal evaluations executed.
    pub checks_executed: u32,
    /// Evaluations with at least one matched rule.
    pub checks_flagged: u32,
    /// Evaluations whose match would block.
    pub checks_blocked: u32,
    /// Per-product findings in brief order.
    pub products: Vec<ProductLegalReport>,
}

/// Evaluate the legal policy over every product prompt and localized message
/// without rendering or writing any output.
///
/// Requires a legal policy; in strict mode any blocked check aborts with a
/// compliance violation after the whole summary is assembled.
pub fn run_legal_validation_only(config: &RunConfig) -> AdforgeResult<LegalValidationSummary> {
    let brief = load_and_validate_brief(&config.brief_path)?;
    let (legal_policy, legal_policy_path) =
        resolve_legal_policy(config.legal_policy_path.as_deref())?;
    let Some(legal_policy) = legal_policy else {
        return Err(AdforgeError::configuration(
            "No legal policy found. Provide a legal policy path or add \
             config/legal_policy.yaml before running legal-only validation.",
        ));
    };

    let localizer = build_localizer(config.localize, config.provider);
    let locales_to_render =
        resolve_output_locales(config.localize, &brief.locals, config.locale.as_deref());

    let mut checks_executed = 0;
    let mut checks_flagged = 0;
    let mut checks_blocked = 0;
    let mut products: Vec<ProductLegalReport> = Vec::new();

    for product in &brief.products {
        let resolved = ResolvedProductAssets {
            product: product.clone(),
            product_dir: PathBuf::from("."),
            hero_path: None,
            logo_path: None,
            background_path: None,
            hero_source: HeroSource::GeneratedNew,
        };
        let product_prompt = build_generation_prompt(&brief, &resolved);
        let prompt_result =
            evaluate_legal_text(&product_prompt, "en", &legal_policy, config.strict_legal);
        checks_executed += 1;
        if prompt_result.flagged {
            checks_flagged += 1;
        }
        if prompt_result.should_block {
            checks_blocked += 1;
        }

        let mut messages: BTreeMap<String, LegalCheckResult> = BTreeMap::new();
        for locale_code in &locales_to_render {
            let localized_message = if locale_code == "en" {
                brief.message.clone()
            } else {
                localizer.translate(&brief.message, locale_code)
            };
            let message_result = evaluate_legal_text(
                &localized_message,
                locale_code,
                &legal_policy,
                config.strict_legal,
            );
            checks_executed += 1;
            if message_result.flagged {
                checks_flagged += 1;
            }
            if message_result.should_block {
                checks_blocked += 1;
            }
            messages.insert(locale_code.clone(), message_result);
        }

        products.push(ProductLegalReport {
            product_id: product.id.clone(),
            prompt: prompt_result,
            messages,
        });
    }

    let summary = LegalValidationSummary {
        campaign_id: brief.campaign_id.clone(),
        legal_policy_path: legal_policy_path
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        strict_legal: config.strict_legal,
        locales_checked: locales_to_render,
        checks_executed,
        checks_flagged,
        checks_blocked,
        products,
    };

    if config.strict_legal && summary.checks_blocked > 0 {
        return Err(AdforgeError::compliance(
            format!(
                "Legal validation-only check failed in strict mode: {} checks blocked out of {}.",
                summary.checks_blocked, summary.checks_executed
            ),
            Vec::new(),
        ));
    }

    Ok(summary)
}
