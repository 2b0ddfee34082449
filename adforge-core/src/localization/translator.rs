use std::collections::BTreeSet;

use crate::providers::ProviderKind;

/// Canonicalize a locale tag: trimmed, hyphens to underscores, lowercased.
///
/// Applied at every comparison site (legal override lookup, manifest keying,
/// output naming) so there is exactly one normalization rule.
pub fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('-', "_").to_lowercase()
}

/// True for `en` and any `en_*` variant.
pub fn is_english_locale(locale: &str) -> bool {
    let normalized = normalize_locale(locale);
    normalized == "en" || normalized.starts_with("en_")
}

/// Resolve the ordered list of output locales for a run.
///
/// English is always first. When localization is enabled, the brief's locales
/// and an optional CLI-supplied locale are appended, deduplicated on their
/// canonical form (all English variants collapse onto `en`).
pub fn resolve_output_locales(
    enable_localization: bool,
    brief_locales: &[String],
    cli_locale: Option<&str>,
) -> Vec<String> {
    let mut locales: Vec<String> = vec!["en".to_string()];
    if enable_localization {
        locales.extend(brief_locales.iter().cloned());
        if let Some(locale) = cli_locale {
            locales.push(locale.to_string());
        }
    }

    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut deduped: Vec<String> = Vec::new();
    for locale in locales {
        let normalized = normalize_locale(&locale);
        let canonical = if is_english_locale(&normalized) {
            "en".to_string()
        } else {
            normalized
        };
        if seen.insert(canonical.clone()) {
            deduped.push(canonical);
        }
    }
    deduped
}

/// Contract for translating the campaign message into a target locale.
///
/// Translation is best-effort: implementations return the original message
/// when they cannot do better, and English targets are a no-op passthrough.
pub trait MessageLocalizer {
    /// Translate `message` into `target_locale`.
    fn translate(&self, message: &str, target_locale: &str) -> String;
}

/// Identity localizer used when localization is disabled or unavailable.
pub struct NoopLocalizer;

impl MessageLocalizer for NoopLocalizer {
    fn translate(&self, message: &str, _target_locale: &str) -> String {
        message.to_string()
    }
}

/// Deterministic localizer for tests and mock runs: prefixes the locale tag.
pub struct MockLocalizer;

impl MessageLocalizer for MockLocalizer {
    fn translate(&self, message: &str, target_locale: &str) -> String {
        format!("[{target_locale}] {message}")
    }
}

/// Select a localizer for the run configuration.
///
/// Remote translation backends integrate by implementing [`MessageLocalizer`]
/// and entering through [`crate::pipeline::run_pipeline_with`]; the built-in
/// fallback is always the identity localizer.
pub fn build_localizer(
    enable_localization: bool,
    provider: ProviderKind,
) -> Box<dyn MessageLocalizer> {
    if !enable_localization {
        return Box::new(NoopLocalizer);
    }
    match provider {
        ProviderKind::Mock => Box::new(MockLocalizer),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/localization/translator.rs"]
mod tests;
