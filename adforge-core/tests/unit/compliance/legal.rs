use std::collections::BTreeMap;

use super::*;

fn policy_with(
    keywords: &[&str],
    patterns: &[&str],
    action: LegalAction,
    overrides: &[(&str, &[&str])],
) -> LegalPolicy {
    let mut locale_overrides = BTreeMap::new();
    for (locale, extra) in overrides {
        locale_overrides.insert(
            locale.to_string(),
            LegalRuleSet {
                blocked_keywords: extra.iter().map(|s| s.to_string()).collect(),
                blocked_regex: vec![],
            },
        );
    }
    LegalPolicy {
        version: 1,
        default_action: action,
        checks: LegalRuleSet {
            blocked_keywords: keywords.iter().map(|s| s.to_string()).collect(),
            blocked_regex: patterns.iter().map(|s| s.to_string()).collect(),
        },
        locale_overrides,
    }
}

#[test]
fn blocked_keyword_flags_but_warn_still_passes() {
    let policy = policy_with(&["free money"], &[], LegalAction::Warn, &[]);
    let result = evaluate_legal_text("Get FREE money now", "en", &policy, false);
    assert!(result.flagged);
    assert!(!result.should_block);
    assert!(result.passed);
    assert_eq!(result.hits, vec!["keyword:free money".to_string()]);
    assert_eq!(result.violations.len(), 1);
}

#[test]
fn strict_mode_or_block_action_blocks() {
    let policy = policy_with(&["free money"], &[], LegalAction::Warn, &[]);
    let strict = evaluate_legal_text("free money", "en", &policy, true);
    assert!(strict.should_block);
    assert!(!strict.passed);

    let blocking = policy_with(&["free money"], &[], LegalAction::Block, &[]);
    let blocked = evaluate_legal_text("free money", "en", &blocking, false);
    assert!(blocked.should_block);
    assert!(!blocked.passed);
}

#[test]
fn clean_text_passes_untouched() {
    let policy = policy_with(&["free money"], &["\\bwin\\b"], LegalAction::Block, &[]);
    let result = evaluate_legal_text("A sensible headline", "en", &policy, true);
    assert!(!result.flagged);
    assert!(result.passed);
    assert!(result.hits.is_empty());
    assert!(result.violations.is_empty());
}

#[test]
fn camel_case_concatenation_is_caught() {
    let policy = policy_with(&["free money"], &[], LegalAction::Warn, &[]);
    let result = evaluate_legal_text("Act now: FreeMoney inside", "en", &policy, false);
    assert!(result.flagged, "camel-case join should still match");
}

#[test]
fn regex_rules_match_case_insensitively() {
    let policy = policy_with(&[], &[r"\bguaranteed\b"], LegalAction::Warn, &[]);
    let result = evaluate_legal_text("Results GUARANTEED today", "en", &policy, false);
    assert_eq!(result.hits, vec![format!("regex:{}", r"\bguaranteed\b")]);
}

#[test]
fn malformed_pattern_is_recorded_not_raised() {
    let policy = policy_with(&[], &["(unclosed"], LegalAction::Warn, &[]);
    let result = evaluate_legal_text("anything", "en", &policy, false);
    assert_eq!(result.hits, vec!["regex_error:(unclosed".to_string()]);
    assert!(result.flagged);
}

#[test]
fn locale_inherits_primary_subtag_override() {
    let policy = policy_with(&[], &[], LegalAction::Warn, &[("es", &["gratis"])]);
    let result = evaluate_legal_text("Todo gratis hoy", "es-MX", &policy, false);
    assert!(result.flagged, "es_MX should inherit the es override");

    let english = evaluate_legal_text("Todo gratis hoy", "en", &policy, false);
    assert!(!english.flagged, "override must not leak into other locales");
}

#[test]
fn exact_locale_override_wins_over_primary() {
    let policy = policy_with(
        &[],
        &[],
        LegalAction::Warn,
        &[("es", &["gratis"]), ("es_mx", &["promo"])],
    );
    let exact = evaluate_legal_text("gran promo", "es-MX", &policy, false);
    assert!(exact.flagged);

    let not_merged = evaluate_legal_text("todo gratis", "es-MX", &policy, false);
    assert!(!not_merged.flagged, "exact override replaces the fallback");
}
