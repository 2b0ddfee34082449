use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::{
    compliance::legal_policy::{LegalAction, LegalPolicy, LegalRuleSet},
    localization::translator::normalize_locale,
};

/// Outcome of one legal evaluation call; immutable after construction.
#[derive(Clone, Debug, Serialize)]
pub struct LegalCheckResult {
    /// False only when the match should block the run.
    pub passed: bool,
    /// The policy's default action at evaluation time.
    pub action: LegalAction,
    /// True when any rule matched.
    pub flagged: bool,
    /// True when flagged and either strict mode or a blocking default action applies.
    pub should_block: bool,
    /// Matched rule identifiers (`keyword:...`, `regex:...`, `regex_error:...`).
    pub hits: Vec<String>,
    /// Non-fatal findings.
    pub warnings: Vec<String>,
    /// Fatal or advisory rule failures, depending on strictness.
    pub violations: Vec<String>,
}

static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("literal regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("literal regex"));

/// Resolve the effective rule set for a locale.
///
/// Starts from the global rules, then extends with the override matching the
/// full normalized locale key, or failing that the primary subtag before the
/// first underscore (`es_mx` falls back to `es`).
fn rules_for_locale(policy: &LegalPolicy, locale: &str) -> LegalRuleSet {
    let normalized = normalize_locale(locale);
    let mut rules = policy.checks.clone();

    let override_rules = policy.locale_overrides.get(&normalized).or_else(|| {
        normalized
            .split_once('_')
            .and_then(|(primary, _)| policy.locale_overrides.get(primary))
    });

    if let Some(extra) = override_rules {
        rules
            .blocked_keywords
            .extend(extra.blocked_keywords.iter().cloned());
        rules
            .blocked_regex
            .extend(extra.blocked_regex.iter().cloned());
    }
    rules
}

/// Prepare text for matching: split camel-case joins, collapse whitespace.
///
/// Inserting a space at lower-to-upper transitions catches terms concatenated
/// without a space ("FreeMoney"); plain substring matching alone would miss
/// them, and word-boundary regexes alone would miss the keyword lists.
fn normalize_for_matching(text: &str) -> String {
    let separated = CAMEL_BOUNDARY.replace_all(text, "$1 $2");
    WHITESPACE_RUN.replace_all(&separated, " ").trim().to_string()
}

/// Evaluate `text` against the legal policy for `locale`.
///
/// A flagged result still passes unless strict mode is on or the policy's
/// default action is `block`. A malformed blocked pattern is recorded as a
/// `regex_error:` hit rather than raised.
pub fn evaluate_legal_text(
    text: &str,
    locale: &str,
    policy: &LegalPolicy,
    strict_legal: bool,
) -> LegalCheckResult {
    let rules = rules_for_locale(policy, locale);
    let normalized_text = normalize_for_matching(text);
    let lowered = normalized_text.to_lowercase();
    let mut hits: Vec<String> = Vec::new();

    for keyword in &rules.blocked_keywords {
        if lowered.contains(&keyword.to_lowercase()) {
            hits.push(format!("keyword:{keyword}"));
        }
    }

    for pattern in &rules.blocked_regex {
        match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(re) => {
                if re.is_match(&normalized_text) {
                    hits.push(format!("regex:{pattern}"));
                }
            }
            Err(_) => hits.push(format!("regex_error:{pattern}")),
        }
    }

    let flagged = !hits.is_empty();
    let action = policy.default_action;
    let should_block = flagged && (strict_legal || action == LegalAction::Block);

    let violations = if flagged {
        vec![format!(
            "Legal content matched blocked rules: {}",
            hits.join("; ")
        )]
    } else {
        Vec::new()
    };

    LegalCheckResult {
        passed: !should_block,
        action,
        flagged,
        should_block,
        hits,
        warnings: Vec::new(),
        violations,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compliance/legal.rs"]
mod tests;
