use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    compliance::policy::{parse_policy_file, read_policy_file},
    foundation::error::AdforgeResult,
};

/// What a flagged-but-not-strict match does to the run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalAction {
    /// Record the match and continue (default).
    #[default]
    Warn,
    /// Block the run on any match.
    Block,
}

/// One set of blocked keywords and regex patterns.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LegalRuleSet {
    /// Case-insensitive substrings that must not appear.
    pub blocked_keywords: Vec<String>,
    /// Case-insensitive regex patterns that must not match.
    pub blocked_regex: Vec<String>,
}

/// Global blocked rules plus per-locale extensions, read-only after load.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct LegalPolicy {
    /// Policy document version.
    pub version: u32,
    /// Action taken on a match outside strict mode.
    pub default_action: LegalAction,
    /// Globally blocked rules.
    pub checks: LegalRuleSet,
    /// Additional blocked rules keyed by normalized locale or primary subtag.
    pub locale_overrides: BTreeMap<String, LegalRuleSet>,
}

impl Default for LegalPolicy {
    fn default() -> Self {
        Self {
            version: 1,
            default_action: LegalAction::Warn,
            checks: LegalRuleSet::default(),
            locale_overrides: BTreeMap::new(),
        }
    }
}

/// Load a legal policy from a YAML or JSON file.
pub fn load_legal_policy(policy_path: &Path) -> AdforgeResult<LegalPolicy> {
    let content = read_policy_file(policy_path, "legal")?;
    parse_policy_file(policy_path, &content, "legal")
}

#[cfg(test)]
#[path = "../../tests/unit/compliance/legal_policy.rs"]
mod tests;
