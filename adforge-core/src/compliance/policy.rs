use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{AdforgeError, AdforgeResult};

/// Corner used for logo placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum SafeCorner {
    /// Top-right corner (default).
    #[default]
    #[serde(rename = "top-right")]
    TopRight,
    /// Top-left corner.
    #[serde(rename = "top-left")]
    TopLeft,
}

/// Case transform applied to the overlaid campaign message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum MessageCase {
    /// Message rendered as written.
    #[default]
    #[serde(rename = "normal")]
    Normal,
    /// Message uppercased.
    #[serde(rename = "all-upper")]
    AllUpper,
    /// Message lowercased.
    #[serde(rename = "all-lower")]
    AllLower,
}

impl MessageCase {
    /// Apply the transform to a message.
    pub fn apply(self, message: &str) -> String {
        match self {
            MessageCase::Normal => message.to_string(),
            MessageCase::AllUpper => message.to_uppercase(),
            MessageCase::AllLower => message.to_lowercase(),
        }
    }
}

/// Logo requirements: presence, accepted filenames, placement.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct LogoPolicy {
    /// Whether a logo must be present on every creative.
    pub required: bool,
    /// Accepted logo filenames (case-insensitive match).
    pub expected_filenames: Vec<String>,
    /// Placement corner.
    pub safe_corner: SafeCorner,
    /// Maximum logo width as a fraction of the creative width.
    pub max_relative_width: f32,
}

impl Default for LogoPolicy {
    fn default() -> Self {
        Self {
            required: false,
            expected_filenames: vec!["logo.png".to_string()],
            safe_corner: SafeCorner::TopRight,
            max_relative_width: 0.22,
        }
    }
}

/// Required palette colors with a match tolerance and coverage floor.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorPolicy {
    /// Hex colors that must appear in the final creative.
    pub required_palette: Vec<String>,
    /// Per-channel tolerance; a pixel matches when the summed channel
    /// distance is within `tolerance * 3`.
    pub tolerance: u8,
    /// Minimum fraction of sampled pixels that must match each color.
    pub min_coverage: f32,
}

impl Default for ColorPolicy {
    fn default() -> Self {
        Self {
            required_palette: Vec::new(),
            tolerance: 35,
            min_coverage: 0.01,
        }
    }
}

/// Imagery keywords required in, or banned from, generation prompts.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ImageryPolicy {
    /// Keywords expected to appear in the prompt (advisory).
    pub required_keywords: Vec<String>,
    /// Keywords whose presence in the prompt is a violation.
    pub avoid_keywords: Vec<String>,
}

/// Typography preferences for the message overlay.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct TypographyPolicy {
    /// Preferred typeface filename.
    pub primary_typeface: String,
    /// Fallback typeface filenames, tried in order.
    pub fallback_typefaces: Vec<String>,
    /// Case transform applied to the message.
    pub case: MessageCase,
    /// Message color as `#RRGGBB`.
    pub color: String,
}

impl Default for TypographyPolicy {
    fn default() -> Self {
        Self {
            primary_typeface: "arial.ttf".to_string(),
            fallback_typefaces: vec!["segoeui.ttf".to_string()],
            case: MessageCase::Normal,
            color: "#FFFFFF".to_string(),
        }
    }
}

/// Declarative brand ruleset, loaded once per run and read-only thereafter.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct BrandPolicy {
    /// Policy document version.
    pub policy_version: String,
    /// Brand the policy belongs to.
    pub brand_name: String,
    /// Logo requirements.
    pub logo: LogoPolicy,
    /// Palette requirements.
    pub colors: ColorPolicy,
    /// Imagery keyword requirements.
    pub imagery: ImageryPolicy,
    /// Typography preferences.
    pub typography: TypographyPolicy,
}

impl Default for BrandPolicy {
    fn default() -> Self {
        Self {
            policy_version: "1.0".to_string(),
            brand_name: "default-brand".to_string(),
            logo: LogoPolicy::default(),
            colors: ColorPolicy::default(),
            imagery: ImageryPolicy::default(),
            typography: TypographyPolicy::default(),
        }
    }
}

impl BrandPolicy {
    /// Check numeric ranges the serde shapes cannot express.
    pub fn validate(&self) -> AdforgeResult<()> {
        if !(0.05..=0.6).contains(&self.logo.max_relative_width) {
            return Err(AdforgeError::validation(format!(
                "logo.max_relative_width must be within 0.05..=0.6, got {}",
                self.logo.max_relative_width
            )));
        }
        if !(0.0..=1.0).contains(&self.colors.min_coverage) {
            return Err(AdforgeError::validation(format!(
                "colors.min_coverage must be within 0.0..=1.0, got {}",
                self.colors.min_coverage
            )));
        }
        Ok(())
    }
}

pub(crate) fn read_policy_file(path: &Path, kind: &str) -> AdforgeResult<String> {
    if !path.exists() {
        return Err(AdforgeError::configuration(format!(
            "{kind} policy file not found: {}",
            path.display()
        )));
    }
    std::fs::read_to_string(path).map_err(|err| {
        AdforgeError::configuration(format!(
            "unable to read {kind} policy file {}: {err}",
            path.display()
        ))
    })
}

pub(crate) fn parse_policy_file<T: serde::de::DeserializeOwned>(
    path: &Path,
    content: &str,
    kind: &str,
) -> AdforgeResult<T> {
    let suffix = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match suffix.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(content).map_err(|err| {
            AdforgeError::validation(format!("{kind} policy parse failed: {err}"))
        }),
        "json" => serde_json::from_str(content).map_err(|err| {
            AdforgeError::validation(format!("{kind} policy parse failed: {err}"))
        }),
        _ => Err(AdforgeError::validation(format!(
            "Unsupported {kind} policy format: {}",
            path.display()
        ))),
    }
}

/// Load and validate a brand policy from a YAML or JSON file.
pub fn load_brand_policy(policy_path: &Path) -> AdforgeResult<BrandPolicy> {
    let content = read_policy_file(policy_path, "brand")?;
    let policy: BrandPolicy = parse_policy_file(policy_path, &content, "brand")?;
    policy.validate()?;
    Ok(policy)
}

#[cfg(test)]
#[path = "../../tests/unit/compliance/policy.rs"]
mod tests;
