use std::path::Path;

use crate::{
    brief::model::CampaignBrief,
    foundation::error::{AdforgeError, AdforgeResult},
};

/// Smallest brief accepted by the loader, embedded into parse errors so a
/// failing invocation shows the expected shape.
const MIN_VALID_EXAMPLE_YAML: &str = r#"campaign_id: demo_campaign
message: "Primary campaign headline"
target_region: "US"
target_audience: "Young professionals"
products:
  - id: product_1
    name: "Product One"
  - id: product_2
    name: "Product Two"
"#;

fn brief_error(msg: impl std::fmt::Display) -> AdforgeError {
    AdforgeError::brief_validation(format!(
        "{msg}\n\nMinimal valid YAML example:\n{MIN_VALID_EXAMPLE_YAML}"
    ))
}

fn parse_brief_file(brief_path: &Path, content: &str) -> AdforgeResult<CampaignBrief> {
    let suffix = brief_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match suffix.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(content)
            .map_err(|err| brief_error(format_args!("Unable to parse brief file: {err}"))),
        "json" => serde_json::from_str(content)
            .map_err(|err| brief_error(format_args!("Unable to parse brief file: {err}"))),
        _ => Err(brief_error(
            "Unsupported brief format. Use .yaml, .yml, or .json files.",
        )),
    }
}

/// Load a campaign brief from disk and check its structural invariants.
pub fn load_and_validate_brief(brief_path: &Path) -> AdforgeResult<CampaignBrief> {
    if !brief_path.exists() {
        return Err(AdforgeError::brief_validation(format!(
            "Brief file not found: {}",
            brief_path.display()
        )));
    }

    let content = std::fs::read_to_string(brief_path).map_err(|err| {
        AdforgeError::brief_validation(format!(
            "Unable to read brief file {}: {err}",
            brief_path.display()
        ))
    })?;

    let brief = parse_brief_file(brief_path, &content)?;
    brief.validate()?;
    Ok(brief)
}

#[cfg(test)]
#[path = "../../tests/unit/brief/loader.rs"]
mod tests;
