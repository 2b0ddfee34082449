use super::*;

fn manifest() -> CampaignManifest {
    CampaignManifest {
        campaign_id: "c1".to_string(),
        target_region: "US".to_string(),
        target_audience: "a".to_string(),
        message: "m".to_string(),
        provider: "mock".to_string(),
        dry_run: true,
        started_at: "2026-01-01T00:00:00Z".to_string(),
        locales_processed: vec!["en".to_string()],
        brand_policy_path: None,
        strict_brand: false,
        legal_policy_path: None,
        strict_legal: false,
        finished_at: None,
        brand_compliance_summary: None,
        legal_compliance_summary: None,
        products: vec![],
    }
}

#[test]
fn manifest_serializes_with_stable_keys() {
    let mut manifest = manifest();
    manifest
        .products
        .push(ProductManifestEntry::new("p1", "One", HeroSource::GeneratedNew));

    let value = serde_json::to_value(&manifest).unwrap();
    assert_eq!(value["campaign_id"], "c1");
    assert_eq!(value["products"][0]["hero_source"], "generated_new");
    assert_eq!(value["products"][0]["skipped"], false);
}

#[test]
fn absent_summaries_are_omitted() {
    let value = serde_json::to_value(&manifest()).unwrap();
    assert!(value.get("brand_compliance_summary").is_none());
    assert!(value.get("legal_compliance_summary").is_none());
}

#[test]
fn hero_source_tags_match_the_wire_names() {
    assert_eq!(HeroSource::Reused.as_str(), "reused");
    assert_eq!(HeroSource::GeneratedLast.as_str(), "generated_last");
    assert!(HeroSource::GeneratedLast.is_reuse());
    assert!(!HeroSource::GeneratedNew.is_reuse());
}

#[test]
fn timestamps_are_rfc3339() {
    let stamp = utc_now_iso();
    assert!(stamp.contains('T'), "{stamp}");
    assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok(), "{stamp}");
}
