use super::*;

#[test]
fn defaults_are_warn_and_empty() {
    let policy: LegalPolicy = serde_yaml::from_str("{}").unwrap();
    assert_eq!(policy.version, 1);
    assert_eq!(policy.default_action, LegalAction::Warn);
    assert!(policy.checks.blocked_keywords.is_empty());
    assert!(policy.locale_overrides.is_empty());
}

#[test]
fn load_reads_yaml_with_locale_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legal_policy.yaml");
    std::fs::write(
        &path,
        r#"
version: 1
default_action: block
checks:
  blocked_keywords: ["free money"]
  blocked_regex: ["\\bguaranteed\\b"]
locale_overrides:
  es:
    blocked_keywords: ["gratis"]
"#,
    )
    .unwrap();

    let policy = load_legal_policy(&path).unwrap();
    assert_eq!(policy.default_action, LegalAction::Block);
    assert_eq!(policy.checks.blocked_keywords, vec!["free money".to_string()]);
    assert_eq!(
        policy.locale_overrides["es"].blocked_keywords,
        vec!["gratis".to_string()]
    );
}

#[test]
fn load_reads_json_too() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legal_policy.json");
    std::fs::write(&path, r#"{"default_action": "warn", "checks": {"blocked_keywords": ["x"]}}"#)
        .unwrap();

    let policy = load_legal_policy(&path).unwrap();
    assert_eq!(policy.checks.blocked_keywords, vec!["x".to_string()]);
}
