use super::*;

#[test]
fn display_includes_category_prefix() {
    assert_eq!(
        AdforgeError::configuration("missing policy").to_string(),
        "configuration error: missing policy"
    );
    assert_eq!(
        AdforgeError::validation("bad input").to_string(),
        "validation error: bad input"
    );
    assert_eq!(
        AdforgeError::compliance("legal gate failed", vec![]).to_string(),
        "compliance violation: legal gate failed"
    );
}

#[test]
fn compliance_error_carries_violations() {
    let err = AdforgeError::compliance("blocked", vec!["rule a".into(), "rule b".into()]);
    match err {
        AdforgeError::Compliance { violations, .. } => {
            assert_eq!(violations, vec!["rule a".to_string(), "rule b".to_string()]);
        }
        other => panic!("expected compliance error, got {other:?}"),
    }
}

#[test]
fn anyhow_errors_wrap_transparently() {
    let err: AdforgeError = anyhow::anyhow!("io failed").into();
    assert_eq!(err.to_string(), "io failed");
}
