use super::*;

#[test]
fn preferred_candidates_come_first_and_defaults_are_appended() {
    let candidates = ordered_font_candidates(&["custom.ttf".to_string()]);
    assert_eq!(candidates, vec!["custom.ttf", "arial.ttf", "segoeui.ttf"]);
}

#[test]
fn duplicate_candidates_collapse_case_insensitively() {
    let candidates = ordered_font_candidates(&["Arial.TTF".to_string(), String::new()]);
    assert_eq!(candidates, vec!["Arial.TTF", "segoeui.ttf"]);
}

#[test]
fn named_font_is_found_in_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("truetype").join("brand");
    std::fs::create_dir_all(&nested).unwrap();
    let font_path = nested.join("Custom.ttf");
    std::fs::write(&font_path, b"not a real font").unwrap();

    let found = find_named_font(dir.path(), "custom.ttf", MAX_SCAN_DEPTH).unwrap();
    assert_eq!(found, font_path);
    assert!(find_named_font(dir.path(), "other.ttf", MAX_SCAN_DEPTH).is_none());
}

#[test]
fn fallback_scan_picks_the_first_font_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("readme.txt"), b"x").unwrap();
    std::fs::write(dir.path().join("b.otf"), b"x").unwrap();
    std::fs::write(dir.path().join("a.ttf"), b"x").unwrap();

    let found = first_font_in_dir(dir.path(), MAX_SCAN_DEPTH).unwrap();
    assert_eq!(found, dir.path().join("a.ttf"));
}

#[test]
fn unparsable_font_bytes_do_not_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ttf");
    std::fs::write(&path, b"definitely not a font").unwrap();
    assert!(load_font_file(&path).is_none());
}
