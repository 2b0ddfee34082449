use super::*;

fn brief(products: Vec<ProductBrief>) -> CampaignBrief {
    CampaignBrief {
        campaign_id: "c1".to_string(),
        message: "m".to_string(),
        target_region: "US".to_string(),
        target_audience: "a".to_string(),
        locals: vec![],
        products,
        visual_style: None,
        prompts: None,
        palette: None,
        negative_prompt: None,
    }
}

fn product(id: &str) -> ProductBrief {
    ProductBrief {
        id: id.to_string(),
        name: format!("Product {id}"),
        prompt: None,
        image: None,
        logo: None,
    }
}

#[test]
fn existing_conventional_hero_resolves_as_reused() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("p1")).unwrap();
    std::fs::write(dir.path().join("p1").join("product.png"), b"x").unwrap();

    let resolved = resolve_product_assets(dir.path(), &brief(vec![product("p1"), product("p2")]));
    assert_eq!(resolved[0].hero_source, HeroSource::Reused);
    assert_eq!(
        resolved[0].hero_path.as_deref(),
        Some(dir.path().join("p1").join("product.png").as_path())
    );
    assert_eq!(resolved[1].hero_source, HeroSource::GeneratedNew);
    assert!(resolved[1].hero_path.is_none());
}

#[test]
fn id_suffixed_names_are_the_second_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let product_dir = dir.path().join("p1");
    std::fs::create_dir_all(&product_dir).unwrap();
    std::fs::write(product_dir.join("product_p1.png"), b"x").unwrap();
    std::fs::write(product_dir.join("logo_p1.png"), b"x").unwrap();
    std::fs::write(product_dir.join("background_p1.png"), b"x").unwrap();

    let resolved = resolve_product_assets(dir.path(), &brief(vec![product("p1"), product("p2")]));
    assert_eq!(
        resolved[0].hero_path.as_deref(),
        Some(product_dir.join("product_p1.png").as_path())
    );
    assert_eq!(
        resolved[0].logo_path.as_deref(),
        Some(product_dir.join("logo_p1.png").as_path())
    );
    assert_eq!(
        resolved[0].background_path.as_deref(),
        Some(product_dir.join("background_p1.png").as_path())
    );
}

#[test]
fn explicit_brief_filenames_win_even_when_absent() {
    let dir = tempfile::tempdir().unwrap();
    let product_dir = dir.path().join("p1");
    std::fs::create_dir_all(&product_dir).unwrap();
    std::fs::write(product_dir.join("product.png"), b"x").unwrap();

    let mut custom = product("p1");
    custom.image = Some("hero_shot.png".to_string());
    let resolved = resolve_product_assets(dir.path(), &brief(vec![custom, product("p2")]));

    // The explicit name missed, so the hero stays unresolved: no silent
    // fallback onto the conventional names.
    assert!(resolved[0].hero_path.is_none());
    assert_eq!(resolved[0].hero_source, HeroSource::GeneratedNew);
}

#[test]
fn resolution_is_idempotent_over_an_unchanged_tree() {
    let dir = tempfile::tempdir().unwrap();
    let product_dir = dir.path().join("p1");
    std::fs::create_dir_all(&product_dir).unwrap();
    std::fs::write(product_dir.join("product.png"), b"x").unwrap();
    std::fs::write(product_dir.join("logo.png"), b"x").unwrap();

    let brief = brief(vec![product("p1"), product("p2")]);
    let first = resolve_product_assets(dir.path(), &brief);
    let second = resolve_product_assets(dir.path(), &brief);

    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.hero_path, b.hero_path);
        assert_eq!(a.logo_path, b.logo_path);
        assert_eq!(a.background_path, b.background_path);
        assert_eq!(a.hero_source, b.hero_source);
    }
}
