// Integration tests for HeroDex
use herodex::stats::{compare, role_distribution, top_by_pick_rate};
use herodex::{
    recommend, Error, Hero, HeroCatalog, HeroContext, HeroStore, Lane, MemorySource, RawRow,
    SchemaError, SimilarityIndex, SourceFormat, StoreConfig,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

fn sample_config() -> StoreConfig {
    StoreConfig {
        path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/heroes.csv"),
        ..StoreConfig::default()
    }
}

fn raw(name: &str, role: &str, win_rate: f64) -> RawRow {
    json!({
        "hero_name": name,
        "role": role,
        "win_rate": win_rate,
        "pick_rate": 1.0,
        "offense_overall": 60,
        "defense_overall": 40,
        "skill_effect_overall": 50,
        "difficulty_overall": 30,
    })
    .as_object()
    .cloned()
    .unwrap()
}

#[test]
fn test_lane_results_match_role_map() {
    let store = HeroStore::open(&sample_config()).unwrap();
    let ctx = store.context().unwrap();

    for lane in Lane::ALL {
        let heroes = ctx.recommend(lane.as_str()).unwrap();
        assert!(!heroes.is_empty(), "no heroes for {lane}");
        for hero in &heroes {
            let role = hero.known_role().unwrap();
            assert!(lane.roles().contains(&role), "{} is not a {lane} hero", hero.name);
        }
        assert!(heroes.windows(2).all(|w| w[0].win_rate >= w[1].win_rate));
    }
}

#[test]
fn test_invalid_lane() {
    let store = HeroStore::open(&sample_config()).unwrap();
    let ctx = store.context().unwrap();
    assert!(matches!(ctx.recommend("invalid"), Err(Error::InvalidLane(_))));
    assert!(ctx.recommend(" Gold ").is_ok());
}

#[test]
fn test_gold_lane_scenario() {
    let catalog = HeroCatalog::load(vec![
        raw("A", "marksman", 60.0),
        raw("B", "marksman", 55.0),
        raw("C", "marksman", 70.0),
    ])
    .unwrap();

    let names: Vec<&str> = recommend(&catalog, "gold")
        .unwrap()
        .iter()
        .map(|h| h.name.as_str())
        .collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn test_nearest_properties_on_sample_data() {
    let store = HeroStore::open(&sample_config()).unwrap();
    let ctx = store.context().unwrap();
    let catalog = ctx.catalog();

    for hero in catalog.all() {
        let result = ctx.nearest(&hero.name).unwrap();
        assert_eq!(result.len(), 5.min(catalog.len() - 1));
        assert!(result.iter().all(|n| n.hero.name != hero.name));
        assert!(result.windows(2).all(|w| w[0].distance <= w[1].distance));
    }
}

#[test]
fn test_nearest_matches_brute_force() {
    let store = HeroStore::open(&sample_config()).unwrap();
    let ctx = store.context().unwrap();
    let catalog = ctx.catalog();

    let query = catalog.lookup("martis").unwrap();
    let mut expected: Vec<(f64, usize)> = catalog
        .all()
        .iter()
        .enumerate()
        .filter(|(_, h)| h.name != "martis")
        .map(|(i, h)| (query.features().l2_distance(&h.features()), i))
        .collect();
    expected.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let positions: Vec<usize> = ctx.nearest("Martis").unwrap().iter().map(|n| n.position).collect();
    let expected: Vec<usize> = expected.iter().take(5).map(|(_, i)| *i).collect();
    assert_eq!(positions, expected);
}

#[test]
fn test_distance_symmetry() {
    let store = HeroStore::open(&sample_config()).unwrap();
    let ctx = store.context().unwrap();
    let index = ctx.index();

    let names: Vec<&str> = ctx.catalog().iter().map(|h| h.name.as_str()).collect();
    for a in &names {
        for b in &names {
            assert_eq!(
                index.distance_between(a, b).unwrap(),
                index.distance_between(b, a).unwrap()
            );
        }
    }
}

#[test]
fn test_nearest_not_found() {
    let store = HeroStore::open(&sample_config()).unwrap();
    let ctx = store.context().unwrap();
    assert!(matches!(
        ctx.nearest("nonexistent_hero"),
        Err(Error::HeroNotFound(_))
    ));
    assert!(matches!(
        ctx.lookup("nonexistent_hero"),
        Err(Error::HeroNotFound(_))
    ));
}

#[test]
fn test_lookup_round_trip() {
    let row = json!({
        "hero_name": "martis",
        "role": "fighter",
        "win_rate": 50.0,
        "pick_rate": 10.0,
        "offense_overall": 80,
        "defense_overall": 60,
        "skill_effect_overall": 50,
        "difficulty_overall": 40,
    })
    .as_object()
    .cloned()
    .unwrap();

    let ctx = HeroContext::new(HeroCatalog::load(vec![row]).unwrap());
    let hero = ctx.lookup(" Martis ").unwrap();
    assert_eq!(
        hero,
        &Hero {
            name: "martis".to_string(),
            role: "fighter".to_string(),
            win_rate: 50.0,
            pick_rate: 10.0,
            offense_overall: 80.0,
            defense_overall: 60.0,
            skill_effect_overall: 50.0,
            difficulty_overall: 40.0,
        }
    );
}

#[test]
fn test_json_source_matches_csv() {
    let csv_store = HeroStore::open(&sample_config()).unwrap();
    let csv_ctx = csv_store.context().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heroes.data");
    let heroes: Vec<&Hero> = csv_ctx.catalog().iter().collect();
    std::fs::write(&path, serde_json::to_string(&heroes).unwrap()).unwrap();

    let json_store = HeroStore::open(&StoreConfig {
        path,
        format: Some(SourceFormat::Json),
        ..StoreConfig::default()
    })
    .unwrap();
    let json_ctx = json_store.context().unwrap();

    assert_eq!(json_ctx.catalog().all(), csv_ctx.catalog().all());
    let a: Vec<usize> = json_ctx.nearest("tigreal").unwrap().iter().map(|n| n.position).collect();
    let b: Vec<usize> = csv_ctx.nearest("tigreal").unwrap().iter().map(|n| n.position).collect();
    assert_eq!(a, b);
}

#[test]
fn test_shared_context_across_threads() {
    let store = Arc::new(HeroStore::new(MemorySource::new(vec![
        raw("layla", "marksman", 52.0),
        raw("miya", "marksman", 51.0),
        raw("tigreal", "tank", 50.0),
    ])));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || {
                let ctx = store.context().unwrap();
                ctx.nearest("layla").unwrap().len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
    assert!(store.context().unwrap().is_index_built());
}

#[test]
fn test_index_tracks_catalog_identity() {
    let catalog = Arc::new(HeroCatalog::load(vec![raw("a", "mage", 50.0)]).unwrap());
    let index = SimilarityIndex::build(catalog.clone());
    assert!(index.is_built_from(&catalog));

    let rebuilt = Arc::new((*catalog).clone());
    assert!(!index.is_built_from(&rebuilt));
}

#[test]
fn test_stats_on_sample_data() {
    let store = HeroStore::open(&sample_config()).unwrap();
    let ctx = store.context().unwrap();

    let top = top_by_pick_rate(ctx.catalog(), 10);
    assert_eq!(top.len(), 10);
    assert_eq!(top[0].name, "chou");
    assert!(top.windows(2).all(|w| w[0].pick_rate >= w[1].pick_rate));

    let cmp = compare(ctx.catalog(), "martis, irithel, tigreal");
    assert_eq!(cmp.heroes.len(), 3);
    assert!(cmp.missing.is_empty());

    let roles = role_distribution(ctx.catalog());
    let total: usize = roles.iter().map(|r| r.count).sum();
    assert_eq!(total, ctx.catalog().len());
}

#[test]
fn test_header_only_csv_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heroes.csv");
    std::fs::write(&path, "hero_name,role\n").unwrap();

    let result = HeroStore::open(&StoreConfig {
        path,
        ..StoreConfig::default()
    });
    assert!(matches!(
        result,
        Err(Error::Schema(SchemaError::MissingColumn { .. }))
    ));
}

#[test]
fn test_typed_heroes_must_be_finite() {
    let mut hero = HeroCatalog::load(vec![raw("layla", "marksman", 52.0)])
        .unwrap()
        .all()[0]
        .clone();
    hero.win_rate = f64::NAN;

    assert!(matches!(
        HeroCatalog::from_heroes(vec![hero]),
        Err(Error::Schema(SchemaError::NonFinite { .. }))
    ));
}
