//! Loading catalogs and config from disk.

use spa_catalog::config::load_config_from;
use spa_catalog::prefill::{BookableService, BookingPrefill, PrefillOutcome};
use spa_catalog::sources::{CatalogSource, FileSource};
use spa_catalog::{CatalogError, CatalogIndex, match_query};
use std::fs;
use tempfile::TempDir;

const CATALOG_TOML: &str = r#"
[[sections]]
title = "Body Massage"

[[sections.groups]]
title = "Massages"
columns = ["Service", "M", "NM"]
rows = [
    { name = "Swedish Massage", M = "PHP 400", NM = "PHP 450" },
    { name = "Combination Massage", M = "PHP 450", NM = "PHP 500" },
    { name = "Deep Tissue Massage", M = "PHP 650", NM = "PHP 700" },
]

[[sections]]
title = "Facial Care"

[[sections.groups]]
title = "Facial Treatment"
columns = ["Service", "M", "NM"]
rows = [
    { name = "Classic Facial", M = "PHP 300", NM = "PHP 350" },
]
"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_toml_catalog_scenarios() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "catalog.toml", CATALOG_TOML);
    let index = CatalogIndex::build(&FileSource::new(path).load().unwrap());

    let name = |q: &str| match_query(q, index.entries()).matched().map(|e| e.name.clone());
    assert_eq!(name("swedish massage").as_deref(), Some("Swedish Massage"));
    assert_eq!(name("facial").as_deref(), Some("Classic Facial"));
    assert_eq!(name("deep tissue").as_deref(), Some("Deep Tissue Massage"));
    assert_eq!(name("pedicure"), None);
}

#[test]
fn test_json_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "catalog.JSON",
        r#"{"sections":[{"title":"Lashes","groups":[{"title":"Eyelash Extension","columns":["Service","M"],
            "rows":[{"name":"Classic","M":"PHP 1200"},{"name":"Hybrid","M":"PHP 1500"}]}]}]}"#,
    );
    let catalog = FileSource::new(path).load().unwrap();
    assert_eq!(catalog.row_count(), 2);
}

#[test]
fn test_missing_catalog_file() {
    let dir = TempDir::new().unwrap();
    let err = FileSource::new(dir.path().join("nope.toml")).load().unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn test_config_file() {
    let dir = TempDir::new().unwrap();
    let missing = load_config_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(missing.matching.min_overlap_score, 0.5);

    let path = write(&dir, "config.toml", "[matching]\nmin_overlap_score = 0.9\n[suggest]\nlimit = 2\n");
    let config = load_config_from(&path).unwrap();
    assert_eq!(config.suggest.limit, 2);

    let index = CatalogIndex::build(&FileSource::new(write(&dir, "c.toml", CATALOG_TOML)).load().unwrap());
    // 2/3 overlap passes the default threshold but not 0.9
    assert!(match_query("tissue deep", index.entries()).is_match());
    assert!(!config.matching.matcher().match_query("tissue deep", index.entries()).is_match());
}

#[test]
fn test_prefill_against_backend_services() {
    let dir = TempDir::new().unwrap();
    let index = CatalogIndex::build(&FileSource::new(write(&dir, "catalog.toml", CATALOG_TOML)).load().unwrap());

    let services: Vec<BookableService> = serde_json::from_str(
        r#"[
            {"id": 3, "name": "Classic Facial", "duration_minutes": 60, "price": "300.00"},
            {"id": 9, "name": "Yoga Class", "duration_minutes": 60, "price": "250.00"},
            {"id": 1, "name": "Swedish Massage", "duration_minutes": 60, "price": "400.00"}
        ]"#,
    )
    .unwrap();

    let mut prefill = BookingPrefill::new(index, Default::default());
    prefill.set_services(services);

    let order: Vec<u64> = prefill.services().map(|s| s.id).collect();
    assert_eq!(order, vec![1, 3, 9]);

    assert_eq!(
        prefill.apply_request(Some("Swedish%20Massage".replace("%20", " ").as_str())),
        PrefillOutcome::Selected {
            id: 1,
            name: "Swedish Massage".into()
        }
    );
}
