//! Integration tests for catalog and schedule payload files

use semester_planner::core::models::{SemesterLabel, Term};
use semester_planner::core::planner::{load_catalog, load_schedule, write_json};
use semester_planner::{Engine, EngineConfig, EngineError, LoadError, MoveRequest};
use std::fs;
use tempfile::TempDir;

#[test]
fn sample_catalog_loads_every_course() {
    let catalog = load_catalog("samples/catalog.toml", &EngineConfig::default())
        .expect("Failed to load sample catalog");

    assert_eq!(catalog.len(), 13);
    assert_eq!(
        catalog.lookup("MATH 1320").unwrap().prerequisite,
        vec![Term::AnyOf(vec![
            "MATH 1030".to_string(),
            "MATH 1100".to_string()
        ])]
    );
    assert!(catalog
        .lookup("ENGLISH 3130")
        .unwrap()
        .prerequisite
        .contains(&Term::CreditThreshold(48)));
    assert!(matches!(
        catalog.lookup("PHIL 1000"),
        Err(EngineError::NotFound(_))
    ));
}

#[test]
fn json_catalog_file_loads() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("catalog.json");
    fs::write(
        &path,
        r#"{"courses": [
            {"id": "CMP SCI 1250", "credits": 3, "semesters_offered": ["Fall", "Spring"]},
            {"id": "CMP SCI  2250", "credits": 3, "semesters_offered": "Fall",
             "prerequisites": ["CMP SCI 1250 (C- or better)"]}
        ]}"#,
    )
    .expect("Failed to write catalog");

    let catalog = load_catalog(&path, &EngineConfig::default()).expect("Failed to load catalog");
    let ds = catalog.lookup("CMP SCI 2250").unwrap();
    assert_eq!(ds.prerequisite, vec![Term::Single("CMP SCI 1250".to_string())]);
    assert!(ds.is_offered(SemesterLabel::Fall));
}

#[test]
fn duplicate_catalog_keys_are_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("catalog.toml");
    fs::write(
        &path,
        r#"
[[courses]]
id = "MATH 1030"
credits = 3
semesters_offered = ["Fall"]

[[courses]]
id = "MATH  1030"
credits = 3
semesters_offered = ["Spring"]
"#,
    )
    .expect("Failed to write catalog");

    let result = load_catalog(&path, &EngineConfig::default());
    assert!(matches!(
        result,
        Err(LoadError::Engine(EngineError::MalformedCatalog { .. }))
    ));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("catalog.csv");
    fs::write(&path, "id,credits\n").expect("Failed to write catalog");

    assert!(matches!(
        load_catalog(&path, &EngineConfig::default()),
        Err(LoadError::UnsupportedFormat(_))
    ));
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    assert!(matches!(
        load_schedule(dir.path().join("nope.json")),
        Err(LoadError::Io(_))
    ));
}

#[test]
fn schedule_totals_are_recomputed_on_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("plan.json");
    fs::write(
        &path,
        r#"{"semesters": [
            {"semester": "Fall", "credits": 40, "schedule": [
                {"course": "MATH 1030", "name": "College Algebra", "credits": 3},
                {"course": "GEN ED 1", "name": "[User Selects]", "credits": 3}
            ]}
        ]}"#,
    )
    .expect("Failed to write schedule");

    let schedule = load_schedule(&path).expect("Failed to load schedule");
    assert_eq!(schedule.semesters[0].credits_total, 6);
    assert!(schedule.completed_elsewhere.is_empty());
}

#[test]
fn annotated_schedule_survives_write_and_reload() {
    let config = EngineConfig::default();
    let catalog = load_catalog("samples/catalog.toml", &config).unwrap();
    let engine = Engine::new(catalog, config);
    let schedule = load_schedule("samples/schedule.json").unwrap();

    let report = engine
        .move_course(
            schedule,
            &MoveRequest {
                course_id: "CMP SCI 2250".to_string(),
                credits: 3,
                origin: 1,
                target: 2,
            },
        )
        .unwrap();

    let dir = TempDir::new().expect("Failed to create temp dir");
    let out = dir.path().join("out").join("plan.json");
    write_json(&out, &report.schedule).expect("Failed to write schedule");
    write_json(dir.path().join("diagnostics.json"), &report.diagnostics)
        .expect("Failed to write diagnostics");

    let reloaded = load_schedule(&out).expect("Failed to reload schedule");
    assert_eq!(reloaded, report.schedule);
    let years: Vec<Option<u16>> = reloaded.semesters.iter().map(|s| s.year).collect();
    assert_eq!(years, vec![Some(2025), Some(2026), Some(2026), Some(2027)]);
    let flagged = reloaded.entry(2, "CMP SCI 2261").unwrap();
    assert_eq!(flagged.passed_validation, Some(false));
    assert!(flagged
        .validation_msg
        .as_deref()
        .unwrap()
        .contains("(CMP SCI 2250)"));

    let diagnostics: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("diagnostics.json")).unwrap(),
    )
    .unwrap();
    assert!(diagnostics.is_array());
    assert_eq!(diagnostics[0]["course_id"], "CMP SCI 2250");
    assert_eq!(diagnostics[0]["role"], "moved");
}
