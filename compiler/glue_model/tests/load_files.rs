//! Loading model documents from disk.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;

use glue_diagnostic::ErrorCode;
use glue_model::{verify, LoadError, ModelLoader};
use pretty_assertions::assert_eq;

const DATAVIEW: &str = r#"{
  "schema_version": 1,
  "catalog": { "sources": [ { "id": "dataview.asn", "types": [
    { "name": "T-Int", "leaf": "INTEGER", "line": 2, "range": { "low": 0, "high": 10 } },
    { "name": "T-Str", "leaf": "IA5String", "line": 3 }
  ] } ] }
}"#;

const SYSTEM: &str = r#"{
  "schema_version": 1,
  "units": [
    { "kind": "subprogram", "container_id": "ctrl", "implementation": "impl", "target": "Ada",
      "params": [ { "id": "x", "direction": "in", "source": "dataview.asn", "type": "T-Int" } ] }
  ]
}"#;

#[test]
fn catalog_and_units_from_separate_files() {
    let dir = tempfile::tempdir().unwrap();
    let dataview = dir.path().join("dataview.json");
    let system = dir.path().join("system.json");
    fs::write(&dataview, DATAVIEW).unwrap();
    fs::write(&system, SYSTEM).unwrap();

    let mut loader = ModelLoader::new();
    loader.load_file(&dataview).unwrap();
    loader.load_file(&system).unwrap();
    let model = loader.finish();

    assert_eq!(model.units.len(), 1);
    assert_eq!(model.catalog.len(), 2);
    verify(&model).unwrap();
}

#[test]
fn string_parameter_fails_verification_with_location() {
    let dir = tempfile::tempdir().unwrap();
    let dataview = dir.path().join("dataview.json");
    fs::write(&dataview, DATAVIEW).unwrap();

    let mut loader = ModelLoader::new();
    loader.load_file(&dataview).unwrap();
    loader
        .load_str(&SYSTEM.replace("T-Int", "T-Str"), "system.json")
        .unwrap();
    let err = verify(&loader.finish()).unwrap_err();

    assert!(matches!(err, LoadError::DisallowedType { .. }));
    let rendered = err.to_diagnostic().to_string();
    assert!(rendered.starts_with("error[E2001]: cannot use IA5String type 'T-Str'"));
    assert!(rendered.contains("--> dataview.asn:3"));
}

#[test]
fn unreadable_file_maps_to_model_error_code() {
    let dir = tempfile::tempdir().unwrap();
    let mut loader = ModelLoader::new();
    let err = loader.load_file(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.to_diagnostic().code, ErrorCode::E1001);
    assert!(err.code().is_model_error());
}
