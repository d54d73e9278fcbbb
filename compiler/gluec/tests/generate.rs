//! End-to-end runs with the listing backends.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use glue_diagnostic::ErrorCode;
use glue_dispatch::testing::RecordingFactory;
use glue_dispatch::{CustomCategory, RunConfig, ShutdownContext};
use gluec::cli::CliOptions;
use gluec::generate;
use pretty_assertions::assert_eq;

const MODEL: &str = r#"{
  "schema_version": 1,
  "units": [
    { "kind": "thread", "container_id": "tc", "implementation": "impl", "target": "gui_ri",
      "params": [ { "id": "cmd", "direction": "in", "source": "dataview.asn", "type": "T-Cmd" } ] },
    { "kind": "subprogram", "container_id": "ctrl", "implementation": "sim", "target": "Simulink",
      "params": [
        { "id": "x", "direction": "in", "source": "dataview.asn", "type": "T-Cmd" },
        { "id": "y", "direction": "out", "source": "dataview.asn", "type": "T-Int" }
      ] },
    { "kind": "subprogram", "container_id": "codec", "implementation": "impl", "target": "Ada",
      "params": [ { "id": "v", "direction": "in", "source": "dataview.asn", "type": "T-Int" } ] },
    { "kind": "subprogram", "container_id": "orphan", "implementation": "impl", "params": [] }
  ],
  "catalog": { "sources": [ { "id": "dataview.asn", "types": [
    { "name": "T-Cmd", "leaf": "SEQUENCE", "line": 2 },
    { "name": "T-Int", "leaf": "INTEGER", "line": 5, "range": { "low": 0, "high": 255 } },
    { "name": "T-Cmd-elm", "leaf": "ENUMERATED", "line": 7, "artificial": true }
  ] } ] }
}"#;

struct Workspace {
    dir: tempfile::TempDir,
    model: PathBuf,
}

impl Workspace {
    fn new(model: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, model).unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();
        Workspace { dir, model: path }
    }

    fn out(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    fn options(&self) -> CliOptions {
        CliOptions {
            output_dir: self.out(),
            inputs: vec![self.model.clone()],
            ..CliOptions::default()
        }
    }

    fn listing(&self, backend: &str) -> String {
        fs::read_to_string(self.out().join(format!("{backend}.glue.txt"))).unwrap()
    }

    fn listings(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.out())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[test]
fn full_run_writes_one_listing_per_backend_used() {
    let ws = Workspace::new(MODEL);
    let report = gluec::run(&ws.options()).unwrap();

    assert_eq!(
        ws.listings(),
        vec![
            "ada.glue.txt",
            "c.glue.txt",
            "pyside.glue.txt",
            "python.glue.txt",
            "simulink.glue.txt",
        ]
    );
    assert_eq!(report.units_processed, 3);
    assert_eq!(report.router_units, 1);
    assert_eq!(report.categories_finalized, vec![CustomCategory::Gui]);
    assert!(report.requires_ada_codecs);
}

#[test]
fn per_unit_listing_follows_parameter_order() {
    let ws = Workspace::new(MODEL);
    gluec::run(&ws.options()).unwrap();

    assert_eq!(
        ws.listing("simulink"),
        "unit ctrl.sim target Simulink source dataview.asn\n\
         \x20 sequence T-Cmd x in\n\
         \x20 basic T-Int y out\n\
         end ctrl.sim source dataview.asn\n"
    );
}

#[test]
fn run_wide_listing_covers_the_catalog_and_closes_with_trailing_context() {
    let ws = Workspace::new(MODEL);
    gluec::run(&ws.options()).unwrap();

    // Threads are scheduled after subprograms, so the GUI unit is the last
    // one visited and its C rerouting ends up in the shutdown context.
    assert_eq!(
        ws.listing("ada"),
        "run target Ada source dataview.asn\n\
         \x20 sequence T-Cmd\n\
         \x20 basic T-Int\n\
         end target C source dataview.asn\n"
    );
}

#[test]
fn captured_shutdown_context_repeats_startup() {
    let ws = Workspace::new(MODEL);
    let options = CliOptions {
        shutdown_context: ShutdownContext::Captured,
        ..ws.options()
    };
    gluec::run(&options).unwrap();

    assert!(ws
        .listing("ada")
        .ends_with("end target Ada source dataview.asn\n"));
}

#[test]
fn gui_unit_fans_out_to_both_gui_backends() {
    let ws = Workspace::new(MODEL);
    gluec::run(&ws.options()).unwrap();

    let expected = "unit tc.impl target gui_ri source dataview.asn\n\
                    \x20 sequence T-Cmd cmd in\n\
                    end tc.impl source dataview.asn\n\
                    final\n";
    assert_eq!(ws.listing("python"), expected);
    assert_eq!(ws.listing("pyside"), expected);
}

#[test]
fn only_subprograms_drops_threads() {
    let ws = Workspace::new(MODEL);
    let options = CliOptions {
        only_subprograms: true,
        ..ws.options()
    };
    let report = gluec::run(&options).unwrap();

    assert_eq!(report.units_processed, 2);
    assert_eq!(report.router_units, 0);
    assert_eq!(
        ws.listings(),
        vec!["ada.glue.txt", "simulink.glue.txt"]
    );
}

#[test]
fn configuration_errors_are_reported_before_loading() {
    let ws = Workspace::new("not json");

    let options = CliOptions {
        output_dir: ws.dir.path().join("missing"),
        ..ws.options()
    };
    assert_eq!(gluec::run(&options).unwrap_err().code, ErrorCode::E0002);

    let options = CliOptions {
        inputs: vec![ws.dir.path().join("absent.json")],
        ..ws.options()
    };
    assert_eq!(gluec::run(&options).unwrap_err().code, ErrorCode::E0003);

    assert_eq!(gluec::run(&ws.options()).unwrap_err().code, ErrorCode::E1002);
    assert!(ws.listings().is_empty());
}

fn generate_recorded(models: &[PathBuf]) -> (usize, Option<ErrorCode>) {
    let mut factory = RecordingFactory::new();
    let log = factory.log();
    let result = generate(models, &RunConfig::default(), &mut factory);
    let calls = log.borrow().len();
    (calls, result.err().map(|diag| diag.code))
}

fn write_model(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn model_errors_abort_with_zero_backend_calls() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        (MODEL.replace("\"T-Int\" }", "\"T-Missing\" }"), ErrorCode::E1005),
        (MODEL.replace("\"leaf\": \"SEQUENCE\"", "\"leaf\": \"IA5String\""), ErrorCode::E2001),
        (MODEL.replace(", \"range\": { \"low\": 0, \"high\": 255 }", ""), ErrorCode::E2002),
        (MODEL.replace("\"Ada\"", "\"Fortran\""), ErrorCode::E0001),
        (MODEL.replace("\"schema_version\": 1", "\"schema_version\": 2"), ErrorCode::E1003),
    ];
    for (i, (text, code)) in cases.into_iter().enumerate() {
        let model = write_model(dir.path(), &format!("case{i}.json"), &text);
        assert_eq!(generate_recorded(&[model]), (0, Some(code)), "case {i}");
    }
}

#[test]
fn models_are_merged_in_argument_order() {
    let dir = tempfile::tempdir().unwrap();
    let dataview = write_model(
        dir.path(),
        "dataview.json",
        r#"{ "schema_version": 1, "catalog": { "sources": [ { "id": "dataview.asn", "types": [
            { "name": "T-Int", "leaf": "INTEGER", "line": 1, "range": { "low": 0, "high": 1 } }
        ] } ] } }"#,
    );
    let system = write_model(
        dir.path(),
        "system.json",
        r#"{ "schema_version": 1, "units": [
            { "kind": "subprogram", "container_id": "a", "implementation": "impl",
              "target": "SCADE6",
              "params": [ { "id": "x", "direction": "in", "source": "dataview.asn", "type": "T-Int" } ] }
        ] }"#,
    );

    let (calls, error) = generate_recorded(&[dataview.clone(), system.clone()]);
    assert_eq!((calls, error), (3, None));

    let (calls, error) = generate_recorded(&[system, dataview.clone(), dataview]);
    assert_eq!((calls, error), (0, Some(ErrorCode::E1004)));
}
