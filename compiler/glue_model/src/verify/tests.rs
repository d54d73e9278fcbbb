#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use glue_diagnostic::ErrorCode;
use glue_ir::{
    Direction, LeafType, Parameter, SourceLocation, TargetLanguage, TypeNode, TypedSignal,
    ValueRange,
};
use pretty_assertions::assert_eq;

fn node(name: &str, leaf: &str, source: &str, line: u32) -> TypeNode {
    TypeNode::new(name, LeafType::parse(leaf), CatalogSourceId::new(source))
        .with_location(SourceLocation::new(source, line))
}

fn unit_using(source: &str, types: &[&str]) -> GenerationUnit {
    types.iter().enumerate().fold(
        GenerationUnit::subprogram("ctrl", "impl", TargetLanguage::C),
        |unit, (i, ty)| {
            unit.with_param(Parameter::new(
                format!("p{i}"),
                Direction::In,
                TypedSignal::new(source, *ty),
            ))
        },
    )
}

fn catalog(nodes: Vec<TypeNode>) -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    for node in nodes {
        catalog.insert(node).unwrap();
    }
    catalog
}

#[test]
fn well_formed_model_passes() {
    let catalog = catalog(vec![
        node("T-Int", "INTEGER", "a.asn", 1).with_range(ValueRange::new(0.0, 9.0)),
        node("T-Real", "REAL", "a.asn", 2).with_range(ValueRange::new(-1.0, 1.0)),
        node("T-Seq", "SEQUENCE", "a.asn", 3),
    ]);
    let model = LoadedModel {
        units: vec![unit_using("a.asn", &["T-Seq", "T-Int"])],
        catalog,
    };
    assert!(verify(&model).is_ok());
}

#[test]
fn unknown_parameter_type_is_fatal() {
    let catalog = catalog(vec![node("T-Int", "INTEGER", "a.asn", 1)]);
    let err = check_parameter_types(&[unit_using("a.asn", &["T-Missing"])], &catalog).unwrap_err();
    assert_eq!(
        err.to_string(),
        "parameter 'p0' of unit 'ctrl.impl' references unknown type 'T-Missing'"
    );
}

#[test]
fn skipped_type_may_be_absent_from_catalog() {
    let mut catalog = catalog(vec![]);
    catalog.skip("T-Legacy");
    assert!(check_parameter_types(&[unit_using("a.asn", &["T-Legacy"])], &catalog).is_ok());
}

#[test]
fn character_string_parameter_reports_its_location() {
    for leaf in ["IA5String", "AsciiString"] {
        let catalog = catalog(vec![node("T-Name", leaf, "a.asn", 7)]);
        let err = check_parameter_types(&[unit_using("a.asn", &["T-Name"])], &catalog).unwrap_err();
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E2001);
        assert_eq!(diag.primary_location(), Some(&SourceLocation::new("a.asn", 7)));
    }
}

#[test]
fn character_string_inside_catalog_is_allowed() {
    let catalog = catalog(vec![
        node("T-Name", "IA5String", "a.asn", 1),
        node("T-Seq", "SEQUENCE", "a.asn", 2),
    ]);
    assert!(check_parameter_types(&[unit_using("a.asn", &["T-Seq"])], &catalog).is_ok());
}

#[test]
fn missing_range_anywhere_in_used_source_is_fatal() {
    let catalog = catalog(vec![
        node("T-Seq", "SEQUENCE", "a.asn", 1),
        node("T-Count", "INTEGER", "a.asn", 4),
    ]);
    let err = verify_ranges(&[unit_using("a.asn", &["T-Seq"])], &catalog).unwrap_err();
    assert_eq!(err.to_string(), "INTEGER type 'T-Count' must have a range constraint");
    assert_eq!(
        err.to_diagnostic().primary_location(),
        Some(&SourceLocation::new("a.asn", 4))
    );
}

#[test]
fn unused_sources_are_not_range_checked() {
    let catalog = catalog(vec![
        node("T-Seq", "SEQUENCE", "a.asn", 1),
        node("T-Count", "INTEGER", "b.asn", 4),
    ]);
    assert!(verify_ranges(&[unit_using("a.asn", &["T-Seq"])], &catalog).is_ok());
}

#[test]
fn unbounded_real_limits_are_fatal() {
    let cases = [
        (ValueRange::new(f64::NEG_INFINITY, 1.0), RangeLimit::Low),
        (ValueRange::new(0.0, f64::INFINITY), RangeLimit::High),
    ];
    for (range, expected) in cases {
        let catalog = catalog(vec![node("T-Real", "REAL", "a.asn", 2).with_range(range)]);
        let err = verify_ranges(&[unit_using("a.asn", &["T-Real"])], &catalog).unwrap_err();
        assert!(matches!(err, LoadError::UnboundedReal { limit, .. } if limit == expected));
        assert_eq!(err.code(), ErrorCode::E2003);
    }
}
