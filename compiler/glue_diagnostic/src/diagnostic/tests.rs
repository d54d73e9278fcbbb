use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("cannot use IA5String as a parameter")
        .with_label(SourceLocation::new("dataview.asn", 12), "declared here")
        .with_note("character strings have no fixed native layout")
        .with_suggestion("use OCTET STRING instead");

    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
    assert_eq!(
        diag.primary_location(),
        Some(&SourceLocation::new("dataview.asn", 12))
    );
}

#[test]
fn test_secondary_label_is_not_primary() {
    let diag = Diagnostic::error(ErrorCode::E1004)
        .with_message("duplicate type")
        .with_secondary_label(SourceLocation::new("a.asn", 1), "first declared here");
    assert_eq!(diag.primary_location(), None);
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E0001)
        .with_message("modeling language 'Lustre' not supported")
        .with_suggestion("supported targets: C, Ada");

    let output = diag.to_string();
    assert!(output.starts_with("error[E0001]: modeling language 'Lustre'"));
    assert!(output.contains("= help: supported targets: C, Ada"));
}
