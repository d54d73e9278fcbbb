//! Model loading and verification errors.

use std::fmt;
use std::path::PathBuf;

use glue_diagnostic::{Diagnostic, ErrorCode};
use glue_ir::{DuplicateTypeError, LeafCategory, SourceLocation, UnsupportedTargetError};

/// Which side of a range constraint is at fault.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RangeLimit {
    Low,
    High,
}

impl fmt::Display for RangeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeLimit::Low => f.write_str("lower"),
            RangeLimit::High => f.write_str("upper"),
        }
    }
}

/// A model document could not be turned into dispatchable units.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid model document '{origin}': {source}")]
    Json {
        origin: String,
        source: serde_json::Error,
    },

    #[error("model document '{origin}' has unsupported schema version {}", describe_version(*.found))]
    SchemaVersion { origin: String, found: Option<u64> },

    #[error("unit '{unit}' in '{origin}': {source}")]
    UnsupportedTarget {
        origin: String,
        unit: String,
        source: UnsupportedTargetError,
    },

    #[error(transparent)]
    DuplicateType(#[from] DuplicateTypeError),

    #[error("parameter '{parameter}' of unit '{unit}' references unknown type '{type_name}'")]
    UnknownType {
        unit: String,
        parameter: String,
        type_name: String,
    },

    #[error("cannot use {leaf} type '{type_name}' as the type of parameter '{parameter}' of unit '{unit}'")]
    DisallowedType {
        unit: String,
        parameter: String,
        type_name: String,
        leaf: String,
        location: SourceLocation,
    },

    #[error("{category} type '{type_name}' must have a range constraint")]
    MissingRange {
        type_name: String,
        category: LeafCategory,
        location: SourceLocation,
    },

    #[error("REAL type '{type_name}' has an unbounded {limit} limit")]
    UnboundedReal {
        type_name: String,
        limit: RangeLimit,
        location: SourceLocation,
    },
}

fn describe_version(found: Option<u64>) -> String {
    found.map_or_else(|| "<missing>".to_string(), |v| v.to_string())
}

impl LoadError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LoadError::Io { .. } => ErrorCode::E1001,
            LoadError::Json { .. } => ErrorCode::E1002,
            LoadError::SchemaVersion { .. } => ErrorCode::E1003,
            LoadError::UnsupportedTarget { .. } => ErrorCode::E0001,
            LoadError::DuplicateType(_) => ErrorCode::E1004,
            LoadError::UnknownType { .. } => ErrorCode::E1005,
            LoadError::DisallowedType { .. } => ErrorCode::E2001,
            LoadError::MissingRange { .. } => ErrorCode::E2002,
            LoadError::UnboundedReal { .. } => ErrorCode::E2003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            LoadError::SchemaVersion { .. } => {
                diag.with_note(format!("this build reads schema version {}", crate::SCHEMA_VERSION))
            }
            LoadError::UnsupportedTarget { .. } => {
                let supported: Vec<_> = glue_ir::TargetLanguage::ALL
                    .iter()
                    .map(|t| t.as_str())
                    .collect();
                diag.with_suggestion(format!("supported targets: {}", supported.join(", ")))
            }
            LoadError::DuplicateType(err) => diag
                .with_label(err.second.clone(), "declared again here")
                .with_secondary_label(err.first.clone(), "first declared here"),
            LoadError::DisallowedType { location, .. } => diag
                .with_label(location.clone(), "character string type declared here")
                .with_note("character strings have no fixed-size native representation")
                .with_suggestion("use an OCTET STRING instead"),
            LoadError::MissingRange { location, .. } => diag
                .with_label(location.clone(), "declared here")
                .with_note("unconstrained values cannot be mapped to a native type safely"),
            LoadError::UnboundedReal { location, .. } => diag
                .with_label(location.clone(), "declared here")
                .with_suggestion("give the REAL type finite limits"),
            LoadError::Io { .. } | LoadError::Json { .. } | LoadError::UnknownType { .. } => diag,
        }
    }
}
