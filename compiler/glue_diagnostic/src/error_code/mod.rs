//! Error codes for all fatal run conditions.
//!
//! The first digit indicates the stage that detected the condition.

use std::fmt;

/// Error codes for all glue generator diagnostics.
///
/// Format: E#### where the first digit indicates the stage:
/// - E0xxx: Configuration / invocation errors
/// - E1xxx: Model document and catalog loading errors
/// - E2xxx: Disallowed type usage
/// - E3xxx: Catalog contract violations found during dispatch
/// - E4xxx: Backend failures
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Configuration Errors (E0xxx)
    /// Unsupported target language
    E0001,
    /// Output directory missing or not a directory
    E0002,
    /// Input model file missing
    E0003,
    /// Malformed command line
    E0004,

    // Model Errors (E1xxx)
    /// Model document could not be read
    E1001,
    /// Model document is not valid JSON for the schema
    E1002,
    /// Unsupported schema version
    E1003,
    /// Duplicate type name in catalog
    E1004,
    /// Parameter references a type missing from the catalog
    E1005,

    // Type Usage Errors (E2xxx)
    /// Character string type used as a parameter
    E2001,
    /// Scalar type without a range constraint
    E2002,
    /// REAL range limit outside representable bounds
    E2003,

    // Catalog Contract Errors (E3xxx)
    /// Leaf category outside the closed set
    E3001,

    // Backend Errors (E4xxx)
    /// Backend hook failed
    E4001,
    /// GUI telecommand without parameters
    E4002,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    pub const ALL: [ErrorCode; 15] = [
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E3001,
        ErrorCode::E4001,
        ErrorCode::E4002,
    ];

    /// Get the string representation (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
        }
    }

    /// Check if this is a configuration error (E0xxx).
    ///
    /// Configuration errors are always raised before any unit is processed.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E0001 | ErrorCode::E0002 | ErrorCode::E0003 | ErrorCode::E0004
        )
    }

    /// Check if this is a model loading error (E1xxx).
    pub fn is_model_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E1001
                | ErrorCode::E1002
                | ErrorCode::E1003
                | ErrorCode::E1004
                | ErrorCode::E1005
        )
    }

    /// Check if this is a type usage error (E2xxx).
    pub fn is_type_usage_error(&self) -> bool {
        matches!(self, ErrorCode::E2001 | ErrorCode::E2002 | ErrorCode::E2003)
    }

    /// Check if this was raised while backends were being driven (E3xxx, E4xxx).
    pub fn is_dispatch_error(&self) -> bool {
        matches!(self, ErrorCode::E3001 | ErrorCode::E4001 | ErrorCode::E4002)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
