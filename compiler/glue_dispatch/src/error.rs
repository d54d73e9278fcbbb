//! Fatal dispatch conditions.

use glue_diagnostic::{Diagnostic, ErrorCode};
use glue_ir::{SourceLocation, UnsupportedTargetError};

use crate::{BackendError, BackendId};

/// A condition that aborts the whole run. There is no per-unit recovery.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    UnsupportedTarget(#[from] UnsupportedTargetError),

    #[error("type '{type_name}' has unexpected leaf kind '{leaf}'")]
    UnclassifiedLeaf {
        type_name: String,
        leaf: String,
        location: SourceLocation,
    },

    #[error("parameter '{parameter}' of unit '{unit}' references unknown type '{type_name}'")]
    UnknownType {
        unit: String,
        parameter: String,
        type_name: String,
    },

    #[error("backend {backend} failed in {hook}: {source}")]
    Backend {
        backend: BackendId,
        hook: &'static str,
        source: BackendError,
    },

    #[error("GUI telecommand '{unit}' must have at least one parameter")]
    GuiWithoutParameters { unit: String },
}

impl DispatchError {
    pub(crate) fn backend(backend: BackendId, hook: &'static str, source: BackendError) -> Self {
        DispatchError::Backend {
            backend,
            hook,
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DispatchError::UnsupportedTarget(_) => ErrorCode::E0001,
            DispatchError::UnclassifiedLeaf { .. } => ErrorCode::E3001,
            DispatchError::UnknownType { .. } => ErrorCode::E1005,
            DispatchError::Backend { .. } => ErrorCode::E4001,
            DispatchError::GuiWithoutParameters { .. } => ErrorCode::E4002,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            DispatchError::UnclassifiedLeaf { location, .. } => diag
                .with_label(location.clone(), "declared here")
                .with_note("the type catalog produced a leaf kind outside the supported set"),
            DispatchError::GuiWithoutParameters { .. } => diag.with_suggestion(
                "add a parameter, or name the container with 'gui_polling' if it only polls",
            ),
            DispatchError::UnsupportedTarget(_)
            | DispatchError::UnknownType { .. }
            | DispatchError::Backend { .. } => diag,
        }
    }
}
