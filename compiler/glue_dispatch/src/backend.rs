//! Backend capability interfaces and the contexts passed to them.
//!
//! Synchronous backends see one unit at a time and receive unit-scoped
//! context. Asynchronous backends are unit-agnostic: their contexts carry no
//! container or implementation variant.

use std::path::{Path, PathBuf};

use glue_ir::{CatalogSourceId, GenerationUnit, Parameter, TargetLanguage, TypeCatalog, TypeNode};

/// Failure reported by a backend hook. Always fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BackendError {
    #[cold]
    pub fn msg(message: impl Into<String>) -> Self {
        BackendError::Message(message.into())
    }
}

pub type BackendResult = Result<(), BackendError>;

/// Context for a synchronous backend's `on_startup`.
#[derive(Copy, Clone, Debug)]
pub struct UnitContext<'a> {
    /// Target the backend generates for (after codec rerouting on the main
    /// path, the unit's own target on the router path).
    pub target: TargetLanguage,
    /// Run-level catalog source on the main path. The router passes it to
    /// its first unit and afterwards the source of the previously routed
    /// unit's last parameter.
    pub catalog_source: &'a CatalogSourceId,
    pub unit: &'a GenerationUnit,
    pub output_dir: &'a Path,
    pub variant_name: Option<&'a str>,
    pub use_external_tool: bool,
}

impl UnitContext<'_> {
    #[inline]
    pub fn container_id(&self) -> &str {
        self.unit.container_id()
    }

    #[inline]
    pub fn implementation(&self) -> &str {
        self.unit.implementation()
    }
}

/// Context for a synchronous backend's `on_shutdown`.
#[derive(Copy, Clone, Debug)]
pub struct UnitShutdown<'a> {
    pub target: TargetLanguage,
    /// Catalog source of the unit's last parameter.
    pub catalog_source: &'a CatalogSourceId,
    pub unit: &'a GenerationUnit,
    pub variant_name: Option<&'a str>,
}

/// One leaf visit on the per-unit path.
#[derive(Copy, Clone, Debug)]
pub struct UnitLeaf<'a> {
    pub type_name: &'a str,
    pub node: &'a TypeNode,
    pub unit: &'a GenerationUnit,
    pub implementation_variant: &'a str,
    pub parameter: &'a Parameter,
    pub catalog: &'a TypeCatalog,
}

/// Run-scoped context for asynchronous backends.
#[derive(Clone, Debug, PartialEq)]
pub struct RunContext {
    pub target: TargetLanguage,
    /// `None` only when no unit of the run has parameters.
    pub catalog_source: Option<CatalogSourceId>,
    pub output_dir: PathBuf,
    pub variant_name: Option<String>,
    pub use_external_tool: bool,
}

/// One leaf visit on the run-wide path.
#[derive(Copy, Clone, Debug)]
pub struct CatalogLeaf<'a> {
    pub type_name: &'a str,
    pub node: &'a TypeNode,
    pub catalog: &'a TypeCatalog,
}

/// A backend whose lifecycle is paired once per unit.
pub trait SyncBackend {
    fn on_startup(&mut self, ctx: &UnitContext<'_>) -> BackendResult;

    /// BOOLEAN, INTEGER, REAL and OCTET STRING leaves.
    fn on_basic(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult;
    fn on_sequence(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult;
    fn on_set(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult;
    fn on_choice(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult;
    fn on_sequence_of(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult;
    fn on_set_of(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult;
    fn on_enumerated(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult;

    fn on_shutdown(&mut self, ctx: &UnitShutdown<'_>) -> BackendResult;

    /// Run-wide finalization, only issued by the custom router to backends
    /// of a category that processed at least one unit.
    fn on_final(&mut self) -> BackendResult {
        Ok(())
    }
}

/// A backend whose lifecycle spans the whole run.
///
/// Whole-catalog backends see every catalog entry once per parameter of
/// every unit routed to them, so the same type arrives many times. They are
/// expected to collect types idempotently.
pub trait AsyncBackend {
    fn on_startup(&mut self, ctx: &RunContext) -> BackendResult;

    fn on_basic(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult;
    fn on_sequence(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult;
    fn on_set(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult;
    fn on_choice(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult;
    fn on_sequence_of(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult;
    fn on_set_of(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult;
    fn on_enumerated(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult;

    fn on_shutdown(&mut self, ctx: &RunContext) -> BackendResult;
}
