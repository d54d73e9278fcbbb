//! Generation units and their parameters.

use std::fmt;

use crate::{CatalogSourceId, TargetLanguage};

/// What kind of structural container a unit was produced from.
///
/// The model loader schedules subprograms first, then threads, then
/// processes; [`ContainerKind::schedule_rank`] gives that order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ContainerKind {
    Subprogram,
    Thread,
    Process,
}

impl ContainerKind {
    pub fn schedule_rank(self) -> u8 {
        match self {
            ContainerKind::Subprogram => 0,
            ContainerKind::Thread => 1,
            ContainerKind::Process => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContainerKind::Subprogram => "subprogram",
            ContainerKind::Thread => "thread",
            ContainerKind::Process => "process",
        }
    }
}

/// Data flow direction of a parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

/// Reference from a parameter into the type catalog.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypedSignal {
    pub source: CatalogSourceId,
    pub type_name: String,
}

impl TypedSignal {
    pub fn new(source: impl Into<CatalogSourceId>, type_name: impl Into<String>) -> Self {
        TypedSignal {
            source: source.into(),
            type_name: type_name.into(),
        }
    }
}

/// One parameter of a generation unit.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Parameter {
    pub id: String,
    pub direction: Direction,
    pub signal: TypedSignal,
}

impl Parameter {
    pub fn new(id: impl Into<String>, direction: Direction, signal: TypedSignal) -> Self {
        Parameter {
            id: id.into(),
            direction,
            signal,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &str {
        &self.signal.type_name
    }
}

/// One schedulable piece of glue-generation work.
///
/// Built once by the model loader and read-only afterwards: the fields are
/// private and only the builder methods (which consume `self`) can shape it.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct GenerationUnit {
    kind: ContainerKind,
    container_id: String,
    implementation: String,
    target: TargetLanguage,
    variant_name: Option<String>,
    params: Vec<Parameter>,
}

impl GenerationUnit {
    pub fn new(
        kind: ContainerKind,
        container_id: impl Into<String>,
        implementation: impl Into<String>,
        target: TargetLanguage,
    ) -> Self {
        GenerationUnit {
            kind,
            container_id: container_id.into(),
            implementation: implementation.into(),
            target,
            variant_name: None,
            params: Vec::new(),
        }
    }

    /// Shorthand for a subprogram unit.
    pub fn subprogram(
        container_id: impl Into<String>,
        implementation: impl Into<String>,
        target: TargetLanguage,
    ) -> Self {
        Self::new(ContainerKind::Subprogram, container_id, implementation, target)
    }

    #[must_use]
    pub fn with_variant_name(mut self, name: impl Into<String>) -> Self {
        self.variant_name = Some(name.into());
        self
    }

    /// Append a parameter. Declaration order is preserved.
    #[must_use]
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    #[inline]
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    #[inline]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// The implementation variant (e.g. `impl`, `others`).
    #[inline]
    pub fn implementation(&self) -> &str {
        &self.implementation
    }

    #[inline]
    pub fn target(&self) -> TargetLanguage {
        self.target
    }

    /// Optional function-view name the unit was instantiated for.
    #[inline]
    pub fn variant_name(&self) -> Option<&str> {
        self.variant_name.as_deref()
    }

    #[inline]
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    #[inline]
    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }
}

impl fmt::Display for GenerationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.container_id, self.implementation)
    }
}
