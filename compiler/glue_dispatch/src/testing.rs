//! Testing utilities.
//!
//! [`RecordingFactory`] builds a registry whose backends append every call
//! they receive to one shared, ordered [`CallLog`]. A backend can be told
//! to fail in a given hook to exercise error propagation.
//!
//! # Usage
//!
//! ```ignore
//! let mut factory = RecordingFactory::new();
//! let log = factory.log();
//! let mut registry = BackendRegistry::build(&mut factory);
//! // ... run the engine ...
//! assert_eq!(trace_of(&log, BackendId::Async(AsyncBackendId::C)), vec!["startup", ...]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use glue_ir::{
    CatalogSourceId, Direction, GenerationUnit, LeafType, Parameter, TargetLanguage, TypeCatalog,
    TypeNode, TypedSignal,
};

use crate::{
    AsyncBackend, AsyncBackendId, BackendError, BackendFactory, BackendId, BackendResult,
    CatalogLeaf, RunContext, SyncBackend, SyncBackendId, UnitContext, UnitLeaf, UnitShutdown,
};

/// Catalog source used by [`catalog`] and [`unit`].
pub const TEST_SOURCE: &str = "dataview.asn";

/// A catalog of `(name, leaf)` entries from [`TEST_SOURCE`]. A leading `~`
/// on the name marks the entry artificial.
///
/// # Panics
///
/// If two entries share a name.
pub fn catalog(entries: &[(&str, &str)]) -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    for (name, leaf) in entries {
        let (name, artificial) = match name.strip_prefix('~') {
            Some(stripped) => (stripped, true),
            None => (*name, false),
        };
        let source = CatalogSourceId::new(TEST_SOURCE);
        let mut node = TypeNode::new(name, LeafType::parse(leaf), source);
        if artificial {
            node = node.artificial();
        }
        if let Err(err) = catalog.insert(node) {
            panic!("bad catalog fixture: {err}");
        }
    }
    catalog
}

/// A subprogram `id.impl` with one `in` parameter per type name, named
/// `p0`, `p1`, ...
pub fn unit(target: TargetLanguage, id: &str, types: &[&str]) -> GenerationUnit {
    types
        .iter()
        .enumerate()
        .fold(GenerationUnit::subprogram(id, "impl", target), |unit, (i, ty)| {
            unit.with_param(Parameter::new(
                format!("p{i}"),
                Direction::In,
                TypedSignal::new(TEST_SOURCE, *ty),
            ))
        })
}

/// One recorded backend call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Startup {
        backend: BackendId,
        target: TargetLanguage,
        catalog_source: Option<String>,
        /// `container.implementation`, absent for run-wide backends.
        unit: Option<String>,
        variant_name: Option<String>,
    },
    Leaf {
        backend: BackendId,
        hook: &'static str,
        type_name: String,
        unit: Option<String>,
        parameter: Option<String>,
    },
    Shutdown {
        backend: BackendId,
        target: TargetLanguage,
        catalog_source: Option<String>,
        unit: Option<String>,
        variant_name: Option<String>,
    },
    Final {
        backend: BackendId,
    },
}

impl Call {
    pub fn backend(&self) -> BackendId {
        match self {
            Call::Startup { backend, .. }
            | Call::Leaf { backend, .. }
            | Call::Shutdown { backend, .. }
            | Call::Final { backend } => *backend,
        }
    }

    /// Compact form: `startup`, `sequence T-Cmd`, `shutdown`, `final`.
    pub fn describe(&self) -> String {
        match self {
            Call::Startup { .. } => "startup".to_string(),
            Call::Leaf {
                hook, type_name, ..
            } => format!("{hook} {type_name}"),
            Call::Shutdown { .. } => "shutdown".to_string(),
            Call::Final { .. } => "final".to_string(),
        }
    }
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// Calls received by one backend, in compact form.
pub fn trace_of(log: &CallLog, backend: BackendId) -> Vec<String> {
    log.borrow()
        .iter()
        .filter(|call| call.backend() == backend)
        .map(Call::describe)
        .collect()
}

/// Every call of the run, as `backend: call`.
pub fn full_trace(log: &CallLog) -> Vec<String> {
    log.borrow()
        .iter()
        .map(|call| format!("{}: {}", call.backend(), call.describe()))
        .collect()
}

/// Builds recording backends that share one log.
#[derive(Default)]
pub struct RecordingFactory {
    log: CallLog,
    failure: Option<(BackendId, &'static str)>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> CallLog {
        Rc::clone(&self.log)
    }

    /// Make `backend` fail when `hook` (`startup`, `basic`, ..., `final`)
    /// is called.
    #[must_use]
    pub fn failing_on(mut self, backend: BackendId, hook: &'static str) -> Self {
        self.failure = Some((backend, hook));
        self
    }

    fn backend(&self, id: BackendId) -> RecordingBackend {
        RecordingBackend {
            id,
            log: Rc::clone(&self.log),
            fail_in: self
                .failure
                .and_then(|(backend, hook)| (backend == id).then_some(hook)),
        }
    }
}

impl BackendFactory for RecordingFactory {
    fn sync_backend(&mut self, id: SyncBackendId) -> Box<dyn SyncBackend> {
        Box::new(self.backend(BackendId::Sync(id)))
    }

    fn async_backend(&mut self, id: AsyncBackendId) -> Box<dyn AsyncBackend> {
        Box::new(self.backend(BackendId::Async(id)))
    }
}

struct RecordingBackend {
    id: BackendId,
    log: CallLog,
    fail_in: Option<&'static str>,
}

impl RecordingBackend {
    fn record(&self, hook: &'static str, call: Call) -> BackendResult {
        self.log.borrow_mut().push(call);
        if self.fail_in == Some(hook) {
            return Err(BackendError::msg(format!("injected failure in {hook}")));
        }
        Ok(())
    }

    fn unit_leaf(&self, hook: &'static str, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.record(
            hook,
            Call::Leaf {
                backend: self.id,
                hook,
                type_name: leaf.type_name.to_string(),
                unit: Some(leaf.unit.to_string()),
                parameter: Some(leaf.parameter.id.clone()),
            },
        )
    }

    fn catalog_leaf(&self, hook: &'static str, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.record(
            hook,
            Call::Leaf {
                backend: self.id,
                hook,
                type_name: leaf.type_name.to_string(),
                unit: None,
                parameter: None,
            },
        )
    }
}

impl SyncBackend for RecordingBackend {
    fn on_startup(&mut self, ctx: &UnitContext<'_>) -> BackendResult {
        self.record(
            "startup",
            Call::Startup {
                backend: self.id,
                target: ctx.target,
                catalog_source: Some(ctx.catalog_source.to_string()),
                unit: Some(ctx.unit.to_string()),
                variant_name: ctx.variant_name.map(str::to_string),
            },
        )
    }

    fn on_basic(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_leaf("basic", leaf)
    }

    fn on_sequence(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_leaf("sequence", leaf)
    }

    fn on_set(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_leaf("set", leaf)
    }

    fn on_choice(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_leaf("choice", leaf)
    }

    fn on_sequence_of(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_leaf("sequence_of", leaf)
    }

    fn on_set_of(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_leaf("set_of", leaf)
    }

    fn on_enumerated(&mut self, leaf: &UnitLeaf<'_>) -> BackendResult {
        self.unit_leaf("enumerated", leaf)
    }

    fn on_shutdown(&mut self, ctx: &UnitShutdown<'_>) -> BackendResult {
        self.record(
            "shutdown",
            Call::Shutdown {
                backend: self.id,
                target: ctx.target,
                catalog_source: Some(ctx.catalog_source.to_string()),
                unit: Some(ctx.unit.to_string()),
                variant_name: ctx.variant_name.map(str::to_string),
            },
        )
    }

    fn on_final(&mut self) -> BackendResult {
        self.record("final", Call::Final { backend: self.id })
    }
}

impl AsyncBackend for RecordingBackend {
    fn on_startup(&mut self, ctx: &RunContext) -> BackendResult {
        self.record(
            "startup",
            Call::Startup {
                backend: self.id,
                target: ctx.target,
                catalog_source: ctx.catalog_source.as_ref().map(ToString::to_string),
                unit: None,
                variant_name: ctx.variant_name.clone(),
            },
        )
    }

    fn on_basic(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_leaf("basic", leaf)
    }

    fn on_sequence(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_leaf("sequence", leaf)
    }

    fn on_set(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_leaf("set", leaf)
    }

    fn on_choice(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_leaf("choice", leaf)
    }

    fn on_sequence_of(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_leaf("sequence_of", leaf)
    }

    fn on_set_of(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_leaf("set_of", leaf)
    }

    fn on_enumerated(&mut self, leaf: &CatalogLeaf<'_>) -> BackendResult {
        self.catalog_leaf("enumerated", leaf)
    }

    fn on_shutdown(&mut self, ctx: &RunContext) -> BackendResult {
        self.record(
            "shutdown",
            Call::Shutdown {
                backend: self.id,
                target: ctx.target,
                catalog_source: ctx.catalog_source.as_ref().map(ToString::to_string),
                unit: None,
                variant_name: ctx.variant_name.clone(),
            },
        )
    }
}
