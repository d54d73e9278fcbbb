//! Lifecycle bookkeeping.
//!
//! [`UnitSession`] makes per-unit pairing structural: `on_startup` is only
//! issued by [`UnitSession::open`] and `on_shutdown` only by
//! [`UnitSession::close`], which consumes the session.
//!
//! [`RunState`] is the per-run state shared by the engine and the router.
//! One value is created per run and passed by `&mut`; nothing survives
//! between runs.

use glue_ir::{CatalogSourceId, GenerationUnit, TargetLanguage, TypeCatalog};
use tracing::trace;

use crate::{
    AsyncBackendId, BackendId, CustomCategory, DispatchError, LeafOperation, RunConfig,
    RunContext, RunReport, ShutdownContext, SyncBackend, SyncBackendId, UnitContext, UnitLeaf,
    UnitShutdown,
};

/// An open per-unit lifecycle on one or more synchronous backends.
///
/// Every callback goes to each backend in the order they were given.
pub(crate) struct UnitSession<'r> {
    backends: Vec<(SyncBackendId, &'r mut dyn SyncBackend)>,
}

impl<'r> UnitSession<'r> {
    /// Fire `on_startup` on every backend and open the session.
    pub(crate) fn open(
        backends: Vec<(SyncBackendId, &'r mut dyn SyncBackend)>,
        ctx: &UnitContext<'_>,
    ) -> Result<Self, DispatchError> {
        let mut session = UnitSession { backends };
        for (id, backend) in &mut session.backends {
            backend
                .on_startup(ctx)
                .map_err(|e| DispatchError::backend(BackendId::Sync(*id), "startup", e))?;
        }
        Ok(session)
    }

    pub(crate) fn visit(
        &mut self,
        op: LeafOperation,
        leaf: &UnitLeaf<'_>,
        report: &mut RunReport,
    ) -> Result<(), DispatchError> {
        for (id, backend) in &mut self.backends {
            op.invoke_sync(&mut **backend, leaf)
                .map_err(|e| DispatchError::backend(BackendId::Sync(*id), op.hook_name(), e))?;
            report.record_visit(BackendId::Sync(*id));
        }
        Ok(())
    }

    /// Walk the unit's parameters in declaration order.
    ///
    /// Skip-set members and artificial types are passed over silently; the
    /// unit continues with its next parameter.
    pub(crate) fn visit_parameters(
        &mut self,
        unit: &GenerationUnit,
        catalog: &TypeCatalog,
        report: &mut RunReport,
    ) -> Result<(), DispatchError> {
        for param in unit.params() {
            let type_name = param.type_name();
            if catalog.is_skipped(type_name) {
                trace!(param = %param.id, type_name, "in skip-set");
                continue;
            }
            let node = catalog
                .lookup(type_name)
                .ok_or_else(|| DispatchError::UnknownType {
                    unit: unit.to_string(),
                    parameter: param.id.clone(),
                    type_name: type_name.to_string(),
                })?;
            if catalog.is_excluded(node) {
                trace!(param = %param.id, type_name, "artificial type");
                continue;
            }
            let op = LeafOperation::resolve(node)?;
            let leaf = UnitLeaf {
                type_name,
                node,
                unit,
                implementation_variant: unit.implementation(),
                parameter: param,
                catalog,
            };
            self.visit(op, &leaf, report)?;
        }
        Ok(())
    }

    /// Fire `on_shutdown` on every backend, ending the session.
    pub(crate) fn close(mut self, ctx: &UnitShutdown<'_>) -> Result<(), DispatchError> {
        for (id, backend) in &mut self.backends {
            backend
                .on_shutdown(ctx)
                .map_err(|e| DispatchError::backend(BackendId::Sync(*id), "shutdown", e))?;
        }
        Ok(())
    }
}

/// Loop state left behind by the last unit the main path visited.
#[derive(Clone, Debug)]
struct Trailing {
    target: TargetLanguage,
    variant_name: Option<String>,
}

/// Per-run lifecycle state.
#[derive(Debug, Default)]
pub struct RunState {
    /// Started asynchronous backends with their startup context, in
    /// first-seen order.
    started: Vec<(AsyncBackendId, RunContext)>,
    trailing: Option<Trailing>,
    run_source: Option<CatalogSourceId>,
    touched: Vec<CustomCategory>,
    report: RunReport,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the facts about the whole unit list the run needs up front.
    pub(crate) fn begin(&mut self, units: &[GenerationUnit]) {
        self.run_source = units
            .iter()
            .rev()
            .find_map(|unit| unit.params().last())
            .map(|param| param.signal.source.clone());
        self.report.requires_ada_codecs = units.iter().any(|u| u.target().needs_ada_codecs());
    }

    /// Catalog source handed to run-scoped contexts: the source of the last
    /// parameter in the unit list.
    pub fn run_source(&self) -> Option<&CatalogSourceId> {
        self.run_source.as_ref()
    }

    pub fn is_started(&self, id: AsyncBackendId) -> bool {
        self.started.iter().any(|(started, _)| *started == id)
    }

    pub(crate) fn mark_started(&mut self, id: AsyncBackendId, ctx: RunContext) {
        self.report.async_started.push(id);
        self.started.push((id, ctx));
    }

    /// Started asynchronous backends, in first-seen order.
    pub fn started(&self) -> impl Iterator<Item = AsyncBackendId> + '_ {
        self.started.iter().map(|(id, _)| *id)
    }

    pub(crate) fn visit_unit(&mut self, unit: &GenerationUnit) {
        self.trailing = Some(Trailing {
            target: unit.target(),
            variant_name: unit.variant_name().map(str::to_string),
        });
    }

    /// The last visited unit was dispatched under `target`.
    pub(crate) fn reroute_trailing(&mut self, target: TargetLanguage) {
        if let Some(trailing) = &mut self.trailing {
            trailing.target = target;
        }
    }

    /// Context for the run-wide `on_shutdown` of `id`.
    pub(crate) fn shutdown_context(
        &self,
        id: AsyncBackendId,
        config: &RunConfig,
    ) -> Option<RunContext> {
        let (_, captured) = self.started.iter().find(|(started, _)| *started == id)?;
        let context = match (config.shutdown_context, &self.trailing) {
            (ShutdownContext::Trailing, Some(trailing)) => RunContext {
                target: trailing.target,
                catalog_source: self.run_source.clone(),
                output_dir: config.output_dir.clone(),
                variant_name: trailing.variant_name.clone(),
                use_external_tool: config.use_external_tool,
            },
            (ShutdownContext::Captured, _) | (ShutdownContext::Trailing, None) => {
                captured.clone()
            }
        };
        Some(context)
    }

    pub(crate) fn touch(&mut self, category: CustomCategory) {
        if !self.touched.contains(&category) {
            self.touched.push(category);
        }
    }

    /// Whether the router processed at least one unit of `category`.
    pub fn is_touched(&self, category: CustomCategory) -> bool {
        self.touched.contains(&category)
    }

    pub(crate) fn report_mut(&mut self) -> &mut RunReport {
        &mut self.report
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    pub fn into_report(self) -> RunReport {
        self.report
    }
}
