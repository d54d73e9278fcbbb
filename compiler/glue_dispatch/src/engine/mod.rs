//! The main dispatch loop.
//!
//! Units are processed strictly in the order given. Each unit with
//! parameters is dispatched to exactly one backend, chosen by
//! [`BackendId::for_target`], on the lifecycle path of that backend.

use glue_ir::{GenerationUnit, TargetLanguage, TypeCatalog};
use tracing::{debug, info, trace};

use crate::{
    AsyncBackend, AsyncBackendId, BackendHandle, BackendId, BackendRegistry, CatalogLeaf,
    DispatchError, LeafOperation, RunConfig, RunContext, RunState, SyncBackend, SyncBackendId,
    UnitContext, UnitSession, UnitShutdown,
};

/// Drives every unit of a run through its backend.
pub struct DispatchEngine<'r> {
    registry: &'r mut BackendRegistry,
    config: &'r RunConfig,
}

impl<'r> DispatchEngine<'r> {
    pub fn new(registry: &'r mut BackendRegistry, config: &'r RunConfig) -> Self {
        DispatchEngine { registry, config }
    }

    /// Dispatch every unit, then shut down each asynchronous backend that
    /// was started, once, in first-seen order.
    ///
    /// The first fatal condition aborts the run; output already written by
    /// backends is left as is.
    #[tracing::instrument(level = "debug", skip_all, fields(units = units.len(), types = catalog.len()))]
    pub fn run(
        &mut self,
        units: &[GenerationUnit],
        catalog: &TypeCatalog,
        state: &mut RunState,
    ) -> Result<(), DispatchError> {
        state.begin(units);
        for unit in units {
            self.dispatch_unit(unit, catalog, state)?;
        }
        self.shutdown_async(state)?;
        info!(
            processed = state.report().units_processed,
            skipped = state.report().units_skipped,
            "dispatch complete"
        );
        Ok(())
    }

    fn dispatch_unit(
        &mut self,
        unit: &GenerationUnit,
        catalog: &TypeCatalog,
        state: &mut RunState,
    ) -> Result<(), DispatchError> {
        state.visit_unit(unit);
        if !unit.has_params() {
            debug!(unit = %unit, "no parameters, skipped");
            state.report_mut().units_skipped += 1;
            return Ok(());
        }

        let target = unit.target().codec_target();
        state.reroute_trailing(target);
        state.report_mut().units_processed += 1;

        let config = self.config;
        match self.registry.resolve(target) {
            BackendHandle::Synchronous { id, backend } => {
                debug!(unit = %unit, backend = id.as_str(), "per-unit dispatch");
                process_sync(id, backend, target, unit, catalog, config, state)
            }
            BackendHandle::Asynchronous { id, backend } => {
                debug!(unit = %unit, backend = id.as_str(), "run-wide dispatch");
                process_async(id, backend, target, unit, catalog, config, state)
            }
        }
    }

    fn shutdown_async(&mut self, state: &mut RunState) -> Result<(), DispatchError> {
        let started: Vec<AsyncBackendId> = state.started().collect();
        for id in started {
            let Some(ctx) = state.shutdown_context(id, self.config) else {
                continue;
            };
            debug!(
                backend = id.as_str(),
                target = %ctx.target,
                policy = %self.config.shutdown_context,
                "run-wide shutdown"
            );
            self.registry
                .async_mut(id)
                .on_shutdown(&ctx)
                .map_err(|e| DispatchError::backend(BackendId::Async(id), "shutdown", e))?;
        }
        Ok(())
    }
}

fn process_sync(
    id: SyncBackendId,
    backend: &mut dyn SyncBackend,
    target: TargetLanguage,
    unit: &GenerationUnit,
    catalog: &TypeCatalog,
    config: &RunConfig,
    state: &mut RunState,
) -> Result<(), DispatchError> {
    let Some(last) = unit.params().last() else {
        return Ok(());
    };
    let run_source = state
        .run_source()
        .cloned()
        .unwrap_or_else(|| last.signal.source.clone());
    let ctx = UnitContext {
        target,
        catalog_source: &run_source,
        unit,
        output_dir: &config.output_dir,
        variant_name: unit.variant_name(),
        use_external_tool: config.use_external_tool,
    };
    let mut session = UnitSession::open(vec![(id, backend)], &ctx)?;
    session.visit_parameters(unit, catalog, state.report_mut())?;
    session.close(&UnitShutdown {
        target,
        catalog_source: &last.signal.source,
        unit,
        variant_name: unit.variant_name(),
    })
}

/// Run-wide path. The backend is started on first use only; every parameter
/// then walks the whole catalog in insertion order.
///
/// A whole-catalog backend sees every eligible entry once per parameter, so
/// repeated visits of the same type are expected. Other backends only see
/// the entry named by the parameter.
fn process_async(
    id: AsyncBackendId,
    backend: &mut dyn AsyncBackend,
    target: TargetLanguage,
    unit: &GenerationUnit,
    catalog: &TypeCatalog,
    config: &RunConfig,
    state: &mut RunState,
) -> Result<(), DispatchError> {
    let backend_id = BackendId::Async(id);
    if !state.is_started(id) {
        let ctx = RunContext {
            target,
            catalog_source: state.run_source().cloned(),
            output_dir: config.output_dir.clone(),
            variant_name: unit.variant_name().map(str::to_string),
            use_external_tool: config.use_external_tool,
        };
        debug!(backend = id.as_str(), "run-wide startup");
        backend
            .on_startup(&ctx)
            .map_err(|e| DispatchError::backend(backend_id, "startup", e))?;
        state.mark_started(id, ctx);
    }

    let whole_catalog = id.whole_catalog();
    for param in unit.params() {
        for node in catalog {
            if !whole_catalog && node.name != param.type_name() {
                continue;
            }
            if catalog.is_excluded(node) {
                continue;
            }
            trace!(param = %param.id, type_name = %node.name, "catalog visit");
            let op = LeafOperation::resolve(node)?;
            let leaf = CatalogLeaf {
                type_name: &node.name,
                node,
                catalog,
            };
            op.invoke_async(backend, &leaf)
                .map_err(|e| DispatchError::backend(backend_id, op.hook_name(), e))?;
            state.report_mut().record_visit(backend_id);
        }
    }
    Ok(())
}
