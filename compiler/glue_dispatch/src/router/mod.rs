//! Dual-backend routing for GUI and VHDL units.
//!
//! These targets need a presentation or hardware backend in addition to the
//! C codecs the main path builds for them. The router runs after the main
//! path and follows the per-unit sequencing, but every call goes to each
//! backend of the unit's category in a fixed order. A category that handled
//! at least one unit is finalized once at the end of the run.

use glue_ir::{CatalogSourceId, GenerationUnit, TargetLanguage, TypeCatalog};
use tracing::debug;

use crate::{
    BackendId, BackendRegistry, DispatchError, RunConfig, RunState, SyncBackendId, UnitContext,
    UnitSession, UnitShutdown,
};

/// Container ids containing this marker are polling-only GUI telecommands,
/// allowed to have no parameters.
const GUI_POLLING_MARKER: &str = "gui_polling";

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum CustomCategory {
    Gui,
    Vhdl,
}

impl CustomCategory {
    /// Finalization order.
    pub const ALL: [CustomCategory; 2] = [CustomCategory::Gui, CustomCategory::Vhdl];

    pub fn of(target: TargetLanguage) -> Option<Self> {
        match target {
            TargetLanguage::GuiRi | TargetLanguage::GuiPi => Some(CustomCategory::Gui),
            TargetLanguage::Vhdl => Some(CustomCategory::Vhdl),
            TargetLanguage::C
            | TargetLanguage::Ada
            | TargetLanguage::Sdl
            | TargetLanguage::Og
            | TargetLanguage::QGenAda
            | TargetLanguage::Rtds
            | TargetLanguage::Gui
            | TargetLanguage::Python
            | TargetLanguage::QGenC
            | TargetLanguage::Scade6
            | TargetLanguage::Simulink
            | TargetLanguage::Rhapsody => None,
        }
    }

    /// Backends of this category, in call order.
    pub fn instances(self) -> &'static [SyncBackendId] {
        match self {
            CustomCategory::Gui => &[SyncBackendId::Python, SyncBackendId::PySide],
            CustomCategory::Vhdl => &[SyncBackendId::Vhdl],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CustomCategory::Gui => "gui",
            CustomCategory::Vhdl => "vhdl",
        }
    }
}

pub struct CustomBackendRouter<'r> {
    registry: &'r mut BackendRegistry,
    config: &'r RunConfig,
}

impl<'r> CustomBackendRouter<'r> {
    pub fn new(registry: &'r mut BackendRegistry, config: &'r RunConfig) -> Self {
        CustomBackendRouter { registry, config }
    }

    /// Route every GUI and VHDL unit, then finalize touched categories.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(
        &mut self,
        units: &[GenerationUnit],
        catalog: &TypeCatalog,
        state: &mut RunState,
    ) -> Result<(), DispatchError> {
        let mut startup_source = state.run_source().cloned();
        for unit in units {
            let Some(category) = CustomCategory::of(unit.target()) else {
                continue;
            };
            if !unit.has_params() {
                if unit.target() == TargetLanguage::GuiRi
                    && !unit.container_id().contains(GUI_POLLING_MARKER)
                {
                    return Err(DispatchError::GuiWithoutParameters {
                        unit: unit.container_id().to_string(),
                    });
                }
                continue;
            }
            state.touch(category);
            self.route_unit(category, unit, catalog, state, &mut startup_source)?;
        }
        self.finalize(state)
    }

    fn route_unit(
        &mut self,
        category: CustomCategory,
        unit: &GenerationUnit,
        catalog: &TypeCatalog,
        state: &mut RunState,
        startup_source: &mut Option<CatalogSourceId>,
    ) -> Result<(), DispatchError> {
        let Some(last) = unit.params().last() else {
            return Ok(());
        };
        debug!(unit = %unit, category = category.as_str(), "routing");
        state.report_mut().router_units += 1;

        let source = startup_source
            .take()
            .unwrap_or_else(|| last.signal.source.clone());
        let ctx = UnitContext {
            target: unit.target(),
            catalog_source: &source,
            unit,
            output_dir: &self.config.output_dir,
            variant_name: unit.variant_name(),
            use_external_tool: self.config.use_external_tool,
        };
        let backends = self.registry.sync_many(category.instances());
        let mut session = UnitSession::open(backends, &ctx)?;
        session.visit_parameters(unit, catalog, state.report_mut())?;
        session.close(&UnitShutdown {
            target: unit.target(),
            catalog_source: &last.signal.source,
            unit,
            variant_name: unit.variant_name(),
        })?;
        *startup_source = Some(last.signal.source.clone());
        Ok(())
    }

    fn finalize(&mut self, state: &mut RunState) -> Result<(), DispatchError> {
        for category in CustomCategory::ALL {
            if !state.is_touched(category) {
                continue;
            }
            for &id in category.instances() {
                debug!(backend = id.as_str(), "final");
                self.registry
                    .sync_mut(id)
                    .on_final()
                    .map_err(|e| DispatchError::backend(BackendId::Sync(id), "final", e))?;
            }
            state.report_mut().categories_finalized.push(category);
        }
        Ok(())
    }
}
