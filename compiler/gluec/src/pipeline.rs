//! One generation run: validate, load, verify, dispatch, route.

use std::path::PathBuf;

use glue_diagnostic::Diagnostic;
use glue_dispatch::{
    BackendFactory, BackendRegistry, CustomBackendRouter, DispatchEngine, RunConfig, RunReport,
    RunState,
};
use glue_model::ModelLoader;
use tracing::info;

use crate::cli::CliOptions;
use crate::listing::ListingFactory;

/// Run the invocation described by `options` with the listing backends.
///
/// Configuration is checked before any model is read.
pub fn run(options: &CliOptions) -> Result<RunReport, Diagnostic> {
    options.validate().map_err(|e| e.to_diagnostic())?;
    generate(&options.inputs, &options.run_config(), &mut ListingFactory)
}

/// Load `models` in order, verify the merged model and dispatch it to the
/// backends built by `factory`.
///
/// No backend is called unless the model loads and verifies cleanly.
#[tracing::instrument(level = "debug", skip_all, fields(models = models.len()))]
pub fn generate(
    models: &[PathBuf],
    config: &RunConfig,
    factory: &mut dyn BackendFactory,
) -> Result<RunReport, Diagnostic> {
    let mut loader = ModelLoader::new().only_subprograms(config.only_subprograms);
    for path in models {
        loader.load_file(path).map_err(|e| e.to_diagnostic())?;
    }
    let model = loader.finish();
    glue_model::verify(&model).map_err(|e| e.to_diagnostic())?;

    let mut registry = BackendRegistry::build(factory);
    let mut state = RunState::new();
    DispatchEngine::new(&mut registry, config)
        .run(&model.units, &model.catalog, &mut state)
        .map_err(|e| e.to_diagnostic())?;
    CustomBackendRouter::new(&mut registry, config)
        .run(&model.units, &model.catalog, &mut state)
        .map_err(|e| e.to_diagnostic())?;

    let report = state.into_report();
    info!("{report}");
    Ok(report)
}
