//! Dispatch and traversal engine for glue generation.
//!
//! Given an ordered list of [`GenerationUnit`]s and a resolved
//! [`TypeCatalog`], this crate decides for every unit which backend to drive,
//! which lifecycle contract applies, and which leaf hook each catalog type
//! reaches.
//!
//! Two lifecycle contracts coexist:
//!
//! - **Synchronous** backends ([`SyncBackend`]) emit glue per unit. Each unit
//!   with parameters opens a unit session, which fires `on_startup` when
//!   opened and `on_shutdown` when closed.
//! - **Asynchronous** backends ([`AsyncBackend`]) emit catalog-wide codecs.
//!   `on_startup` fires once per run on first use, `on_shutdown` once per run
//!   after every unit has been dispatched. [`RunState`] tracks which have
//!   started.
//!
//! GUI and VHDL units additionally go through the [`CustomBackendRouter`],
//! which fans each callback out to every backend of the category and
//! finalizes touched categories at the end of the run.
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = BackendRegistry::build(&mut factory);
//! let mut state = RunState::new();
//! DispatchEngine::new(&mut registry, &config).run(&units, &catalog, &mut state)?;
//! CustomBackendRouter::new(&mut registry, &config).run(&units, &catalog, &mut state)?;
//! let report = state.into_report();
//! ```
//!
//! [`GenerationUnit`]: glue_ir::GenerationUnit
//! [`TypeCatalog`]: glue_ir::TypeCatalog

mod backend;
mod config;
mod engine;
mod error;
mod leaf;
mod registry;
mod report;
mod router;
mod session;
pub mod testing;

pub use backend::{
    AsyncBackend, BackendError, BackendResult, CatalogLeaf, RunContext, SyncBackend,
    UnitContext, UnitLeaf, UnitShutdown,
};
pub use config::{RunConfig, ShutdownContext, UnknownShutdownContext};
pub use engine::DispatchEngine;
pub use error::DispatchError;
pub use leaf::LeafOperation;
pub use registry::{
    AsyncBackendId, BackendFactory, BackendHandle, BackendId, BackendRegistry, SyncBackendId,
};
pub use report::RunReport;
pub use router::{CustomBackendRouter, CustomCategory};
pub use session::RunState;
pub(crate) use session::UnitSession;
