//! Glue code generator driver.
//!
//! Ties the pieces together for one invocation:
//!
//! 1. [`cli`]: argument parsing and validation
//! 2. [`glue_model`]: loading, merging and verifying model documents
//! 3. [`glue_dispatch`]: dispatching units to the backend registry
//! 4. [`listing`]: the compiled-in backend family, which writes one listing
//!    file per backend describing the callbacks it received
//!
//! Every failure surfaces as a [`glue_diagnostic::Diagnostic`].

pub mod cli;
pub mod listing;
mod pipeline;
mod tracing_setup;

pub use pipeline::{generate, run};
pub use tracing_setup::init_tracing;
