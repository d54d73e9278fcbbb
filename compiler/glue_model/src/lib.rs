//! Model documents for glue generation.
//!
//! A model document is the materialized output of the structural-model parser
//! and the catalog service: the generation units of one or more models plus
//! the resolved type catalog. This crate owns its versioned JSON schema and
//! the validation step that turns documents into canonical [`glue_ir`] values.
//!
//! # Pipeline
//!
//! ```text
//! JSON text ──parse_document──▶ ModelDocument (schema v1)
//!                                     │
//!                     ModelLoader::add_document (merge, convert)
//!                                     │
//!                                     ▼
//!                               LoadedModel ──verify──▶ ready for dispatch
//! ```
//!
//! Every failure is a [`LoadError`], which converts into a
//! [`glue_diagnostic::Diagnostic`] for reporting.

mod error;
mod load;
pub mod schema;
mod verify;

pub use error::{LoadError, RangeLimit};
pub use load::{parse_document, LoadedModel, ModelLoader};
pub use schema::{ModelDocument, SCHEMA_VERSION};
pub use verify::{check_parameter_types, verify, verify_ranges};
