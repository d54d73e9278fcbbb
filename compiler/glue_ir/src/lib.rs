//! Core data model for glue generation.
//!
//! Everything the dispatch engine reads lives here, in canonical typed form:
//!
//! - [`GenerationUnit`] and [`Parameter`]: the ordered work list produced by
//!   the model loader
//! - [`TypedSignal`]: a reference from a parameter into the catalog
//! - [`TypeCatalog`] and [`TypeNode`]: the resolved wire-format types, with
//!   leaf classification, artificial flag and the run-wide skip-set
//! - [`TargetLanguage`]: the closed set of modeling/programming targets
//!
//! # Architecture
//!
//! ```text
//! model document (JSON)
//!        ↓
//!   glue_model      (validation + conversion)
//!        ↓
//!   glue_ir         ← this crate (canonical values)
//!        ↓
//!   glue_dispatch   (traversal + backend callbacks)
//! ```
//!
//! Values in this crate are immutable once built. Nothing here performs I/O.

mod catalog;
mod leaf;
mod location;
mod target;
mod unit;

pub use catalog::{CatalogSourceId, DuplicateTypeError, TypeCatalog, TypeNode, ValueRange};
pub use leaf::{LeafCategory, LeafType};
pub use location::SourceLocation;
pub use target::{TargetLanguage, UnsupportedTargetError};
pub use unit::{ContainerKind, Direction, GenerationUnit, Parameter, TypedSignal};
