//! Diagnostic system for fatal run conditions.
//!
//! Every fatal condition of a generation run ends up here:
//! - An error code for searchability (`E0xxx` … `E4xxx`)
//! - A clear message (what went wrong)
//! - An optional source location (where, for catalog types)
//! - Notes (why it's wrong) and help lines (how to fix)
//!
//! Errors are produced by the `thiserror` enums of the other crates and
//! converted with their `to_diagnostic()` methods; the CLI renders them with
//! [`emitter::TerminalEmitter`].

mod diagnostic;
pub mod emitter;
mod error_code;

pub use diagnostic::{Diagnostic, Label};
pub use error_code::ErrorCode;
