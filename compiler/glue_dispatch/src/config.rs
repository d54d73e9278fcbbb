//! Run configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which context asynchronous backends receive in their run-wide
/// `on_shutdown`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ShutdownContext {
    /// Target and variant of the last unit visited by the main loop, and
    /// the run-level catalog source. The same context goes to every
    /// asynchronous backend.
    #[default]
    Trailing,
    /// The context each backend received in its own `on_startup`.
    Captured,
}

impl ShutdownContext {
    pub fn as_str(self) -> &'static str {
        match self {
            ShutdownContext::Trailing => "trailing",
            ShutdownContext::Captured => "captured",
        }
    }
}

impl fmt::Display for ShutdownContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown shutdown context '{0}' (expected 'trailing' or 'captured')")]
pub struct UnknownShutdownContext(pub String);

impl FromStr for ShutdownContext {
    type Err = UnknownShutdownContext;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trailing" => Ok(ShutdownContext::Trailing),
            "captured" => Ok(ShutdownContext::Captured),
            _ => Err(UnknownShutdownContext(s.to_string())),
        }
    }
}

/// Settings shared by every component of one run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Where backends write their output.
    pub output_dir: PathBuf,
    /// Backends should rely on the external codec toolchain.
    pub use_external_tool: bool,
    pub only_subprograms: bool,
    pub shutdown_context: ShutdownContext,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            output_dir: PathBuf::from("."),
            use_external_tool: false,
            only_subprograms: false,
            shutdown_context: ShutdownContext::default(),
        }
    }
}
