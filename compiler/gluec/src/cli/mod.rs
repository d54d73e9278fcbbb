//! Command-line parsing and validation.
//!
//! Parsing is purely syntactic. [`CliOptions::validate`] checks the file
//! system afterwards, so every configuration error is reported before a
//! model is read or a backend is called.

use std::path::PathBuf;

use glue_diagnostic::{Diagnostic, ErrorCode};
use glue_dispatch::{RunConfig, ShutdownContext, UnknownShutdownContext};

pub const USAGE: &str = "gluec [-v] [-verbose] [-useOSS] [-onlySP] [-o dir] \
                         [--shutdown-context=trailing|captured] model.json...";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What one invocation asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliCommand {
    Run(CliOptions),
    Version,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliOptions {
    pub output_dir: PathBuf,
    pub verbose: bool,
    /// `-useOSS`: backends rely on the external codec toolchain.
    pub use_external_tool: bool,
    pub only_subprograms: bool,
    pub shutdown_context: ShutdownContext,
    /// Model documents, merged in this order.
    pub inputs: Vec<PathBuf>,
}

impl Default for CliOptions {
    fn default() -> Self {
        CliOptions {
            output_dir: PathBuf::from("."),
            verbose: false,
            use_external_tool: false,
            only_subprograms: false,
            shutdown_context: ShutdownContext::default(),
            inputs: Vec::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("missing value for '{0}'")]
    MissingValue(&'static str),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error(transparent)]
    ShutdownContext(#[from] UnknownShutdownContext),

    #[error("no model files given")]
    NoInputs,

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("'{}' is not a file", .0.display())]
    NotAFile(PathBuf),
}

impl CliError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CliError::MissingValue(_)
            | CliError::UnknownOption(_)
            | CliError::ShutdownContext(_)
            | CliError::NoInputs => ErrorCode::E0004,
            CliError::NotADirectory(_) => ErrorCode::E0002,
            CliError::NotAFile(_) => ErrorCode::E0003,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            CliError::NotADirectory(_) => {
                diag.with_suggestion("create the output directory before running")
            }
            CliError::NotAFile(_) => diag,
            CliError::MissingValue(_)
            | CliError::UnknownOption(_)
            | CliError::ShutdownContext(_)
            | CliError::NoInputs => diag.with_note(format!("usage: {USAGE}")),
        }
    }
}

/// Parse the arguments that follow the program name.
///
/// `-v` wins over everything else and short-circuits parsing.
pub fn parse_args<I>(args: I) -> Result<CliCommand, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "-v" {
            return Ok(CliCommand::Version);
        } else if arg == "-o" {
            let dir = args.next().ok_or(CliError::MissingValue("-o"))?;
            options.output_dir = PathBuf::from(dir);
        } else if arg == "-verbose" {
            options.verbose = true;
        } else if arg == "-useOSS" {
            options.use_external_tool = true;
        } else if arg == "-onlySP" {
            options.only_subprograms = true;
        } else if let Some(policy) = arg.strip_prefix("--shutdown-context=") {
            options.shutdown_context = policy.parse()?;
        } else if arg.starts_with('-') {
            return Err(CliError::UnknownOption(arg));
        } else {
            options.inputs.push(PathBuf::from(arg));
        }
    }

    if options.inputs.is_empty() {
        return Err(CliError::NoInputs);
    }
    Ok(CliCommand::Run(options))
}

impl CliOptions {
    /// The output directory must exist and every input must be a file.
    pub fn validate(&self) -> Result<(), CliError> {
        if !self.output_dir.is_dir() {
            return Err(CliError::NotADirectory(self.output_dir.clone()));
        }
        if let Some(missing) = self.inputs.iter().find(|p| !p.is_file()) {
            return Err(CliError::NotAFile(missing.clone()));
        }
        Ok(())
    }

    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            output_dir: self.output_dir.clone(),
            use_external_tool: self.use_external_tool,
            only_subprograms: self.only_subprograms,
            shutdown_context: self.shutdown_context,
        }
    }
}
