//! Glue generator CLI.

use glue_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use glue_diagnostic::Diagnostic;
use gluec::cli::{parse_args, CliCommand, VERSION};

fn main() {
    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => fail(&err.to_diagnostic()),
    };

    match command {
        CliCommand::Version => println!("gluec {VERSION}"),
        CliCommand::Run(options) => {
            gluec::init_tracing(options.verbose);
            if let Err(diagnostic) = gluec::run(&options) {
                fail(&diagnostic);
            }
        }
    }
}

fn fail(diagnostic: &Diagnostic) -> ! {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, is_tty);
    emitter.emit(diagnostic);
    emitter.flush();
    std::process::exit(1);
}
