//! Loading a grammar, matching the trailing arguments and reporting the outcome.

use std::io::Write;

use log::{debug, info, warn};
use optmatch_core::error::Result;
use optmatch_core::parser::{OptParser, ParseOutcome};
use optmatch_core::{config, file_handling};

use crate::cli_args::Args;
use crate::report;
use crate::suggestion::{suggest_command, unrecognized_command};

/// What the process should report to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

/// Loads the grammar named by `args` and builds its parser.
///
/// # Errors
///
/// Returns an error if the grammar file cannot be read or declares an
/// invalid grammar.
pub fn load_parser(args: &Args) -> Result<OptParser> {
    let grammar_path = config::get_grammar_path(args.grammar_path.as_deref());
    debug!("Grammar path: `{}`", grammar_path);

    let grammar = file_handling::get_grammar_definition(&grammar_path)?;
    grammar.build()
}

/// Runs one invocation, writing help and results to `stdout` and the error
/// report to `stderr`.
///
/// # Errors
///
/// Returns an error if the grammar cannot be loaded or output cannot be written.
pub fn run<O: Write, E: Write>(
    args: &Args,
    stdout: &mut O,
    stderr: &mut E,
    colored: bool,
) -> Result<Status> {
    let parser = load_parser(args)?;

    let result = match parser.parse(args.arguments.as_slice()) {
        ParseOutcome::HelpRequested(help) => {
            write!(stdout, "{help}")?;
            return Ok(Status::Success);
        }
        ParseOutcome::Continue(result) | ParseOutcome::FatalError(result) => result,
    };

    let Some(error_report) = result.error_report() else {
        info!("Arguments matched without errors");
        writeln!(stdout, "{}", report::format_result(&result, args.format)?)?;
        return Ok(Status::Success);
    };

    report::write_error_report(stderr, &error_report, colored)?;

    if let Some(suggestion) = unrecognized_command(&parser, args.arguments.as_slice())
        .and_then(|input| suggest_command(&parser, &input))
    {
        report::write_suggestion(stderr, &suggestion, colored)?;
    }

    if args.debug {
        warn!("Debug mode is on, exiting successfully despite errors");
        return Ok(Status::Success);
    }

    Ok(Status::Failure)
}
