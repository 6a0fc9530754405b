//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the `clap`
//! crate.

use clap::{Parser, ValueEnum};

/// How a successful match is printed.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `name = value` line per bound option.
    #[default]
    Text,
    /// The whole result as a YAML document.
    Yaml,
}

/// Command-line arguments for the optmatch CLI tool.
///
/// The trailing arguments are validated against the grammar; the first of
/// them is treated as the program name, just like a process's own argv.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use optmatch_cli::cli_args::Args;
///
/// let args = Args::parse_from(["optmatch", "-g", "users.yml", "users", "add", "john"]);
/// assert_eq!(args.arguments, vec!["users", "add", "john"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the grammar definition YAML.
    ///
    /// If not provided, defaults to `~/.optmatch/grammar.yml`.
    #[arg(long, short = 'g')]
    pub grammar_path: Option<String>,

    /// Report errors without failing.
    ///
    /// The error report is still printed, but the exit status is zero.
    #[arg(long, short = 'd', action)]
    pub debug: bool,

    /// Output format for a successful match.
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// The arguments to validate, starting with the program name.
    ///
    /// # Examples
    /// ```bash
    /// optmatch -g users.yml users add john --password secret
    /// ```
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub arguments: Vec<String>,
}
