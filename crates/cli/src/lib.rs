//! Optmatch CLI Library
//!
//! This crate provides the `optmatch` command-line tool: it loads a grammar
//! from a YAML file, matches a list of arguments against it and prints either
//! the help text, the bound values, or a report of everything that was wrong.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`driver`]: Grammar loading, matching and exit status
//! - [`report`]: Result formatting and coloured error reports
//! - [`suggestion`]: Fuzzy "did you mean" hints for unknown commands
//!
//! # Examples
//!
//! ```bash
//! # Validate arguments against the default grammar (~/.optmatch/grammar.yml)
//! optmatch users add john --password secret
//!
//! # Use another grammar and print the result as YAML
//! optmatch -g deploy.yml -f yaml deploy push --env prod
//!
//! # Show the help text of the grammar
//! optmatch -g deploy.yml deploy --help
//!
//! # Report errors but exit successfully
//! optmatch --debug users add
//! ```

pub mod cli_args;
pub mod driver;
pub mod report;
pub mod suggestion;
