//! Optmatch Core Library
//!
//! This crate turns raw process arguments into a validated, structured result
//! against a declared grammar of commands, positional terms, params and flags.
//!
//! # Key Features
//!
//! - **Option Model**: commands, terms, params and flags with globally unique aliases
//! - **Usages**: declared combinations of options, matched first-wins by command
//! - **Typed Values**: 18 argument types, from integers to intervals and file paths
//! - **Error Collection**: every problem with an invocation is reported at once
//! - **Grammar Files**: whole programs declared in YAML
//!
//! # Examples
//!
//! ```
//! use optmatch_core::arg_type::ArgType;
//! use optmatch_core::parser::{OptParser, ParseOutcome};
//!
//! let mut parser = OptParser::new("greet", "Say hello");
//! parser.add_term("who", ArgType::String, "Who to greet")?;
//! parser.add_param(&["times", "t"], ArgType::Int, "Repeat count")?;
//! parser.add_usage_all()?;
//!
//! match parser.parse(&["greet", "world", "-t", "3"]) {
//!     ParseOutcome::Continue(result) => {
//!         assert_eq!(result.get_str("who"), Some("world"));
//!         assert_eq!(result.get_int("times"), Some(3));
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! # Ok::<(), optmatch_core::error::Error>(())
//! ```

pub mod arg_type;
pub mod cast;
pub mod config;
pub mod error;
pub mod file_handling;
pub mod grammar;
pub mod help;
pub mod option;
pub mod parser;
pub mod registry;
pub mod result;
pub mod tokenizer;
pub mod usage;
pub mod value;
