//! Declaring a program's options and usages, and matching arguments against them.

use std::collections::VecDeque;
use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::arg_type::ArgType;
use crate::cast::ValueCallback;
use crate::error::Error::{CommandRequired, DeclarationAfterUsage, NotACommand};
use crate::error::Result;
use crate::help::render_help;
use crate::option::{CliOption, Kind};
use crate::registry::{OptionRegistry, HELP_FLAG};
use crate::result::OptResult;
use crate::tokenizer::{tokenize, Tokens};
use crate::usage::Usage;
use crate::value::OptionValue;

/// How a call to [`OptParser::parse`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// A usage was matched. The result may still carry field-level errors.
    Continue(OptResult),
    /// `-h` or `--help` was given; holds the rendered help text.
    HelpRequested(String),
    /// Matching stopped on a structural problem; the result holds the errors.
    FatalError(OptResult),
}

impl ParseOutcome {
    /// True for a matched usage without any errors.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Continue(result) if !result.has_errors())
    }

    #[must_use]
    pub fn result(&self) -> Option<&OptResult> {
        match self {
            ParseOutcome::Continue(result) | ParseOutcome::FatalError(result) => Some(result),
            ParseOutcome::HelpRequested(_) => None,
        }
    }

    #[must_use]
    pub fn into_result(self) -> Option<OptResult> {
        match self {
            ParseOutcome::Continue(result) | ParseOutcome::FatalError(result) => Some(result),
            ParseOutcome::HelpRequested(_) => None,
        }
    }
}

/// A program's declared grammar.
///
/// Options are declared first, then usages. Once built, the parser is only
/// read by [`OptParser::parse`], so one instance can serve many threads.
///
/// ```
/// use optmatch_core::arg_type::ArgType;
/// use optmatch_core::parser::OptParser;
///
/// let mut parser = OptParser::new("users", "Manage users");
/// parser.add_command(&["add", "a"], "Add a user").unwrap();
/// parser.add_term("username", ArgType::String, "Login name").unwrap();
/// parser.add_flag(&["verbose", "v"], "Verbose output").unwrap();
/// parser.add_usage("add", &["username", "verbose"]).unwrap();
///
/// let outcome = parser.parse(&["users", "a", "john", "-v"]);
/// assert!(outcome.is_success());
///
/// let result = outcome.result().unwrap();
/// assert_eq!(result.command(), Some("add"));
/// assert_eq!(result.get_str("username"), Some("john"));
/// assert!(result.get_bool("verbose"));
/// ```
#[derive(Debug, Clone)]
pub struct OptParser {
    name: String,
    description: String,
    registry: OptionRegistry,
    usages: Vec<Usage>,
    all_commands: Option<bool>,
}

impl OptParser {
    #[must_use]
    pub fn new(name: &str, description: &str) -> Self {
        let registry = OptionRegistry::new();

        Self {
            name: name.to_string(),
            description: description.to_string(),
            registry,
            usages: vec![Usage::help()],
            all_commands: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// All usages, the implicit help usage first.
    #[must_use]
    pub fn usages(&self) -> &[Usage] {
        &self.usages
    }

    /// Whether the first unmarked argument must name a command.
    #[must_use]
    pub fn requires_command(&self) -> bool {
        self.all_commands.unwrap_or(false)
    }

    fn check_declaration(&self, kind: Kind) -> Result<()> {
        if self.usages.len() > 1 {
            return Err(DeclarationAfterUsage(kind.to_string()));
        }

        Ok(())
    }

    /// # Errors
    ///
    /// Fails after the first usage, or if the aliases are rejected by the registry.
    pub fn add_command(&mut self, aliases: &[&str], description: &str) -> Result<&mut Self> {
        self.check_declaration(Kind::Command)?;
        self.registry.add_command(aliases, description)?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Fails after the first usage, or if the name is already taken.
    pub fn add_term(
        &mut self,
        name: &str,
        arg_type: ArgType,
        description: &str,
    ) -> Result<&mut Self> {
        self.check_declaration(Kind::Term)?;
        self.registry.add_term(name, arg_type, description, None)?;
        Ok(self)
    }

    /// Declares a term whose cast value is passed through `callback`.
    ///
    /// # Errors
    ///
    /// Fails after the first usage, or if the name is already taken.
    pub fn add_term_with<F>(
        &mut self,
        name: &str,
        arg_type: ArgType,
        description: &str,
        callback: F,
    ) -> Result<&mut Self>
    where
        F: Fn(OptionValue) -> std::result::Result<OptionValue, String> + Send + Sync + 'static,
    {
        self.check_declaration(Kind::Term)?;
        let callback: ValueCallback = Arc::new(callback);
        self.registry
            .add_term(name, arg_type, description, Some(callback))?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Fails after the first usage, or if the aliases are rejected by the registry.
    pub fn add_param(
        &mut self,
        aliases: &[&str],
        arg_type: ArgType,
        description: &str,
    ) -> Result<&mut Self> {
        self.check_declaration(Kind::Param)?;
        self.registry
            .add_param(aliases, arg_type, description, None)?;
        Ok(self)
    }

    /// Declares a param whose cast value is passed through `callback`.
    ///
    /// # Errors
    ///
    /// Fails after the first usage, or if the aliases are rejected by the registry.
    pub fn add_param_with<F>(
        &mut self,
        aliases: &[&str],
        arg_type: ArgType,
        description: &str,
        callback: F,
    ) -> Result<&mut Self>
    where
        F: Fn(OptionValue) -> std::result::Result<OptionValue, String> + Send + Sync + 'static,
    {
        self.check_declaration(Kind::Param)?;
        let callback: ValueCallback = Arc::new(callback);
        self.registry
            .add_param(aliases, arg_type, description, Some(callback))?;
        Ok(self)
    }

    /// # Errors
    ///
    /// Fails after the first usage, or if the aliases are rejected by the registry.
    pub fn add_flag(&mut self, aliases: &[&str], description: &str) -> Result<&mut Self> {
        self.check_declaration(Kind::Flag)?;
        self.registry.add_flag(aliases, description)?;
        Ok(self)
    }

    /// Adds a usage selected by `command` and accepting `option_names`.
    ///
    /// # Errors
    ///
    /// Fails if `command` is not a declared command, a name is unknown, the
    /// usage would hold two commands, or an earlier usage was declared without
    /// a command.
    pub fn add_usage<S: AsRef<str>>(
        &mut self,
        command: &str,
        option_names: &[S],
    ) -> Result<&mut Self> {
        if self.registry.kind_of(command)? != Kind::Command {
            return Err(NotACommand(command.to_string()));
        }

        if self.all_commands == Some(false) {
            return Err(CommandRequired);
        }

        let usage = Usage::new(&self.registry, option_names, Some(command))?;
        debug!("Declared usage for command `{}`", command);

        self.all_commands = Some(true);
        self.usages.push(usage);
        Ok(self)
    }

    /// Adds one usage holding every declared option except help.
    ///
    /// # Errors
    ///
    /// Fails if more than one command is declared, or if this would mix
    /// usages with and without commands.
    pub fn add_usage_all(&mut self) -> Result<&mut Self> {
        let has_command = self.registry.has_kind(Kind::Command);

        match self.all_commands {
            Some(false) => return Err(CommandRequired),
            Some(true) if !has_command => return Err(CommandRequired),
            _ => {}
        }

        let names: Vec<String> = self
            .registry
            .all_names()
            .into_iter()
            .filter(|name| name != HELP_FLAG)
            .collect();
        let usage = Usage::new(&self.registry, &names, None)?;
        debug!("Declared usage with all {} option(s)", names.len());

        self.all_commands = Some(has_command);
        self.usages.push(usage);
        Ok(self)
    }

    /// The help text, with usage lines written for `program_name`.
    #[must_use]
    pub fn help(&self, program_name: &str) -> String {
        render_help(
            &self.name,
            &self.description,
            program_name,
            &self.usages,
            &self.registry,
        )
    }

    /// Matches `args` (program path first) against the declared usages.
    ///
    /// Help wins over everything else. Tokenizer errors, a missing or unknown
    /// command and the absence of any matching usage end matching early.
    /// Problems with individual values are all collected into the result.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> ParseOutcome {
        let Tokens {
            program_name,
            marked,
            unmarked,
            non_options,
            errors,
        } = tokenize(args);

        if let Some(help) = self.registry.help_flag() {
            if marked.keys().any(|name| help.matches_name(name)) {
                debug!("Help requested");
                return ParseOutcome::HelpRequested(self.help(&program_name));
            }
        }

        let mut result = OptResult::new(non_options);

        if !errors.is_empty() {
            for error in errors {
                result.add_error(error);
            }
            return fatal(result);
        }

        let mut unmarked: VecDeque<String> = unmarked.into();

        let command = if self.requires_command() {
            let Some(input) = unmarked.pop_front() else {
                result.add_error("Command name not provided");
                return fatal(result);
            };

            match self.registry.find_command(&input) {
                Some(command) => Some(command.name.as_str()),
                None => {
                    result.add_error(format!("Command name not recognized: \"{input}\""));
                    return fatal(result);
                }
            }
        } else {
            None
        };

        // The help usage is never matched; it exists only for help output.
        let Some(usage) = self.usages.iter().skip(1).find(|usage| match command {
            Some(command) => usage.command() == Some(command),
            None => true,
        }) else {
            result.add_error("Matching usage not found");
            return fatal(result);
        };

        if let Some(command) = command {
            result.set_command(command);
        }

        self.bind_terms(usage, &mut unmarked, &mut result);
        self.bind_named(usage, marked, &mut result);

        info!(
            "Matched usage `{}` with {} error(s)",
            usage.write(&program_name, &self.registry).trim(),
            result.errors().len()
        );

        ParseOutcome::Continue(result)
    }

    /// Binds terms positionally and reports any unmarked input left over.
    fn bind_terms(&self, usage: &Usage, unmarked: &mut VecDeque<String>, result: &mut OptResult) {
        for term in self.options(usage.terms()) {
            let Some(raw) = unmarked.pop_front() else {
                result.add_error(format!("Missing term: \"{}\"", term.name));
                continue;
            };

            match term.cast_value(&raw) {
                Ok(value) => {
                    debug!("Bound term `{}` to `{}`", term.name, value);
                    result.set_value(&term.name, value);
                }
                Err(e) => {
                    result.add_error(format!(
                        "Term \"{}\" has invalid argument \"{}\": {}",
                        term.name, raw, e
                    ));
                }
            }
        }

        for input in unmarked.drain(..) {
            result.add_error(format!("Unused input: \"{input}\""));
        }
    }

    /// Binds flags then params by name, and reports marked input nothing claimed.
    fn bind_named(
        &self,
        usage: &Usage,
        mut marked: IndexMap<String, String>,
        result: &mut OptResult,
    ) {
        for flag in self.options(usage.flags()) {
            match take_marked(&mut marked, flag) {
                Some(value) => {
                    debug!("Bound flag `{}`", flag.name);
                    result.set_value(&flag.name, OptionValue::Bool(true));
                    if !value.is_empty() {
                        result.add_error(format!(
                            "Argument passed to flag \"{}\": \"{}\"",
                            flag.name, value
                        ));
                    }
                }
                None => result.set_value(&flag.name, OptionValue::Bool(false)),
            }
        }

        for param in self.options(usage.params()) {
            let Some(raw) = take_marked(&mut marked, param) else {
                continue;
            };

            if raw.is_empty() {
                result.add_error(format!("No value passed to param \"{}\"", param.name));
                continue;
            }

            match param.cast_value(&raw) {
                Ok(value) => {
                    debug!("Bound param `{}` to `{}`", param.name, value);
                    result.set_value(&param.name, value);
                }
                Err(e) => {
                    result.add_error(format!(
                        "Param \"{}\" has invalid argument \"{}\": {}",
                        param.name, raw, e
                    ));
                }
            }
        }

        for (name, value) in marked {
            result.add_error(format!("Unused input for \"{name}\": \"{value}\""));
        }
    }

    fn options<'a>(&'a self, names: &'a [String]) -> impl Iterator<Item = &'a CliOption> + 'a {
        names.iter().filter_map(|name| self.registry.get(name))
    }
}

/// Removes the first marked option addressed by `option`'s name or an alias.
fn take_marked(marked: &mut IndexMap<String, String>, option: &CliOption) -> Option<String> {
    let index = marked.keys().position(|name| option.matches_name(name))?;
    marked.shift_remove_index(index).map(|(_, value)| value)
}

fn fatal(result: OptResult) -> ParseOutcome {
    warn!("Matching stopped: {}", result.errors().join("; "));
    ParseOutcome::FatalError(result)
}
