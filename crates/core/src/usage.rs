use itertools::Itertools;

use crate::error::Error::{MultipleCommands, NotACommand};
use crate::error::Result;
use crate::option::Kind;
use crate::registry::{OptionRegistry, HELP_FLAG};

/// One accepted combination of options.
///
/// Terms keep their declaration order, which is the order they are bound in.
/// Each name appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Usage {
    command: Option<String>,
    terms: Vec<String>,
    params: Vec<String>,
    flags: Vec<String>,
}

impl Usage {
    /// Partitions `option_names` by kind, after an optional explicit `command`.
    ///
    /// # Errors
    ///
    /// Fails if a name is unknown, if `command` is not a command, or if more
    /// than one command ends up in the usage.
    pub fn new<S: AsRef<str>>(
        registry: &OptionRegistry,
        option_names: &[S],
        command: Option<&str>,
    ) -> Result<Self> {
        let mut usage = Usage::default();

        if let Some(command) = command {
            if registry.kind_of(command)? != Kind::Command {
                return Err(NotACommand(command.to_string()));
            }
            usage.command = Some(command.to_string());
        }

        for name in option_names {
            let name = name.as_ref();
            let kind = registry.kind_of(name)?;

            let bucket = match kind {
                Kind::Command => {
                    match &usage.command {
                        Some(existing) if existing == name => continue,
                        Some(_) => return Err(MultipleCommands),
                        None => {}
                    }
                    usage.command = Some(name.to_string());
                    continue;
                }
                Kind::Term => &mut usage.terms,
                Kind::Param => &mut usage.params,
                Kind::Flag => &mut usage.flags,
            };

            if !bucket.iter().any(|existing| existing == name) {
                bucket.push(name.to_string());
            }
        }

        Ok(usage)
    }

    /// The usage holding only the help flag, which every registry carries.
    pub(crate) fn help() -> Self {
        Self {
            flags: vec![HELP_FLAG.to_string()],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn params(&self) -> &[String] {
        &self.params
    }

    #[must_use]
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Every option name in the usage, command first.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.command
            .iter()
            .chain(&self.terms)
            .chain(&self.params)
            .chain(&self.flags)
    }

    /// Renders the usage as an indented help line, e.g. `  prog add username:STRING --verbose`.
    #[must_use]
    pub fn write(&self, program_name: &str, registry: &OptionRegistry) -> String {
        let fragments = self
            .names()
            .filter_map(|name| registry.get(name))
            .map(|option| option.usage_fragment())
            .join(" ");

        if fragments.is_empty() {
            format!("  {program_name}")
        } else {
            format!("  {program_name} {fragments}")
        }
    }
}
