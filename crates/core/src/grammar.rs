use std::fmt::{Display, Formatter};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::arg_type::ArgType;
use crate::error::Result;
use crate::parser::OptParser;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CommandDefinition {
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TermDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub arg_type: ArgType,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ParamDefinition {
    pub aliases: Vec<String>,
    #[serde(rename = "type")]
    pub arg_type: ArgType,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct FlagDefinition {
    pub aliases: Vec<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct UsageDefinition {
    pub command: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl Display for UsageDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.options.is_empty() {
            formatter.write_str(&self.command)
        } else {
            write!(formatter, "{} {}", self.command, self.options.join(" "))
        }
    }
}

/// A whole program grammar as written in a YAML file.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct GrammarDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub commands: Vec<CommandDefinition>,
    #[serde(default)]
    pub terms: Vec<TermDefinition>,
    #[serde(default)]
    pub params: Vec<ParamDefinition>,
    #[serde(default)]
    pub flags: Vec<FlagDefinition>,
    #[serde(default)]
    pub usages: Vec<UsageDefinition>,
    #[serde(default)]
    pub usage_all: bool,
}

impl Display for GrammarDefinition {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            formatter.write_str(&self.name)
        } else {
            write!(formatter, "{} ({})", self.name, self.description)
        }
    }
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

impl GrammarDefinition {
    /// True if the grammar declares neither options nor usages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
            && self.terms.is_empty()
            && self.params.is_empty()
            && self.flags.is_empty()
            && self.usages.is_empty()
            && !self.usage_all
    }

    /// Replays the declarations into a parser: commands, terms, params,
    /// flags, then usages.
    ///
    /// # Errors
    ///
    /// Returns the first declaration error, e.g. a duplicate alias or a usage
    /// naming an unknown option.
    pub fn build(&self) -> Result<OptParser> {
        let mut parser = OptParser::new(&self.name, &self.description);

        for command in &self.commands {
            parser.add_command(&as_strs(&command.aliases), &command.description)?;
        }

        for term in &self.terms {
            parser.add_term(&term.name, term.arg_type, &term.description)?;
        }

        for param in &self.params {
            parser.add_param(&as_strs(&param.aliases), param.arg_type, &param.description)?;
        }

        for flag in &self.flags {
            parser.add_flag(&as_strs(&flag.aliases), &flag.description)?;
        }

        for usage in &self.usages {
            debug!("Adding usage `{}`", usage);
            parser.add_usage(&usage.command, usage.options.as_slice())?;
        }

        if self.usage_all {
            parser.add_usage_all()?;
        }

        Ok(parser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const USER_ADMIN: &str = r#"
name: User admin
description: Add and delete users
commands:
  - aliases: [add, a]
    description: Add a user
  - aliases: [delete, d]
    description: Delete a user
terms:
  - name: username
    type: STRING
    description: Login name
params:
  - aliases: [password, p]
    type: string
    description: Password
flags:
  - aliases: [verbose, v]
    description: Verbose output
usages:
  - command: add
    options: [username, password, verbose]
  - command: delete
    options: [username]
"#;

    #[test]
    fn test_deserialize() {
        let grammar: GrammarDefinition = serde_yaml::from_str(USER_ADMIN).unwrap();
        assert_eq!(grammar.name, "User admin");
        assert_eq!(grammar.commands.len(), 2);
        assert_eq!(grammar.terms[0].arg_type, ArgType::String);
        assert_eq!(grammar.params[0].arg_type, ArgType::String);
        assert_eq!(grammar.usages[1].to_string(), "delete username");
        assert!(!grammar.usage_all);
        assert!(!grammar.is_empty());
    }

    #[test]
    fn test_build() {
        let grammar: GrammarDefinition = serde_yaml::from_str(USER_ADMIN).unwrap();
        let parser = grammar.build().unwrap();

        assert_eq!(parser.usages().len(), 3);
        assert!(parser.requires_command());

        let outcome = parser.parse(&["users", "add", "john", "-p", "secret"]);
        assert!(outcome.is_success());
        assert_eq!(outcome.result().unwrap().get_str("password"), Some("secret"));
    }

    #[test]
    fn test_build_usage_all() {
        let grammar: GrammarDefinition = serde_yaml::from_str(
            r#"
name: copy
flags:
  - aliases: [force, f]
usage_all: true
"#,
        )
        .unwrap();

        let parser = grammar.build().unwrap();
        assert!(!parser.requires_command());
        assert!(parser.parse(&["copy", "-f"]).is_success());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: serde_yaml::Result<GrammarDefinition> = serde_yaml::from_str(
            r#"
name: broken
terms:
  - name: count
    type: NUMBER
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_reports_declaration_errors() {
        let grammar = GrammarDefinition {
            name: "broken".to_string(),
            flags: vec![
                FlagDefinition {
                    aliases: vec!["verbose".to_string(), "v".to_string()],
                    description: String::new(),
                },
                FlagDefinition {
                    aliases: vec!["version".to_string(), "v".to_string()],
                    description: String::new(),
                },
            ],
            ..GrammarDefinition::default()
        };

        assert!(matches!(grammar.build(), Err(Error::DuplicateAlias(alias)) if alias == "v"));
    }

    #[test]
    fn test_empty() {
        let grammar: GrammarDefinition = serde_yaml::from_str("name: nothing").unwrap();
        assert!(grammar.is_empty());
        assert_eq!(grammar.to_string(), "nothing");
    }
}
