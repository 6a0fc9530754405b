//! Ownership and lookup of every declared option.

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use log::debug;
use regex::Regex;

use crate::arg_type::ArgType;
use crate::cast::ValueCallback;
use crate::error::Error::{DuplicateAlias, InvalidAlias, MissingLongName, NameNotFound};
use crate::error::Result;
use crate::option::{CliOption, Kind, OptionKind};

/// Name of the implicit flag that requests help output.
pub const HELP_FLAG: &str = "help";

// Lower case words separated by hyphens, or a single upper case letter.
static ALIAS_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z][a-z0-9]*(-[a-z0-9]+)*|[A-Z])$").expect("static regex must compile")
});

/// All declared options, in declaration order.
///
/// Every name and alias is unique across the whole registry, regardless of
/// option kind. Uniqueness is enforced when an option is added.
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    options: IndexMap<String, CliOption>,
    all_aliases: HashSet<String>,
}

impl Default for OptionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionRegistry {
    /// Creates a registry holding only the `-h`/`--help` flag.
    #[must_use]
    pub fn new() -> Self {
        let help = CliOption {
            name: HELP_FLAG.to_string(),
            aliases: vec!["h".to_string()],
            description: "Display program help".to_string(),
            kind: OptionKind::Flag,
        };

        let mut registry = Self {
            options: IndexMap::new(),
            all_aliases: HashSet::new(),
        };
        registry.all_aliases.insert(HELP_FLAG.to_string());
        registry.all_aliases.insert("h".to_string());
        registry.options.insert(HELP_FLAG.to_string(), help);
        registry
    }

    /// # Errors
    ///
    /// Fails if no alias is longer than one character, an alias has the wrong
    /// shape, or any alias is already registered.
    pub fn add_command(&mut self, aliases: &[&str], description: &str) -> Result<&CliOption> {
        let (name, others) = self.pick_name(aliases)?;
        self.insert(name, others, description, OptionKind::Command)
    }

    /// # Errors
    ///
    /// Fails if no alias is longer than one character, an alias has the wrong
    /// shape, or any alias is already registered.
    pub fn add_flag(&mut self, aliases: &[&str], description: &str) -> Result<&CliOption> {
        let (name, others) = self.pick_name(aliases)?;
        self.insert(name, others, description, OptionKind::Flag)
    }

    /// # Errors
    ///
    /// Fails if no alias is longer than one character, an alias has the wrong
    /// shape, or any alias is already registered.
    pub fn add_param(
        &mut self,
        aliases: &[&str],
        arg_type: ArgType,
        description: &str,
        callback: Option<ValueCallback>,
    ) -> Result<&CliOption> {
        let (name, others) = self.pick_name(aliases)?;
        self.insert(
            name,
            others,
            description,
            OptionKind::Param { arg_type, callback },
        )
    }

    /// Terms have a single name and no aliases.
    ///
    /// # Errors
    ///
    /// Fails if the name is already registered.
    pub fn add_term(
        &mut self,
        name: &str,
        arg_type: ArgType,
        description: &str,
        callback: Option<ValueCallback>,
    ) -> Result<&CliOption> {
        self.check_alias(name)?;
        self.insert(
            name.to_string(),
            Vec::new(),
            description,
            OptionKind::Term { arg_type, callback },
        )
    }

    fn insert(
        &mut self,
        name: String,
        aliases: Vec<String>,
        description: &str,
        kind: OptionKind,
    ) -> Result<&CliOption> {
        let option = CliOption {
            name: name.clone(),
            aliases,
            description: description.to_string(),
            kind,
        };
        debug!("Registered {} `{}`", option.kind(), name);

        Ok(self.options.entry(name).or_insert(option))
    }

    fn check_alias(&mut self, alias: &str) -> Result<()> {
        if !self.all_aliases.insert(alias.to_string()) {
            return Err(DuplicateAlias(alias.to_string()));
        }

        Ok(())
    }

    /// The first alias longer than one character becomes the name; the rest stay aliases.
    fn pick_name(&mut self, aliases: &[&str]) -> Result<(String, Vec<String>)> {
        let name_index = aliases
            .iter()
            .position(|alias| alias.chars().count() > 1)
            .ok_or_else(|| MissingLongName(aliases.iter().map(ToString::to_string).collect()))?;

        let others: Vec<String> = aliases
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != name_index)
            .map(|(_, alias)| (*alias).to_string())
            .collect();

        if let Some(invalid) = others.iter().find(|alias| !ALIAS_SHAPE.is_match(alias)) {
            return Err(InvalidAlias(invalid.clone()));
        }

        let mut seen = HashSet::new();
        for alias in aliases {
            if self.all_aliases.contains(*alias) || !seen.insert(*alias) {
                return Err(DuplicateAlias((*alias).to_string()));
            }
        }

        for alias in aliases {
            self.check_alias(alias)?;
        }

        Ok((aliases[name_index].to_string(), others))
    }

    /// Looks an option up by its canonical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CliOption> {
        self.options.get(name)
    }

    /// # Errors
    ///
    /// Returns [`NameNotFound`] if no option has this canonical name.
    pub fn require(&self, name: &str) -> Result<&CliOption> {
        self.get(name).ok_or_else(|| NameNotFound(name.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`NameNotFound`] if no option has this canonical name.
    pub fn kind_of(&self, name: &str) -> Result<Kind> {
        self.require(name).map(CliOption::kind)
    }

    pub fn options_of_kind(&self, kind: Kind) -> impl Iterator<Item = &CliOption> {
        self.options.values().filter(move |option| option.kind() == kind)
    }

    #[must_use]
    pub fn names_of_kind(&self, kind: Kind) -> Vec<String> {
        self.options_of_kind(kind)
            .map(|option| option.name.clone())
            .collect()
    }

    #[must_use]
    pub fn has_kind(&self, kind: Kind) -> bool {
        self.options_of_kind(kind).next().is_some()
    }

    /// Every canonical name, grouped as commands, terms, params, then flags.
    #[must_use]
    pub fn all_names(&self) -> Vec<String> {
        [Kind::Command, Kind::Term, Kind::Param, Kind::Flag]
            .into_iter()
            .flat_map(|kind| self.names_of_kind(kind))
            .collect()
    }

    /// Finds the command whose name or alias is `input`.
    #[must_use]
    pub fn find_command(&self, input: &str) -> Option<&CliOption> {
        self.options_of_kind(Kind::Command)
            .find(|option| option.matches_name(input))
    }

    #[must_use]
    pub fn help_flag(&self) -> Option<&CliOption> {
        self.get(HELP_FLAG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_new_registers_help() {
        let registry = OptionRegistry::new();
        let help = registry.help_flag().unwrap();
        assert_eq!(help.kind(), Kind::Flag);
        assert!(help.matches_name("h"));
        assert!(help.matches_name("help"));
        assert_eq!(registry.all_names(), vec!["help"]);
    }

    #[test]
    fn test_pick_name_uses_first_long_alias() {
        let mut registry = OptionRegistry::new();
        let option = registry
            .add_flag(&["v", "verbose", "loud"], "Verbose output")
            .unwrap();
        assert_eq!(option.name, "verbose");
        assert_eq!(option.aliases, vec!["v", "loud"]);
    }

    #[test]
    fn test_missing_long_name() {
        let mut registry = OptionRegistry::new();
        let result = registry.add_flag(&["v", "q"], "Short only");
        assert!(matches!(result, Err(Error::MissingLongName(_))));
    }

    #[test]
    fn test_invalid_alias_shape() {
        let mut registry = OptionRegistry::new();
        assert!(matches!(
            registry.add_flag(&["verbose", "Verb"], "Bad alias"),
            Err(Error::InvalidAlias(alias)) if alias == "Verb"
        ));
        assert!(matches!(
            registry.add_flag(&["verbose", "dry_run"], "Bad alias"),
            Err(Error::InvalidAlias(_))
        ));
        assert!(registry.add_flag(&["verbose", "V", "be-loud"], "Ok").is_ok());
    }

    #[test]
    fn test_duplicate_alias_across_kinds() {
        let mut registry = OptionRegistry::new();
        registry.add_command(&["add", "a"], "Add a user").unwrap();

        assert!(matches!(
            registry.add_flag(&["all", "a"], "All"),
            Err(Error::DuplicateAlias(alias)) if alias == "a"
        ));
        assert!(matches!(
            registry.add_term("add", ArgType::String, "Clash", None),
            Err(Error::DuplicateAlias(_))
        ));
        assert!(matches!(
            registry.add_param(&["host", "h"], ArgType::Domain, "Clash with help", None),
            Err(Error::DuplicateAlias(_))
        ));
    }

    #[test]
    fn test_failed_registration_leaves_no_trace() {
        let mut registry = OptionRegistry::new();
        assert!(registry.add_flag(&["all", "h"], "Clashes with help").is_err());
        // `all` was not reserved by the failed attempt
        assert!(registry.add_flag(&["all"], "All").is_ok());
    }

    #[test]
    fn test_repeated_alias_within_one_declaration() {
        let mut registry = OptionRegistry::new();
        assert!(matches!(
            registry.add_flag(&["verbose", "v", "v"], "Twice"),
            Err(Error::DuplicateAlias(_))
        ));
    }

    #[test]
    fn test_lookup_by_kind() {
        let mut registry = OptionRegistry::new();
        registry.add_flag(&["verbose", "v"], "Verbose").unwrap();
        registry
            .add_param(&["password", "p"], ArgType::String, "Password", None)
            .unwrap();
        registry
            .add_term("username", ArgType::String, "Username", None)
            .unwrap();
        registry.add_command(&["add", "a"], "Add").unwrap();

        assert_eq!(
            registry.all_names(),
            vec!["add", "username", "password", "help", "verbose"]
        );
        assert_eq!(registry.kind_of("username").unwrap(), Kind::Term);
        assert!(matches!(
            registry.kind_of("missing"),
            Err(Error::NameNotFound(_))
        ));
        assert!(registry.has_kind(Kind::Command));
        assert_eq!(registry.find_command("a").unwrap().name, "add");
        assert!(registry.find_command("username").is_none());
    }
}
