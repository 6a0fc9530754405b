use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::value::OptionValue;

static CASE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex must compile"));

/// What came out of matching one set of arguments against the declared usages.
///
/// Matched commands and flags map to `true`, flags absent from the input map
/// to `false`, and terms and params map to their cast values. Options that
/// were never supplied or failed to cast have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OptResult {
    command: Option<String>,
    values: IndexMap<String, OptionValue>,
    non_options: Vec<String>,
    errors: Vec<String>,
}

impl OptResult {
    #[must_use]
    pub fn new(non_options: Vec<String>) -> Self {
        Self {
            non_options,
            ..Self::default()
        }
    }

    /// The canonical name of the matched command, if any.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Looks up a value by a `snake_case` or `camelCase` spelling of its
    /// kebab-case option name, so `dry_run` and `dryRun` both find `dry-run`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&OptionValue> {
        self.get(&kebab_case(name))
    }

    /// True only if `name` is bound to `true`.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).and_then(OptionValue::as_bool).unwrap_or(false)
    }

    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(OptionValue::as_int)
    }

    #[must_use]
    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(OptionValue::as_float)
    }

    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    #[must_use]
    pub fn values(&self) -> &IndexMap<String, OptionValue> {
        &self.values
    }

    #[must_use]
    pub fn non_options(&self) -> &[String] {
        &self.non_options
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: impl Into<String>) -> &mut Self {
        self.errors.push(error.into());
        self
    }

    pub(crate) fn set_command(&mut self, command: &str) {
        self.command = Some(command.to_string());
        self.values
            .insert(command.to_string(), OptionValue::Bool(true));
    }

    pub(crate) fn set_value(&mut self, name: &str, value: OptionValue) {
        self.values.insert(name.to_string(), value);
    }

    /// The block shown to a user when matching failed, or `None` without errors.
    ///
    /// ```text
    /// Errors found in matching usage for command "add":
    /// * Missing term: "username"
    ///
    /// Program terminating. Run again with --help for help.
    /// ```
    #[must_use]
    pub fn error_report(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }

        let mut report = String::from("Errors found in matching usage");
        if let Some(command) = &self.command {
            report.push_str(&format!(" for command \"{command}\""));
        }
        report.push_str(":\n");

        for error in &self.errors {
            report.push_str(&format!("* {error}\n"));
        }

        report.push_str("\nProgram terminating. Run again with --help for help.");
        Some(report)
    }
}

fn kebab_case(name: &str) -> String {
    CASE_BOUNDARY
        .replace_all(name, "$1-$2")
        .replace('_', "-")
        .to_lowercase()
}
