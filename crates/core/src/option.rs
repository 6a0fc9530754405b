//! The four kinds of declared option and what they share.

use std::fmt::{Debug, Display, Formatter};

use crate::arg_type::ArgType;
use crate::cast::{cast_with_callback, CastError, ValueCallback};
use crate::value::OptionValue;

/// Discriminant of [`OptionKind`], used for lookups and usage partitioning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Command,
    Term,
    Param,
    Flag,
}

impl Kind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Command => "command",
            Kind::Term => "term",
            Kind::Param => "param",
            Kind::Flag => "flag",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Kind-specific payload of a declared option.
#[derive(Clone)]
pub enum OptionKind {
    /// A fixed keyword selecting a usage.
    Command,
    /// A positional, typed value bound in declaration order.
    Term {
        arg_type: ArgType,
        callback: Option<ValueCallback>,
    },
    /// A named, typed value given as `--name=value` or `-n value`.
    Param {
        arg_type: ArgType,
        callback: Option<ValueCallback>,
    },
    /// A named boolean switch that takes no value.
    Flag,
}

impl Debug for OptionKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionKind::Command => formatter.write_str("Command"),
            OptionKind::Flag => formatter.write_str("Flag"),
            OptionKind::Term { arg_type, callback } => formatter
                .debug_struct("Term")
                .field("arg_type", arg_type)
                .field("callback", &callback.is_some())
                .finish(),
            OptionKind::Param { arg_type, callback } => formatter
                .debug_struct("Param")
                .field("arg_type", arg_type)
                .field("callback", &callback.is_some())
                .finish(),
        }
    }
}

/// A declared command, term, param or flag.
#[derive(Debug, Clone)]
pub struct CliOption {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub kind: OptionKind,
}

impl CliOption {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self.kind {
            OptionKind::Command => Kind::Command,
            OptionKind::Term { .. } => Kind::Term,
            OptionKind::Param { .. } => Kind::Param,
            OptionKind::Flag => Kind::Flag,
        }
    }

    /// Lower case kind label used in messages and logs.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        self.kind().as_str()
    }

    #[must_use]
    pub fn arg_type(&self) -> Option<ArgType> {
        match &self.kind {
            OptionKind::Term { arg_type, .. } | OptionKind::Param { arg_type, .. } => {
                Some(*arg_type)
            }
            OptionKind::Command | OptionKind::Flag => None,
        }
    }

    /// True if `input` is this option's name or one of its aliases.
    #[must_use]
    pub fn matches_name(&self, input: &str) -> bool {
        self.name == input || self.aliases.iter().any(|alias| alias == input)
    }

    /// Casts a raw value for a term or param, running its callback if any.
    ///
    /// # Errors
    ///
    /// Returns a [`CastError`] if the value does not fit the option's type or
    /// the callback rejects it. Commands and flags cast to `true` regardless.
    pub fn cast_value(&self, raw: &str) -> Result<OptionValue, CastError> {
        match &self.kind {
            OptionKind::Term { arg_type, callback } | OptionKind::Param { arg_type, callback } => {
                cast_with_callback(*arg_type, raw, callback.as_ref())
            }
            OptionKind::Command | OptionKind::Flag => Ok(OptionValue::Bool(true)),
        }
    }

    /// How this option appears in a usage line.
    #[must_use]
    pub fn usage_fragment(&self) -> String {
        match &self.kind {
            OptionKind::Command => self.name.clone(),
            OptionKind::Term { arg_type, .. } => format!("{}:{}", self.name, arg_type),
            OptionKind::Param { arg_type, .. } => {
                format!("{}={}", hyphenate(&self.name), arg_type)
            }
            OptionKind::Flag => hyphenate(&self.name),
        }
    }
}

/// `-x` for single-character names, `--name` otherwise.
#[must_use]
pub fn hyphenate(alias: &str) -> String {
    if alias.chars().count() == 1 {
        format!("-{alias}")
    } else {
        format!("--{alias}")
    }
}
