use std::fmt::{Display, Formatter};

use serde::Serialize;

/// A value bound to an option after casting.
///
/// Commands and flags always bind `Bool`; terms and params bind whatever
/// their [`crate::arg_type::ArgType`] casts to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl OptionValue {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            OptionValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Floats, and integers widened to floats.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            OptionValue::Float(value) => Some(*value),
            OptionValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl Display for OptionValue {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Bool(value) => write!(formatter, "{value}"),
            OptionValue::Int(value) => write!(formatter, "{value}"),
            OptionValue::Float(value) => write!(formatter, "{value}"),
            OptionValue::Str(value) => formatter.write_str(value),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_match_variant() {
        assert_eq!(OptionValue::Bool(true).as_bool(), Some(true));
        assert_eq!(OptionValue::Int(7).as_int(), Some(7));
        assert_eq!(OptionValue::Int(7).as_float(), Some(7.0));
        assert_eq!(OptionValue::from("x").as_str(), Some("x"));
        assert_eq!(OptionValue::Str("7".to_string()).as_int(), None);
        assert_eq!(OptionValue::Float(1.5).as_bool(), None);
    }

    #[test]
    fn test_display_is_bare() {
        assert_eq!(OptionValue::Bool(false).to_string(), "false");
        assert_eq!(OptionValue::Int(-3).to_string(), "-3");
        assert_eq!(OptionValue::Float(19.99).to_string(), "19.99");
        assert_eq!(OptionValue::from("john").to_string(), "john");
    }

    #[test]
    fn test_serializes_untagged() {
        let yaml = serde_yaml::to_string(&vec![
            OptionValue::Bool(true),
            OptionValue::Int(25),
            OptionValue::from("a b"),
        ])
        .unwrap();
        assert_eq!(yaml, "- true\n- 25\n- a b\n");
    }
}
