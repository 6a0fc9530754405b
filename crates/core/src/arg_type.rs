use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Type tag attached to every term and param, selecting how its raw text is cast.
///
/// Most tags are plain filters. The ones with side conditions:
/// - `Date`, `Datetime`, `Time`: normalised to `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `HH:MM:SS`
/// - `Interval`: normalised to a `"N unit, N unit"` duration
/// - `Dir`, `Infile`: must exist and be readable
/// - `Outfile`: parent directory must be writable
/// - `Uuid`: accepted with or without hyphens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ArgType {
    Bool,
    Date,
    Datetime,
    Dir,
    Domain,
    Email,
    Fixed,
    Float,
    Infile,
    Interval,
    Int,
    IpAddr,
    MacAddr,
    Outfile,
    String,
    Time,
    Url,
    Uuid,
}

impl ArgType {
    pub const ALL: [ArgType; 18] = [
        ArgType::Bool,
        ArgType::Date,
        ArgType::Datetime,
        ArgType::Dir,
        ArgType::Domain,
        ArgType::Email,
        ArgType::Fixed,
        ArgType::Float,
        ArgType::Infile,
        ArgType::Interval,
        ArgType::Int,
        ArgType::IpAddr,
        ArgType::MacAddr,
        ArgType::Outfile,
        ArgType::String,
        ArgType::Time,
        ArgType::Url,
        ArgType::Uuid,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgType::Bool => "BOOL",
            ArgType::Date => "DATE",
            ArgType::Datetime => "DATETIME",
            ArgType::Dir => "DIR",
            ArgType::Domain => "DOMAIN",
            ArgType::Email => "EMAIL",
            ArgType::Fixed => "FIXED",
            ArgType::Float => "FLOAT",
            ArgType::Infile => "INFILE",
            ArgType::Interval => "INTERVAL",
            ArgType::Int => "INT",
            ArgType::IpAddr => "IP_ADDR",
            ArgType::MacAddr => "MAC_ADDR",
            ArgType::Outfile => "OUTFILE",
            ArgType::String => "STRING",
            ArgType::Time => "TIME",
            ArgType::Url => "URL",
            ArgType::Uuid => "UUID",
        }
    }
}

impl Display for ArgType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ArgType {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let upper = tag.trim().to_uppercase();
        ArgType::ALL
            .iter()
            .find(|arg_type| arg_type.as_str() == upper)
            .copied()
            .ok_or_else(|| Error::UnsupportedArgType(tag.to_string()))
    }
}

impl TryFrom<String> for ArgType {
    type Error = Error;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<ArgType> for String {
    fn from(arg_type: ArgType) -> Self {
        arg_type.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("int".parse::<ArgType>().unwrap(), ArgType::Int);
        assert_eq!("Ip_Addr".parse::<ArgType>().unwrap(), ArgType::IpAddr);
        assert_eq!(" UUID ".parse::<ArgType>().unwrap(), ArgType::Uuid);
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let result = "INVALID_TYPE".parse::<ArgType>();
        assert!(matches!(result, Err(Error::UnsupportedArgType(tag)) if tag == "INVALID_TYPE"));
    }

    #[test]
    fn test_display_round_trips_every_tag() {
        for arg_type in ArgType::ALL {
            assert_eq!(arg_type.to_string().parse::<ArgType>().unwrap(), arg_type);
        }
    }

    #[test]
    fn test_deserialize_from_yaml() {
        let parsed: Vec<ArgType> = serde_yaml::from_str("[STRING, mac_addr]").unwrap();
        assert_eq!(parsed, vec![ArgType::String, ArgType::MacAddr]);

        let invalid: serde_yaml::Result<ArgType> = serde_yaml::from_str("NUMBER");
        assert!(invalid.is_err());
    }
}
