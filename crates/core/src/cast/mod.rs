//! Casting raw argument text into typed option values.
//!
//! Each [`ArgType`] maps to one pure(ish) function from the raw string to an
//! [`OptionValue`]. Path types touch the filesystem to check existence and
//! permissions; everything else is computed from the text alone.

pub mod network;
pub mod numeric;
pub mod path;
pub mod temporal;

use std::sync::Arc;

use thiserror::Error;

use crate::arg_type::ArgType;
use crate::value::OptionValue;

/// Post-cast validator/transformer supplied with a term or param.
///
/// Receives the cast value and returns the final bound value, or a message
/// explaining why the value is rejected.
pub type ValueCallback =
    Arc<dyn Fn(OptionValue) -> std::result::Result<OptionValue, String> + Send + Sync + 'static>;

/// Why a raw value could not be cast.
///
/// The `Display` text ends up verbatim inside field-level parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CastError {
    #[error("Not a valid Boolean")]
    Bool,

    #[error("Not a valid date")]
    Date,

    #[error("Not a valid datetime")]
    Datetime,

    #[error("Not a valid time")]
    Time,

    #[error("Not a valid date interval")]
    Interval,

    #[error("Not a valid domain")]
    Domain,

    #[error("Not a valid email")]
    Email,

    #[error("Not a valid URL")]
    Url,

    #[error("Not a valid IP address")]
    IpAddr,

    #[error("Not a valid MAC address")]
    MacAddr,

    #[error("UUID is not 32 characters")]
    UuidLength,

    #[error("UUID contains invalid characters")]
    UuidCharacters,

    #[error("Not a valid integer")]
    Int,

    #[error("Not a valid floating-point number")]
    Float,

    #[error("Not a valid fixed-point number")]
    Fixed,

    #[error("Path is not a directory")]
    NotADirectory,

    #[error("Directory is not readable")]
    DirectoryNotReadable,

    #[error("Path is not a file")]
    NotAFile,

    #[error("File is not readable")]
    FileNotReadable,

    #[error("File directory is not writable")]
    DirectoryNotWritable,

    #[error("Path has no file name")]
    MissingFileName,

    #[error("{}", _0)]
    Rejected(String),
}

/// Casts `raw` according to `arg_type`.
///
/// # Errors
///
/// Returns the [`CastError`] describing why `raw` is not a valid `arg_type`.
pub fn cast(arg_type: ArgType, raw: &str) -> Result<OptionValue, CastError> {
    let value = match arg_type {
        ArgType::Bool => OptionValue::Bool(numeric::cast_bool(raw)?),
        ArgType::Date => OptionValue::Str(temporal::cast_date(raw)?),
        ArgType::Datetime => OptionValue::Str(temporal::cast_datetime(raw)?),
        ArgType::Dir => OptionValue::Str(path::check_dir(raw)?),
        ArgType::Domain => OptionValue::Str(network::cast_domain(raw)?),
        ArgType::Email => OptionValue::Str(network::cast_email(raw)?),
        ArgType::Fixed => OptionValue::Str(numeric::cast_fixed(raw)?),
        ArgType::Float => OptionValue::Float(numeric::cast_float(raw)?),
        ArgType::Infile => OptionValue::Str(path::check_input_file(raw)?),
        ArgType::Int => OptionValue::Int(numeric::cast_int(raw)?),
        ArgType::Interval => OptionValue::Str(temporal::cast_interval(raw)?),
        ArgType::IpAddr => OptionValue::Str(network::cast_ip_address(raw)?),
        ArgType::MacAddr => OptionValue::Str(network::cast_mac_address(raw)?),
        ArgType::Outfile => OptionValue::Str(path::check_output_file(raw)?),
        ArgType::String => OptionValue::Str(raw.to_string()),
        ArgType::Time => OptionValue::Str(temporal::cast_time(raw)?),
        ArgType::Url => OptionValue::Str(network::cast_url(raw)?),
        ArgType::Uuid => OptionValue::Str(numeric::cast_uuid(raw)?),
    };

    Ok(value)
}

/// Casts `raw` and then runs the optional callback over the result.
///
/// # Errors
///
/// Returns a [`CastError`] if the cast fails, or [`CastError::Rejected`] with
/// the callback's message if the callback refuses the value.
pub fn cast_with_callback(
    arg_type: ArgType,
    raw: &str,
    callback: Option<&ValueCallback>,
) -> Result<OptionValue, CastError> {
    let value = cast(arg_type, raw)?;

    match callback {
        Some(callback) => callback(value).map_err(CastError::Rejected),
        None => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_never_fails() {
        assert_eq!(
            cast(ArgType::String, "John Doe").unwrap(),
            OptionValue::from("John Doe")
        );
        assert_eq!(cast(ArgType::String, "12345").unwrap(), OptionValue::from("12345"));
        assert_eq!(cast(ArgType::String, "").unwrap(), OptionValue::from(""));
    }

    #[test]
    fn test_dispatch_produces_typed_values() {
        assert_eq!(cast(ArgType::Int, "25").unwrap(), OptionValue::Int(25));
        assert_eq!(cast(ArgType::Bool, "yes").unwrap(), OptionValue::Bool(true));
        assert_eq!(cast(ArgType::Float, "19.99").unwrap(), OptionValue::Float(19.99));
        assert_eq!(cast(ArgType::Fixed, "1_000").unwrap(), OptionValue::from("1000"));
    }

    #[test]
    fn test_callback_transforms_value() {
        let double: ValueCallback =
            Arc::new(|value: OptionValue| -> Result<OptionValue, String> {
                match value {
                    OptionValue::Int(number) => Ok(OptionValue::Int(number * 2)),
                    other => Ok(other),
                }
            });

        let result = cast_with_callback(ArgType::Int, "21", Some(&double)).unwrap();
        assert_eq!(result, OptionValue::Int(42));
    }

    #[test]
    fn test_callback_rejection_is_cast_error() {
        let adults_only: ValueCallback =
            Arc::new(|value: OptionValue| -> Result<OptionValue, String> {
                match value.as_int() {
                    Some(age) if age >= 18 => Ok(value),
                    _ => Err("Must be at least 18".to_string()),
                }
            });

        let result = cast_with_callback(ArgType::Int, "12", Some(&adults_only));
        assert_eq!(
            result,
            Err(CastError::Rejected("Must be at least 18".to_string()))
        );
        assert_eq!(result.unwrap_err().to_string(), "Must be at least 18");
    }

    #[test]
    fn test_callback_not_run_when_cast_fails() {
        let never: ValueCallback =
            Arc::new(|_: OptionValue| -> Result<OptionValue, String> {
                panic!("callback should not run")
            });
        let result = cast_with_callback(ArgType::Int, "notanint", Some(&never));
        assert_eq!(result, Err(CastError::Int));
    }
}
