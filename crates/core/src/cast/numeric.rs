//! Boolean, numeric and UUID casts.

use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use super::CastError;

static DECIMAL_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(0|[1-9][0-9]*)$").expect("static regex must compile"));

static HEX_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[xX]([0-9a-fA-F]+)$").expect("static regex must compile"));

static OCTAL_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0[oO]?([0-7]+)$").expect("static regex must compile"));

// Thousands groups must be complete (`1,000` not `1,00`).
static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("static regex must compile")
});

static FIXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?[0-9]+([,_][0-9]{3})*(\.[0-9]+)?$").expect("static regex must compile")
});

/// Accepts `true/false`, `1/0`, `yes/no` and `on/off`, ignoring case and
/// surrounding whitespace. An empty string is `false`.
pub fn cast_bool(value: &str) -> Result<bool, CastError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" | "" => Ok(false),
        _ => Err(CastError::Bool),
    }
}

/// Decimal, `0x` hexadecimal or `0`/`0o` octal integers in `i64` range.
pub fn cast_int(value: &str) -> Result<i64, CastError> {
    let value = value.trim();

    let parsed = if DECIMAL_INT.is_match(value) {
        value.parse::<i64>()
    } else if let Some(captures) = HEX_INT.captures(value) {
        i64::from_str_radix(&captures[1], 16)
    } else if let Some(captures) = OCTAL_INT.captures(value) {
        i64::from_str_radix(&captures[1], 8)
    } else {
        return Err(CastError::Int);
    };

    parsed.map_err(|_| CastError::Int)
}

/// Decimal or scientific floats; `,` thousands separators are allowed.
pub fn cast_float(value: &str) -> Result<f64, CastError> {
    let value = value.trim();
    if !FLOAT.is_match(value) {
        return Err(CastError::Float);
    }

    value
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| CastError::Float)
}

/// Fixed-point decimals kept as text, with `,`/`_` separators stripped.
pub fn cast_fixed(value: &str) -> Result<String, CastError> {
    if FIXED.is_match(value) {
        Ok(value.replace([',', '_'], ""))
    } else {
        Err(CastError::Fixed)
    }
}

/// 32 hex digits with or without hyphens, returned in hyphenated form.
pub fn cast_uuid(value: &str) -> Result<String, CastError> {
    let digits = value.replace('-', "");

    if digits.len() != 32 {
        return Err(CastError::UuidLength);
    }

    // `Uuid::try_parse` would also take braced and URN forms; only bare hex is allowed here.
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CastError::UuidCharacters);
    }

    let uuid = Uuid::try_parse(&digits).map_err(|_| CastError::UuidCharacters)?;

    Ok(uuid.hyphenated().to_string())
}
