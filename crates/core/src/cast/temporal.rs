//! Date, time and interval casts.
//!
//! Inputs are interpreted in local time. A bare date means midnight of that
//! day and a bare time means that time today, so `DATE`, `DATETIME` and `TIME`
//! all go through the same [`parse_moment`] and only differ in output format.
//!
//! Intervals are normalised with fixed unit lengths (a year is 365 days and a
//! month is 30 days); relative moments such as `+1 month` use calendar months.
//! Short units are case-sensitive only where they clash: `M` is a month and
//! `m` a minute.

use std::sync::LazyLock;

use chrono::{DateTime, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use regex::Regex;

use super::CastError;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_MONTH: i64 = 30 * SECONDS_PER_DAY;
const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;

const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d-%m-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

const TIME_FORMATS: [&str; 4] = ["%H:%M:%S", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Largest-first units used when writing a normalised interval.
const INTERVAL_UNITS: [(i64, &str); 6] = [
    (SECONDS_PER_YEAR, "year"),
    (SECONDS_PER_MONTH, "month"),
    (SECONDS_PER_DAY, "day"),
    (SECONDS_PER_HOUR, "hour"),
    (SECONDS_PER_MINUTE, "minute"),
    (1, "second"),
];

static ORDINAL_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([0-9]{1,2})(?:st|nd|rd|th)\b").expect("static regex must compile")
});

static HOUR_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([0-9]{1,2})\s*([ap])\.?m\.?$").expect("static regex must compile")
});

static INTERVAL_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([+-]?[0-9]+)\s*([A-Za-z]+)").expect("static regex must compile")
});

static INTERVAL_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:\s|,|and)*$").expect("static regex must compile"));

static CALENDAR_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]\s*(?:[yY]|(?i:yrs?|years?|mos?|months?)|M)(?:[^A-Za-z]|$)")
        .expect("static regex must compile")
});

/// An interval split into the parts that have no fixed length in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalParts {
    pub years: i64,
    pub months: i64,
    pub seconds: i64,
}

impl IntervalParts {
    /// Total length using 365-day years and 30-day months.
    #[must_use]
    pub fn total_seconds(&self) -> Option<i64> {
        self.years
            .checked_mul(SECONDS_PER_YEAR)?
            .checked_add(self.months.checked_mul(SECONDS_PER_MONTH)?)?
            .checked_add(self.seconds)
    }

    fn negated(self) -> Self {
        Self {
            years: -self.years,
            months: -self.months,
            seconds: -self.seconds,
        }
    }
}

fn unit_seconds(unit: &str) -> Option<i64> {
    match unit {
        "s" | "sec" | "secs" | "second" | "seconds" => Some(1),
        "m" | "min" | "mins" | "minute" | "minutes" => Some(SECONDS_PER_MINUTE),
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(SECONDS_PER_HOUR),
        "d" | "day" | "days" => Some(SECONDS_PER_DAY),
        "w" | "wk" | "wks" | "week" | "weeks" => Some(7 * SECONDS_PER_DAY),
        "fortnight" | "fortnights" => Some(14 * SECONDS_PER_DAY),
        _ => None,
    }
}

/// Parses `"1 year, 2 months and 3 days"` or `"1y2M3d"` style text; items may
/// be signed.
#[must_use]
pub fn parse_interval_parts(input: &str) -> Option<IntervalParts> {
    let input = input.trim();
    let mut parts = IntervalParts::default();
    let mut last_end = 0;
    let mut matched = false;

    for captures in INTERVAL_ITEM.captures_iter(input) {
        let whole = captures.get(0)?;
        if !INTERVAL_GAP.is_match(&input[last_end..whole.start()]) {
            return None;
        }

        let amount: i64 = captures[1].parse().ok()?;
        let unit = &captures[2];
        match (unit, unit.to_lowercase().as_str()) {
            (_, "y" | "yr" | "yrs" | "year" | "years") => {
                parts.years = parts.years.checked_add(amount)?;
            }
            ("M", _) | (_, "mo" | "mos" | "month" | "months") => {
                parts.months = parts.months.checked_add(amount)?;
            }
            (_, unit) => {
                let seconds = amount.checked_mul(unit_seconds(unit)?)?;
                parts.seconds = parts.seconds.checked_add(seconds)?;
            }
        }

        last_end = whole.end();
        matched = true;
    }

    if matched && INTERVAL_GAP.is_match(&input[last_end..]) {
        Some(parts)
    } else {
        None
    }
}

/// Writes `total` seconds as `"N unit, N unit"`, or `"0 seconds"`.
#[must_use]
pub fn format_interval(total: i64) -> String {
    let mut remaining = total;
    let mut formatted = Vec::new();

    for (length, unit) in INTERVAL_UNITS {
        let count = remaining / length;
        remaining -= count * length;

        if count != 0 {
            let plural = if count > 1 { "s" } else { "" };
            formatted.push(format!("{count} {unit}{plural}"));
        }
    }

    if formatted.is_empty() {
        "0 seconds".to_string()
    } else {
        formatted.join(", ")
    }
}

fn apply_offset(base: NaiveDateTime, parts: IntervalParts) -> Option<NaiveDateTime> {
    let months = parts.years.checked_mul(12)?.checked_add(parts.months)?;
    let month_count = u32::try_from(months.unsigned_abs()).ok()?;

    let shifted = if months >= 0 {
        base.checked_add_months(Months::new(month_count))?
    } else {
        base.checked_sub_months(Months::new(month_count))?
    };

    shifted.checked_add_signed(TimeDelta::try_seconds(parts.seconds)?)
}

fn parse_date_part(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    match value.to_lowercase().as_str() {
        "today" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        _ => {}
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn parse_time_part(value: &str, now: NaiveDateTime) -> Option<NaiveTime> {
    match value.to_lowercase().as_str() {
        "now" => return Some(now.time()),
        "midnight" => return NaiveTime::from_hms_opt(0, 0, 0),
        "noon" => return NaiveTime::from_hms_opt(12, 0, 0),
        _ => {}
    }

    if let Some(captures) = HOUR_ONLY.captures(value) {
        let hour: u32 = captures[1].parse().ok()?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        let is_pm = captures[2].eq_ignore_ascii_case("p");
        return NaiveTime::from_hms_opt(hour % 12 + if is_pm { 12 } else { 0 }, 0, 0);
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}

fn strip_ago(value: &str) -> Option<&str> {
    let split = value.len().checked_sub(3)?;
    let suffix = value.get(split..)?;
    suffix
        .eq_ignore_ascii_case("ago")
        .then(|| &value[..split])
}

/// Parses a calendar moment relative to `now`.
#[must_use]
pub fn parse_moment_at(value: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let today = now.date();

    if let Some(offset) = strip_ago(value) {
        let parts = parse_interval_parts(offset)?;
        return apply_offset(now, parts.negated());
    }

    if value.starts_with(['+', '-']) {
        return apply_offset(now, parse_interval_parts(value)?);
    }

    if let Ok(moment) = DateTime::parse_from_rfc3339(value) {
        return Some(moment.with_timezone(&Local).naive_local());
    }

    let cleaned = ORDINAL_SUFFIX.replace_all(value, "$1");
    let cleaned: &str = &cleaned;

    if let Some(date) = parse_date_part(cleaned, today) {
        return date.and_hms_opt(0, 0, 0);
    }

    if let Some(time) = parse_time_part(cleaned, now) {
        return Some(today.and_time(time));
    }

    // A date followed by a time, split at a space or a `T`.
    cleaned
        .char_indices()
        .filter(|(_, c)| c.is_whitespace() || *c == 'T')
        .find_map(|(index, separator)| {
            let date = parse_date_part(cleaned[..index].trim(), today)?;
            let time = parse_time_part(cleaned[index + separator.len_utf8()..].trim(), now)?;
            Some(date.and_time(time))
        })
}

/// Parses a calendar moment relative to the current local time.
#[must_use]
pub fn parse_moment(value: &str) -> Option<NaiveDateTime> {
    let now = Local::now().naive_local();
    let now = now.with_nanosecond(0).unwrap_or(now);
    parse_moment_at(value, now)
}

pub fn cast_date(value: &str) -> Result<String, CastError> {
    parse_moment(value)
        .map(|moment| moment.format("%Y-%m-%d").to_string())
        .ok_or(CastError::Date)
}

pub fn cast_datetime(value: &str) -> Result<String, CastError> {
    parse_moment(value)
        .map(|moment| moment.format("%Y-%m-%d %H:%M:%S").to_string())
        .ok_or(CastError::Datetime)
}

pub fn cast_time(value: &str) -> Result<String, CastError> {
    parse_moment(value)
        .map(|moment| moment.format("%H:%M:%S").to_string())
        .ok_or(CastError::Time)
}

/// Normalises a duration such as `"600 seconds"` to `"10 minutes"`.
///
/// Anything else, such as `1s 500ms`, is handed to `humantime`. Its years
/// and months are averaged lengths, so input naming them is rejected there.
pub fn cast_interval(value: &str) -> Result<String, CastError> {
    let total = match parse_interval_parts(value) {
        Some(parts) => parts.total_seconds().ok_or(CastError::Interval)?,
        None if CALENDAR_UNIT.is_match(value) => return Err(CastError::Interval),
        None => {
            let duration =
                humantime::parse_duration(value.trim()).map_err(|_| CastError::Interval)?;
            i64::try_from(duration.as_secs()).map_err(|_| CastError::Interval)?
        }
    };

    if total < 0 {
        return Err(CastError::Interval);
    }

    Ok(format_interval(total))
}
