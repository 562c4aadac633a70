//! ISO 8601 / RFC 3339 date and time parsing and formatting.
//!
//! Converts between the textual forms used by schema.org documents and the
//! internal representations:
//! - Date: days since Unix epoch (1970-01-01) + optional offset in minutes
//! - Time: microseconds since midnight + optional offset in minutes
//! - DateTime: microseconds since Unix epoch (UTC instant) + optional offset
//!
//! A missing offset is preserved as `None` so values format back to the
//! form they were read from. Parsers reject anything that is not ASCII
//! before slicing, so they are safe to call with arbitrary strings.

use thiserror::Error;

const MICROSECONDS_PER_SECOND: i64 = 1_000_000;
pub(crate) const MICROSECONDS_PER_MINUTE: i64 = 60 * MICROSECONDS_PER_SECOND;
const MICROSECONDS_PER_HOUR: i64 = 60 * MICROSECONDS_PER_MINUTE;
pub(crate) const MICROSECONDS_PER_DAY: i64 = 24 * MICROSECONDS_PER_HOUR;

/// Largest valid time of day in microseconds (23:59:59.999999).
pub const MAX_TIME_OF_DAY_US: i64 = MICROSECONDS_PER_DAY - 1;

/// Days since epoch of 0000-01-01, the earliest four-digit-year date.
pub const MIN_DATE_DAYS: i32 = -719_528;

/// Days since epoch of 9999-12-31, the latest four-digit-year date.
pub const MAX_DATE_DAYS: i32 = 2_932_896;

/// Largest UTC offset magnitude in minutes (`+24:00`).
pub const MAX_OFFSET_MIN: i16 = 24 * 60;

/// Error type for date/time parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DateTimeParseError {
    pub message: String,
}

impl DateTimeParseError {
    fn new(what: &str, input: &str) -> Self {
        Self {
            message: format!("invalid {what}: {input}"),
        }
    }
}

/// Parses a timezone offset (Z, +HH:MM, -HH:MM) into minutes.
fn parse_timezone_offset(offset: &str) -> Result<i16, DateTimeParseError> {
    if offset == "Z" || offset == "z" {
        return Ok(0);
    }

    let bytes = offset.as_bytes();
    if bytes.len() != 6 || bytes[3] != b':' {
        return Err(DateTimeParseError::new("timezone offset", offset));
    }

    let sign = match bytes[0] {
        b'+' => 1i16,
        b'-' => -1i16,
        _ => return Err(DateTimeParseError::new("timezone offset", offset)),
    };

    let hours = parse_digits(&offset[1..3]).ok_or_else(|| DateTimeParseError::new("timezone offset", offset))? as i16;
    let minutes = parse_digits(&offset[4..6]).ok_or_else(|| DateTimeParseError::new("timezone offset", offset))? as i16;

    // +24:00 / -24:00 are the extremes
    if hours > 24 || (hours == 24 && minutes != 0) || minutes > 59 {
        return Err(DateTimeParseError::new("timezone offset", offset));
    }

    Ok(sign * (hours * 60 + minutes))
}

/// Formats an offset in minutes (Z, +HH:MM, -HH:MM); `None` formats as empty.
fn format_timezone_offset(offset_min: Option<i16>) -> String {
    match offset_min {
        None => String::new(),
        Some(0) => "Z".to_string(),
        Some(offset) => {
            let sign = if offset >= 0 { '+' } else { '-' };
            let abs = offset.unsigned_abs();
            format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
        }
    }
}

/// Parses a run of ASCII digits. Rejects signs, whitespace, and empty input.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parses fractional-second digits into microseconds (truncating past 6 digits).
fn parse_fractional_seconds(frac: &str) -> i64 {
    let mut micros = 0i64;
    for (i, b) in frac.bytes().take(6).enumerate() {
        micros += (b - b'0') as i64 * 10i64.pow(5 - i as u32);
    }
    micros
}

/// Formats microseconds as fractional seconds, omitting zero.
fn format_fractional_seconds(us: i64) -> String {
    if us == 0 {
        return String::new();
    }
    let digits = format!("{:06}", us);
    format!(".{}", digits.trim_end_matches('0'))
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since Unix epoch for a civil date (Howard Hinnant's algorithm).
fn date_to_days(year: i32, month: u32, day: u32) -> i32 {
    let y = if month <= 2 { year - 1 } else { year } as i64;
    let m = if month <= 2 { month as i64 + 9 } else { month as i64 - 3 };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u32;
    let doy = (153 * m as u32 + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;

    (era * 146097 + doe as i64 - 719468) as i32
}

/// Civil date for days since Unix epoch.
fn days_to_date(days: i32) -> (i32, u32, u32) {
    let z = days as i64 + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };

    let year = if m <= 2 { y + 1 } else { y } as i32;
    (year, m, d)
}

/// Reads `YYYY-MM-DD` from the start of `s`, returning days and the remainder.
fn split_date<'a>(s: &'a str, what: &str, input: &str) -> Result<(i32, &'a str), DateTimeParseError> {
    let bytes = s.as_bytes();
    if bytes.len() < 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return Err(DateTimeParseError::new(what, input));
    }

    let year = parse_digits(&s[..4]).ok_or_else(|| DateTimeParseError::new(what, input))? as i32;
    let month = parse_digits(&s[5..7]).ok_or_else(|| DateTimeParseError::new(what, input))?;
    let day = parse_digits(&s[8..10]).ok_or_else(|| DateTimeParseError::new(what, input))?;

    if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
        return Err(DateTimeParseError::new(what, input));
    }

    Ok((date_to_days(year, month, day), &s[10..]))
}

/// Reads `HH:MM[:SS[.ffffff]]` from the start of `s`, returning microseconds
/// since midnight and the remainder (the offset, if any).
fn split_time<'a>(s: &'a str, what: &str, input: &str) -> Result<(i64, &'a str), DateTimeParseError> {
    let bytes = s.as_bytes();
    if bytes.len() < 5 || bytes[2] != b':' {
        return Err(DateTimeParseError::new(what, input));
    }

    let hours = parse_digits(&s[..2]).ok_or_else(|| DateTimeParseError::new(what, input))? as i64;
    let minutes = parse_digits(&s[3..5]).ok_or_else(|| DateTimeParseError::new(what, input))? as i64;
    let mut rest = &s[5..];

    let mut seconds = 0i64;
    let mut micros = 0i64;
    if rest.starts_with(':') {
        if rest.len() < 3 {
            return Err(DateTimeParseError::new(what, input));
        }
        seconds = parse_digits(&rest[1..3]).ok_or_else(|| DateTimeParseError::new(what, input))? as i64;
        rest = &rest[3..];

        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            if frac_len == 0 {
                return Err(DateTimeParseError::new(what, input));
            }
            micros = parse_fractional_seconds(&after_dot[..frac_len]);
            rest = &after_dot[frac_len..];
        }
    }

    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(DateTimeParseError::new(what, input));
    }

    let time_us = hours * MICROSECONDS_PER_HOUR
        + minutes * MICROSECONDS_PER_MINUTE
        + seconds * MICROSECONDS_PER_SECOND
        + micros;
    Ok((time_us, rest))
}

fn parse_optional_offset(rest: &str) -> Result<Option<i16>, DateTimeParseError> {
    if rest.is_empty() {
        Ok(None)
    } else {
        parse_timezone_offset(rest).map(Some)
    }
}

fn format_time_of_day(time_us: i64) -> String {
    let hours = time_us / MICROSECONDS_PER_HOUR;
    let minutes = (time_us % MICROSECONDS_PER_HOUR) / MICROSECONDS_PER_MINUTE;
    let seconds = (time_us % MICROSECONDS_PER_MINUTE) / MICROSECONDS_PER_SECOND;
    let micros = time_us % MICROSECONDS_PER_SECOND;
    format!(
        "{:02}:{:02}:{:02}{}",
        hours,
        minutes,
        seconds,
        format_fractional_seconds(micros)
    )
}

// =====================
// DATE functions
// =====================

/// Parses `YYYY-MM-DD[offset]` into days since Unix epoch and an optional offset.
pub fn parse_date(input: &str) -> Result<(i32, Option<i16>), DateTimeParseError> {
    if !input.is_ascii() {
        return Err(DateTimeParseError::new("date", input));
    }
    let (days, rest) = split_date(input, "date", input)?;
    Ok((days, parse_optional_offset(rest)?))
}

/// Formats days since Unix epoch as `YYYY-MM-DD[offset]`.
pub fn format_date(days: i32, offset_min: Option<i16>) -> String {
    let (year, month, day) = days_to_date(days);
    format!(
        "{:04}-{:02}-{:02}{}",
        year,
        month,
        day,
        format_timezone_offset(offset_min)
    )
}

/// Returns days since Unix epoch for a civil date, or `None` if it does not exist.
pub fn days_from_ymd(year: i32, month: u32, day: u32) -> Option<i32> {
    if !(0..=9999).contains(&year) || !(1..=12).contains(&month) {
        return None;
    }
    if day < 1 || day > days_in_month(year, month) {
        return None;
    }
    Some(date_to_days(year, month, day))
}

/// Returns true if the offset is absent or within `±24:00`.
pub fn offset_in_range(offset_min: Option<i16>) -> bool {
    offset_min.is_none_or(|o| (-MAX_OFFSET_MIN..=MAX_OFFSET_MIN).contains(&o))
}

/// Returns true if `days` falls in years 0000 through 9999.
pub fn days_in_range(days: i32) -> bool {
    (MIN_DATE_DAYS..=MAX_DATE_DAYS).contains(&days)
}

// =====================
// TIME functions
// =====================

/// Parses `HH:MM[:SS[.ffffff]][offset]` into microseconds since midnight.
pub fn parse_time(input: &str) -> Result<(i64, Option<i16>), DateTimeParseError> {
    if !input.is_ascii() {
        return Err(DateTimeParseError::new("time", input));
    }
    let (time_us, rest) = split_time(input, "time", input)?;
    Ok((time_us, parse_optional_offset(rest)?))
}

/// Formats microseconds since midnight as `HH:MM:SS[.ffffff][offset]`.
pub fn format_time(time_us: i64, offset_min: Option<i16>) -> String {
    format!(
        "{}{}",
        format_time_of_day(time_us),
        format_timezone_offset(offset_min)
    )
}

// =====================
// DATETIME functions
// =====================

/// Parses `YYYY-MM-DDTHH:MM[:SS[.ffffff]][offset]` into a UTC instant in
/// microseconds since Unix epoch. Without an offset the local time is taken
/// as UTC.
pub fn parse_datetime(input: &str) -> Result<(i64, Option<i16>), DateTimeParseError> {
    if !input.is_ascii() {
        return Err(DateTimeParseError::new("datetime", input));
    }
    let (days, rest) = split_date(input, "datetime", input)?;
    let rest = match rest.as_bytes().first() {
        Some(b'T') | Some(b't') | Some(b' ') => &rest[1..],
        _ => return Err(DateTimeParseError::new("datetime", input)),
    };
    let (time_us, rest) = split_time(rest, "datetime", input)?;
    let offset_min = parse_optional_offset(rest)?;

    let local_us = days as i64 * MICROSECONDS_PER_DAY + time_us;
    // local time = UTC + offset
    let epoch_us = local_us - offset_min.unwrap_or(0) as i64 * MICROSECONDS_PER_MINUTE;
    Ok((epoch_us, offset_min))
}

/// Shifts a UTC instant into the local time of the offset.
fn local_datetime_us(epoch_us: i64, offset_min: Option<i16>) -> Option<i64> {
    epoch_us.checked_add(offset_min.unwrap_or(0) as i64 * MICROSECONDS_PER_MINUTE)
}

/// Returns true if the instant, in the local time of its offset, falls in
/// years 0000 through 9999 and the offset is within `±24:00`.
pub fn datetime_in_range(epoch_us: i64, offset_min: Option<i16>) -> bool {
    offset_in_range(offset_min)
        && local_datetime_us(epoch_us, offset_min)
            .and_then(|local| i32::try_from(local.div_euclid(MICROSECONDS_PER_DAY)).ok())
            .is_some_and(days_in_range)
}

/// Formats a UTC instant as `YYYY-MM-DDTHH:MM:SS[.ffffff][offset]` in the
/// local time of the offset. Instants whose local time overflows are
/// formatted in UTC.
pub fn format_datetime(epoch_us: i64, offset_min: Option<i16>) -> String {
    let local_us = local_datetime_us(epoch_us, offset_min).unwrap_or(epoch_us);
    let days = local_us.div_euclid(MICROSECONDS_PER_DAY) as i32;
    let time_us = local_us.rem_euclid(MICROSECONDS_PER_DAY);
    let (year, month, day) = days_to_date(days);

    format!(
        "{:04}-{:02}-{:02}T{}{}",
        year,
        month,
        day,
        format_time_of_day(time_us),
        format_timezone_offset(offset_min)
    )
}
