//! ISO 8601 duration parsing and formatting (`PnYnMnWnDTnHnMnS`).

use thiserror::Error;

/// An ISO 8601 duration as written, component by component.
///
/// Components are kept separately (not normalized to seconds) because
/// calendar units like months have no fixed length. A component that was
/// absent in the source text stays `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IsoDuration {
    pub years: Option<u32>,
    pub months: Option<u32>,
    pub weeks: Option<u32>,
    pub days: Option<u32>,
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
    pub seconds: Option<u32>,
    /// Fractional seconds in microseconds; only meaningful with `seconds`.
    pub micros: u32,
}

impl IsoDuration {
    /// Parses an ISO 8601 duration such as `P1Y6M` or `PT1H30M`.
    pub fn parse(input: &str) -> Result<Self, DurationParseError> {
        parse_duration(input)
    }

    /// A duration of whole days.
    pub fn from_days(days: u32) -> Self {
        Self {
            days: Some(days),
            ..Self::default()
        }
    }

    /// A duration of whole months.
    pub fn from_months(months: u32) -> Self {
        Self {
            months: Some(months),
            ..Self::default()
        }
    }

    /// A duration of hours and minutes.
    pub fn from_hours_minutes(hours: u32, minutes: u32) -> Self {
        Self {
            hours: Some(hours),
            minutes: Some(minutes),
            ..Self::default()
        }
    }

    fn has_time_part(&self) -> bool {
        self.hours.is_some() || self.minutes.is_some() || self.seconds.is_some()
    }

    fn has_date_part(&self) -> bool {
        self.years.is_some() || self.months.is_some() || self.weeks.is_some() || self.days.is_some()
    }
}

impl std::fmt::Display for IsoDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_duration(self))
    }
}

/// Error type for duration parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid ISO 8601 duration: {input}")]
pub struct DurationParseError {
    pub input: String,
}

/// Consumes `<digits><designator>` from the front of `rest` if present.
fn take_component<'a>(
    rest: &'a str,
    designator: u8,
    input: &str,
) -> Result<(Option<u32>, &'a str), DurationParseError> {
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || rest.as_bytes().get(digits) != Some(&designator) {
        return Ok((None, rest));
    }
    let value = rest[..digits].parse().map_err(|_| DurationParseError {
        input: input.to_string(),
    })?;
    Ok((Some(value), &rest[digits + 1..]))
}

/// Parses an ISO 8601 duration.
///
/// Components must appear in designator order, at least one must be
/// present, and a `T` must be followed by at least one time component.
/// Only the seconds component may carry a fraction.
pub fn parse_duration(input: &str) -> Result<IsoDuration, DurationParseError> {
    let invalid = || DurationParseError {
        input: input.to_string(),
    };

    if !input.is_ascii() {
        return Err(invalid());
    }
    let body = input.strip_prefix('P').ok_or_else(invalid)?;
    let (date_part, time_part) = match body.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (body, None),
    };

    let mut duration = IsoDuration::default();

    let mut rest = date_part;
    for (designator, slot) in [
        (b'Y', &mut duration.years),
        (b'M', &mut duration.months),
        (b'W', &mut duration.weeks),
        (b'D', &mut duration.days),
    ] {
        let (value, remaining) = take_component(rest, designator, input)?;
        *slot = value;
        rest = remaining;
    }
    if !rest.is_empty() {
        return Err(invalid());
    }

    if let Some(time) = time_part {
        let mut rest = time;
        for (designator, slot) in [(b'H', &mut duration.hours), (b'M', &mut duration.minutes)] {
            let (value, remaining) = take_component(rest, designator, input)?;
            *slot = value;
            rest = remaining;
        }

        let whole = rest.bytes().take_while(u8::is_ascii_digit).count();
        if whole > 0 {
            let seconds: u32 = rest[..whole].parse().map_err(|_| invalid())?;
            let after = &rest[whole..];
            if let Some(after) = after.strip_prefix('S') {
                duration.seconds = Some(seconds);
                rest = after;
            } else if let Some(frac) = after.strip_prefix('.') {
                let digits = frac.bytes().take_while(u8::is_ascii_digit).count();
                if digits == 0 || frac.as_bytes().get(digits) != Some(&b'S') {
                    return Err(invalid());
                }
                duration.seconds = Some(seconds);
                duration.micros = frac[..digits]
                    .bytes()
                    .take(6)
                    .enumerate()
                    .map(|(i, b)| (b - b'0') as u32 * 10u32.pow(5 - i as u32))
                    .sum();
                rest = &frac[digits + 1..];
            }
        }

        if !rest.is_empty() || !duration.has_time_part() {
            return Err(invalid());
        }
    }

    if !duration.has_date_part() && !duration.has_time_part() {
        return Err(invalid());
    }

    Ok(duration)
}

/// Formats a duration; an entirely empty duration formats as `PT0S`.
pub fn format_duration(duration: &IsoDuration) -> String {
    if !duration.has_date_part() && !duration.has_time_part() {
        return "PT0S".to_string();
    }

    let mut out = String::from("P");
    for (value, designator) in [
        (duration.years, 'Y'),
        (duration.months, 'M'),
        (duration.weeks, 'W'),
        (duration.days, 'D'),
    ] {
        if let Some(v) = value {
            out.push_str(&v.to_string());
            out.push(designator);
        }
    }

    if duration.has_time_part() {
        out.push('T');
        if let Some(h) = duration.hours {
            out.push_str(&format!("{h}H"));
        }
        if let Some(m) = duration.minutes {
            out.push_str(&format!("{m}M"));
        }
        if let Some(s) = duration.seconds {
            out.push_str(&s.to_string());
            if duration.micros != 0 {
                let frac = format!("{:06}", duration.micros);
                out.push('.');
                out.push_str(frac.trim_end_matches('0'));
            }
            out.push('S');
        }
    }

    out
}
