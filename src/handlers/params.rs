//! Typed access to intent parameters.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::HandlerError;
use crate::intent::{ParamValue, Parameters};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Calendar years a date parameter may name. `%Y` also accepts signed
/// extended years, which would overflow day arithmetic near the chrono limits.
const YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

fn invalid(name: &str, value: &ParamValue) -> HandlerError {
    HandlerError::InvalidParameter {
        name: name.to_string(),
        value: value.to_string(),
    }
}

/// Trimmed, non-empty text; numbers are rendered as text.
pub fn text(params: &Parameters, name: &str) -> Option<String> {
    match params.get(name)? {
        ParamValue::Str(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        ParamValue::Int(i) => Some(i.to_string()),
        ParamValue::Float(_) | ParamValue::Bool(_) => None,
    }
}

pub fn integer(params: &Parameters, name: &str) -> Result<Option<i64>, HandlerError> {
    let Some(value) = params.get(name) else {
        return Ok(None);
    };
    match value {
        ParamValue::Int(i) => Ok(Some(*i)),
        ParamValue::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(Some(*f as i64)),
        ParamValue::Str(s) if s.trim().is_empty() => Ok(None),
        ParamValue::Str(s) => s.trim().parse().map(Some).map_err(|_| invalid(name, value)),
        _ => Err(invalid(name, value)),
    }
}

/// A positive count, `default` when absent.
pub fn count(params: &Parameters, name: &str, default: usize) -> Result<usize, HandlerError> {
    match integer(params, name)? {
        None => Ok(default),
        Some(n) if n >= 1 => Ok(n as usize),
        Some(n) => Err(HandlerError::InvalidParameter {
            name: name.to_string(),
            value: n.to_string(),
        }),
    }
}

/// Accepts ISO dates, `dd/mm/yyyy`, ISO date-times and the relative tokens
/// `today`, `yesterday`, `hôm nay`, `hôm qua`.
pub fn date(params: &Parameters, name: &str, today: NaiveDate) -> Result<Option<NaiveDate>, HandlerError> {
    let Some(value) = params.get(name) else {
        return Ok(None);
    };
    let ParamValue::Str(raw) = value else {
        return Err(invalid(name, value));
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_date(raw, today)
        .map(Some)
        .ok_or_else(|| invalid(name, value))
}

pub fn parse_date(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    match raw.to_lowercase().as_str() {
        "today" | "hôm nay" => return Some(today),
        "yesterday" | "hôm qua" => return today.pred_opt(),
        _ => {}
    }

    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
        .filter(|d| YEARS.contains(&d.year()))
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Last instant of `date`, so a date-only upper bound covers the whole day.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // Time-of-day arithmetic wraps, so this is 23:59:59.999999999 on `date`.
    date.and_time(NaiveTime::MIN - Duration::nanoseconds(1))
}
