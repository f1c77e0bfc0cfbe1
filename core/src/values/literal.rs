//! Host-side literal syntax for binding values, e.g. from the command line.
//!
//! Accepted forms: `true`/`false`, integers, floats, `YYYY-MM-DD` and
//! `YYYY-MM-DDTHH:MM:SS[.f]` timestamps (a space may replace the `T`), and
//! bracketed homogeneous arrays such as `[1, 2, 3]`. An array mixing
//! integers and floats becomes a Double array.

use core::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::values::{Array, Value};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("empty value")]
    Empty,
    #[error("cannot interpret '{0}' as a value")]
    Unrecognized(String),
    #[error("array elements must be numbers or booleans, found '{0}'")]
    UnsupportedElement(String),
    #[error("array mixes booleans and numbers")]
    MixedArray,
}

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl FromStr for Value {
    type Err = LiteralError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LiteralError::Empty);
        }
        if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
            return parse_array(inner).map(Value::Array);
        }
        if let Some(scalar) = parse_scalar(text) {
            return Ok(scalar);
        }
        parse_timestamp(text)
            .map(Value::Timestamp)
            .ok_or_else(|| LiteralError::Unrecognized(text.to_string()))
    }
}

fn parse_scalar(text: &str) -> Option<Value> {
    match text {
        "true" => Some(Value::Boolean(true)),
        "false" => Some(Value::Boolean(false)),
        _ => text
            .parse::<i64>()
            .map(Value::Integer)
            .or_else(|_| text.parse::<f64>().map(Value::Double))
            .ok(),
    }
}

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn parse_array(inner: &str) -> Result<Array, LiteralError> {
    let items = inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_scalar(item).ok_or_else(|| LiteralError::UnsupportedElement(item.to_string())))
        .collect::<Result<Vec<Value>, _>>()?;

    if items.iter().all(|v| matches!(v, Value::Integer(_))) {
        return Ok(Array::Integer(items.iter().filter_map(Value::as_int).collect()));
    }
    if items.iter().all(|v| matches!(v, Value::Boolean(_))) {
        return Ok(Array::Boolean(items.iter().filter_map(Value::as_bool).collect()));
    }
    if items.iter().all(|v| v.as_number().is_some()) {
        return Ok(Array::Double(items.iter().filter_map(Value::as_number).collect()));
    }
    Err(LiteralError::MixedArray)
}
