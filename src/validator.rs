//! # Visitor Validation
//!
//! Pure shape checks for each visitor field. Each field has its own function
//! returning that field's error kind; [`validate_visitor`] composes them in a
//! fixed order and stops at the first failure:
//!
//! ```text
//! full_name → assistant_name → visitor_age → comments → date_of_visit → time_of_visit
//! ```
//!
//! [`validate_field`] checks a single loosely-typed value (as received by an
//! update) against one column; [`validate_record`] applies it to every field
//! of a JSON body in the order above.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::catalog::Column;
use crate::error::{VisitorError, VisitorResult};
use crate::model::{NewVisitor, VisitorRecord};
use crate::store::Value;

/// Two or more alphabetic tokens separated by single spaces.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+(?: [A-Za-z]+)+$").expect("valid name pattern")
});

/// 24-hour `HH:MM`.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[01]\d|2[0-3]):[0-5]\d$").expect("valid time pattern")
});

/// Date layouts tried in order. Month-first wins for ambiguous slash dates.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Largest age the `INT` column can hold.
pub const MAX_AGE: i64 = i32::MAX as i64;

fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

pub fn validate_full_name(name: &str) -> VisitorResult<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(VisitorError::InvalidName)
    }
}

pub fn validate_assistant_name(name: &str) -> VisitorResult<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(VisitorError::InvalidAssistantName)
    }
}

pub fn validate_age(age: i64) -> VisitorResult<()> {
    if (0..=MAX_AGE).contains(&age) {
        Ok(())
    } else {
        Err(VisitorError::InvalidAge)
    }
}

/// Any text is a valid comment except one containing NUL, which PostgreSQL
/// text columns cannot store.
pub fn validate_comments(comments: &str) -> VisitorResult<()> {
    if comments.contains('\0') {
        Err(VisitorError::InvalidComment)
    } else {
        Ok(())
    }
}

pub fn parse_date(date: &str) -> VisitorResult<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date, format).ok())
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .ok_or(VisitorError::InvalidDate)
}

pub fn parse_time(time: &str) -> VisitorResult<NaiveTime> {
    if !TIME_PATTERN.is_match(time) {
        return Err(VisitorError::InvalidTime);
    }
    NaiveTime::parse_from_str(time, "%H:%M").map_err(|_| VisitorError::InvalidTime)
}

/// Order in which the fields of a new visitor are checked.
const VALIDATION_ORDER: [Column; 6] = [
    Column::FullName,
    Column::AssistantName,
    Column::VisitorAge,
    Column::Comments,
    Column::DateOfVisit,
    Column::TimeOfVisit,
];

/// Validate a loosely typed record, returning the insert parameters in
/// schema order.
///
/// A missing or mistyped field fails with that field's error. Comments are
/// optional; absent or `null` comments are stored as empty text.
pub fn validate_record(record: &VisitorRecord) -> VisitorResult<Vec<Value>> {
    let missing = serde_json::Value::Null;
    let no_comment = serde_json::Value::String(String::new());
    let mut checked = Vec::with_capacity(VALIDATION_ORDER.len());

    for column in VALIDATION_ORDER {
        let raw = match record.get(column.as_str()) {
            Some(serde_json::Value::Null) | None if column == Column::Comments => &no_comment,
            Some(raw) => raw,
            None => &missing,
        };
        checked.push((column, validate_field(column, raw)?));
    }

    checked.sort_by_key(|(column, _)| Column::ALL.iter().position(|c| c == column));
    Ok(checked.into_iter().map(|(_, value)| value).collect())
}

/// Validate a full record, returning the insert parameters in schema order.
pub fn validate_visitor(visitor: &NewVisitor) -> VisitorResult<Vec<Value>> {
    validate_record(&visitor.to_record())
}

/// Validate one update value against `column`, returning the value to bind.
///
/// Text columns require a JSON string; `visitor_age` requires a JSON integer,
/// so `"12"` is rejected as an invalid age.
pub fn validate_field(column: Column, value: &serde_json::Value) -> VisitorResult<Value> {
    match column {
        Column::FullName => {
            let name = value.as_str().ok_or(VisitorError::InvalidName)?;
            validate_full_name(name)?;
            Ok(Value::Text(name.to_string()))
        }
        Column::AssistantName => {
            let name = value.as_str().ok_or(VisitorError::InvalidAssistantName)?;
            validate_assistant_name(name)?;
            Ok(Value::Text(name.to_string()))
        }
        Column::VisitorAge => {
            let age = value.as_i64().ok_or(VisitorError::InvalidAge)?;
            validate_age(age)?;
            Ok(Value::Int(age))
        }
        Column::Comments => {
            let comments = value.as_str().ok_or(VisitorError::InvalidComment)?;
            validate_comments(comments)?;
            Ok(Value::Text(comments.to_string()))
        }
        Column::DateOfVisit => {
            let date = value.as_str().ok_or(VisitorError::InvalidDate)?;
            parse_date(date).map(Value::Date)
        }
        Column::TimeOfVisit => {
            let time = value.as_str().ok_or(VisitorError::InvalidTime)?;
            parse_time(time).map(Value::Time)
        }
    }
}
