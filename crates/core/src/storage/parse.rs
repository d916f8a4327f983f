//! Database value parsing utilities
//!
//! Provides error-safe parsing of stored values. Timestamps are stored as
//! `%Y-%m-%dT%H:%M:%S` text so that lexical order equals chronological order.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Error as SqlError;
use uuid::Uuid;

use crate::models::{ClassStatus, UserRole};

pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

fn conversion_error<E>(e: E) -> SqlError
where
    E: std::error::Error + Send + Sync + 'static,
{
    SqlError::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

/// Parse a UUID from a database string column
pub fn parse_uuid(s: &str) -> Result<Uuid, SqlError> {
    Uuid::parse_str(s).map_err(conversion_error)
}

/// Parse an optional UUID from a database string column
pub fn parse_uuid_opt(s: Option<String>) -> Result<Option<Uuid>, SqlError> {
    s.map(|s| parse_uuid(&s)).transpose()
}

pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Parse a wall-clock timestamp
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, SqlError> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map_err(conversion_error)
}

pub fn format_time(t: &NaiveTime) -> String {
    t.format(TIME_FORMAT).to_string()
}

/// Parse a time of day
pub fn parse_time(s: &str) -> Result<NaiveTime, SqlError> {
    NaiveTime::parse_from_str(s, TIME_FORMAT).map_err(conversion_error)
}

pub fn format_date_opt(d: Option<NaiveDate>) -> Option<String> {
    d.map(|d| d.format(DATE_FORMAT).to_string())
}

/// Parse an optional calendar date
pub fn parse_date_opt(s: Option<String>) -> Result<Option<NaiveDate>, SqlError> {
    s.map(|s| NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(conversion_error))
        .transpose()
}

/// Convert a u8 to UserRole
pub fn role_from_u8(value: u8) -> UserRole {
    match value {
        1 => UserRole::Admin,
        2 => UserRole::Teacher,
        _ => UserRole::Student,
    }
}

/// Parse a class status; unknown values are a conversion failure, not a default
pub fn parse_status(s: &str) -> Result<ClassStatus, SqlError> {
    ClassStatus::from_str_opt(s).ok_or_else(|| {
        SqlError::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            format!("unknown class status: {s}").into(),
        )
    })
}

/// Extension trait for converting rusqlite Results to Option
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, SqlError>;
}

impl<T> OptionalExt<T> for Result<T, SqlError> {
    fn optional(self) -> Result<Option<T>, SqlError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
