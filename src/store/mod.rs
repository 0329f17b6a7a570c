//! # Store
//!
//! The query-executing capability the visitor service runs against, and the
//! dynamically-typed row model it returns.
//!
//! ```text
//! VisitorService ──(statement, params)──> dyn QueryExecutor ──> Vec<Row>
//!                                           ├── PgExecutor      (tokio-postgres)
//!                                           └── MemoryExecutor  (in-process table)
//! ```
//!
//! Executors take the statement text produced by [`crate::catalog`] and the
//! positional parameters bound to `$1..$n`. Values never appear in the text.

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryExecutor;
pub use postgres::PgExecutor;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::config::{DatabaseConfig, StoreBackend};

/// A single column value as bound to, or read back from, the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Calendar date carried by this value, if any.
    ///
    /// Text is accepted in `YYYY-MM-DD` form since some drivers hand dates back
    /// as strings.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Timestamp(ts) => Some(ts.date()),
            Value::Text(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::Time(t) => write!(f, "{}", t.format("%H:%M:%S")),
            Value::Timestamp(ts) => write!(f, "{}", ts.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_none(),
            Value::Int(v) => serializer.serialize_i64(*v),
            other => serializer.collect_str(other),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// One result row: column names mapped to values, in the order the store
/// returned them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly useful in tests.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    /// Integer column, failing with [`StoreError::MissingColumn`] when absent.
    pub fn get_i64(&self, name: &str) -> StoreResult<i64> {
        self.get(name)
            .and_then(Value::as_i64)
            .ok_or_else(|| StoreError::MissingColumn(name.to_string()))
    }

    /// Replace an existing column in place, or append a new one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.columns.iter_mut().find(|(column, _)| *column == name) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((name, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<NaiveTime> for Value {
    fn from(t: NaiveTime) -> Self {
        Value::Time(t)
    }
}

/// Runs one parameterized statement and returns every row it produced.
///
/// Statements that produce no rows (DDL, plain `DELETE`) return an empty vec.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn query(&self, statement: &str, params: &[Value]) -> StoreResult<Vec<Row>>;
}

/// Open the executor selected by the database config.
///
/// For PostgreSQL this connects and spawns the connection task; the returned
/// executor owns the client and the connection closes when it is dropped.
pub async fn connect(config: &DatabaseConfig) -> StoreResult<Arc<dyn QueryExecutor>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryExecutor::new())),
        StoreBackend::Postgres => Ok(Arc::new(PgExecutor::connect(&config.url).await?)),
    }
}
