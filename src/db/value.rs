//! Engine-neutral cell value passed to and returned from the query runner

use crate::error::{AggregateError, AggregateResult};
use rusqlite::types::{ToSql, ToSqlOutput, Value, ValueRef};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl SqlValue {
    /// Read a weighted sum. SQL `SUM` over an empty set is NULL; real-valued
    /// sums are rounded to the nearest integer.
    pub fn as_sum(&self) -> AggregateResult<Option<i64>> {
        match self {
            SqlValue::Null => Ok(None),
            SqlValue::Integer(v) => Ok(Some(*v)),
            SqlValue::Real(v) => Ok(Some(v.round() as i64)),
            SqlValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| AggregateError::UnexpectedValue(format!("non-numeric sum {:?}", s))),
        }
    }

    /// Read a non-null integer (region descriptors)
    pub fn as_integer(&self) -> AggregateResult<i64> {
        match self.as_sum()? {
            Some(v) => Ok(v),
            None => Err(AggregateError::UnexpectedValue(
                "NULL where an integer was required".to_string(),
            )),
        }
    }
}

impl From<ValueRef<'_>> for SqlValue {
    fn from(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => SqlValue::Null,
            ValueRef::Integer(v) => SqlValue::Integer(v),
            ValueRef::Real(v) => SqlValue::Real(v),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                SqlValue::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::Integer)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Integer(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            SqlValue::Real(v) => ToSqlOutput::Owned(Value::Real(*v)),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}
