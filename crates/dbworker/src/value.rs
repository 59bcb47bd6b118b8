//! Values bound into statements and read back from rows.
//!
//! [`Value`] mirrors SQLite's storage classes. [`Cell`] is the value half of a
//! data pair: one value (one row) or a sequence of values (one per row).

use crate::error::{DbError, DbResult};
use rusqlite::types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// A single SQLite value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Returns `true` for SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Storage class name, as SQLite's `typeof()` reports it.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }

    /// Convert into a JSON value. Blobs become arrays of bytes.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Integer(v) => serde_json::Value::from(*v),
            Value::Real(v) => serde_json::Value::from(*v),
            Value::Text(s) => serde_json::Value::from(s.as_str()),
            Value::Blob(b) => serde_json::Value::from(b.clone()),
        }
    }

    /// Store any serializable value as JSON text.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> DbResult<Self> {
        Ok(Value::Text(serde_json::to_string(value)?))
    }

    /// Extract a typed value.
    pub fn get<T: FromValue>(&self) -> DbResult<T> {
        T::from_value(self)
    }
}

macro_rules! value_from_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Integer(i64::from(v))
                }
            }
        )*
    };
}

value_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Real(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::from(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Real(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            other => Value::Text(other.to_string()),
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Borrowed(match self {
            Value::Null => ValueRef::Null,
            Value::Integer(v) => ValueRef::Integer(*v),
            Value::Real(v) => ValueRef::Real(*v),
            Value::Text(s) => ValueRef::Text(s.as_bytes()),
            Value::Blob(b) => ValueRef::Blob(b),
        }))
    }
}

impl FromSql for Value {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(v) => Value::Integer(v),
            ValueRef::Real(v) => Value::Real(v),
            // Non-UTF-8 TEXT keeps its bytes.
            ValueRef::Text(t) => match std::str::from_utf8(t) {
                Ok(s) => Value::Text(s.to_string()),
                Err(_) => Value::Blob(t.to_vec()),
            },
            ValueRef::Blob(b) => Value::Blob(b.to_vec()),
        })
    }
}

/// Typed extraction from a [`Value`].
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> DbResult<Self>;
}

fn mismatch(expected: &str, value: &Value) -> DbError {
    DbError::decode(
        expected,
        format!("cannot convert {} to {expected}", value.type_name()),
    )
}

impl FromValue for Value {
    fn from_value(value: &Value) -> DbResult<Self> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> DbResult<Self> {
        value.as_i64().ok_or_else(|| mismatch("i64", value))
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> DbResult<Self> {
        let v = i64::from_value(value)?;
        i32::try_from(v).map_err(|_| DbError::decode("i32", format!("{v} out of range")))
    }
}

impl FromValue for u32 {
    fn from_value(value: &Value) -> DbResult<Self> {
        let v = i64::from_value(value)?;
        u32::try_from(v).map_err(|_| DbError::decode("u32", format!("{v} out of range")))
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> DbResult<Self> {
        i64::from_value(value).map(|v| v != 0)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> DbResult<Self> {
        value.as_f64().ok_or_else(|| mismatch("f64", value))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> DbResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch("String", value))
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> DbResult<Self> {
        value
            .as_blob()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| mismatch("Vec<u8>", value))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> DbResult<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// The value half of a data pair.
///
/// `One` is a single row's value; `Many` carries one value per row for a
/// multi-row insert. A `One` behaves like a sequence of length 1.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    One(Value),
    Many(Vec<Value>),
}

impl Cell {
    /// Number of rows this cell contributes.
    pub fn len(&self) -> usize {
        match self {
            Cell::One(_) => 1,
            Cell::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value at row `i`.
    pub fn get(&self, i: usize) -> Option<&Value> {
        match self {
            Cell::One(v) if i == 0 => Some(v),
            Cell::One(_) => None,
            Cell::Many(values) => values.get(i),
        }
    }

    /// The scalar, if this is a `One`.
    pub fn as_one(&self) -> Option<&Value> {
        match self {
            Cell::One(v) => Some(v),
            Cell::Many(_) => None,
        }
    }
}

macro_rules! cell_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Cell {
                fn from(v: $t) -> Self {
                    Cell::One(Value::from(v))
                }
            }

            impl From<Vec<$t>> for Cell {
                fn from(v: Vec<$t>) -> Self {
                    Cell::Many(v.into_iter().map(Value::from).collect())
                }
            }

            impl<const N: usize> From<[$t; N]> for Cell {
                fn from(v: [$t; N]) -> Self {
                    Cell::Many(v.into_iter().map(Value::from).collect())
                }
            }
        )*
    };
}

cell_from_scalar!(i16, i32, i64, u16, u32, bool, f32, f64, String);

impl From<Value> for Cell {
    fn from(v: Value) -> Self {
        Cell::One(v)
    }
}

impl From<Vec<Value>> for Cell {
    fn from(v: Vec<Value>) -> Self {
        Cell::Many(v)
    }
}

impl<const N: usize> From<[Value; N]> for Cell {
    fn from(v: [Value; N]) -> Self {
        Cell::Many(v.into())
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::One(Value::from(v))
    }
}

impl From<&String> for Cell {
    fn from(v: &String) -> Self {
        Cell::One(Value::from(v))
    }
}

impl<'a> From<Vec<&'a str>> for Cell {
    fn from(v: Vec<&'a str>) -> Self {
        Cell::Many(v.into_iter().map(Value::from).collect())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Cell {
    fn from(v: [&'a str; N]) -> Self {
        Cell::Many(v.into_iter().map(Value::from).collect())
    }
}

impl<'a> From<&[&'a str]> for Cell {
    fn from(v: &[&'a str]) -> Self {
        Cell::Many(v.iter().copied().map(Value::from).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        Cell::One(Value::from(v))
    }
}

impl<T: Into<Value>> From<Vec<Option<T>>> for Cell {
    fn from(v: Vec<Option<T>>) -> Self {
        Cell::Many(v.into_iter().map(Value::from).collect())
    }
}

/// A JSON array is one value per row; anything nested inside it is stored as
/// JSON text.
impl From<serde_json::Value> for Cell {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Array(items) => {
                Cell::Many(items.into_iter().map(Value::from).collect())
            }
            other => Cell::One(Value::from(other)),
        }
    }
}
