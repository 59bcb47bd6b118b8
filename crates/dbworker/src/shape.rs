//! Raw row sets and arity-based result shaping for reads.

use crate::error::{DbError, DbResult};
use crate::value::{FromValue, Value};
use serde::Serialize;

/// Everything one statement produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowSet {
    /// Result column names, in order.
    pub columns: Vec<String>,
    /// Result rows, each as long as `columns`.
    pub rows: Vec<Vec<Value>>,
    /// Rows changed by the statement (INSERT/UPDATE/DELETE), else 0.
    pub changes: u64,
}

impl RowSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Shape the rows by arity. See [`Shaped`].
    pub fn shape(self) -> Shaped {
        shape(self.rows, self.columns.len())
    }
}

/// A read result reduced by row and column count.
///
/// | rows | columns | shape |
/// |---|---|---|
/// | 0 | any | `Null` |
/// | 1 | 1 | `Scalar` |
/// | 1 | n | `Row` |
/// | n | 1 | `Column` |
/// | n | n | `Rows` |
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Shaped {
    Null,
    Scalar(Value),
    Row(Vec<Value>),
    Column(Vec<Value>),
    Rows(Vec<Vec<Value>>),
}

/// Reduce `rows` (each `width` values long) to the caller-facing shape.
pub fn shape(mut rows: Vec<Vec<Value>>, width: usize) -> Shaped {
    match (rows.len(), width) {
        (0, _) => Shaped::Null,
        (1, 1) => Shaped::Scalar(rows.remove(0).into_iter().next().unwrap_or(Value::Null)),
        (1, _) => Shaped::Row(rows.remove(0)),
        (_, 1) => Shaped::Column(
            rows.into_iter()
                .map(|row| row.into_iter().next().unwrap_or(Value::Null))
                .collect(),
        ),
        _ => Shaped::Rows(rows),
    }
}

impl Shaped {
    pub fn is_null(&self) -> bool {
        matches!(self, Shaped::Null)
    }

    /// The scalar, if the read produced exactly one value.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Shaped::Scalar(v) => Some(v),
            _ => None,
        }
    }

    /// Extract the scalar as `T`. `Null` extracts as `T` from SQL NULL, so
    /// `Option<T>` maps "no rows" to `None`.
    pub fn scalar<T: FromValue>(&self) -> DbResult<T> {
        match self {
            Shaped::Null => T::from_value(&Value::Null),
            Shaped::Scalar(v) => T::from_value(v),
            other => Err(DbError::decode(
                "<scalar>",
                format!("expected a single value, got {}", other.kind()),
            )),
        }
    }

    /// Flatten to a list of values: a scalar, a row, or a column.
    pub fn into_values(self) -> DbResult<Vec<Value>> {
        match self {
            Shaped::Null => Ok(Vec::new()),
            Shaped::Scalar(v) => Ok(vec![v]),
            Shaped::Row(values) | Shaped::Column(values) => Ok(values),
            Shaped::Rows(_) => Err(DbError::decode(
                "<values>",
                "cannot flatten multiple rows of multiple columns",
            )),
        }
    }

    /// Restore the uniform row-of-rows shape. `Row` and `Column` are
    /// unambiguous given the variant.
    pub fn into_rows(self) -> Vec<Vec<Value>> {
        match self {
            Shaped::Null => Vec::new(),
            Shaped::Scalar(v) => vec![vec![v]],
            Shaped::Row(values) => vec![values],
            Shaped::Column(values) => values.into_iter().map(|v| vec![v]).collect(),
            Shaped::Rows(rows) => rows,
        }
    }

    /// JSON rendering of the shaped value.
    pub fn to_json(&self) -> DbResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    fn kind(&self) -> &'static str {
        match self {
            Shaped::Null => "no rows",
            Shaped::Scalar(_) => "a scalar",
            Shaped::Row(_) => "one row",
            Shaped::Column(_) => "one column",
            Shaped::Rows(_) => "several rows",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Value {
        Value::Integer(v)
    }

    #[test]
    fn zero_rows_is_null() {
        assert_eq!(shape(Vec::new(), 1), Shaped::Null);
        assert_eq!(shape(Vec::new(), 3), Shaped::Null);
    }

    #[test]
    fn one_row_one_column_is_scalar() {
        assert_eq!(shape(vec![vec![int(1)]], 1), Shaped::Scalar(int(1)));
    }

    #[test]
    fn one_row_many_columns_is_row() {
        assert_eq!(
            shape(vec![vec![int(1), int(2)]], 2),
            Shaped::Row(vec![int(1), int(2)])
        );
    }

    #[test]
    fn many_rows_one_column_is_column() {
        assert_eq!(
            shape(vec![vec![int(1)], vec![int(2)]], 1),
            Shaped::Column(vec![int(1), int(2)])
        );
    }

    #[test]
    fn many_rows_many_columns_stay_rows() {
        let rows = vec![vec![int(1), int(2)], vec![int(3), int(4)]];
        assert_eq!(shape(rows.clone(), 2), Shaped::Rows(rows));
    }

    #[test]
    fn into_rows_restores_uniform_shape() {
        assert_eq!(Shaped::Scalar(int(1)).into_rows(), vec![vec![int(1)]]);
        assert_eq!(
            Shaped::Column(vec![int(1), int(2)]).into_rows(),
            vec![vec![int(1)], vec![int(2)]]
        );
        assert!(Shaped::Null.into_rows().is_empty());
    }

    #[test]
    fn scalar_extraction() {
        assert_eq!(Shaped::Scalar(int(5)).scalar::<i64>().unwrap(), 5);
        assert_eq!(Shaped::Null.scalar::<Option<i64>>().unwrap(), None);
        assert!(Shaped::Row(vec![int(1), int(2)]).scalar::<i64>().is_err());
    }

    #[test]
    fn serializes_untagged() {
        let json = Shaped::Row(vec![int(1), Value::Text("a".into())])
            .to_json()
            .unwrap();
        assert_eq!(json, serde_json::json!([1, "a"]));
        assert_eq!(Shaped::Null.to_json().unwrap(), serde_json::Value::Null);
    }
}
