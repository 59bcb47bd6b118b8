//! Ordered column/value pairs for conditions and data.
//!
//! Callers hand conditions and data to the worker in several shapes. Each
//! shape has its own constructor, so normalization never has to guess:
//!
//! | Shape | Constructor |
//! |---|---|
//! | nothing | [`Pairs::new`] |
//! | ordered pairs | [`Pairs::from_pairs`], `Vec<(K, V)>`, `[(K, V); N]` |
//! | a map | [`Pairs::from_map`], `BTreeMap`, `HashMap` (sorted by column) |
//! | one bare pair | [`Pairs::from_single`], `(K, V)` |
//! | named fields | [`Pairs::with`], [`named!`](crate::named) |
//!
//! Named fields are always appended after whatever the primary argument held.
//! A `HashMap` has no stable iteration order, so its entries are sorted by
//! column name; prefer ordered pairs or a `BTreeMap` when clause order matters.
//!
//! ```ignore
//! use dbworker::{Pairs, named};
//!
//! let by_map = Pairs::from_map(std::collections::BTreeMap::from([("id", 1)]));
//! let by_kw = named! { id = 1 };
//! let mixed = Pairs::from_single("status", "open").with("owner", "alice");
//! ```

use crate::error::{DbError, DbResult};
use crate::ident::Ident;
use crate::value::{Cell, Value};
use std::collections::{BTreeMap, HashMap};

/// An ordered list of `(column, cell)` pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pairs {
    entries: Vec<(String, Cell)>,
}

/// A normalized condition: a validated column and exactly one value.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionPair {
    pub column: Ident,
    pub value: Value,
}

/// A normalized data pair: a validated column and one or more values.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPair {
    pub column: Ident,
    pub cell: Cell,
}

impl Pairs {
    /// No pairs: "no filter" for conditions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ordered pairs, kept in the order given.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Cell>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Map entries, in the map's iteration order.
    pub fn from_map<I, K, V>(map: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Cell>,
    {
        Self::from_pairs(map)
    }

    /// A single bare pair, as a one-element list.
    pub fn from_single(column: impl Into<String>, value: impl Into<Cell>) -> Self {
        Self {
            entries: vec![(column.into(), value.into())],
        }
    }

    /// Append a named field.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.push(column, value);
        self
    }

    /// Append a named field in place.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<Cell>) -> &mut Self {
        self.entries.push((column.into(), value.into()));
        self
    }

    /// Append named fields from another list, after the existing pairs.
    pub fn extend_named(mut self, named: impl Into<Pairs>) -> Self {
        self.entries.extend(named.into().entries);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Normalize as equality/pattern conditions: every value must be a scalar.
    ///
    /// An empty list is valid and means "no filter".
    pub fn normalize_conditions(&self) -> DbResult<Vec<ConditionPair>> {
        self.entries
            .iter()
            .map(|(column, cell)| {
                let value = cell.as_one().cloned().ok_or_else(|| {
                    DbError::shape(format!(
                        "Condition on '{column}' must be a single value, got a sequence of {}",
                        cell.len()
                    ))
                })?;
                Ok(ConditionPair {
                    column: Ident::parse(column)?,
                    value,
                })
            })
            .collect()
    }

    /// Normalize as SET assignments: at least one pair, scalars only.
    pub fn normalize_assignments(&self) -> DbResult<Vec<ConditionPair>> {
        if self.is_empty() {
            return Err(DbError::shape("No columns to assign"));
        }
        self.normalize_conditions()
    }

    /// Normalize as insert data: at least one pair, no empty sequences.
    pub fn normalize_data(&self) -> DbResult<Vec<DataPair>> {
        if self.is_empty() {
            return Err(DbError::shape("No columns to write"));
        }
        self.entries
            .iter()
            .map(|(column, cell)| {
                if cell.is_empty() {
                    return Err(DbError::shape(format!(
                        "Column '{column}' has an empty value sequence"
                    )));
                }
                Ok(DataPair {
                    column: Ident::parse(column)?,
                    cell: cell.clone(),
                })
            })
            .collect()
    }
}

/// No argument: an empty list.
impl From<()> for Pairs {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<Cell>> From<(K, V)> for Pairs {
    fn from((k, v): (K, V)) -> Self {
        Self::from_single(k, v)
    }
}

impl<K: Into<String>, V: Into<Cell>> From<Vec<(K, V)>> for Pairs {
    fn from(v: Vec<(K, V)>) -> Self {
        Self::from_pairs(v)
    }
}

impl<K: Into<String>, V: Into<Cell>, const N: usize> From<[(K, V); N]> for Pairs {
    fn from(v: [(K, V); N]) -> Self {
        Self::from_pairs(v)
    }
}

/// Entries sorted by column name.
impl<K: Into<String>, V: Into<Cell>, S> From<HashMap<K, V, S>> for Pairs {
    fn from(map: HashMap<K, V, S>) -> Self {
        let mut pairs = Self::from_map(map);
        pairs.entries.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    }
}

impl<K: Into<String>, V: Into<Cell>> From<BTreeMap<K, V>> for Pairs {
    fn from(map: BTreeMap<K, V>) -> Self {
        Self::from_map(map)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Pairs {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::from_map(map)
    }
}

/// Build [`Pairs`] from keyword-style fields, in the order written.
///
/// ```ignore
/// let cond = dbworker::named! { id = 1, name = "alice" };
/// ```
#[macro_export]
macro_rules! named {
    () => {
        $crate::Pairs::new()
    };
    ($($column:ident = $value:expr),+ $(,)?) => {{
        let mut pairs = $crate::Pairs::new();
        $( pairs.push(stringify!($column), $value); )+
        pairs
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(pairs: &[ConditionPair]) -> Vec<String> {
        pairs.iter().map(|p| p.column.to_sql()).collect()
    }

    #[test]
    fn equivalent_shapes_normalize_to_same_pairs() {
        let from_map = Pairs::from_map(BTreeMap::from([("a", 1_i64), ("b", 2)]));
        let from_pairs = Pairs::from_pairs(vec![("a", 1_i64), ("b", 2)]);
        let from_named = crate::named! { a = 1_i64, b = 2_i64 };

        let expected = from_pairs.normalize_conditions().unwrap();
        assert_eq!(from_map.normalize_conditions().unwrap(), expected);
        assert_eq!(from_named.normalize_conditions().unwrap(), expected);
    }

    #[test]
    fn single_pair_wraps_into_one_element_list() {
        let pairs: Pairs = ("id", 7_i64).into();
        let norm = pairs.normalize_conditions().unwrap();
        assert_eq!(norm.len(), 1);
        assert_eq!(norm[0].value, Value::Integer(7));
    }

    #[test]
    fn named_fields_follow_primary_argument() {
        let pairs = Pairs::from_pairs([("z", 1_i64)])
            .with("a", 2_i64)
            .extend_named(crate::named! { m = 3_i64 });
        assert_eq!(
            columns(&pairs.normalize_conditions().unwrap()),
            ["z", "a", "m"]
        );
    }

    #[test]
    fn absent_argument_is_empty_filter() {
        assert!(Pairs::new().normalize_conditions().unwrap().is_empty());
        assert!(crate::named! {}.is_empty());
    }

    #[test]
    fn sequence_condition_is_shape_error() {
        let pairs = Pairs::from_single("id", vec![1_i64, 2]);
        assert!(pairs.normalize_conditions().unwrap_err().is_shape());
    }

    #[test]
    fn empty_data_is_shape_error() {
        assert!(Pairs::new().normalize_data().unwrap_err().is_shape());
        assert!(Pairs::new().normalize_assignments().unwrap_err().is_shape());
        let empty_seq = Pairs::from_single("name", Vec::<String>::new());
        assert!(empty_seq.normalize_data().unwrap_err().is_shape());
    }

    #[test]
    fn invalid_column_is_rejected() {
        let pairs = Pairs::from_single("name = 1 OR 1", 1_i64);
        assert!(matches!(
            pairs.normalize_conditions(),
            Err(DbError::Validation(_))
        ));
    }

    #[test]
    fn json_object_becomes_pairs() {
        let serde_json::Value::Object(map) = serde_json::json!({"name": "x", "n": 1}) else {
            unreachable!()
        };
        let pairs = Pairs::from(map);
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn hash_map_order_is_stable() {
        let map: HashMap<String, i64> = (0..20).map(|i| (format!("c{i:02}"), i)).collect();
        let pairs = Pairs::from(map.clone());
        let expected: Vec<String> = (0..20).map(|i| format!("c{i:02}")).collect();
        assert_eq!(columns(&pairs.normalize_conditions().unwrap()), expected);
        assert_eq!(Pairs::from(map), pairs);
    }
}
