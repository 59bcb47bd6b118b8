//! WHERE clause rendering shared by SELECT, UPDATE and DELETE.

use crate::pairs::ConditionPair;
use crate::sql::Sql;

/// Append `WHERE` with every equality condition, then every pattern
/// condition, AND-combined. Nothing is appended when both lists are empty.
///
/// NULL values render as `col IS NULL`; everything else is bound.
pub(crate) fn push_where(sql: &mut Sql, equals: &[ConditionPair], patterns: &[ConditionPair]) {
    if equals.is_empty() && patterns.is_empty() {
        return;
    }
    sql.push(" WHERE ");

    let clauses = equals
        .iter()
        .map(|c| (c, " = "))
        .chain(patterns.iter().map(|c| (c, " LIKE ")));
    for (i, (cond, op)) in clauses.enumerate() {
        if i > 0 {
            sql.push(" AND ");
        }
        sql.push_ident_ref(&cond.column);
        if cond.value.is_null() {
            sql.push(" IS NULL");
        } else {
            sql.push(op).push_bind(cond.value.clone());
        }
    }
}
