use super::*;
use crate::value::Value;

#[test]
fn builds_placeholders_in_order() {
    let mut q = sql("SELECT * FROM users WHERE a = ");
    q.push_bind(1_i64).push(" AND b = ").push_bind("x");

    assert_eq!(q.to_sql(), "SELECT * FROM users WHERE a = ?1 AND b = ?2");
    assert_eq!(
        q.params(),
        &[Value::Integer(1), Value::Text("x".to_string())]
    );
}

#[test]
fn can_compose_fragments() {
    let mut w = Sql::empty();
    w.push(" WHERE id = ").push_bind(42_i64);

    let mut q = sql("SELECT * FROM users");
    q.push_sql(w);

    assert_eq!(q.to_sql(), "SELECT * FROM users WHERE id = ?1");
    assert_eq!(q.param_count(), 1);
}

#[test]
fn bind_list_renders_commas() {
    let mut q = sql("INSERT INTO t (a, b, c) VALUES (");
    q.push_bind_list([1_i64, 2, 3]).push(")");
    assert_eq!(q.to_sql(), "INSERT INTO t (a, b, c) VALUES (?1, ?2, ?3)");
}

#[test]
fn double_digit_placeholders() {
    let mut q = Sql::empty();
    q.push_bind_list(0..12_i64);
    assert!(q.to_sql().ends_with("?11, ?12"));
}

#[test]
fn push_ident_rejects_unsafe() {
    let mut q = Sql::empty();
    assert!(q.push_ident("users; drop table users; --").is_err());
    assert!(q.push_ident("users name").is_err());
    q.push_ident("main.users").unwrap();
    assert_eq!(q.to_sql(), "main.users");
}

#[test]
fn quote_characters_stay_out_of_the_text() {
    let mut q = sql("SELECT 1 WHERE name = ");
    q.push_bind("O'Brien \"the\" third");
    assert_eq!(q.to_sql(), "SELECT 1 WHERE name = ?1");
}

#[test]
fn strips_comments_before_keyword() {
    let s = strip_sql_prefix("  -- note\n/* block */ (SELECT 1)");
    assert!(starts_with_keyword(s, "select"));
    assert_eq!(strip_sql_prefix("-- only a comment"), "");
}

#[test]
fn raw_keeps_caller_placeholders() {
    let q = Sql::raw("SELECT ?1 || ?2", ["a", "b"]);
    assert_eq!(q.to_sql(), "SELECT ?1 || ?2");
    assert_eq!(q.param_count(), 2);
}
