//! End-to-end reads and writes against a temporary SQLite file.

use dbworker::{Column, ColumnType, DbWorker, Pairs, Shaped, Value, named};
use std::collections::BTreeMap;
use tempfile::TempDir;

fn setup() -> (TempDir, DbWorker) {
    let dir = tempfile::tempdir().unwrap();
    let db = DbWorker::new(dir.path().join("test.db"), true);
    (dir, db)
}

fn id_column() -> Column {
    Column::builder("id", ColumnType::Integer)
        .primary_key()
        .auto_increment()
        .build()
        .unwrap()
}

fn people(db: &DbWorker) {
    db.create(
        "people",
        &[
            id_column(),
            Column::builder("name", ColumnType::Text)
                .not_null()
                .build()
                .unwrap(),
            Column::new("age", ColumnType::Integer).unwrap(),
        ],
    )
    .unwrap();
}

fn count(db: &DbWorker, table: &str) -> i64 {
    let rows = db
        .execute_raw(&format!("SELECT COUNT(*) FROM {table}"))
        .unwrap();
    rows[0][0].as_i64().unwrap()
}

#[test]
fn create_write_read_single_value() {
    let (_dir, db) = setup();
    db.create(
        "t",
        &[id_column(), Column::new("name", ColumnType::Text).unwrap()],
    )
    .unwrap();

    assert_eq!(db.write("t", BTreeMap::from([("name", "alice")])).unwrap(), 1);
    let name = db.read("t", "name", ("id", 1_i64)).unwrap();
    assert_eq!(name, Shaped::Scalar(Value::from("alice")));
    assert_eq!(name.scalar::<String>().unwrap(), "alice");
}

#[test]
fn delete_without_conditions_empties_the_table() {
    let (_dir, db) = setup();
    people(&db);
    db.write("people", named! { name = ["a", "b", "c"], age = [1_i64, 2, 3] })
        .unwrap();

    assert_eq!(db.delete("people", ()).unwrap(), 3);
    assert_eq!(db.read("people", "name", ()).unwrap(), Shaped::Null);
    assert_eq!(count(&db, "people"), 0);
}

#[test]
fn multi_row_write_reads_back_each_row() {
    let (_dir, db) = setup();
    people(&db);

    let names: Vec<String> = (0..25).map(|i| format!("user{i}")).collect();
    let ages: Vec<i64> = (0..25).map(|i| 20 + i).collect();
    let inserted = db
        .write("people", named! { name = names.clone(), age = ages.clone() })
        .unwrap();
    assert_eq!(inserted, 25);

    for (name, age) in names.iter().zip(&ages) {
        let row = db
            .read("people", ["name", "age"], ("name", name.as_str()))
            .unwrap();
        assert_eq!(
            row,
            Shaped::Row(vec![Value::from(name.as_str()), Value::Integer(*age)])
        );
    }
}

#[test]
fn result_shapes_follow_arity() {
    let (_dir, db) = setup();
    people(&db);
    db.write("people", named! { name = ["ann", "bob"], age = [30_i64, 30] })
        .unwrap();

    assert!(db.read("people", "name", ("age", 99_i64)).unwrap().is_null());
    assert_eq!(
        db.read("people", "name", ("age", 30_i64)).unwrap(),
        Shaped::Column(vec![Value::from("ann"), Value::from("bob")])
    );
    assert_eq!(
        db.read("people", ["name", "age"], ()).unwrap(),
        Shaped::Rows(vec![
            vec![Value::from("ann"), Value::Integer(30)],
            vec![Value::from("bob"), Value::Integer(30)],
        ])
    );
    match db.read("people", "*", ("name", "bob")).unwrap() {
        Shaped::Row(values) => assert_eq!(values.len(), 3),
        other => panic!("unexpected shape: {other:?}"),
    }
}

#[test]
fn raw_reads_never_collapse() {
    let (_dir, db) = setup();
    people(&db);
    db.write("people", named! { name = "solo", age = 1_i64 }).unwrap();

    let rows = db.read_raw("people", "name", (), ()).unwrap();
    assert_eq!(rows, vec![vec![Value::from("solo")]]);

    let none = db.read_raw("people", "name", ("age", 2_i64), ()).unwrap();
    assert!(none.is_empty());
}

#[test]
fn pattern_conditions_use_like() {
    let (_dir, db) = setup();
    people(&db);
    db.write(
        "people",
        named! { name = ["alice", "alfred", "bob"], age = [1_i64, 2, 1] },
    )
    .unwrap();

    let hits = db.read_like("people", "name", (), ("name", "al%")).unwrap();
    assert_eq!(
        hits,
        Shaped::Column(vec![Value::from("alice"), Value::from("alfred")])
    );

    let one = db
        .read_like("people", "name", ("age", 1_i64), ("name", "al%"))
        .unwrap();
    assert_eq!(one, Shaped::Scalar(Value::from("alice")));
}

#[test]
fn single_quotes_round_trip_byte_for_byte() {
    let (_dir, db) = setup();
    people(&db);
    let tricky = "O'Brien's \"quoted\" name; --";
    db.write("people", ("name", tricky)).unwrap();

    let back = db.read("people", "name", ("name", tricky)).unwrap();
    assert_eq!(back.scalar::<String>().unwrap(), tricky);
}

#[test]
fn update_and_delete_without_conditions_touch_every_row() {
    let (_dir, db) = setup();
    people(&db);
    db.write("people", named! { name = ["a", "b", "c"], age = [1_i64, 2, 3] })
        .unwrap();

    assert_eq!(db.update("people", ("age", 9_i64), ()).unwrap(), 3);
    assert_eq!(
        db.read("people", "age", ("age", 9_i64)).unwrap(),
        Shaped::Column(vec![Value::Integer(9); 3])
    );

    assert_eq!(db.delete("people", ("name", "a")).unwrap(), 1);
    assert_eq!(count(&db, "people"), 2);
    assert_eq!(db.delete("people", Pairs::new()).unwrap(), 2);
    assert_eq!(count(&db, "people"), 0);
}

#[test]
fn null_values_bind_and_match_is_null() {
    let (_dir, db) = setup();
    people(&db);
    db.write("people", named! { name = ["x", "y"], age = vec![Some(1_i64), None] })
        .unwrap();

    assert_eq!(
        db.read("people", "name", ("age", None::<i64>)).unwrap(),
        Shaped::Scalar(Value::from("y"))
    );
    assert_eq!(
        db.update("people", ("age", None::<i64>), ("name", "x")).unwrap(),
        1
    );
    assert_eq!(
        db.read("people", "age", ("name", "x")).unwrap(),
        Shaped::Scalar(Value::Null)
    );
    assert_eq!(db.delete("people", ("age", Value::Null)).unwrap(), 2);
}

#[test]
fn if_exists_makes_create_and_drop_idempotent() {
    let (_dir, db) = setup();
    people(&db);
    people(&db);
    db.drop_table("people").unwrap();
    db.drop_table("people").unwrap();
    assert!(db.execute_raw("SELECT * FROM people").is_err());
}

#[test]
fn composite_primary_key_rejects_duplicates() {
    let (_dir, db) = setup();
    let key = |name: &str| {
        Column::builder(name, ColumnType::Text)
            .primary_key()
            .build()
            .unwrap()
    };
    db.create(
        "memberships",
        &[key("user"), key("team"), Column::new("role", ColumnType::Text).unwrap()],
    )
    .unwrap();

    db.write("memberships", named! { user = "u1", team = "t1", role = "admin" })
        .unwrap();
    db.write("memberships", named! { user = "u1", team = "t2", role = "member" })
        .unwrap();
    let err = db
        .write("memberships", named! { user = "u1", team = "t1", role = "member" })
        .unwrap_err();
    assert!(err.is_unique_violation());
}

#[test]
fn json_objects_work_as_data() {
    let (_dir, db) = setup();
    people(&db);
    let serde_json::Value::Object(row) = serde_json::json!({ "name": "json", "age": 7 }) else {
        unreachable!()
    };
    db.write("people", row).unwrap();

    let shaped = db.read("people", ["name", "age"], ("name", "json")).unwrap();
    assert_eq!(shaped.to_json().unwrap(), serde_json::json!(["json", 7]));
}

#[test]
fn json_arrays_insert_one_row_per_element() {
    let (_dir, db) = setup();
    people(&db);
    let serde_json::Value::Object(rows) =
        serde_json::json!({ "name": ["a", "b"], "age": [1, null] })
    else {
        unreachable!()
    };
    assert_eq!(db.write("people", rows).unwrap(), 2);

    let back = db.read_raw("people", ["name", "age"], (), ()).unwrap();
    assert_eq!(
        back,
        vec![
            vec![Value::from("a"), Value::Integer(1)],
            vec![Value::from("b"), Value::Null],
        ]
    );
}

#[test]
fn auto_increment_key_next_to_another_primary_column() {
    let (_dir, db) = setup();
    db.create(
        "events",
        &[
            Column::builder("tenant", ColumnType::Integer)
                .primary_key()
                .build()
                .unwrap(),
            id_column(),
            Column::new("kind", ColumnType::Text).unwrap(),
        ],
    )
    .unwrap();

    db.write("events", named! { tenant = [7_i64, 7], kind = ["a", "b"] })
        .unwrap();
    assert_eq!(
        db.read("events", "id", ("tenant", 7_i64)).unwrap(),
        Shaped::Column(vec![Value::Integer(1), Value::Integer(2)])
    );
}
