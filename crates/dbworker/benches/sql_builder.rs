use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dbworker::{Pairs, Sql, SqlQb, qb};

/// Conditions `col0 = 0 AND col1 = 1 ...`
fn conditions(n: usize) -> Pairs {
    Pairs::from_pairs((0..n).map(|i| (format!("col{i}"), i as i64)))
}

fn bench_to_sql(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/to_sql");

    for n in [1, 5, 10, 50, 100] {
        let sql = qb::select("t", "*").conditions(conditions(n)).build().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &sql, |b, sql| {
            b.iter(|| black_box(sql.to_sql()));
        });
    }

    group.finish();
}

fn bench_select_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/select_build");

    for n in [1, 5, 10, 50] {
        let pairs = conditions(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &pairs, |b, pairs| {
            b.iter(|| {
                let q = qb::select("t", ["id", "name"])
                    .conditions(pairs.clone())
                    .like("name", "a%");
                black_box(q.build().unwrap().to_sql());
            });
        });
    }

    group.finish();
}

fn bench_multi_row_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/multi_row_insert");

    for rows in [1, 10, 100, 500] {
        let names: Vec<String> = (0..rows).map(|i| format!("user{i}")).collect();
        let ages: Vec<i64> = (0..rows as i64).collect();
        group.bench_with_input(
            BenchmarkId::from_parameter(rows),
            &(names, ages),
            |b, (names, ages)| {
                b.iter(|| {
                    let q = qb::insert("people")
                        .set("name", names.clone())
                        .set("age", ages.clone());
                    black_box(q.build().unwrap().to_sql());
                });
            },
        );
    }

    group.finish();
}

fn bench_push_bind_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/push_bind_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let mut sql = Sql::new("SELECT * FROM t WHERE id IN (");
                sql.push_bind_list(values.iter().copied());
                sql.push(")");
                black_box(sql.to_sql());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_to_sql,
    bench_select_build,
    bench_multi_row_insert,
    bench_push_bind_list
);
criterion_main!(benches);
