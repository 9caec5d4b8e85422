use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use mybear::coercion::coerce;
use mybear::{Aggregation, DataFrame, JoinHow, Series, Value};

fn numeric_frame(rows: usize, groups: usize) -> DataFrame {
    DataFrame::from_series(vec![
        Series::new("group_id", (0..rows).map(|i| (i % groups) as i64)),
        Series::new("amount", (0..rows).map(|i| (i as f64) * 0.5)),
    ])
    .unwrap_or_default()
}

fn raw_column(rows: usize) -> Vec<Value> {
    (0..rows)
        .map(|i| match i % 10 {
            0 => Value::from("n/a"),
            1 => Value::from(format!("{}-03-2021", i % 28 + 1)),
            _ => Value::from(i.to_string()),
        })
        .collect()
}

fn bench_coerce_100k(c: &mut Criterion) {
    let column = raw_column(100_000);
    c.bench_function("coerce_100k_mixed_text", |b| {
        b.iter(|| black_box(coerce(column.clone())))
    });
}

fn bench_groupby_100k_1k(c: &mut Criterion) {
    let df = numeric_frame(100_000, 1_000);
    c.bench_function("groupby_100k_rows_1k_groups", |b| {
        b.iter(|| {
            let grouped = df
                .groupby(&["group_id"], &[("group_id", Aggregation::Sum)])
                .unwrap_or_default();
            black_box(grouped);
        })
    });
}

fn bench_inner_join_10k(c: &mut Criterion) {
    let left = numeric_frame(10_000, 10_000);
    let right = numeric_frame(10_000, 5_000);
    c.bench_function("inner_join_10k_x_10k", |b| {
        b.iter(|| {
            let joined = left
                .join(&right, "group_id", "group_id", JoinHow::Inner)
                .unwrap_or_default();
            black_box(joined);
        })
    });
}

criterion_group! {
    name = frame_ops;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(2))
        .sample_size(10)
        .warm_up_time(Duration::from_millis(500));
    targets = bench_coerce_100k, bench_groupby_100k_1k, bench_inner_join_10k
}
criterion_main!(frame_ops);
