use mybear::ingestion::{ReadOptions, read_from_path};
use mybear::{Aggregation, DataFrame, FrameError, JoinHow, Selection, Selector, Series, Value};

fn articles() -> DataFrame {
    read_from_path("tests/fixtures/articles.csv", &ReadOptions::default()).unwrap()
}

#[test]
fn groupby_on_loaded_file_collapses_duplicate_prices() {
    let df = articles();
    let grouped = df
        .groupby(&["price"], &[("price", Aggregation::Max)])
        .unwrap();

    assert_eq!(grouped.columns(), vec!["price", "name", "stock", "added"]);
    assert_eq!(grouped.count(), 3);
    assert_eq!(
        grouped.column("name").unwrap(),
        &Series::new("name", ["Orange", "Pamplemousse", "Rhubarbe"])
    );
    // The two "Orange" rows (stock 12 and 8) collapse to their maximum.
    assert_eq!(grouped.column("stock").unwrap()[0], Value::Integer(12));
    assert_eq!(grouped.column("stock").unwrap()[1], Value::Null);
}

#[test]
fn left_join_with_shared_price_column() {
    let df = articles();
    let discounts = DataFrame::from_series(vec![
        Series::new("name", ["Orange", "Rhubarbe"]),
        Series::new("price", [12.0, 2.0]),
    ])
    .unwrap();

    let joined = df
        .join(&discounts, "name", "name", JoinHow::Left)
        .unwrap();
    assert!(joined.columns().contains(&"price_x"));
    assert!(joined.columns().contains(&"price_y"));
    assert_eq!(joined.count(), df.count());
    assert_eq!(
        joined.column("price_y").unwrap(),
        &Series::new("price_y", [Some(12.0), None, Some(2.0), Some(12.0)])
    );
}

#[test]
fn iloc_shapes_follow_the_selectors() {
    let df = articles();

    assert!(matches!(df.iloc(0, 0).unwrap(), Selection::Scalar(_)));
    assert!(matches!(df.iloc(0..2, 0).unwrap(), Selection::Series(_)));
    assert!(matches!(df.iloc(0, 0..2).unwrap(), Selection::Frame(_)));
    assert!(matches!(df.iloc(.., ..).unwrap(), Selection::Frame(ref f) if f == &df));

    let rows: Selector = "1:3".parse().unwrap();
    let cols: Selector = ":2".parse().unwrap();
    let sub = df.iloc(rows, cols).unwrap().into_frame().unwrap();
    assert_eq!(sub.columns(), vec!["name", "price"]);
    assert_eq!(sub.column("name").unwrap()[0], Value::from("Pamplemousse"));
}

#[test]
fn reductions_over_numeric_columns() {
    let df = articles();
    let numeric = df.iloc(.., 1..3).unwrap().into_frame().unwrap();

    let mean = numeric.mean().unwrap();
    assert_eq!(mean.columns(), vec!["price", "stock"]);
    let stock_mean = mean.column("stock").unwrap()[0].as_f64().unwrap();
    assert!((stock_mean - 23.0 / 3.0).abs() < 1e-12);

    let err = df.mean().unwrap_err();
    assert!(matches!(err, FrameError::NonNumeric { .. }));
}

#[test]
fn display_lists_header_then_rows() {
    let text = articles().to_string();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("name\tprice\tstock\tadded"));
    assert_eq!(
        lines.next(),
        Some("0 Orange   15.0   12     2021-03-07")
    );
    assert_eq!(text.lines().count(), 5);
}
