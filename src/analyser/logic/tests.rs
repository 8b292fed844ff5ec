#![expect(clippy::unwrap_used, reason = "test code panics on unexpected shapes")]

mod cleaning;

use polars::prelude::*;

/// A small social-media style table touching every branch of the run.
///
/// Row 3 duplicates row 2, row 4 is mostly empty, row 5 has an outlying
/// like count and an unparseable date, row 6 has no like count.
pub(super) fn posts_fixture() -> DataFrame {
    df!(
        "author_id" => &[Some(1_i64), Some(1), Some(2), Some(2), None, Some(3), Some(3)],
        "author_name" => &[Some("Ann"), Some("Ann"), Some("Bob"), Some("Bob"), None, Some("Cy"), Some("Cy")],
        "post_id" => &[Some(100_i64), Some(101), Some(102), Some(102), None, Some(103), Some(104)],
        "post_content" => &[Some("hello"), Some("hi"), Some("a longer post"), Some("a longer post"), None, Some("x"), Some("yo")],
        "likes" => &[Some(10_i64), Some(12), Some(11), Some(11), None, Some(1000), None],
        "date_column" => &["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-03", "2024-01-04", "bad", "2024-01-06"]
    )
    .unwrap()
}

pub(super) fn f64_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

#[test]
fn test_numeric_columns_keep_table_order() {
    let df = posts_fixture();
    assert_eq!(
        crate::analyser::logic::numeric_columns(&df),
        vec!["author_id", "post_id", "likes"]
    );
}
