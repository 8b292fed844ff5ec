use super::f64_values;
use crate::analyser::logic::*;
use crate::error::TableError;
use anyhow::Result;
use polars::prelude::*;

#[test]
fn test_drop_sparse_rows_threshold() -> Result<()> {
    let df = df!(
        "a" => &[Some(1), Some(2), None, None],
        "b" => &[Some(1.0), None, Some(3.0), None],
        "c" => &[Some("x"), Some("y"), None, None],
        "d" => &[Some(true), None, None, None]
    )?;

    let (kept, dropped) = drop_sparse_rows(&df, 0.5)?;

    // Row 1 has exactly 2 of 4 fields and sits on the threshold.
    assert_eq!(dropped, 2);
    assert_eq!(kept.height(), 2);
    assert_eq!(f64_values(&kept, "a"), vec![Some(1.0), Some(2.0)]);

    let limit = 0.5 * kept.width() as f64;
    for row in 0..kept.height() {
        let missing = kept
            .get_columns()
            .iter()
            .filter(|c| c.as_materialized_series().is_null().get(row) == Some(true))
            .count();
        assert!(missing as f64 <= limit, "row {row} has {missing} nulls");
    }
    Ok(())
}

#[test]
fn test_drop_sparse_rows_zero_coverage_keeps_everything() -> Result<()> {
    let df = df!("a" => &[None::<i32>, None], "b" => &[None::<&str>, Some("x")])?;
    let (kept, dropped) = drop_sparse_rows(&df, 0.0)?;
    assert_eq!(kept.height(), 2);
    assert_eq!(dropped, 0);
    Ok(())
}

#[test]
fn test_drop_sparse_rows_rejects_bad_input() -> Result<()> {
    let df = df!("a" => &[1, 2])?;
    let err = drop_sparse_rows(&df, 1.2).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TableError>(),
        Some(TableError::InvalidConfig(_))
    ));

    let err = drop_sparse_rows(&DataFrame::empty(), 0.5).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TableError>(),
        Some(TableError::EmptyTable)
    ));
    Ok(())
}

#[test]
fn test_impute_numeric_means() -> Result<()> {
    let df = df!(
        "vals" => &[Some(10.0), Some(20.0), None, Some(30.0)],
        "ints" => &[Some(1_i64), None, Some(3), Some(5)],
        "full" => &[1_i64, 2, 3, 4],
        "txt" => &[Some("a"), None, Some("c"), Some("d")]
    )?;
    let columns = numeric_columns(&df);
    assert_eq!(columns, vec!["vals", "ints", "full"]);

    let (filled, imputed) = impute_numeric_means(df, &columns)?;

    assert_eq!(imputed, vec!["vals", "ints"]);
    assert_eq!(
        f64_values(&filled, "vals"),
        vec![Some(10.0), Some(20.0), Some(20.0), Some(30.0)]
    );
    assert_eq!(
        f64_values(&filled, "ints"),
        vec![Some(1.0), Some(3.0), Some(3.0), Some(5.0)]
    );
    assert_eq!(filled.column("ints")?.dtype(), &DataType::Float64);
    // Untouched columns keep their dtype and nulls.
    assert_eq!(filled.column("full")?.dtype(), &DataType::Int64);
    assert_eq!(filled.column("txt")?.null_count(), 1);
    Ok(())
}

#[test]
fn test_impute_skips_all_null_column() -> Result<()> {
    let empty = Series::new("empty".into(), &[None::<f64>, None]);
    let df = DataFrame::new(vec![Column::from(empty)])?;

    let (filled, imputed) = impute_numeric_means(df, &["empty".to_owned()])?;
    assert!(imputed.is_empty());
    assert_eq!(filled.column("empty")?.null_count(), 2);
    Ok(())
}

#[test]
fn test_drop_duplicate_rows_keeps_first_in_order() -> Result<()> {
    let df = df!(
        "a" => &[1, 2, 1, 3, 2],
        "b" => &["x", "y", "x", "z", "q"]
    )?;
    assert_eq!(count_duplicate_rows(&df)?, 1);

    let (unique, dropped) = drop_duplicate_rows(df)?;
    assert_eq!(dropped, 1);
    assert_eq!(
        f64_values(&unique, "a"),
        vec![Some(1.0), Some(2.0), Some(3.0), Some(2.0)]
    );
    Ok(())
}

#[test]
fn test_duplicate_rows_with_nulls_are_equal() -> Result<()> {
    let df = df!("a" => &[None, None, Some(1)], "b" => &[Some("k"), Some("k"), None])?;
    let (unique, dropped) = drop_duplicate_rows(df)?;
    assert_eq!(dropped, 1);
    assert_eq!(unique.height(), 2);
    Ok(())
}

#[test]
fn test_parse_timestamp_millis_layouts() {
    let jan5 = 1_704_412_800_000;
    assert_eq!(parse_timestamp_millis("2024-01-05"), Some(jan5));
    assert_eq!(parse_timestamp_millis(" 05.01.2024 "), Some(jan5));
    assert_eq!(parse_timestamp_millis("01/05/2024"), Some(jan5));
    assert_eq!(parse_timestamp_millis("2024/01/05"), Some(jan5));
    assert_eq!(
        parse_timestamp_millis("2024-01-05 10:30:00"),
        Some(jan5 + 37_800_000)
    );
    assert_eq!(
        parse_timestamp_millis("2024-01-05T10:30:00Z"),
        Some(jan5 + 37_800_000)
    );
    assert_eq!(parse_timestamp_millis("not a date"), None);
    assert_eq!(parse_timestamp_millis(""), None);
}

#[test]
fn test_parse_date_column_coerces_bad_values() -> Result<()> {
    let df = df!(
        "date_column" => &[Some("2024-01-05"), Some("not a date"), None, Some("2024-01-05 10:30:00")],
        "v" => &[1, 2, 3, 4]
    )?;

    let parsed = parse_date_column(df, "date_column")?;
    let col = parsed.column("date_column")?;

    assert_eq!(
        col.dtype(),
        &DataType::Datetime(TimeUnit::Milliseconds, None)
    );
    assert_eq!(col.null_count(), 2);
    let millis = col.as_materialized_series().cast(&DataType::Int64)?;
    assert_eq!(millis.i64()?.get(0), Some(1_704_412_800_000));
    // Column position is unchanged.
    assert_eq!(parsed.get_column_names()[0].as_str(), "date_column");
    Ok(())
}

#[test]
fn test_parse_date_column_absent_or_non_text() -> Result<()> {
    let df = df!("v" => &[1, 2])?;
    let same = parse_date_column(df.clone(), "date_column")?;
    assert!(same.equals(&df));

    let numeric = df!("date_column" => &[20_240_105, 20_240_106])?;
    let same = parse_date_column(numeric, "date_column")?;
    assert_eq!(same.column("date_column")?.dtype(), &DataType::Int32);
    Ok(())
}

#[test]
fn test_fence_outliers_single_column() -> Result<()> {
    let df = df!("x" => &[1.0, 2.0, 3.0, 4.0, 100.0])?;

    let (fenced, fences) = fence_outliers(&df, &["x".to_owned()], 1.5)?;

    assert_eq!(
        f64_values(&fenced, "x"),
        vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)]
    );
    let fence = &fences[0];
    assert_eq!(fence.q1, 2.0);
    assert_eq!(fence.q3, 4.0);
    assert_eq!(fence.lower, -1.0);
    assert_eq!(fence.upper, 7.0);
    assert_eq!(fence.rows_removed(), 1);
    Ok(())
}

#[test]
fn test_fence_outliers_sequential_columns() -> Result<()> {
    let df = df!(
        "a" => &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 50.0],
        "b" => &[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 90.0, 18.0]
    )?;
    let columns = vec!["a".to_owned(), "b".to_owned()];

    let (fenced, fences) = fence_outliers(&df, &columns, 1.5)?;

    assert_eq!(fences.len(), 2);
    // The second fence sees the table left by the first.
    assert_eq!(fences[1].rows_before, fences[0].rows_after);
    assert_eq!(fenced.height(), 8);
    for fence in &fences {
        for v in f64_values(&fenced, &fence.column).into_iter().flatten() {
            assert!(fence.contains(v), "{v} outside fence of {}", fence.column);
        }
    }
    Ok(())
}

#[test]
fn test_fence_drops_nulls_and_skips_empty_columns() -> Result<()> {
    let df = df!(
        "x" => &[Some(1.0), Some(2.0), None, Some(3.0)],
        "empty" => &[None::<f64>, None, None, None]
    )?;

    let (fenced, fences) = fence_outliers(&df, &["x".to_owned(), "empty".to_owned()], 1.5)?;

    assert_eq!(fences.len(), 1);
    assert_eq!(fenced.height(), 3);
    assert_eq!(fenced.column("x")?.null_count(), 0);
    Ok(())
}

#[test]
fn test_fence_rejects_text_column() -> Result<()> {
    let df = df!("likes" => &["1.2k", "300"])?;
    let err = fence_outliers(&df, &["likes".to_owned()], 1.5).expect_err("text is not fenced");
    assert!(err.to_string().contains("not numeric"));
    Ok(())
}
