use super::profiling::{float_values, quartiles};
use super::types::OutlierFence;
use crate::error::TableError;
use anyhow::{Context as _, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%m/%d/%Y", "%Y/%m/%d"];

/// Names of the numeric columns, in table order.
pub fn numeric_columns(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .filter(|col| col.dtype().is_primitive_numeric())
        .map(|col| col.name().to_string())
        .collect()
}

/// Keeps rows with at least `min_coverage * column_count` non-null fields.
///
/// Returns the filtered table and the number of rows dropped.
///
/// # Errors
///
/// Fails if `min_coverage` is outside `[0, 1]` or the table has no columns.
pub fn drop_sparse_rows(df: &DataFrame, min_coverage: f64) -> Result<(DataFrame, usize)> {
    if !(0.0..=1.0).contains(&min_coverage) {
        return Err(TableError::InvalidConfig(format!(
            "min_coverage must be within [0, 1], got {min_coverage}"
        ))
        .into());
    }
    if df.width() == 0 {
        return Err(TableError::EmptyTable.into());
    }

    let threshold = min_coverage * df.width() as f64;
    let mut present = vec![0_usize; df.height()];

    for col in df.get_columns() {
        if col.null_count() == 0 {
            present.iter_mut().for_each(|n| *n += 1);
            continue;
        }
        let not_null = col.as_materialized_series().is_not_null();
        for (n, is_set) in present.iter_mut().zip(&not_null) {
            if is_set.unwrap_or(false) {
                *n += 1;
            }
        }
    }

    let keep = BooleanChunked::from_iter_values(
        "keep".into(),
        present.iter().map(|&n| n as f64 >= threshold),
    );
    let filtered = df.filter(&keep).context("Failed to drop sparse rows")?;
    let dropped = df.height() - filtered.height();

    log::info!("Dropped {dropped} rows with fewer than {threshold} non-null fields");
    Ok((filtered, dropped))
}

/// Replaces nulls in each listed column with the mean of its values.
///
/// Columns without nulls are left untouched, as are columns with no values
/// to average. Imputed columns come back as `f64`. Returns the table and the
/// names of the columns that were filled.
///
/// # Errors
///
/// Fails if a listed column does not exist or cannot be cast to `f64`.
pub fn impute_numeric_means(
    df: DataFrame,
    columns: &[String],
) -> Result<(DataFrame, Vec<String>)> {
    let mut exprs = Vec::new();
    let mut imputed = Vec::new();

    for name in columns {
        let col_ref = df
            .column(name)
            .with_context(|| format!("Column '{name}' not found"))?;
        let nulls = col_ref.null_count();
        if nulls == 0 {
            continue;
        }
        if nulls == col_ref.len() {
            log::warn!("Column '{name}' has no values to average; left as is");
            continue;
        }

        log::debug!("Imputing {nulls} nulls in '{name}' with the column mean");
        let values = col(name.as_str()).cast(DataType::Float64);
        exprs.push(values.clone().fill_null(values.mean()));
        imputed.push(name.clone());
    }

    if exprs.is_empty() {
        return Ok((df, imputed));
    }

    let filled = df
        .lazy()
        .with_columns(exprs)
        .collect()
        .context("Failed to impute missing values")?;
    Ok((filled, imputed))
}

/// Keeps the first occurrence of every full-row duplicate, in order.
///
/// Returns the table and the number of rows removed.
///
/// # Errors
///
/// Fails if polars cannot hash one of the column types.
pub fn drop_duplicate_rows(df: DataFrame) -> Result<(DataFrame, usize)> {
    let before = df.height();
    let unique = df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()
        .context("Failed to drop duplicate rows")?;
    let dropped = before - unique.height();

    log::info!("Dropped {dropped} duplicate rows");
    Ok((unique, dropped))
}

/// Number of rows that repeat an earlier row.
///
/// # Errors
///
/// See [`drop_duplicate_rows`].
pub fn count_duplicate_rows(df: &DataFrame) -> Result<usize> {
    drop_duplicate_rows(df.clone()).map(|(_, dropped)| dropped)
}

/// Parses one date/time string to milliseconds since the Unix epoch.
pub fn parse_timestamp_millis(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.and_utc().timestamp_millis());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Converts a text column to a millisecond `Datetime`, if the column exists.
///
/// Values that match no known layout become null. Columns that are already
/// temporal, and columns that are not text, are left alone.
///
/// # Errors
///
/// Fails only if polars rejects the replacement column.
pub fn parse_date_column(mut df: DataFrame, name: &str) -> Result<DataFrame> {
    let parsed = {
        let Ok(col_ref) = df.column(name) else {
            log::debug!("No '{name}' column; skipping date parsing");
            return Ok(df);
        };
        if col_ref.dtype().is_temporal() {
            return Ok(df);
        }
        let Ok(text) = col_ref.as_materialized_series().str() else {
            log::warn!(
                "Column '{name}' has dtype {}; skipping date parsing",
                col_ref.dtype()
            );
            return Ok(df);
        };

        let millis: Int64Chunked = text
            .into_iter()
            .map(|v| v.and_then(parse_timestamp_millis))
            .collect();
        let unparsed = millis.null_count() - text.null_count();
        if unparsed > 0 {
            log::warn!("{unparsed} values in '{name}' are not dates and were set to null");
        }

        millis
            .with_name(name.into())
            .into_datetime(TimeUnit::Milliseconds, None)
            .into_series()
    };

    df.with_column(parsed)
        .with_context(|| format!("Failed to replace column '{name}'"))?;
    Ok(df)
}

/// Removes rows outside the IQR fence of each listed column, one column
/// after another.
///
/// Each fence is computed on the rows left by the previous fences. Rows with
/// a null in the fenced column are removed with the outliers. A column with
/// no values is skipped.
///
/// # Errors
///
/// Fails if a listed column is missing or not numeric.
pub fn fence_outliers(
    df: &DataFrame,
    columns: &[String],
    multiplier: f64,
) -> Result<(DataFrame, Vec<OutlierFence>)> {
    let mut current = df.clone();
    let mut fences = Vec::with_capacity(columns.len());

    for name in columns {
        let values = float_values(&current, name)?;
        let Some((q1, q3)) = quartiles(&values)? else {
            log::warn!("Column '{name}' has no values; no fence applied");
            continue;
        };

        let iqr = q3 - q1;
        let lower = q1 - multiplier * iqr;
        let upper = q3 + multiplier * iqr;
        let inside = values.gt_eq(lower) & values.lt_eq(upper);

        let rows_before = current.height();
        current = current
            .filter(&inside)
            .with_context(|| format!("Failed to fence column '{name}'"))?;

        let fence = OutlierFence {
            column: name.clone(),
            q1,
            q3,
            iqr,
            lower,
            upper,
            rows_before,
            rows_after: current.height(),
        };
        log::info!(
            "Fence '{name}': [{lower}, {upper}] removed {} rows",
            fence.rows_removed()
        );
        fences.push(fence);
    }

    Ok((current, fences))
}
