//! Exploratory statistics for a table.
//!
//! Nothing here changes the table. The functions produce the `info()`-style
//! overview, per-column null counts, the data behind a box plot of every
//! numeric column, and the points of a two-column scatter plot.
//!
//! Quantiles use linear interpolation between the two closest ranks, the
//! same rule the outlier fence uses, so a value flagged as an outlier in a
//! box plot is exactly a value the fence would remove.

use super::types::{BoxPlotSummary, ColumnOverview, DatasetOverview, ScatterSeries};
use crate::error::TableError;
use anyhow::{Context as _, Result};
use polars::prelude::*;

pub fn dataset_overview(df: &DataFrame) -> DatasetOverview {
    let rows = df.height();
    let columns = df
        .get_columns()
        .iter()
        .map(|col| {
            let nulls = col.null_count();
            ColumnOverview {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                non_null: rows - nulls,
                nulls,
            }
        })
        .collect();

    DatasetOverview { rows, columns }
}

/// Null count of every column, in table order.
pub fn missing_counts(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|col| (col.name().to_string(), col.null_count()))
        .collect()
}

/// Column `name` as `f64` values, nulls preserved.
///
/// Only numeric dtypes are accepted; text is never coerced to nulls.
pub(crate) fn float_values(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{name}' not found"))?;
    if !column.dtype().is_primitive_numeric() {
        return Err(TableError::NotNumeric {
            column: name.to_owned(),
            dtype: column.dtype().to_string(),
        }
        .into());
    }
    let series = column
        .as_materialized_series()
        .cast(&DataType::Float64)
        .with_context(|| format!("Failed to read '{name}' as f64"))?;
    let ca = series.f64().map_err(|e| anyhow::anyhow!(e))?;
    Ok(ca.clone())
}

pub(crate) fn quartiles(ca: &Float64Chunked) -> Result<Option<(f64, f64)>> {
    let q1 = ca
        .quantile(0.25, QuantileMethod::Linear)
        .map_err(|e| anyhow::anyhow!(e))?;
    let q3 = ca
        .quantile(0.75, QuantileMethod::Linear)
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(q1.zip(q3))
}

/// Box plot data for one numeric column.
///
/// Returns `None` when the column holds no values at all. When no value
/// falls inside the fence the whiskers collapse onto the quartiles.
///
/// # Errors
///
/// Fails if the column is missing or cannot be read as numbers.
pub fn box_plot_summary(
    df: &DataFrame,
    name: &str,
    multiplier: f64,
) -> Result<Option<BoxPlotSummary>> {
    let ca = float_values(df, name)?;
    let count = ca.len() - ca.null_count();
    if count == 0 {
        return Ok(None);
    }

    let (Some(min), Some(max), Some(median), Some((q1, q3))) =
        (ca.min(), ca.max(), ca.median(), quartiles(&ca)?)
    else {
        return Ok(None);
    };

    let iqr = q3 - q1;
    let lower_fence = q1 - multiplier * iqr;
    let upper_fence = q3 + multiplier * iqr;

    let mut lower_whisker = f64::INFINITY;
    let mut upper_whisker = f64::NEG_INFINITY;
    let mut outliers = Vec::new();
    for v in ca.into_iter().flatten() {
        if v < lower_fence || v > upper_fence {
            outliers.push(v);
        } else {
            lower_whisker = lower_whisker.min(v);
            upper_whisker = upper_whisker.max(v);
        }
    }
    if outliers.len() == count {
        lower_whisker = q1;
        upper_whisker = q3;
    }

    Ok(Some(BoxPlotSummary {
        column: name.to_owned(),
        count,
        min,
        q1,
        median,
        q3,
        max,
        iqr,
        lower_fence,
        upper_fence,
        lower_whisker,
        upper_whisker,
        outliers,
    }))
}

/// Box plots for `columns`, plus the names of the columns with no values.
///
/// # Errors
///
/// Fails if any listed column is missing or not numeric.
pub fn box_plots(
    df: &DataFrame,
    columns: &[String],
    multiplier: f64,
) -> Result<(Vec<BoxPlotSummary>, Vec<String>)> {
    let mut plots = Vec::with_capacity(columns.len());
    let mut empty = Vec::new();

    for name in columns {
        if let Some(plot) = box_plot_summary(df, name, multiplier)? {
            log::debug!(
                "Box plot '{name}': q1={} median={} q3={} outliers={}",
                plot.q1,
                plot.median,
                plot.q3,
                plot.outliers.len()
            );
            plots.push(plot);
        } else {
            log::warn!("Column '{name}' is empty or contains only nulls");
            empty.push(name.clone());
        }
    }

    Ok((plots, empty))
}

/// Pairs `(x, y)` for every row where both values are present.
///
/// # Errors
///
/// Fails if either column is missing or not numeric.
pub fn scatter_series(df: &DataFrame, x: &str, y: &str) -> Result<ScatterSeries> {
    let xs = float_values(df, x)?;
    let ys = float_values(df, y)?;
    let points = xs
        .into_iter()
        .zip(ys.into_iter())
        .filter_map(|(a, b)| a.zip(b))
        .collect();

    Ok(ScatterSeries {
        x_label: x.to_owned(),
        y_label: y.to_owned(),
        points,
    })
}
