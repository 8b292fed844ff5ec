//! The cleaning run, start to finish.
//!
//! ```text
//! raw table
//!   ├─> overview + null counts
//!   ├─> drop sparse rows
//!   ├─> capture numeric columns
//!   ├─> mean imputation
//!   ├─> drop duplicates
//!   ├─> parse date column (if present)
//!   ├─> box plot data per numeric column
//!   ├─> IQR fence per numeric column
//!   ├─> author/post split (if ids present)
//!   └─> post length + scatter (if content and likes present)
//! ```

use super::cleaning::{
    drop_duplicate_rows, drop_sparse_rows, fence_outliers, impute_numeric_means, numeric_columns,
    parse_date_column,
};
use super::io::{load_df, save_df};
use super::profiling::{box_plots, dataset_overview, missing_counts, scatter_series};
use super::relations::{add_post_length, has_column, split_authors_posts};
use super::types::{
    BoxPlotSummary, DatasetOverview, OutlierFence, ScatterSeries, SplitSummary, SplitTables,
};
use crate::config::{CleaningConfig, InputOptions};
use anyhow::{Context as _, Result};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{Duration, Instant};

/// What happened during one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Shape of the table as loaded.
    pub input_overview: DatasetOverview,

    /// Null counts of the table as loaded.
    pub missing_before: Vec<(String, usize)>,

    pub rows_before: usize,
    pub columns_before: usize,
    pub rows_after: usize,
    pub columns_after: usize,

    pub sparse_rows_dropped: usize,
    pub duplicate_rows_dropped: usize,
    pub outlier_rows_dropped: usize,

    pub numeric_columns: Vec<String>,
    pub imputed_columns: Vec<String>,

    /// Set when the date column was present.
    pub parsed_date_column: Option<String>,

    pub box_plots: Vec<BoxPlotSummary>,

    /// Numeric columns with no values, for which no plot was produced.
    pub empty_numeric_columns: Vec<String>,

    pub fences: Vec<OutlierFence>,
    pub split: Option<SplitSummary>,
    pub scatter: Option<ScatterSeries>,

    pub duration: Duration,
}

impl CleaningReport {
    pub fn summary(&self) -> String {
        format!(
            "Cleaning completed: rows {} ({} → {}; {} sparse, {} duplicate, {} outlier), columns {} → {}, {} imputed, {:.2}s",
            if self.rows_after < self.rows_before {
                "removed"
            } else {
                "unchanged"
            },
            self.rows_before,
            self.rows_after,
            self.sparse_rows_dropped,
            self.duplicate_rows_dropped,
            self.outlier_rows_dropped,
            self.columns_before,
            self.columns_after,
            self.imputed_columns.len(),
            self.duration.as_secs_f64()
        )
    }

    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(path.as_ref(), json).context("Failed to write report file")
    }
}

/// The cleaned table, the optional split tables and the report.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub data: DataFrame,
    pub split: Option<SplitTables>,
    pub report: CleaningReport,
}

/// Runs every cleaning and analysis step on an in-memory table.
///
/// # Errors
///
/// Fails on an invalid config, on a missing `author_name` column when the
/// author/post ids exist, and on any column whose dtype does not support the
/// step applied to it.
pub fn run_cleaning(df: DataFrame, config: &CleaningConfig) -> Result<CleaningOutcome> {
    let start = Instant::now();
    config.validate()?;
    let names = &config.columns;

    let input_overview = dataset_overview(&df);
    let missing_before = missing_counts(&df);
    let rows_before = df.height();
    let columns_before = df.width();

    let (df, sparse_rows_dropped) = drop_sparse_rows(&df, config.min_coverage)?;

    // Captured once; later steps see the same list even if dtypes change.
    let numeric = numeric_columns(&df);
    let (df, imputed_columns) = impute_numeric_means(df, &numeric)?;

    let (df, duplicate_rows_dropped) = drop_duplicate_rows(df)?;

    let parsed_date_column = has_column(&df, &names.date).then(|| names.date.clone());
    let df = parse_date_column(df, &names.date)?;

    let (box_plots, empty_numeric_columns) = box_plots(&df, &numeric, config.iqr_multiplier)?;

    let rows_before_fence = df.height();
    let (df, fences) = fence_outliers(&df, &numeric, config.iqr_multiplier)?;
    let outlier_rows_dropped = rows_before_fence - df.height();

    let split = split_authors_posts(&df, names)?;

    let (df, scatter) = if has_column(&df, &names.post_content) && has_column(&df, &names.likes) {
        let df = add_post_length(df, &names.post_content, &names.post_length)?;
        let scatter = scatter_series(&df, &names.post_length, &names.likes)?;
        (df, Some(scatter))
    } else {
        (df, None)
    };

    let report = CleaningReport {
        input_overview,
        missing_before,
        rows_before,
        columns_before,
        rows_after: df.height(),
        columns_after: df.width(),
        sparse_rows_dropped,
        duplicate_rows_dropped,
        outlier_rows_dropped,
        numeric_columns: numeric,
        imputed_columns,
        parsed_date_column,
        box_plots,
        empty_numeric_columns,
        fences,
        split: split.as_ref().map(SplitTables::summary),
        scatter,
        duration: start.elapsed(),
    };
    log::info!("{}", report.summary());

    Ok(CleaningOutcome {
        data: df,
        split,
        report,
    })
}

/// Loads `input`, cleans it and writes the result to `output`.
///
/// # Errors
///
/// Propagates load, cleaning and write failures.
pub fn clean_file_flow(
    input: &Path,
    output: &Path,
    config: &CleaningConfig,
) -> Result<CleaningOutcome> {
    let df = load_df(input, &config.input).context("Failed to load data")?;
    let mut outcome = run_cleaning(df, config).context("Cleaning failed")?;
    save_df(&mut outcome.data, output, &config.input)?;
    Ok(outcome)
}

/// Writes `authors.csv` and `posts.csv` into `dir`, creating it if needed.
///
/// # Errors
///
/// Fails if the directory or either file cannot be written.
pub fn save_split_tables(split: &mut SplitTables, dir: &Path, options: &InputOptions) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    save_df(&mut split.authors, &dir.join("authors.csv"), options)?;
    save_df(&mut split.posts, &dir.join("posts.csv"), options)
}
