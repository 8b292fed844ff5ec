//! Table operations behind a cleaning run.
//!
//! - [`io`]: read and write delimited files
//! - [`cleaning`]: sparse rows, mean imputation, duplicates, dates, IQR fences
//! - [`profiling`]: overview, null counts, box plot and scatter data
//! - [`relations`]: author/post split and post length
//! - [`flows`]: the full run and its [`CleaningReport`]

pub mod cleaning;
pub mod flows;
pub mod io;
pub mod profiling;
pub mod relations;
pub mod types;

pub use cleaning::{
    count_duplicate_rows, drop_duplicate_rows, drop_sparse_rows, fence_outliers,
    impute_numeric_means, numeric_columns, parse_date_column, parse_timestamp_millis,
};
pub use flows::{CleaningOutcome, CleaningReport, clean_file_flow, run_cleaning, save_split_tables};
pub use io::{load_df, save_df};
pub use profiling::{box_plot_summary, box_plots, dataset_overview, missing_counts, scatter_series};
pub use relations::{add_post_length, has_column, split_authors_posts};
pub use types::{
    BoxPlotSummary, ColumnOverview, DatasetOverview, OutlierFence, ScatterSeries, SplitSummary,
    SplitTables,
};

#[cfg(test)]
mod tests;
