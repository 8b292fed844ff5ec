use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// One column of the `info()`-style overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOverview {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
    pub nulls: usize,
}

/// Shape of a table plus per-column dtype and null counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: Vec<ColumnOverview>,
}

impl DatasetOverview {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn total_nulls(&self) -> usize {
        self.columns.iter().map(|c| c.nulls).sum()
    }
}

/// Everything needed to draw a box plot of one numeric column.
///
/// Whiskers reach the most extreme values still inside the fences; values
/// beyond them are listed in `outliers` in table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotSummary {
    pub column: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub iqr: f64,
    pub lower_fence: f64,
    pub upper_fence: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// A fence applied to one numeric column during outlier filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierFence {
    pub column: String,
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
    pub rows_before: usize,
    pub rows_after: usize,
}

impl OutlierFence {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

/// Points for a two-variable scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

/// The cleaned table split into an author table and a post table.
#[derive(Debug, Clone)]
pub struct SplitTables {
    pub authors: DataFrame,
    pub posts: DataFrame,
}

impl SplitTables {
    pub fn summary(&self) -> SplitSummary {
        SplitSummary {
            authors: self.authors.height(),
            posts: self.posts.height(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    pub authors: usize,
    pub posts: usize,
}
