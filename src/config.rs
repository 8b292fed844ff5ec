//! Run configuration.
//!
//! A `CleaningConfig` can be built in code, read from a JSON file, or left at
//! its defaults. Every field is optional in JSON:
//!
//! ```json
//! {
//!   "min_coverage": 0.5,
//!   "iqr_multiplier": 1.5,
//!   "columns": { "date": "published_at" }
//! }
//! ```

use crate::error::TableError;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs for one cleaning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Minimum fraction of non-null fields a row needs to be kept.
    #[serde(default = "default_min_coverage")]
    pub min_coverage: f64,

    /// IQR multiplier `k` for the `[Q1 - k*IQR, Q3 + k*IQR]` fence.
    #[serde(default = "default_iqr_multiplier")]
    pub iqr_multiplier: f64,

    #[serde(default)]
    pub input: InputOptions,

    /// Rows shown by console previews.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    #[serde(default)]
    pub columns: ColumnNames,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            min_coverage: default_min_coverage(),
            iqr_multiplier: default_iqr_multiplier(),
            input: InputOptions::default(),
            preview_rows: default_preview_rows(),
            columns: ColumnNames::default(),
        }
    }
}

impl CleaningConfig {
    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, is not valid JSON, or holds
    /// out-of-range values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Parse a config from a JSON string and validate it.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or out-of-range values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Fails only if serialisation fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize config")
    }

    /// # Errors
    ///
    /// Returns [`TableError::InvalidConfig`] for the first out-of-range field.
    pub fn validate(&self) -> std::result::Result<(), TableError> {
        if !(0.0..=1.0).contains(&self.min_coverage) {
            return Err(TableError::InvalidConfig(format!(
                "min_coverage must be within [0, 1], got {}",
                self.min_coverage
            )));
        }
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(TableError::InvalidConfig(format!(
                "iqr_multiplier must be a non-negative number, got {}",
                self.iqr_multiplier
            )));
        }
        if let Some(delimiter) = &self.input.delimiter
            && delimiter.len() != 1
        {
            return Err(TableError::InvalidConfig(format!(
                "delimiter must be a single byte, got {delimiter:?}"
            )));
        }
        if self.input.infer_schema_rows == 0 {
            return Err(TableError::InvalidConfig(
                "infer_schema_rows must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// How the delimited input (and output) is read and written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputOptions {
    /// Field delimiter, a single ASCII character. When unset, `.tsv` files
    /// use a tab and everything else a comma.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,

    /// Rows scanned to infer column dtypes.
    #[serde(default = "default_infer_schema_rows")]
    pub infer_schema_rows: usize,

    /// Field values read as missing, in addition to empty fields.
    #[serde(default = "default_null_values")]
    pub null_values: Vec<String>,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            delimiter: None,
            infer_schema_rows: default_infer_schema_rows(),
            null_values: default_null_values(),
        }
    }
}

impl InputOptions {
    /// Delimiter byte used for `path`.
    pub fn delimiter_for(&self, path: &Path) -> u8 {
        if let Some(byte) = self.delimiter.as_ref().and_then(|d| d.bytes().next()) {
            return byte;
        }
        let is_tsv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
        if is_tsv { b'\t' } else { b',' }
    }
}

/// Names of the optional columns probed during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnNames {
    #[serde(default = "default_date")]
    pub date: String,
    #[serde(default = "default_author_id")]
    pub author_id: String,
    #[serde(default = "default_author_name")]
    pub author_name: String,
    #[serde(default = "default_post_id")]
    pub post_id: String,
    #[serde(default = "default_post_content")]
    pub post_content: String,
    #[serde(default = "default_likes")]
    pub likes: String,
    /// Name of the derived character-count column.
    #[serde(default = "default_post_length")]
    pub post_length: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: default_date(),
            author_id: default_author_id(),
            author_name: default_author_name(),
            post_id: default_post_id(),
            post_content: default_post_content(),
            likes: default_likes(),
            post_length: default_post_length(),
        }
    }
}

// Default value functions
fn default_min_coverage() -> f64 {
    0.5
}

fn default_iqr_multiplier() -> f64 {
    1.5
}

fn default_preview_rows() -> usize {
    5
}

fn default_null_values() -> Vec<String> {
    [
        "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
        "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn default_infer_schema_rows() -> usize {
    10_000
}

fn default_date() -> String {
    "date_column".to_owned()
}

fn default_author_id() -> String {
    "author_id".to_owned()
}

fn default_author_name() -> String {
    "author_name".to_owned()
}

fn default_post_id() -> String {
    "post_id".to_owned()
}

fn default_post_content() -> String {
    "post_content".to_owned()
}

fn default_likes() -> String {
    "likes".to_owned()
}

fn default_post_length() -> String {
    "post_length".to_owned()
}
