//! Typed failures raised by the cleaning run.
//!
//! Most fallible code returns `anyhow::Result` and attaches context at I/O
//! and polars boundaries. The variants below cover the failures that have a
//! fixed shape worth matching on:
//!
//! ```
//! use tablewash::error::TableError;
//!
//! fn describe(err: &TableError) -> &'static str {
//!     match err {
//!         TableError::MissingColumn { .. } => "schema",
//!         TableError::NotNumeric { .. } => "schema",
//!         TableError::UnsupportedFormat(_) => "input",
//!         TableError::InvalidConfig(_) => "config",
//!         TableError::EmptyTable => "data",
//!     }
//! }
//! ```
//!
//! They convert into `anyhow::Error` through `?`, and can be recovered with
//! `anyhow::Error::downcast_ref::<TableError>()`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// The input path has an extension we do not read.
    #[error("Unsupported file extension: {0:?}")]
    UnsupportedFormat(String),

    /// A column required by a branch that already started is absent.
    #[error("Column '{column}' is required {reason}")]
    MissingColumn { column: String, reason: String },

    /// A column used as numbers holds some other dtype.
    #[error("Column '{column}' is not numeric (dtype {dtype})")]
    NotNumeric { column: String, dtype: String },

    /// A configuration value is out of range.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// The table has no columns, so no coverage threshold can be derived.
    #[error("Table has no columns")]
    EmptyTable,
}
