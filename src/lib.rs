//! # Tablewash - clean one tabular dataset
//!
//! Tablewash loads a delimited file, removes what makes it hard to analyse
//! and writes the cleaned table back out. The run is a fixed sequence:
//!
//! 1. drop rows with too few non-null fields (coverage threshold),
//! 2. fill missing numeric values with the column mean,
//! 3. drop duplicate rows,
//! 4. parse the date column, if there is one,
//! 5. collect box plot data for every numeric column,
//! 6. keep only rows inside each numeric column's IQR fence,
//! 7. split authors from posts and measure post length, when those
//!    columns exist.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tablewash::analyser::logic::clean_file_flow;
//! use tablewash::config::CleaningConfig;
//! use std::path::Path;
//!
//! let outcome = clean_file_flow(
//!     Path::new("Food_Time_Data_Set.csv"),
//!     Path::new("cleaned_data.csv"),
//!     &CleaningConfig::default(),
//! )?;
//! println!("{}", outcome.report.summary());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Each step is also a public function in [`analyser::logic`] taking and
//! returning a polars `DataFrame`, so it can be applied on its own:
//!
//! ```
//! use polars::prelude::*;
//! use tablewash::analyser::logic::{fence_outliers, numeric_columns};
//!
//! let df = df!("x" => &[1.0, 2.0, 3.0, 4.0, 100.0])?;
//! let (fenced, _fences) = fence_outliers(&df, &numeric_columns(&df), 1.5)?;
//! assert_eq!(fenced.height(), 4);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`analyser`]: table operations and the full run
//! - [`config`]: run configuration (JSON)
//! - [`error`]: typed failures
//! - [`utils`]: formatting helpers

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod config;
pub mod error;
pub mod utils;
