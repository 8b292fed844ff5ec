use crate::config::InputOptions;
use crate::error::TableError;
use anyhow::{Context as _, Result};
use polars::prelude::*;
use std::path::Path;

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn check_delimited(path: &Path) -> Result<()> {
    let ext = extension_of(path);
    match ext.as_str() {
        "csv" | "tsv" | "txt" => Ok(()),
        _ => Err(TableError::UnsupportedFormat(ext).into()),
    }
}

/// Reads a delimited file with a header row into memory.
///
/// Empty fields and the `null_values` tokens become nulls, so a numeric
/// column with `NA` cells is still read as numbers. Column dtypes are
/// inferred from the first `infer_schema_rows` rows.
///
/// # Errors
///
/// Fails if the extension is not a delimited one, the file is missing, or
/// the content cannot be parsed.
pub fn load_df(path: &Path, options: &InputOptions) -> Result<DataFrame> {
    check_delimited(path)?;
    std::fs::metadata(path).with_context(|| format!("Cannot open {}", path.display()))?;

    let null_values = (!options.null_values.is_empty()).then(|| {
        NullValues::AllColumns(options.null_values.iter().map(|v| v.as_str().into()).collect())
    });

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_separator(options.delimiter_for(path))
        .with_infer_schema_length(Some(options.infer_schema_rows))
        .with_null_values(null_values)
        .finish()
        .context("Failed to scan CSV")?
        .collect()
        .context("Failed to read CSV")?;

    log::info!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Writes `df` as a delimited file with a header and no index column.
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn save_df(df: &mut DataFrame, path: &Path, options: &InputOptions) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .with_separator(options.delimiter_for(path))
        .finish(df)
        .context("Failed to write CSV file")?;

    log::info!("Saved {} rows to {}", df.height(), path.display());
    Ok(())
}
