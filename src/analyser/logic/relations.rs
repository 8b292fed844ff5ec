use super::types::SplitTables;
use crate::config::ColumnNames;
use crate::error::TableError;
use anyhow::{Context as _, Result};
use polars::prelude::*;

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_index(name).is_some()
}

/// Splits the table into distinct authors and posts without the author name.
///
/// Returns `None` unless both the author-id and post-id columns exist.
///
/// # Errors
///
/// Returns [`TableError::MissingColumn`] when the ids exist but the author
/// name column does not.
pub fn split_authors_posts(df: &DataFrame, names: &ColumnNames) -> Result<Option<SplitTables>> {
    if !has_column(df, &names.author_id) || !has_column(df, &names.post_id) {
        log::debug!("No author/post id columns; table not split");
        return Ok(None);
    }
    if !has_column(df, &names.author_name) {
        return Err(TableError::MissingColumn {
            column: names.author_name.clone(),
            reason: "to build the author table".to_owned(),
        }
        .into());
    }

    let authors = df
        .select([names.author_id.as_str(), names.author_name.as_str()])?
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()
        .context("Failed to build author table")?;
    let posts = df
        .drop(&names.author_name)
        .context("Failed to build post table")?;

    log::info!(
        "Split into {} authors and {} posts",
        authors.height(),
        posts.height()
    );
    Ok(Some(SplitTables { authors, posts }))
}

/// Appends `output` holding the character count of `content`.
///
/// Null content gives a null length.
///
/// # Errors
///
/// Fails if `content` is missing or is not a text column.
pub fn add_post_length(df: DataFrame, content: &str, output: &str) -> Result<DataFrame> {
    df.lazy()
        .with_column(col(content).str().len_chars().alias(output))
        .collect()
        .with_context(|| format!("Failed to measure '{content}'"))
}
