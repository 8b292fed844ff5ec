use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tablewash::analyser::logic::{
    CleaningReport, dataset_overview, load_df, missing_counts, run_cleaning, save_df,
    save_split_tables,
};
use tablewash::config::CleaningConfig;
use tablewash::utils::{fmt_opt, fmt_share};

const DEFAULT_INPUT: &str = "Food_Time_Data_Set.csv";
const DEFAULT_OUTPUT: &str = "cleaned_data.csv";

#[derive(Parser)]
#[command(name = "tablewash", about = "Clean a tabular dataset and save the result")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clean a file and save the result
    Clean {
        /// Input file path (CSV, TSV or TXT with a header row)
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        file: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// Path to a JSON cleaning configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the run report (box plot, fence and scatter data) as JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Also write authors.csv and posts.csv into this directory
        #[arg(long)]
        split_dir: Option<PathBuf>,

        /// Minimum fraction of non-null fields a row needs to be kept
        #[arg(long)]
        min_coverage: Option<f64>,

        /// IQR multiplier for the outlier fence
        #[arg(long)]
        iqr_multiplier: Option<f64>,
    },
    /// Show shape, preview rows and null counts without changing anything
    Inspect {
        /// Input file path
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        file: PathBuf,

        /// Path to a JSON cleaning configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of preview rows
        #[arg(long)]
        rows: Option<usize>,
    },
}

pub fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Clean {
            file,
            output,
            config,
            report,
            split_dir,
            min_coverage,
            iqr_multiplier,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(v) = min_coverage {
                config.min_coverage = v;
            }
            if let Some(v) = iqr_multiplier {
                config.iqr_multiplier = v;
            }
            config.validate()?;
            handle_clean(
                &file,
                &output,
                &config,
                report.as_deref(),
                split_dir.as_deref(),
            )
        }
        Commands::Inspect { file, config, rows } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(n) = rows {
                config.preview_rows = n;
            }
            handle_inspect(&file, &config)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<CleaningConfig> {
    match path {
        Some(p) => CleaningConfig::from_file(p),
        None => Ok(CleaningConfig::default()),
    }
}

fn handle_inspect(file: &Path, config: &CleaningConfig) -> Result<()> {
    let df = load_df(file, &config.input).context("Failed to load dataframe")?;
    print_overview(&df, config.preview_rows);
    print_missing(&df);
    Ok(())
}

fn handle_clean(
    file: &Path,
    output: &Path,
    config: &CleaningConfig,
    report_path: Option<&Path>,
    split_dir: Option<&Path>,
) -> Result<()> {
    let df = load_df(file, &config.input).context("Failed to load dataframe")?;
    print_overview(&df, config.preview_rows);
    print_missing(&df);

    let mut outcome = run_cleaning(df, config)?;
    let report = &outcome.report;

    println!("\nDuplicate rows: {}", report.duplicate_rows_dropped);
    print_box_plots(report);

    if let Some(split) = outcome.split.as_mut() {
        println!("\nAuthors table:");
        println!("{}", split.authors.head(Some(config.preview_rows)));
        println!("\nPosts table:");
        println!("{}", split.posts.head(Some(config.preview_rows)));

        if let Some(dir) = split_dir {
            save_split_tables(split, dir, &config.input)?;
            println!("Split tables saved to {}", dir.display());
        }
    }

    if let Some(scatter) = &report.scatter {
        println!(
            "\nScatter {} vs {}: {} points",
            scatter.x_label,
            scatter.y_label,
            scatter.points.len()
        );
    }

    if let Some(path) = report_path {
        report.to_file(path)?;
        println!("Report written to {}", path.display());
    }

    println!("\n{}", report.summary());
    save_df(&mut outcome.data, output, &config.input)?;
    println!("Cleaned data saved to {}", output.display());
    Ok(())
}

fn print_overview(df: &DataFrame, preview_rows: usize) {
    let overview = dataset_overview(df);
    println!("{} rows x {} columns", overview.rows, overview.column_count());
    println!("{:<24} {:<16} {:>10}", "column", "dtype", "non-null");
    for col in &overview.columns {
        println!("{:<24} {:<16} {:>10}", col.name, col.dtype, col.non_null);
    }
    println!();
    println!("{}", df.head(Some(preview_rows)));
}

fn print_missing(df: &DataFrame) {
    println!("\nMissing values:");
    for (name, nulls) in missing_counts(df) {
        println!("  {name:<24} {}", fmt_share(nulls, df.height()));
    }
}

fn print_box_plots(report: &CleaningReport) {
    if report.box_plots.is_empty() && report.empty_numeric_columns.is_empty() {
        return;
    }
    println!("\nDistribution of numeric columns:");
    for plot in &report.box_plots {
        println!(
            "  {:<20} min {} | q1 {} | median {} | q3 {} | max {} | fence [{}, {}] | {} outliers",
            plot.column,
            fmt_opt(Some(plot.min)),
            fmt_opt(Some(plot.q1)),
            fmt_opt(Some(plot.median)),
            fmt_opt(Some(plot.q3)),
            fmt_opt(Some(plot.max)),
            fmt_opt(Some(plot.lower_fence)),
            fmt_opt(Some(plot.upper_fence)),
            plot.outliers.len()
        );
    }
    for name in &report.empty_numeric_columns {
        println!("  Column {name} is empty or contains only nulls.");
    }
}
