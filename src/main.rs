//! # Tablewash command line
//!
//! ```text
//! main()
//!   │
//!   ├─> env_logger (RUST_LOG=debug for step-by-step logs)
//!   ├─> Parse CLI arguments (clap)
//!   └─> Run `clean` or `inspect`
//! ```
//!
//! ```bash
//! tablewash clean -f Food_Time_Data_Set.csv -o cleaned_data.csv --report report.json
//! tablewash inspect -f Food_Time_Data_Set.csv --rows 10
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, reason = "console reporting is the binary's job")]

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    env_logger::init();

    let cli = cli::Cli::parse();
    cli::run_command(cli.command)
}
