//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `stats` | Aggregate a diet and print nutrient totals per level |
//! | `check` | Validate every entry's references and quantities |
//! | `export` | Render a diet to PDF through the export worker |
//!
//! All commands support `--format text|json` and `--verbose`. Call
//! [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod check;
mod export_cmd;
mod output;
mod stats_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
