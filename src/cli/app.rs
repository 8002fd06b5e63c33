//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{check, export_cmd, stats_cmd};

#[derive(Parser)]
#[command(name = "mealplan")]
#[command(author, version, about = "Local-first diet planning with nutrition stats and PDF export")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate a diet and show nutrient totals per variant and meal
    Stats {
        /// Path to the diet JSON file
        diet: PathBuf,

        /// Path to the foods catalog
        #[arg(long, default_value = "foods.json")]
        foods: PathBuf,

        /// Path to the portions catalog
        #[arg(long, default_value = "portions.json")]
        portions: PathBuf,
    },

    /// Validate every food entry against the catalogs
    Check {
        /// Path to the diet JSON file
        diet: PathBuf,

        /// Path to the foods catalog
        #[arg(long, default_value = "foods.json")]
        foods: PathBuf,

        /// Path to the portions catalog
        #[arg(long, default_value = "portions.json")]
        portions: PathBuf,
    },

    /// Render a diet into a paginated PDF
    Export {
        /// Path to the diet JSON file
        diet: PathBuf,

        /// Path to the foods catalog
        #[arg(long, default_value = "foods.json")]
        foods: PathBuf,

        /// Path to the portions catalog
        #[arg(long, default_value = "portions.json")]
        portions: PathBuf,

        /// Output PDF path
        #[arg(long, short = 'o', default_value = "diet.pdf")]
        output: PathBuf,

        /// Explicit config file (defaults to the global config)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Parses arguments and runs the selected command
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    match cli.command {
        Commands::Stats {
            diet,
            foods,
            portions,
        } => stats_cmd::run(&diet, &foods, &portions, &output),
        Commands::Check {
            diet,
            foods,
            portions,
        } => check::run(&diet, &foods, &portions, &output),
        Commands::Export {
            diet,
            foods,
            portions,
            output: out_path,
            config,
        } => export_cmd::run(
            &diet,
            &foods,
            &portions,
            &out_path,
            config.as_deref(),
            &output,
        ),
    }
}
