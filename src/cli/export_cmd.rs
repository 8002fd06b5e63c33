//! `export` command: render a diet into a PDF via the export worker

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::export::ExportWorker;
use crate::stats::aggregate;
use crate::storage::{load_catalog, load_diet, Config};

use super::output::Output;

pub fn run(
    diet_path: &Path,
    foods: &Path,
    portions: &Path,
    out_path: &Path,
    config_path: Option<&Path>,
    output: &Output,
) -> Result<()> {
    let config = Config::load(config_path)?;
    let catalog = load_catalog(foods, portions)?;
    let diet = load_diet(diet_path)?;

    let tree = aggregate(&diet, &catalog).context("Aggregation failed")?;

    let mut worker = ExportWorker::spawn();
    let job = worker.request_export(&diet, &tree, &catalog, &config.export);
    output.verbose(&format!("export request {} dispatched", job.id()));

    let document = job.wait().context("Export failed")?;
    fs::write(out_path, &document.bytes)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    output.success(&format!(
        "Wrote {} ({} pages, {} sections, {} bytes)",
        out_path.display(),
        document.page_count,
        document.section_count,
        document.bytes.len()
    ));
    Ok(())
}
