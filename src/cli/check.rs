//! `check` command: validate a diet against its catalogs
//!
//! Unlike aggregation, which aborts on the first problem, `check` walks
//! every entry and reports each dangling reference or invalid quantity so
//! the user sees the complete picture instead of zeros.

use std::path::Path;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::stats::resolve;
use crate::storage::{load_catalog, load_diet};

use super::output::Output;

#[derive(Debug, Serialize)]
struct Problem {
    variant: String,
    meal: String,
    entry_index: usize,
    error: String,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    diet: String,
    entries_checked: usize,
    problems: Vec<Problem>,
}

pub fn run(diet_path: &Path, foods: &Path, portions: &Path, output: &Output) -> Result<()> {
    let catalog = load_catalog(foods, portions)?;
    let diet = load_diet(diet_path)?;

    let mut problems = Vec::new();
    let mut entries_checked = 0;

    for variant in &diet.variants {
        for meal in &variant.meals {
            for (entry_index, entry) in meal.entries.iter().enumerate() {
                entries_checked += 1;
                if let Err(err) = resolve(entry, &catalog) {
                    problems.push(Problem {
                        variant: variant.name.clone(),
                        meal: meal.name.clone(),
                        entry_index,
                        error: err.to_string(),
                    });
                }
            }
        }
    }

    let report = CheckReport {
        diet: diet.name.clone(),
        entries_checked,
        problems,
    };

    if output.is_json() {
        output.data(&report);
    } else {
        for problem in &report.problems {
            output.line(&format!(
                "{} / {} / entry {}: {}",
                problem.variant, problem.meal, problem.entry_index, problem.error
            ));
        }
    }

    if report.problems.is_empty() {
        output.success(&format!("{} entries OK", report.entries_checked));
        Ok(())
    } else {
        bail!(
            "{} of {} entries are invalid",
            report.problems.len(),
            report.entries_checked
        );
    }
}
