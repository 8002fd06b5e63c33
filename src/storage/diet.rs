//! Diet file load/save
//!
//! A diet form is stored as a single pretty-printed JSON file so it diffs
//! cleanly under version control.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::DietForm;

/// Loads a diet form from a JSON file
pub fn load_diet(path: &Path) -> Result<DietForm> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read diet file {}", path.display()))?;
    let diet: DietForm = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse diet file {}", path.display()))?;
    Ok(diet)
}

/// Saves a diet form as pretty JSON
pub fn save_diet(path: &Path, diet: &DietForm) -> Result<()> {
    let json = serde_json::to_string_pretty(diet).context("Failed to serialize diet")?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write diet file {}", path.display()))?;
    Ok(())
}
