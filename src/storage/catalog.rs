//! Catalog file loading
//!
//! Foods and portions arrive as JSON files produced by an external catalog
//! collaborator. Files are plain arrays of entries; loading validates that
//! identifiers are unique before the tables are handed to the stats core.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::domain::{Catalog, Food, Portion};

/// Loads foods from a JSON array file
pub fn load_foods(path: &Path) -> Result<Vec<Food>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read foods file {}", path.display()))?;
    let foods: Vec<Food> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse foods file {}", path.display()))?;
    Ok(foods)
}

/// Loads portions from a JSON array file
pub fn load_portions(path: &Path) -> Result<Vec<Portion>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read portions file {}", path.display()))?;
    let portions: Vec<Portion> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse portions file {}", path.display()))?;
    Ok(portions)
}

/// Loads both catalog files and builds the lookup tables
pub fn load_catalog(foods_path: &Path, portions_path: &Path) -> Result<Catalog> {
    let foods = load_foods(foods_path)?;
    let portions = load_portions(portions_path)?;

    let mut catalog = Catalog::new();
    for food in foods {
        if catalog.foods_by_id.contains_key(&food.id) {
            bail!("Duplicate food id {} in {}", food.id, foods_path.display());
        }
        catalog.foods_by_id.insert(food.id, food);
    }
    for portion in portions {
        if catalog.portions_by_id.contains_key(&portion.id) {
            bail!(
                "Duplicate portion id '{}' in {}",
                portion.id,
                portions_path.display()
            );
        }
        catalog.portions_by_id.insert(portion.id.clone(), portion);
    }

    Ok(catalog)
}
