//! Food and portion catalogs
//!
//! Catalog entries are immutable reference data supplied by an external
//! loader before any aggregation runs. The stats core only ever reads them
//! through the lookup tables on [`Catalog`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::id::{FoodId, PortionId};
use super::nutrient::NutrientVector;

/// Default reference amount for food nutrient data, in grams
pub const DEFAULT_REFERENCE_GRAMS: f64 = 100.0;

fn default_reference_grams() -> f64 {
    DEFAULT_REFERENCE_GRAMS
}

/// An immutable catalog food
///
/// Nutrient amounts are normalized to `reference_grams` (per 100 g unless
/// the catalog says otherwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    /// Unique identifier
    pub id: FoodId,

    /// Display name
    pub name: String,

    /// Reference amount the nutrient vector is normalized to, in grams
    #[serde(default = "default_reference_grams")]
    pub reference_grams: f64,

    /// Nutrients per reference amount
    pub nutrients: NutrientVector,
}

impl Food {
    /// Creates a new food with per-100g nutrient data
    pub fn new(id: FoodId, name: impl Into<String>, nutrients: NutrientVector) -> Self {
        Self {
            id,
            name: name.into(),
            reference_grams: DEFAULT_REFERENCE_GRAMS,
            nutrients,
        }
    }
}

/// An immutable catalog portion
///
/// A portion carries no food reference of its own: the pairing with a food
/// happens on the food entry, so the same portion ("cup") can measure many
/// foods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portion {
    /// Unique identifier
    pub id: PortionId,

    /// Unit label shown to the user (e.g., "slice", "cup")
    pub unit: String,

    /// Grams per one unit of this portion
    pub grams: f64,
}

impl Portion {
    /// Creates a new portion
    pub fn new(id: impl Into<PortionId>, unit: impl Into<String>, grams: f64) -> Self {
        Self {
            id: id.into(),
            unit: unit.into(),
            grams,
        }
    }
}

/// Read-only lookup tables for foods and portions
///
/// The interactive layer may replace a catalog wholesale between
/// operations, but entries are never mutated in place while an aggregation
/// or export snapshot references them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Foods keyed by identifier
    pub foods_by_id: HashMap<FoodId, Food>,

    /// Portions keyed by identifier
    pub portions_by_id: HashMap<PortionId, Portion>,
}

impl Catalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from food and portion lists
    pub fn from_entries(
        foods: impl IntoIterator<Item = Food>,
        portions: impl IntoIterator<Item = Portion>,
    ) -> Self {
        Self {
            foods_by_id: foods.into_iter().map(|f| (f.id, f)).collect(),
            portions_by_id: portions.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// Looks up a food by identifier
    pub fn food(&self, id: FoodId) -> Option<&Food> {
        self.foods_by_id.get(&id)
    }

    /// Looks up a portion by identifier
    pub fn portion(&self, id: &PortionId) -> Option<&Portion> {
        self.portions_by_id.get(id)
    }
}
