//! Diet form tree
//!
//! The editable hierarchy of a diet plan: diet → variants → meals → food
//! entries. The interactive editing layer owns and mutates this tree; the
//! stats core only reads it. Variants and meals carry stable field IDs so
//! their stats subtrees survive reorderings; food entries align by position
//! within their meal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{FieldId, FoodId, PortionId};

/// A leaf entry: some quantity of a food measured in a portion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Catalog food this entry references
    pub food_id: FoodId,

    /// Catalog portion the quantity is measured in
    pub portion_id: PortionId,

    /// Number of portions; fractional quantities are allowed
    pub quantity: f64,
}

impl FoodEntry {
    /// Creates a new food entry
    pub fn new(food_id: FoodId, portion_id: impl Into<PortionId>, quantity: f64) -> Self {
        Self {
            food_id,
            portion_id: portion_id.into(),
            quantity,
        }
    }
}

/// A meal within a variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealForm {
    /// Stable identifier for stats correlation
    pub field_id: FieldId,

    /// Meal name (e.g., "Breakfast")
    pub name: String,

    /// Ordered food entries
    #[serde(default)]
    pub entries: Vec<FoodEntry>,
}

impl MealForm {
    /// Creates an empty meal
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            field_id: FieldId::new(&name, Utc::now()),
            name,
            entries: Vec::new(),
        }
    }

    /// Returns true if this meal has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A named alternative plan within a diet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantForm {
    /// Stable identifier for stats correlation
    pub field_id: FieldId,

    /// Variant name (e.g., "Workday", "Weekend")
    pub name: String,

    /// Ordered meals
    #[serde(default)]
    pub meals: Vec<MealForm>,
}

impl VariantForm {
    /// Creates an empty variant
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            field_id: FieldId::new(&name, Utc::now()),
            name,
            meals: Vec::new(),
        }
    }

    /// Returns true if no meal in this variant has any entries
    ///
    /// Empty variants are valid editing states; the export pipeline skips
    /// them at render time while aggregation still reports them as zero.
    pub fn has_no_entries(&self) -> bool {
        self.meals.iter().all(MealForm::is_empty)
    }
}

/// The root of the diet form tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietForm {
    /// Diet name
    pub name: String,

    /// Ordered variants
    #[serde(default)]
    pub variants: Vec<VariantForm>,

    /// When the diet was created
    pub created_at: DateTime<Utc>,

    /// When the diet was last edited
    pub updated_at: DateTime<Utc>,
}

impl DietForm {
    /// Creates an empty diet
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            variants: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends a variant
    pub fn add_variant(&mut self, variant: VariantForm) {
        self.variants.push(variant);
        self.updated_at = Utc::now();
    }

    /// Renames the diet
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    /// Total number of food entries across all variants and meals
    pub fn entry_count(&self) -> usize {
        self.variants
            .iter()
            .flat_map(|v| &v.meals)
            .map(|m| m.entries.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_diet_is_empty() {
        let diet = DietForm::new("Cut");
        assert!(diet.variants.is_empty());
        assert_eq!(diet.entry_count(), 0);
    }

    #[test]
    fn variants_and_meals_get_field_ids() {
        let variant = VariantForm::new("Workday");
        let meal = MealForm::new("Breakfast");

        assert_eq!(variant.field_id.to_string().len(), 9);
        assert_ne!(variant.field_id, meal.field_id);
    }

    #[test]
    fn has_no_entries_sees_through_empty_meals() {
        let mut variant = VariantForm::new("Workday");
        assert!(variant.has_no_entries());

        variant.meals.push(MealForm::new("Breakfast"));
        assert!(variant.has_no_entries());

        variant.meals[0]
            .entries
            .push(FoodEntry::new(FoodId(1), "whole", 1.0));
        assert!(!variant.has_no_entries());
    }

    #[test]
    fn add_variant_bumps_updated_at() {
        let mut diet = DietForm::new("Cut");
        let created = diet.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));
        diet.add_variant(VariantForm::new("Workday"));

        assert!(diet.updated_at > created);
    }

    #[test]
    fn serde_roundtrip() {
        let mut diet = DietForm::new("Bulk");
        let mut variant = VariantForm::new("Weekend");
        let mut meal = MealForm::new("Lunch");
        meal.entries.push(FoodEntry::new(FoodId(7), "cup", 1.5));
        variant.meals.push(meal);
        diet.add_variant(variant);

        let json = serde_json::to_string(&diet).unwrap();
        let parsed: DietForm = serde_json::from_str(&json).unwrap();

        assert_eq!(diet, parsed);
    }
}
