//! Domain models for mealplan
//!
//! Contains the core data model without any I/O concerns.

mod catalog;
mod diet;
mod id;
mod nutrient;

pub use catalog::{Catalog, Food, Portion, DEFAULT_REFERENCE_GRAMS};
pub use diet::{DietForm, FoodEntry, MealForm, VariantForm};
pub use id::{FieldId, FoodId, IdError, PortionId};
pub use nutrient::{Nutrient, NutrientVector};
