//! mealplan - A local-first diet planning tool
//!
//! A diet is a tree of variants, each containing meals, each containing
//! food items measured in portions. The crate aggregates nutrition totals
//! over that tree into a shape-aligned stats tree and can export the result
//! as a paginated PDF, rendered on a worker thread so the caller never
//! blocks on layout.

pub mod cli;
pub mod domain;
pub mod export;
pub mod session;
pub mod stats;
pub mod storage;

pub use domain::{Catalog, DietForm, Food, FoodEntry, MealForm, Nutrient, NutrientVector, Portion, VariantForm};
pub use stats::{aggregate, StatsTree};
