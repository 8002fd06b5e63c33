//! File storage for diets, catalogs, and configuration

mod catalog;
mod config;
mod diet;

pub use catalog::{load_catalog, load_foods, load_portions};
pub use config::Config;
pub use diet::{load_diet, save_diet};
