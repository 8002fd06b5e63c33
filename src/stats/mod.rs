//! Statistics engine
//!
//! Reduces a diet form tree into a shape-aligned tree of aggregated
//! nutrient totals. Aggregation is a pure synchronous reduction: it never
//! mutates the form tree, never suspends, and is safe to re-run on every
//! edit.

mod aggregate;
mod resolve;

use thiserror::Error;

use crate::domain::{FieldId, FoodId, PortionId};

pub use aggregate::{aggregate, StatsNode, StatsTree};
pub use resolve::{resolve, ResolvedEntry};

/// Errors produced while resolving entries or aggregating a tree
///
/// Any of these aborts the whole aggregation pass. A dangling food or
/// portion reference is a data-integrity bug in the upstream form and is
/// never silently treated as zero.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("Food entry references unknown food id {0}")]
    MissingFood(FoodId),

    #[error("Food entry references unknown portion id '{0}'")]
    MissingPortion(PortionId),

    #[error("Invalid quantity {quantity} for food id {food_id}: must be finite and non-negative")]
    InvalidQuantity { food_id: FoodId, quantity: f64 },

    #[error("Invalid conversion data for food id {food_id} / portion '{portion_id}'")]
    InvalidConversion {
        food_id: FoodId,
        portion_id: PortionId,
    },

    #[error("Duplicate field id {0} within a sibling group")]
    DuplicateFieldId(FieldId),
}
