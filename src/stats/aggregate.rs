//! Stats aggregation
//!
//! Walks the diet form tree post-order (children before parents) and
//! produces a stats tree of the exact same shape: one subtree per child, in
//! the form tree's child order. Every node's totals are the left-to-right
//! sum of its children's totals, so re-running on an unchanged tree yields
//! a bit-identical result.
//!
//! The whole tree is recomputed on every pass. There is no incremental
//! patching and no aggregation state carried between runs.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::{Catalog, DietForm, FieldId, MealForm, NutrientVector, VariantForm};

use super::resolve::resolve;
use super::StatsError;

/// One node of the stats tree
///
/// Variant and meal nodes carry the field ID of their form counterpart so
/// consumers can correlate by identity across reorderings. Food entry nodes
/// have no field ID and align by position within their meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsNode {
    /// Field ID of the corresponding form node, if it has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_id: Option<FieldId>,

    /// Aggregated nutrient totals for this subtree
    pub stats: NutrientVector,

    /// Aggregated mass for this subtree, in grams
    pub grams: f64,

    /// Child stats nodes, in the form tree's child order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtrees: Vec<StatsNode>,
}

impl StatsNode {
    /// Finds the direct child subtree with the given field ID
    pub fn subtree(&self, field_id: &FieldId) -> Option<&StatsNode> {
        self.subtrees
            .iter()
            .find(|n| n.field_id.as_ref() == Some(field_id))
    }
}

/// The stats tree for a whole diet
///
/// Read-only and recomputed on demand; shape-isomorphic to the diet form
/// tree it was aggregated from at the moment it is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsTree {
    /// Aggregated nutrient totals for the whole diet
    pub stats: NutrientVector,

    /// Aggregated mass for the whole diet, in grams
    pub grams: f64,

    /// Per-variant stats nodes, in variant order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtrees: Vec<StatsNode>,
}

impl StatsTree {
    /// Finds the variant subtree with the given field ID
    pub fn subtree(&self, field_id: &FieldId) -> Option<&StatsNode> {
        self.subtrees
            .iter()
            .find(|n| n.field_id.as_ref() == Some(field_id))
    }
}

/// Rejects duplicate field IDs within one sibling group
fn check_unique_field_ids<'a>(
    ids: impl Iterator<Item = &'a FieldId>,
) -> Result<(), StatsError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StatsError::DuplicateFieldId(id.clone()));
        }
    }
    Ok(())
}

fn aggregate_meal(meal: &MealForm, catalog: &Catalog) -> Result<StatsNode, StatsError> {
    let mut subtrees = Vec::with_capacity(meal.entries.len());
    for entry in &meal.entries {
        let resolved = resolve(entry, catalog)?;
        subtrees.push(StatsNode {
            field_id: None,
            stats: resolved.nutrients,
            grams: resolved.grams,
            subtrees: Vec::new(),
        });
    }

    Ok(StatsNode {
        field_id: Some(meal.field_id.clone()),
        stats: NutrientVector::sum(subtrees.iter().map(|n| &n.stats)),
        grams: subtrees.iter().map(|n| n.grams).sum(),
        subtrees,
    })
}

fn aggregate_variant(variant: &VariantForm, catalog: &Catalog) -> Result<StatsNode, StatsError> {
    check_unique_field_ids(variant.meals.iter().map(|m| &m.field_id))?;

    let mut subtrees = Vec::with_capacity(variant.meals.len());
    for meal in &variant.meals {
        subtrees.push(aggregate_meal(meal, catalog)?);
    }

    Ok(StatsNode {
        field_id: Some(variant.field_id.clone()),
        stats: NutrientVector::sum(subtrees.iter().map(|n| &n.stats)),
        grams: subtrees.iter().map(|n| n.grams).sum(),
        subtrees,
    })
}

/// Aggregates a diet form tree into a stats tree
///
/// Any resolution error aborts the whole pass: no partial or best-effort
/// stats tree is ever returned. Empty variants and meals aggregate to the
/// zero vector, not an error; they are valid intermediate editing states.
pub fn aggregate(diet: &DietForm, catalog: &Catalog) -> Result<StatsTree, StatsError> {
    check_unique_field_ids(diet.variants.iter().map(|v| &v.field_id))?;

    let mut subtrees = Vec::with_capacity(diet.variants.len());
    for variant in &diet.variants {
        subtrees.push(aggregate_variant(variant, catalog)?);
    }

    Ok(StatsTree {
        stats: NutrientVector::sum(subtrees.iter().map(|n| &n.stats)),
        grams: subtrees.iter().map(|n| n.grams).sum(),
        subtrees,
    })
}
