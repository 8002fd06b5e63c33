//! Export snapshots
//!
//! An export snapshot is a deep, self-contained copy of everything the
//! render pipeline needs: the diet form, its computed stats tree, and the
//! two catalog lookup tables. Snapshots cross the worker boundary as a
//! plain serialized envelope; no live references and no shared memory. The
//! encode step is the authoritative snapshot moment: edits to the live diet
//! after encoding can never reach an in-flight export.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{Catalog, DietForm, Food, FoodId, Portion, PortionId};
use crate::stats::StatsTree;

/// Everything one export job needs, exclusively owned by that job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSnapshot {
    /// The diet form as it looked at request time
    pub diet_form: DietForm,

    /// The stats tree computed for that form; the renderer only visualizes
    /// these numbers, it never recomputes them
    pub stats_tree: StatsTree,

    /// Foods referenced by the form
    pub foods_by_id: HashMap<FoodId, Food>,

    /// Portions referenced by the form
    pub portions_by_id: HashMap<PortionId, Portion>,
}

impl ExportSnapshot {
    /// Captures a snapshot by deep-copying the caller's live state
    pub fn capture(diet_form: &DietForm, stats_tree: &StatsTree, catalog: &Catalog) -> Self {
        Self {
            diet_form: diet_form.clone(),
            stats_tree: stats_tree.clone(),
            foods_by_id: catalog.foods_by_id.clone(),
            portions_by_id: catalog.portions_by_id.clone(),
        }
    }

    /// Serializes the snapshot into the envelope sent across the worker
    /// boundary
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserializes an envelope on the worker side of the boundary
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Looks up a food in the snapshot's catalog copy
    pub fn food(&self, id: FoodId) -> Option<&Food> {
        self.foods_by_id.get(&id)
    }

    /// Looks up a portion in the snapshot's catalog copy
    pub fn portion(&self, id: &PortionId) -> Option<&Portion> {
        self.portions_by_id.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FoodEntry, MealForm, NutrientVector, VariantForm};
    use crate::stats::aggregate;

    fn fixture() -> (DietForm, Catalog) {
        let catalog = Catalog::from_entries(
            vec![Food::new(FoodId(1), "Apple", NutrientVector::new())],
            vec![Portion::new("whole", "whole", 182.0)],
        );

        let mut meal = MealForm::new("Breakfast");
        meal.entries.push(FoodEntry::new(FoodId(1), "whole", 1.0));
        let mut variant = VariantForm::new("Workday");
        variant.meals.push(meal);
        let mut diet = DietForm::new("Test");
        diet.add_variant(variant);

        (diet, catalog)
    }

    #[test]
    fn envelope_roundtrip() {
        let (diet, catalog) = fixture();
        let tree = aggregate(&diet, &catalog).unwrap();
        let snapshot = ExportSnapshot::capture(&diet, &tree, &catalog);

        let bytes = snapshot.encode().unwrap();
        let decoded = ExportSnapshot::decode(&bytes).unwrap();

        assert_eq!(decoded.diet_form, diet);
        assert_eq!(decoded.stats_tree, tree);
        assert_eq!(decoded.foods_by_id.len(), 1);
        assert_eq!(decoded.portions_by_id.len(), 1);
    }

    #[test]
    fn snapshot_is_isolated_from_later_edits() {
        let (mut diet, catalog) = fixture();
        let tree = aggregate(&diet, &catalog).unwrap();
        let snapshot = ExportSnapshot::capture(&diet, &tree, &catalog);

        diet.add_variant(VariantForm::new("Added later"));

        assert_eq!(snapshot.diet_form.variants.len(), 1);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(ExportSnapshot::decode(b"not json").is_err());
    }
}
