//! Portion resolver
//!
//! Converts a (food, portion, quantity) triple into an absolute nutrient
//! vector and an absolute amount in grams. Purely functional: the result
//! depends only on the entry and the catalog.

use crate::domain::{Catalog, FoodEntry, NutrientVector};

use super::StatsError;

/// A food entry resolved against the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntry {
    /// Absolute nutrient amounts for the whole entry
    pub nutrients: NutrientVector,

    /// Absolute amount in grams (`quantity * portion.grams`)
    pub grams: f64,
}

/// Resolves a food entry into absolute nutrient amounts
///
/// Fails on dangling food or portion references and on non-finite or
/// negative quantities and conversion factors. Validation runs before any
/// arithmetic so NaN or negative mass never enters the tree.
pub fn resolve(entry: &FoodEntry, catalog: &Catalog) -> Result<ResolvedEntry, StatsError> {
    let food = catalog
        .food(entry.food_id)
        .ok_or(StatsError::MissingFood(entry.food_id))?;

    let portion = catalog
        .portion(&entry.portion_id)
        .ok_or_else(|| StatsError::MissingPortion(entry.portion_id.clone()))?;

    if !entry.quantity.is_finite() || entry.quantity < 0.0 {
        return Err(StatsError::InvalidQuantity {
            food_id: entry.food_id,
            quantity: entry.quantity,
        });
    }

    let conversion_ok = portion.grams.is_finite()
        && portion.grams >= 0.0
        && food.reference_grams.is_finite()
        && food.reference_grams > 0.0;
    if !conversion_ok {
        return Err(StatsError::InvalidConversion {
            food_id: entry.food_id,
            portion_id: entry.portion_id.clone(),
        });
    }

    let grams = entry.quantity * portion.grams;
    let factor = grams / food.reference_grams;

    Ok(ResolvedEntry {
        nutrients: food.nutrients.scale(factor),
        grams,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Food, FoodId, Nutrient, NutrientVector, Portion};

    fn catalog() -> Catalog {
        let apple_nutrients: NutrientVector =
            [(Nutrient::Energy, 52.0), (Nutrient::Carbs, 14.0)]
                .into_iter()
                .collect();

        Catalog::from_entries(
            vec![Food::new(FoodId(1), "Apple", apple_nutrients)],
            vec![
                Portion::new("whole", "whole", 182.0),
                Portion::new("g", "g", 1.0),
            ],
        )
    }

    #[test]
    fn resolves_whole_apple() {
        let entry = FoodEntry::new(FoodId(1), "whole", 1.0);
        let resolved = resolve(&entry, &catalog()).unwrap();

        assert_eq!(resolved.grams, 182.0);
        assert!((resolved.nutrients.get(Nutrient::Energy) - 94.64).abs() < 1e-9);
        assert!((resolved.nutrients.get(Nutrient::Carbs) - 25.48).abs() < 1e-9);
    }

    #[test]
    fn fractional_quantities_scale_linearly() {
        let half = resolve(&FoodEntry::new(FoodId(1), "whole", 0.5), &catalog()).unwrap();
        let whole = resolve(&FoodEntry::new(FoodId(1), "whole", 1.0), &catalog()).unwrap();

        assert!(
            (half.nutrients.get(Nutrient::Energy) * 2.0
                - whole.nutrients.get(Nutrient::Energy))
            .abs()
                < 1e-9
        );
    }

    #[test]
    fn gram_portion_passes_through() {
        let resolved = resolve(&FoodEntry::new(FoodId(1), "g", 100.0), &catalog()).unwrap();
        assert_eq!(resolved.nutrients.get(Nutrient::Energy), 52.0);
    }

    #[test]
    fn missing_food_is_an_error() {
        let entry = FoodEntry::new(FoodId(99), "whole", 1.0);
        assert_eq!(
            resolve(&entry, &catalog()),
            Err(StatsError::MissingFood(FoodId(99)))
        );
    }

    #[test]
    fn missing_portion_is_an_error() {
        let entry = FoodEntry::new(FoodId(1), "bucket", 1.0);
        assert_eq!(
            resolve(&entry, &catalog()),
            Err(StatsError::MissingPortion("bucket".into()))
        );
    }

    #[test]
    fn negative_quantity_is_rejected_before_arithmetic() {
        let entry = FoodEntry::new(FoodId(1), "whole", -1.0);
        assert!(matches!(
            resolve(&entry, &catalog()),
            Err(StatsError::InvalidQuantity { .. })
        ));
    }

    #[test]
    fn non_finite_quantity_is_rejected() {
        for quantity in [f64::NAN, f64::INFINITY] {
            let entry = FoodEntry::new(FoodId(1), "whole", quantity);
            assert!(matches!(
                resolve(&entry, &catalog()),
                Err(StatsError::InvalidQuantity { .. })
            ));
        }
    }

    #[test]
    fn bad_conversion_factor_is_rejected() {
        let mut catalog = catalog();
        catalog
            .portions_by_id
            .insert("bad".into(), Portion::new("bad", "bad", f64::NAN));

        let entry = FoodEntry::new(FoodId(1), "bad", 1.0);
        assert!(matches!(
            resolve(&entry, &catalog),
            Err(StatsError::InvalidConversion { .. })
        ));
    }

    #[test]
    fn zero_quantity_yields_zero_vector_with_keys() {
        let resolved = resolve(&FoodEntry::new(FoodId(1), "whole", 0.0), &catalog()).unwrap();

        assert_eq!(resolved.grams, 0.0);
        assert_eq!(resolved.nutrients.get(Nutrient::Energy), 0.0);
        assert_eq!(resolved.nutrients.iter().count(), 2);
    }
}
