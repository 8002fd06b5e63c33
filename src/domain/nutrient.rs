//! Nutrient model
//!
//! The canonical set of trackable nutrients and the arithmetic over
//! per-amount nutrient vectors. A vector maps each nutrient to a
//! non-negative amount in that nutrient's fixed unit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A trackable nutrient with a fixed unit
///
/// Ordered so that vectors iterate (and render) in a stable, canonical
/// order: energy first, then macros, then the rest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Energy,
    Protein,
    Fat,
    SaturatedFat,
    Carbs,
    Sugar,
    Fiber,
    Sodium,
}

impl Nutrient {
    /// All nutrients, in canonical order
    pub const ALL: [Nutrient; 8] = [
        Nutrient::Energy,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::SaturatedFat,
        Nutrient::Carbs,
        Nutrient::Sugar,
        Nutrient::Fiber,
        Nutrient::Sodium,
    ];

    /// Returns the unit symbol for this nutrient
    pub fn unit(&self) -> &'static str {
        match self {
            Nutrient::Energy => "kcal",
            Nutrient::Sodium => "mg",
            _ => "g",
        }
    }

    /// Returns a display label for this nutrient
    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::Energy => "Energy",
            Nutrient::Protein => "Protein",
            Nutrient::Fat => "Fat",
            Nutrient::SaturatedFat => "Saturated fat",
            Nutrient::Carbs => "Carbs",
            Nutrient::Sugar => "Sugar",
            Nutrient::Fiber => "Fiber",
            Nutrient::Sodium => "Sodium",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A mapping from nutrient to amount in that nutrient's unit
///
/// The key set of a sum is the union of the operands' key sets; a key
/// present in one operand and absent in the other contributes as zero but
/// is never dropped from the result. Scaling by zero keeps the key set and
/// zeroes every amount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientVector(BTreeMap<Nutrient, f64>);

impl NutrientVector {
    /// Creates an empty vector (the zero vector over the empty key set)
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the amount for a nutrient, reading absent keys as zero
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.0.get(&nutrient).copied().unwrap_or(0.0)
    }

    /// Sets the amount for a nutrient
    pub fn set(&mut self, nutrient: Nutrient, amount: f64) {
        self.0.insert(nutrient, amount);
    }

    /// Returns true if no nutrient has been recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in canonical nutrient order
    pub fn iter(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        self.0.iter().map(|(n, v)| (*n, *v))
    }

    /// Adds another vector into this one, element-wise
    pub fn add_assign(&mut self, other: &NutrientVector) {
        for (nutrient, amount) in &other.0 {
            *self.0.entry(*nutrient).or_insert(0.0) += amount;
        }
    }

    /// Returns the element-wise sum of two vectors
    pub fn add(&self, other: &NutrientVector) -> NutrientVector {
        let mut result = self.clone();
        result.add_assign(other);
        result
    }

    /// Returns this vector scaled by a non-negative factor
    ///
    /// Negative or non-finite factors are the caller's validation problem
    /// (the portion resolver rejects them before any arithmetic runs); this
    /// method assumes a sane factor.
    pub fn scale(&self, factor: f64) -> NutrientVector {
        debug_assert!(factor.is_finite() && factor >= 0.0);
        NutrientVector(self.0.iter().map(|(n, v)| (*n, v * factor)).collect())
    }

    /// Sums a sequence of vectors left to right
    ///
    /// Aggregation always sums in declared child order so that repeated runs
    /// over the same tree produce bit-identical totals.
    pub fn sum<'a>(vectors: impl IntoIterator<Item = &'a NutrientVector>) -> NutrientVector {
        let mut total = NutrientVector::new();
        for v in vectors {
            total.add_assign(v);
        }
        total
    }
}

impl FromIterator<(Nutrient, f64)> for NutrientVector {
    fn from_iter<T: IntoIterator<Item = (Nutrient, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec_of(entries: &[(Nutrient, f64)]) -> NutrientVector {
        entries.iter().copied().collect()
    }

    #[test]
    fn add_is_elementwise() {
        let a = vec_of(&[(Nutrient::Energy, 52.0), (Nutrient::Carbs, 14.0)]);
        let b = vec_of(&[(Nutrient::Energy, 89.0), (Nutrient::Carbs, 23.0)]);

        let sum = a.add(&b);
        assert_eq!(sum.get(Nutrient::Energy), 141.0);
        assert_eq!(sum.get(Nutrient::Carbs), 37.0);
    }

    #[test]
    fn add_unions_key_sets() {
        let a = vec_of(&[(Nutrient::Energy, 52.0)]);
        let b = vec_of(&[(Nutrient::Fiber, 2.4)]);

        let sum = a.add(&b);
        assert_eq!(sum.get(Nutrient::Energy), 52.0);
        assert_eq!(sum.get(Nutrient::Fiber), 2.4);
        assert_eq!(sum.iter().count(), 2);
    }

    #[test]
    fn add_is_commutative() {
        let a = vec_of(&[(Nutrient::Energy, 52.0), (Nutrient::Protein, 0.3)]);
        let b = vec_of(&[(Nutrient::Energy, 89.0), (Nutrient::Fat, 0.3)]);

        assert_eq!(a.add(&b), b.add(&a));
    }

    #[test]
    fn scale_by_zero_keeps_key_set() {
        let a = vec_of(&[(Nutrient::Energy, 52.0), (Nutrient::Sugar, 10.0)]);
        let zero = a.scale(0.0);

        assert_eq!(zero.get(Nutrient::Energy), 0.0);
        assert_eq!(zero.get(Nutrient::Sugar), 0.0);
        assert_eq!(zero.iter().count(), 2);
    }

    #[test]
    fn absent_key_reads_as_zero() {
        let a = NutrientVector::new();
        assert_eq!(a.get(Nutrient::Sodium), 0.0);
    }

    #[test]
    fn sum_of_nothing_is_zero_vector() {
        let total = NutrientVector::sum(std::iter::empty());
        assert!(total.is_empty());
    }

    #[test]
    fn iteration_order_is_canonical() {
        let v = vec_of(&[
            (Nutrient::Sodium, 1.0),
            (Nutrient::Energy, 2.0),
            (Nutrient::Fat, 3.0),
        ]);

        let order: Vec<Nutrient> = v.iter().map(|(n, _)| n).collect();
        assert_eq!(order, vec![Nutrient::Energy, Nutrient::Fat, Nutrient::Sodium]);
    }

    #[test]
    fn units() {
        assert_eq!(Nutrient::Energy.unit(), "kcal");
        assert_eq!(Nutrient::Sodium.unit(), "mg");
        assert_eq!(Nutrient::Protein.unit(), "g");
    }

    #[test]
    fn serde_roundtrip() {
        let v = vec_of(&[(Nutrient::Energy, 52.0), (Nutrient::SaturatedFat, 0.1)]);
        let json = serde_json::to_string(&v).unwrap();
        let parsed: NutrientVector = serde_json::from_str(&json).unwrap();

        assert_eq!(v, parsed);
        assert!(json.contains("saturated_fat"));
    }
}
