//! `stats` command: aggregate a diet and show nutrient totals

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::domain::{DietForm, Nutrient, NutrientVector};
use crate::stats::{aggregate, StatsTree};
use crate::storage::{load_catalog, load_diet};

use super::output::Output;

/// Per-node entry of the stats report, joined with form names
#[derive(Debug, Serialize)]
struct NodeReport {
    name: String,
    field_id: Option<String>,
    energy_kcal: f64,
    protein_g: f64,
    fat_g: f64,
    carbs_g: f64,
    grams: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<NodeReport>,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    diet: String,
    energy_kcal: f64,
    protein_g: f64,
    fat_g: f64,
    carbs_g: f64,
    grams: f64,
    variants: Vec<NodeReport>,
}

fn node_report(name: &str, field_id: Option<String>, stats: &NutrientVector, grams: f64) -> NodeReport {
    NodeReport {
        name: name.to_string(),
        field_id,
        energy_kcal: stats.get(Nutrient::Energy),
        protein_g: stats.get(Nutrient::Protein),
        fat_g: stats.get(Nutrient::Fat),
        carbs_g: stats.get(Nutrient::Carbs),
        grams,
        children: Vec::new(),
    }
}

/// Joins the stats tree with the form tree's names for reporting
fn build_report(diet: &DietForm, tree: &StatsTree) -> StatsReport {
    let mut variants = Vec::with_capacity(diet.variants.len());

    for (vi, variant) in diet.variants.iter().enumerate() {
        let Some(variant_stats) = tree
            .subtree(&variant.field_id)
            .or_else(|| tree.subtrees.get(vi))
        else {
            continue;
        };

        let mut report = node_report(
            &variant.name,
            Some(variant.field_id.to_string()),
            &variant_stats.stats,
            variant_stats.grams,
        );

        for (mi, meal) in variant.meals.iter().enumerate() {
            if let Some(meal_stats) = variant_stats
                .subtree(&meal.field_id)
                .or_else(|| variant_stats.subtrees.get(mi))
            {
                report.children.push(node_report(
                    &meal.name,
                    Some(meal.field_id.to_string()),
                    &meal_stats.stats,
                    meal_stats.grams,
                ));
            }
        }

        variants.push(report);
    }

    StatsReport {
        diet: diet.name.clone(),
        energy_kcal: tree.stats.get(Nutrient::Energy),
        protein_g: tree.stats.get(Nutrient::Protein),
        fat_g: tree.stats.get(Nutrient::Fat),
        carbs_g: tree.stats.get(Nutrient::Carbs),
        grams: tree.grams,
        variants,
    }
}

fn totals_line(label: &str, energy: f64, protein: f64, fat: f64, carbs: f64) -> String {
    format!(
        "{}: {:.0} kcal  (protein {:.1} g, fat {:.1} g, carbs {:.1} g)",
        label, energy, protein, fat, carbs
    )
}

pub fn run(diet_path: &Path, foods: &Path, portions: &Path, output: &Output) -> Result<()> {
    let catalog = load_catalog(foods, portions)?;
    let diet = load_diet(diet_path)?;

    output.verbose(&format!(
        "aggregating {} variants, {} entries",
        diet.variants.len(),
        diet.entry_count()
    ));

    let tree = aggregate(&diet, &catalog).context("Aggregation failed")?;
    let report = build_report(&diet, &tree);

    if output.is_json() {
        output.data(&report);
        return Ok(());
    }

    output.line(&totals_line(
        &report.diet,
        report.energy_kcal,
        report.protein_g,
        report.fat_g,
        report.carbs_g,
    ));

    for variant in &report.variants {
        output.line(&format!(
            "  {}",
            totals_line(
                &variant.name,
                variant.energy_kcal,
                variant.protein_g,
                variant.fat_g,
                variant.carbs_g,
            )
        ));
        for meal in &variant.children {
            output.line(&format!(
                "    {}",
                totals_line(
                    &meal.name,
                    meal.energy_kcal,
                    meal.protein_g,
                    meal.fat_g,
                    meal.carbs_g,
                )
            ));
        }
    }

    Ok(())
}
