//! Document layout for exported diets
//!
//! Turns an export snapshot into a paginated PDF. Rendering is a pure
//! function of the snapshot plus a fixed style configuration: the same
//! inputs always produce byte-identical output. All totals are read from
//! the snapshot's stats tree (by field ID, falling back to position for
//! entries); nothing is recomputed here.
//!
//! Rendering and aggregation have different completeness policies: the
//! stats tree reports every variant including empty ones, while the
//! document only gets a section per variant that has at least one meal with
//! at least one food entry.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{FoodId, Nutrient, PortionId};
use crate::stats::StatsNode;

use super::pdf::{write_pdf, PdfPage, TextLine};
use super::snapshot::ExportSnapshot;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("Stats tree is not aligned with the diet form: {0}")]
    StatsMisaligned(String),

    #[error("Snapshot references unknown food id {0}")]
    UnknownFood(FoodId),

    #[error("Snapshot references unknown portion id '{0}'")]
    UnknownPortion(PortionId),
}

/// Fixed style configuration for the export pipeline
///
/// Dimensions are PDF points; the defaults are A4 portrait.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportStyle {
    /// Page width in points
    pub page_width: f64,

    /// Page height in points
    pub page_height: f64,

    /// Margin on all sides in points
    pub margin: f64,

    /// Font size for the document title
    pub title_size: f64,

    /// Font size for variant headings
    pub heading_size: f64,

    /// Font size for meal and entry lines
    pub body_size: f64,

    /// Vertical distance between consecutive lines in points
    pub line_height: f64,
}

impl Default for ExportStyle {
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 48.0,
            title_size: 18.0,
            heading_size: 13.0,
            body_size: 9.5,
            line_height: 14.0,
        }
    }
}

/// A finished export artifact
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    /// The PDF bytes
    pub bytes: Vec<u8>,

    /// Number of pages in the document
    pub page_count: usize,

    /// Number of variant sections that were rendered
    pub section_count: usize,
}

/// Role of a logical line, before positioning
#[derive(Debug, Clone, Copy, PartialEq)]
enum LineKind {
    Title,
    Heading,
    Subheading,
    Body,
    Spacer,
}

#[derive(Debug, Clone)]
struct Line {
    kind: LineKind,
    text: String,
}

impl Line {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    fn spacer() -> Self {
        Self::new(LineKind::Spacer, "")
    }
}

/// Formats a portion quantity without trailing zeros (1, 0.5, 1.25)
fn format_quantity(quantity: f64) -> String {
    let s = format!("{:.2}", quantity);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// One-line macro summary for a stats node
fn macros_line(node: &StatsNode) -> String {
    format!(
        "Protein {:.1} g, Fat {:.1} g, Carbs {:.1} g",
        node.stats.get(Nutrient::Protein),
        node.stats.get(Nutrient::Fat),
        node.stats.get(Nutrient::Carbs),
    )
}

fn energy_of(node: &StatsNode) -> f64 {
    node.stats.get(Nutrient::Energy)
}

/// Builds the logical line sequence for the document body
fn layout_lines(snapshot: &ExportSnapshot) -> Result<(Vec<Line>, usize), RenderError> {
    let mut lines = Vec::new();
    let mut sections = 0;

    lines.push(Line::new(
        LineKind::Title,
        format!(
            "{} - {:.0} kcal",
            snapshot.diet_form.name,
            snapshot.stats_tree.stats.get(Nutrient::Energy)
        ),
    ));
    lines.push(Line::spacer());

    for (variant_index, variant) in snapshot.diet_form.variants.iter().enumerate() {
        if variant.has_no_entries() {
            continue;
        }

        // Correlate by field ID first; position is only a fallback for
        // snapshots predating field IDs in the stats tree
        let variant_stats = snapshot
            .stats_tree
            .subtree(&variant.field_id)
            .or_else(|| snapshot.stats_tree.subtrees.get(variant_index))
            .ok_or_else(|| {
                RenderError::StatsMisaligned(format!("no stats for variant '{}'", variant.name))
            })?;

        sections += 1;
        lines.push(Line::new(
            LineKind::Heading,
            format!("{} - {:.0} kcal", variant.name, energy_of(variant_stats)),
        ));
        lines.push(Line::new(LineKind::Body, macros_line(variant_stats)));
        lines.push(Line::spacer());

        for (meal_index, meal) in variant.meals.iter().enumerate() {
            if meal.is_empty() {
                continue;
            }

            let meal_stats = variant_stats
                .subtree(&meal.field_id)
                .or_else(|| variant_stats.subtrees.get(meal_index))
                .ok_or_else(|| {
                    RenderError::StatsMisaligned(format!("no stats for meal '{}'", meal.name))
                })?;

            lines.push(Line::new(
                LineKind::Subheading,
                format!("{} - {:.0} kcal", meal.name, energy_of(meal_stats)),
            ));

            for (entry_index, entry) in meal.entries.iter().enumerate() {
                // Entries carry no field ID; they align by position
                let entry_stats = meal_stats.subtrees.get(entry_index).ok_or_else(|| {
                    RenderError::StatsMisaligned(format!(
                        "no stats for entry {} of meal '{}'",
                        entry_index, meal.name
                    ))
                })?;

                let food = snapshot
                    .food(entry.food_id)
                    .ok_or(RenderError::UnknownFood(entry.food_id))?;
                let portion = snapshot
                    .portion(&entry.portion_id)
                    .ok_or_else(|| RenderError::UnknownPortion(entry.portion_id.clone()))?;

                lines.push(Line::new(
                    LineKind::Body,
                    format!(
                        "{} {}  {}  {:.0} g  {:.0} kcal",
                        format_quantity(entry.quantity),
                        portion.unit,
                        food.name,
                        entry_stats.grams,
                        energy_of(entry_stats),
                    ),
                ));
            }
            lines.push(Line::spacer());
        }
    }

    // Drop a trailing spacer so it cannot spill onto an empty page
    while lines.last().map(|l| l.kind) == Some(LineKind::Spacer) {
        lines.pop();
    }

    Ok((lines, sections))
}

/// Positions logical lines onto fixed-size pages
fn paginate(lines: &[Line], style: &ExportStyle) -> Vec<PdfPage> {
    let usable = (style.page_height - 2.0 * style.margin).max(style.line_height);
    let lines_per_page = ((usable / style.line_height).floor() as usize).max(1);

    let mut pages = Vec::new();
    let mut current = PdfPage::default();
    let mut row = 0usize;

    for line in lines {
        if row == lines_per_page {
            pages.push(std::mem::take(&mut current));
            row = 0;
        }

        let placement = match line.kind {
            LineKind::Title => Some((style.title_size, true, 0.0)),
            LineKind::Heading => Some((style.heading_size, true, 0.0)),
            LineKind::Subheading => Some((style.body_size, true, 12.0)),
            LineKind::Body => Some((style.body_size, false, 24.0)),
            LineKind::Spacer => None,
        };

        if let Some((font_size, bold, indent)) = placement {
            let y = style.page_height - style.margin - (row as f64 + 1.0) * style.line_height;
            current.lines.push(TextLine {
                x: style.margin + indent,
                y,
                font_size,
                bold,
                text: line.text.clone(),
            });
        }
        row += 1;
    }

    pages.push(current);
    pages
}

/// Renders a snapshot into a finished PDF document
pub fn render(
    snapshot: &ExportSnapshot,
    style: &ExportStyle,
) -> Result<RenderedDocument, RenderError> {
    let (lines, section_count) = layout_lines(snapshot)?;
    let pages = paginate(&lines, style);
    let bytes = write_pdf(&pages, style.page_width, style.page_height);

    Ok(RenderedDocument {
        bytes,
        page_count: pages.len(),
        section_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Catalog, DietForm, Food, FoodEntry, MealForm, NutrientVector, Portion, VariantForm,
    };
    use crate::stats::aggregate;

    fn catalog() -> Catalog {
        let apple: NutrientVector = [(Nutrient::Energy, 52.0), (Nutrient::Carbs, 14.0)]
            .into_iter()
            .collect();
        let banana: NutrientVector = [(Nutrient::Energy, 89.0), (Nutrient::Carbs, 23.0)]
            .into_iter()
            .collect();

        Catalog::from_entries(
            vec![
                Food::new(FoodId(1), "Apple", apple),
                Food::new(FoodId(2), "Banana", banana),
            ],
            vec![
                Portion::new("apple-whole", "whole", 182.0),
                Portion::new("banana-whole", "whole", 118.0),
            ],
        )
    }

    fn snapshot_of(diet: &DietForm, catalog: &Catalog) -> ExportSnapshot {
        let tree = aggregate(diet, catalog).unwrap();
        ExportSnapshot::capture(diet, &tree, catalog)
    }

    fn two_variant_diet() -> DietForm {
        let mut meal = MealForm::new("Breakfast");
        meal.entries.push(FoodEntry::new(FoodId(1), "apple-whole", 1.0));
        meal.entries.push(FoodEntry::new(FoodId(2), "banana-whole", 1.0));
        let mut full = VariantForm::new("Workday");
        full.meals.push(meal);

        let mut diet = DietForm::new("Cut");
        diet.add_variant(full);
        diet.add_variant(VariantForm::new("Weekend"));
        diet
    }

    #[test]
    fn empty_variants_are_filtered_at_render_time() {
        let diet = two_variant_diet();
        let catalog = catalog();
        let snapshot = snapshot_of(&diet, &catalog);

        // Aggregation still reports both variants
        assert_eq!(snapshot.stats_tree.subtrees.len(), 2);
        assert!(snapshot.stats_tree.subtrees[1].stats.is_empty());

        let doc = render(&snapshot, &ExportStyle::default()).unwrap();
        assert_eq!(doc.section_count, 1);

        let text = String::from_utf8_lossy(&doc.bytes).to_string();
        assert!(text.contains("(Workday"));
        assert!(!text.contains("(Weekend"));
    }

    #[test]
    fn variant_with_only_empty_meals_is_filtered() {
        let mut variant = VariantForm::new("Hollow");
        variant.meals.push(MealForm::new("Breakfast"));
        let mut diet = DietForm::new("Cut");
        diet.add_variant(variant);

        let catalog = catalog();
        let snapshot = snapshot_of(&diet, &catalog);
        let doc = render(&snapshot, &ExportStyle::default()).unwrap();

        assert_eq!(doc.section_count, 0);
    }

    #[test]
    fn rendering_is_deterministic() {
        let diet = two_variant_diet();
        let catalog = catalog();
        let snapshot = snapshot_of(&diet, &catalog);
        let style = ExportStyle::default();

        let a = render(&snapshot, &style).unwrap();
        let b = render(&snapshot, &style).unwrap();

        assert_eq!(a.bytes, b.bytes);
    }

    #[test]
    fn entry_lines_show_portion_and_energy() {
        let diet = two_variant_diet();
        let catalog = catalog();
        let snapshot = snapshot_of(&diet, &catalog);
        let doc = render(&snapshot, &ExportStyle::default()).unwrap();

        let text = String::from_utf8_lossy(&doc.bytes).to_string();
        assert!(text.contains("1 whole  Apple  182 g  95 kcal"));
        assert!(text.contains("1 whole  Banana  118 g  105 kcal"));
    }

    #[test]
    fn long_documents_paginate() {
        let catalog = catalog();
        let mut variant = VariantForm::new("Big");
        for i in 0..40 {
            let mut meal = MealForm::new(format!("Meal {}", i));
            meal.entries.push(FoodEntry::new(FoodId(1), "apple-whole", 1.0));
            variant.meals.push(meal);
        }
        let mut diet = DietForm::new("Bulk");
        diet.add_variant(variant);

        let snapshot = snapshot_of(&diet, &catalog);
        let doc = render(&snapshot, &ExportStyle::default()).unwrap();

        assert!(doc.page_count > 1);
    }

    #[test]
    fn misaligned_stats_tree_is_an_error() {
        let diet = two_variant_diet();
        let catalog = catalog();
        let mut snapshot = snapshot_of(&diet, &catalog);
        snapshot.stats_tree.subtrees.clear();

        assert!(matches!(
            render(&snapshot, &ExportStyle::default()),
            Err(RenderError::StatsMisaligned(_))
        ));
    }

    #[test]
    fn dangling_food_in_snapshot_is_an_error() {
        let diet = two_variant_diet();
        let catalog = catalog();
        let mut snapshot = snapshot_of(&diet, &catalog);
        snapshot.foods_by_id.clear();

        assert_eq!(
            render(&snapshot, &ExportStyle::default()),
            Err(RenderError::UnknownFood(FoodId(1)))
        );
    }

    #[test]
    fn quantity_formatting_trims_zeros() {
        assert_eq!(format_quantity(1.0), "1");
        assert_eq!(format_quantity(0.5), "0.5");
        assert_eq!(format_quantity(1.25), "1.25");
        assert_eq!(format_quantity(2.10), "2.1");
    }
}
