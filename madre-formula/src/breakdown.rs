//! Per-step breakdown for display
//!
//! A pure projection of already-resolved masses onto the caller's step
//! list. No arithmetic happens here; rows are keyed by step id and order so
//! the caller can match them back to its own data.

use madre_core::{
    BreakdownRow, Catalog, MainDoughAddition, PrefermentSummary, Step, StepBreakdown,
};

use crate::classify::Classification;

/// Synthetic row labels for masses that have no catalog entry of their own
const WATER_ROW: &str = "Water";
const SALT_ROW: &str = "Salt";

/// Re-express the resolved masses as one display table per step, in step
/// order.
pub fn build_breakdown(
    classified: &[(&Step, Classification)],
    preferments: &[PrefermentSummary],
    main_dough: &MainDoughAddition,
    mix_step_id: Option<i64>,
    catalog: &Catalog,
) -> Vec<StepBreakdown> {
    classified
        .iter()
        .map(|(step, class)| {
            let rows = match class {
                Classification::Preferment => preferments
                    .iter()
                    .find(|p| p.step_id == step.id)
                    .map(preferment_rows)
                    .unwrap_or_else(|| passthrough_rows(step, catalog)),
                Classification::MainDoughMix if mix_step_id == Some(step.id) => {
                    mix_rows(main_dough)
                }
                _ => passthrough_rows(step, catalog),
            };
            StepBreakdown {
                step_id: step.id,
                order: step.order,
                step_name: step.name.clone(),
                rows,
            }
        })
        .collect()
}

fn preferment_rows(summary: &PrefermentSummary) -> Vec<BreakdownRow> {
    let mut rows: Vec<BreakdownRow> = summary
        .flours
        .iter()
        .map(|f| BreakdownRow::ingredient(f.ingredient_id, f.name.clone(), f.mass))
        .collect();
    rows.push(BreakdownRow::synthetic(WATER_ROW, summary.water));
    rows
}

fn mix_rows(main_dough: &MainDoughAddition) -> Vec<BreakdownRow> {
    let mut rows: Vec<BreakdownRow> = main_dough
        .flours
        .iter()
        .map(|f| BreakdownRow::ingredient(f.ingredient_id, f.name.clone(), f.mass))
        .collect();
    rows.push(BreakdownRow::synthetic(WATER_ROW, main_dough.water));
    rows.push(BreakdownRow::synthetic(SALT_ROW, main_dough.salt));
    rows
}

/// Steps that resolved to no masses keep their declared ingredient list
fn passthrough_rows(step: &Step, catalog: &Catalog) -> Vec<BreakdownRow> {
    step.ingredients
        .iter()
        .map(|e| BreakdownRow::ingredient(e.ingredient_id, catalog.name_of(e.ingredient_id), 0.0))
        .collect()
}
