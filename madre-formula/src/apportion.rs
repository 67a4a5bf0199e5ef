//! Flour apportionment within a single stage

use madre_core::{Catalog, FlourMass, FormulaError, Step};

use crate::helpers::flour_entries;

/// Split `target_mass` across the step's flour entries in proportion to
/// their declared percentages.
///
/// Percentages are renormalized against their own sum, not assumed to total
/// 100, so a stage whose declared percentages drift still yields
/// mass-conserving output. A zero percentage sum with a non-zero target is
/// an empty flour bill.
pub fn apportion_flour(
    step: &Step,
    catalog: &Catalog,
    target_mass: f64,
) -> Result<Vec<FlourMass>, FormulaError> {
    let entries = flour_entries(&step.ingredients, catalog);
    let percentage_sum: f64 = entries.iter().map(|e| e.percentage.max(0.0)).sum();

    if percentage_sum <= 0.0 {
        if target_mass > 0.0 {
            return Err(FormulaError::empty_flour_bill(&step.name).with_step_id(step.id));
        }
        return Ok(Vec::new());
    }

    Ok(entries
        .iter()
        .map(|entry| FlourMass {
            ingredient_id: entry.ingredient_id,
            name: catalog.name_of(entry.ingredient_id),
            mass: target_mass * (entry.percentage.max(0.0) / percentage_sum),
        })
        .collect())
}
