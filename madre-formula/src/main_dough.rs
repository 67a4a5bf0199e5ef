//! Main-dough resolution
//!
//! The main dough receives whatever flour and water the preferments left
//! behind, plus all of the salt. Missing or empty mix steps degrade to a
//! default-flour fallback rather than dropping mass silently.

use madre_core::{Catalog, FormulaError, MainDoughFlour, Step, Totals};

use crate::apportion::apportion_flour;
use crate::helpers::flour_entries;
use crate::preferment::PrefermentTotals;

/// Outcome of the main-dough pass
#[derive(Debug, Clone, Default)]
pub struct ResolvedMainDough {
    pub flours: Vec<MainDoughFlour>,
    /// Grams of water added at mix time
    pub water: f64,
    /// Grams of salt
    pub salt: f64,
    /// False when remaining flour could not be assigned to any ingredient;
    /// the shortfall then shows up as a visible discrepancy in the total
    pub flour_assigned: bool,
    pub warnings: Vec<FormulaError>,
}

/// Resolve the flour, water and salt remaining after preferment consumption.
pub fn resolve_main_dough(
    totals: &Totals,
    consumed: &PrefermentTotals,
    mix_step: Option<&Step>,
    catalog: &Catalog,
) -> ResolvedMainDough {
    let remaining_flour = (totals.flour - consumed.flour).max(0.0);
    let remaining_water = (totals.water - consumed.water).max(0.0);

    let mut resolved = ResolvedMainDough {
        water: remaining_water,
        salt: totals.salt,
        flour_assigned: true,
        ..Default::default()
    };

    if remaining_flour <= 0.0 {
        return resolved;
    }

    match mix_step {
        Some(step) => {
            if flour_entries(&step.ingredients, catalog).is_empty() {
                tracing::warn!(step = %step.name, "mix step declares no flour, using default");
                resolved
                    .warnings
                    .push(FormulaError::no_flour_in_mix_step(&step.name).with_step_id(step.id));
                assign_default_flour(&mut resolved, remaining_flour, catalog);
            } else {
                match apportion_flour(step, catalog, remaining_flour) {
                    Ok(flours) => {
                        resolved.flours = with_percentages(flours, remaining_flour);
                    }
                    Err(warning) => {
                        // declared flours with a zero percentage sum: the
                        // mass stays unassigned, mismatching the target
                        tracing::warn!(step = %step.name, "mix step flour bill is empty");
                        resolved.warnings.push(warning);
                        resolved.flour_assigned = false;
                    }
                }
            }
        }
        None => {
            tracing::warn!("no mix step found, assigning remaining flour to default");
            resolved.warnings.push(FormulaError::missing_mix_step());
            assign_default_flour(&mut resolved, remaining_flour, catalog);
        }
    }

    resolved
}

/// 100% of the remaining flour goes to the catalog's default flour
fn assign_default_flour(resolved: &mut ResolvedMainDough, remaining_flour: f64, catalog: &Catalog) {
    match catalog.default_flour() {
        Some(flour) => {
            resolved.flours = vec![MainDoughFlour {
                ingredient_id: flour.id,
                name: flour.name.clone(),
                mass: remaining_flour,
                percentage: 100.0,
            }];
        }
        None => {
            resolved.warnings.push(FormulaError::no_default_flour());
            resolved.flour_assigned = false;
        }
    }
}

fn with_percentages(flours: Vec<madre_core::FlourMass>, total: f64) -> Vec<MainDoughFlour> {
    flours
        .into_iter()
        .map(|f| MainDoughFlour {
            percentage: if total > 0.0 { f.mass / total * 100.0 } else { 0.0 },
            ingredient_id: f.ingredient_id,
            name: f.name,
            mass: f.mass,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use madre_core::{codes, Ingredient, StageIngredient};

    fn ingredients() -> Vec<Ingredient> {
        vec![
            Ingredient::new(1, "Bread Flour", false),
            Ingredient::new(2, "Whole Wheat Flour", false),
            Ingredient::new(3, "Water", true),
            Ingredient::new(4, "Salt", false),
        ]
    }

    fn totals() -> Totals {
        Totals { flour: 600.0, water: 420.0, salt: 12.0 }
    }

    #[test]
    fn test_subtracts_preferment_consumption() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let consumed = PrefermentTotals { flour: 120.0, water: 120.0, contribution: 20.0 };
        let step = Step::new(9, 2, "Mix final dough")
            .with_ingredient(StageIngredient::new(1, 100.0));

        let resolved = resolve_main_dough(&totals(), &consumed, Some(&step), &catalog);
        assert!((resolved.flours[0].mass - 480.0).abs() < 1e-9);
        assert!((resolved.water - 300.0).abs() < 1e-9);
        assert!((resolved.salt - 12.0).abs() < 1e-9, "all salt goes to the main dough");
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_overconsumption_clamps_to_zero() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let consumed = PrefermentTotals { flour: 700.0, water: 500.0, contribution: 110.0 };

        let resolved = resolve_main_dough(&totals(), &consumed, None, &catalog);
        assert!(resolved.flours.is_empty());
        assert_eq!(resolved.water, 0.0);
        assert!(resolved.flour_assigned);
        // no flour remains, so a missing mix step is not a problem
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_percentages_follow_mass_shares() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let step = Step::new(9, 2, "Mix")
            .with_ingredient(StageIngredient::new(1, 90.0))
            .with_ingredient(StageIngredient::new(2, 10.0));

        let resolved =
            resolve_main_dough(&totals(), &PrefermentTotals::default(), Some(&step), &catalog);
        assert!((resolved.flours[0].percentage - 90.0).abs() < 1e-9);
        assert!((resolved.flours[1].percentage - 10.0).abs() < 1e-9);
        assert!((resolved.flours[0].mass - 540.0).abs() < 1e-9);
    }

    #[test]
    fn test_salt_entry_excluded_from_mix_flours() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let step = Step::new(9, 2, "Mix")
            .with_ingredient(StageIngredient::new(1, 100.0))
            .with_ingredient(StageIngredient::new(4, 2.0));

        let resolved =
            resolve_main_dough(&totals(), &PrefermentTotals::default(), Some(&step), &catalog);
        assert_eq!(resolved.flours.len(), 1);
        assert!((resolved.flours[0].mass - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_flour_entries_falls_back_to_default() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let step = Step::new(9, 2, "Mix").with_ingredient(StageIngredient::wet(3, 75.0));

        let resolved =
            resolve_main_dough(&totals(), &PrefermentTotals::default(), Some(&step), &catalog);
        assert_eq!(resolved.warnings[0].code, codes::NO_FLOUR_IN_MIX_STEP);
        assert_eq!(resolved.flours.len(), 1);
        assert_eq!(resolved.flours[0].ingredient_id, 1, "first catalog flour wins");
        assert!((resolved.flours[0].mass - 600.0).abs() < 1e-9);
        assert!((resolved.flours[0].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_percentages_leave_flour_unassigned() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let step = Step::new(9, 2, "Mix").with_ingredient(StageIngredient::new(1, 0.0));

        let resolved =
            resolve_main_dough(&totals(), &PrefermentTotals::default(), Some(&step), &catalog);
        assert_eq!(resolved.warnings[0].code, codes::EMPTY_FLOUR_BILL);
        assert!(resolved.flours.is_empty());
        assert!(!resolved.flour_assigned);
    }

    #[test]
    fn test_missing_mix_step_falls_back() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);

        let resolved = resolve_main_dough(&totals(), &PrefermentTotals::default(), None, &catalog);
        assert_eq!(resolved.warnings[0].code, codes::MISSING_MIX_STEP);
        assert!((resolved.flours[0].mass - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_default_flour_available() {
        let ingredients = vec![Ingredient::new(3, "Water", true)];
        let catalog = Catalog::new(&ingredients);

        let resolved = resolve_main_dough(&totals(), &PrefermentTotals::default(), None, &catalog);
        let codes_seen: Vec<&str> = resolved.warnings.iter().map(|w| w.code.as_str()).collect();
        assert!(codes_seen.contains(&codes::MISSING_MIX_STEP));
        assert!(codes_seen.contains(&codes::NO_DEFAULT_FLOUR));
        assert!(resolved.flours.is_empty());
        assert!(!resolved.flour_assigned);
    }
}
