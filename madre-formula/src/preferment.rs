//! Preferment resolution
//!
//! Each preferment claims a share of the recipe's total flour and carries
//! its own internal hydration. Water is computed from the flour that was
//! actually apportioned, so zero-ingredient edge cases never produce
//! negative or inconsistent water.

use madre_core::{Catalog, FormulaError, PrefermentSummary, Step};

use crate::apportion::apportion_flour;
use crate::classify::Classification;

/// Flour and water consumed by all resolved preferments
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PrefermentTotals {
    /// Grams of flour held by preferments
    pub flour: f64,
    /// Grams of water held by preferments
    pub water: f64,
    /// Sum of resolved contribution percentages
    pub contribution: f64,
}

impl PrefermentTotals {
    fn plus(self, flour: f64, water: f64, contribution: f64) -> Self {
        Self {
            flour: self.flour + flour,
            water: self.water + water,
            contribution: self.contribution + contribution,
        }
    }
}

/// Outcome of the preferment pass
#[derive(Debug, Clone, Default)]
pub struct ResolvedPreferments {
    /// One summary per successfully resolved preferment, in step order
    pub summaries: Vec<PrefermentSummary>,
    pub consumed: PrefermentTotals,
    pub warnings: Vec<FormulaError>,
}

/// Resolve every step classified as a preferment against the recipe's total
/// flour mass.
pub fn resolve_preferments(
    total_flour: f64,
    classified: &[(&Step, Classification)],
    catalog: &Catalog,
) -> ResolvedPreferments {
    classified
        .iter()
        .filter(|(_, class)| *class == Classification::Preferment)
        .fold(ResolvedPreferments::default(), |mut acc, (step, _)| {
            match resolve_one(total_flour, step, catalog) {
                Ok(Some(summary)) => {
                    acc.consumed =
                        acc.consumed.plus(summary.flour, summary.water, summary.contribution);
                    acc.summaries.push(summary);
                }
                Ok(None) => {
                    // disabled preferment, contributes nothing
                    tracing::debug!(step = %step.name, "preferment inactive, skipped");
                }
                Err(warning) => {
                    tracing::warn!(step = %step.name, code = %warning.code, "preferment skipped");
                    acc.warnings.push(warning);
                }
            }
            acc
        })
}

fn resolve_one(
    total_flour: f64,
    step: &Step,
    catalog: &Catalog,
) -> Result<Option<PrefermentSummary>, FormulaError> {
    let (contribution, hydration) = match (step.contribution, step.target_hydration) {
        (Some(c), Some(h)) if c.is_finite() && h.is_finite() => (c, h),
        _ => {
            return Err(
                FormulaError::missing_preferment_parameters(&step.name).with_step_id(step.id)
            )
        }
    };

    if contribution <= 0.0 {
        return Ok(None);
    }

    let flour_target = total_flour * (contribution / 100.0);
    let flours = apportion_flour(step, catalog, flour_target)?;

    // water follows the flour that actually landed, not the nominal target
    let flour: f64 = flours.iter().map(|f| f.mass).sum();
    let water = flour * (hydration / 100.0);

    Ok(Some(PrefermentSummary {
        step_id: step.id,
        name: step.name.clone(),
        kind: step.kind.clone(),
        contribution,
        flour,
        water,
        total: flour + water,
        flours,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use madre_core::{codes, Ingredient, StageIngredient};

    fn ingredients() -> Vec<Ingredient> {
        vec![
            Ingredient::new(1, "Bread Flour", false),
            Ingredient::new(2, "Rye Flour", false),
            Ingredient::new(3, "Water", true),
        ]
    }

    fn classified(steps: &[Step]) -> Vec<(&Step, Classification)> {
        steps.iter().map(|s| (s, Classification::Preferment)).collect()
    }

    #[test]
    fn test_resolves_flour_and_water() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let steps = vec![Step::new(1, 0, "Levain build")
            .with_preferment(20.0, 100.0)
            .with_ingredient(StageIngredient::new(1, 100.0))];

        let resolved = resolve_preferments(600.0, &classified(&steps), &catalog);
        assert_eq!(resolved.summaries.len(), 1);
        let levain = &resolved.summaries[0];
        assert!((levain.flour - 120.0).abs() < 1e-9);
        assert!((levain.water - 120.0).abs() < 1e-9, "100% hydration: water == flour");
        assert!((levain.total - 240.0).abs() < 1e-9);
        assert!((resolved.consumed.contribution - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_multi_flour_blend() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let steps = vec![Step::new(1, 0, "Levain build")
            .with_preferment(30.0, 80.0)
            .with_ingredient(StageIngredient::new(1, 70.0))
            .with_ingredient(StageIngredient::new(2, 30.0))];

        let resolved = resolve_preferments(1000.0, &classified(&steps), &catalog);
        let levain = &resolved.summaries[0];
        assert_eq!(levain.flours.len(), 2);
        assert!((levain.flours[0].mass - 210.0).abs() < 1e-9);
        assert!((levain.flours[1].mass - 90.0).abs() < 1e-9);
        assert!((levain.water - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_parameters_skips_with_warning() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let mut step = Step::new(1, 0, "Levain build")
            .with_ingredient(StageIngredient::new(1, 100.0));
        step.contribution = Some(20.0); // hydration left unset

        let steps = vec![step];
        let resolved = resolve_preferments(600.0, &classified(&steps), &catalog);
        assert!(resolved.summaries.is_empty());
        assert_eq!(resolved.consumed, PrefermentTotals::default());
        assert_eq!(resolved.warnings[0].code, codes::MISSING_PREFERMENT_PARAMETERS);
    }

    #[test]
    fn test_non_finite_parameters_warn_too() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let steps = vec![Step::new(1, 0, "Levain build")
            .with_preferment(f64::NAN, 100.0)
            .with_ingredient(StageIngredient::new(1, 100.0))];

        let resolved = resolve_preferments(600.0, &classified(&steps), &catalog);
        assert!(resolved.summaries.is_empty());
        assert_eq!(resolved.warnings.len(), 1);
    }

    #[test]
    fn test_disabled_preferment_skips_silently() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let steps = vec![Step::new(1, 0, "Levain build")
            .with_preferment(0.0, 100.0)
            .with_ingredient(StageIngredient::new(1, 100.0))];

        let resolved = resolve_preferments(600.0, &classified(&steps), &catalog);
        assert!(resolved.summaries.is_empty());
        assert!(resolved.warnings.is_empty(), "contribution <= 0 is a valid state");
    }

    #[test]
    fn test_empty_flour_bill_warns_and_contributes_nothing() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let steps = vec![Step::new(1, 0, "Levain build").with_preferment(20.0, 100.0)];

        let resolved = resolve_preferments(600.0, &classified(&steps), &catalog);
        assert!(resolved.summaries.is_empty());
        assert_eq!(resolved.warnings[0].code, codes::EMPTY_FLOUR_BILL);
        assert_eq!(resolved.consumed.flour, 0.0);
    }

    #[test]
    fn test_accumulates_across_preferments() {
        let ingredients = ingredients();
        let catalog = Catalog::new(&ingredients);
        let steps = vec![
            Step::new(1, 0, "Levain build")
                .with_preferment(15.0, 100.0)
                .with_ingredient(StageIngredient::new(1, 100.0)),
            Step::new(2, 1, "Poolish preferment")
                .with_preferment(10.0, 120.0)
                .with_ingredient(StageIngredient::new(2, 100.0)),
        ];

        let resolved = resolve_preferments(1000.0, &classified(&steps), &catalog);
        assert_eq!(resolved.summaries.len(), 2);
        assert!((resolved.consumed.flour - 250.0).abs() < 1e-9);
        assert!((resolved.consumed.water - (150.0 + 120.0)).abs() < 1e-9);
        assert!((resolved.consumed.contribution - 25.0).abs() < 1e-9);
    }
}
