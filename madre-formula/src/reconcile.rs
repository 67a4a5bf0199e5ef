//! Rounding and reconciliation
//!
//! Flour, water and stage totals display as whole grams; salt as tenths.
//! Rounding drift between the target weight and the sum of rounded
//! components is absorbed into the main-dough water when small. Large
//! residuals are left visible: a total that disagrees with the target is
//! the signal that the step configuration cannot satisfy it.

use madre_core::{FormulaError, MainDoughAddition, PrefermentSummary, Totals};

use crate::helpers::{round_grams, round_tenth};
use crate::main_dough::ResolvedMainDough;

/// Residual below this is display noise and left alone
const RESIDUAL_EPSILON: f64 = 0.1;

/// Largest residual the reconciliation will absorb
fn tolerance(target_weight: f64) -> f64 {
    (target_weight * 0.025).max(25.0)
}

/// Outcome of the rounding and reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct Reconciled {
    /// Overall masses rounded for display
    pub totals: Totals,
    pub preferments: Vec<PrefermentSummary>,
    pub main_dough: MainDoughAddition,
    /// Sum of all rounded components after absorption
    pub grand_total: f64,
    pub warnings: Vec<FormulaError>,
}

/// Round every resolved mass and nudge the main-dough water to absorb small
/// rounding drift against the target weight.
pub fn reconcile(
    target_weight: f64,
    totals: &Totals,
    preferments: Vec<PrefermentSummary>,
    main_dough: ResolvedMainDough,
) -> Reconciled {
    let preferments: Vec<PrefermentSummary> = preferments.into_iter().map(round_preferment).collect();

    let mut dough = MainDoughAddition {
        flours: main_dough
            .flours
            .into_iter()
            .map(|mut f| {
                f.mass = round_grams(f.mass);
                f
            })
            .collect(),
        water: round_grams(main_dough.water),
        salt: round_tenth(main_dough.salt),
    };

    let mut warnings = main_dough.warnings;
    let mut grand_total = grand(&preferments, &dough);

    let residual = target_weight - grand_total;
    if residual.abs() >= RESIDUAL_EPSILON {
        if residual.abs() < tolerance(target_weight) {
            // absorbed water keeps tenth-gram precision so the displayed
            // total lands exactly on the target
            dough.water = round_tenth(dough.water + residual);
            grand_total = grand(&preferments, &dough);
            let leftover = target_weight - grand_total;
            if leftover.abs() >= RESIDUAL_EPSILON {
                warnings.push(FormulaError::unabsorbed_residual(leftover));
            }
        } else {
            warnings.push(FormulaError::unabsorbed_residual(residual));
        }
    }

    Reconciled {
        totals: Totals {
            flour: round_grams(totals.flour),
            water: round_grams(totals.water),
            salt: round_tenth(totals.salt),
        },
        preferments,
        main_dough: dough,
        grand_total,
        warnings,
    }
}

/// Stage flour follows its rounded per-flour breakdown, so the displayed
/// lines always sum to the stage total
fn round_preferment(mut summary: PrefermentSummary) -> PrefermentSummary {
    for flour in &mut summary.flours {
        flour.mass = round_grams(flour.mass);
    }
    summary.flour = summary.flours.iter().map(|f| f.mass).sum();
    summary.water = round_grams(summary.water);
    summary.total = summary.flour + summary.water;
    summary
}

fn grand(preferments: &[PrefermentSummary], dough: &MainDoughAddition) -> f64 {
    let preferment_mass: f64 = preferments.iter().map(|p| p.total).sum();
    let dough_flour: f64 = dough.flours.iter().map(|f| f.mass).sum();
    preferment_mass + dough_flour + dough.water + dough.salt
}
