//! Madre Formula Engine
//!
//! Baker's-percentage calculator for sourdough recipes. Given overall
//! targets (final dough weight, hydration, salt) and an ordered list of
//! preparation steps, it computes the gram weight of every ingredient at
//! every step, reconciles preferment contributions against the overall
//! formula, and resolves small rounding drift so the displayed total
//! matches the target weight.
//!
//! Features:
//! - overall flour/water/salt derivation: flour = W / (1 + h + s)
//! - preferment resolution (levain, poolish, biga) with multi-flour blends
//! - main-dough resolution with a default-flour fallback
//! - rounding reconciliation that absorbs drift into the main-dough water
//! - tolerant step classification that degrades to warnings, never panics
//!
//! The engine is a synchronous pure function of its inputs: no I/O, no
//! shared state, safe to invoke once per keystroke.

mod helpers;
mod classify;
mod apportion;
mod derive;
mod preferment;
mod main_dough;
mod reconcile;
mod breakdown;

pub use apportion::apportion_flour;
pub use breakdown::build_breakdown;
pub use classify::{classify_steps, Classification, DefaultMatcher, StepMatcher};
pub use derive::derive_totals;
pub use main_dough::{resolve_main_dough, ResolvedMainDough};
pub use preferment::{resolve_preferments, PrefermentTotals, ResolvedPreferments};
pub use reconcile::{reconcile, Reconciled};

use madre_core::{
    AchievedPercentages, Catalog, FormulaResult, Ingredient, Step, WellKnownSteps,
};

/// Calculate the full formula for one recipe.
///
/// Percentages are whole-number scale (65 means 65%). Malformed step data
/// degrades to warnings on the result; malformed overall parameters return
/// an all-zero result carrying a single fatal error.
pub fn calculate(
    target_dough_weight: f64,
    hydration_pct: f64,
    salt_pct: f64,
    steps: &[Step],
    ingredients: &[Ingredient],
    well_known: &WellKnownSteps,
) -> FormulaResult {
    calculate_with_matcher(
        target_dough_weight,
        hydration_pct,
        salt_pct,
        steps,
        ingredients,
        well_known,
        &DefaultMatcher,
    )
}

/// `calculate` with a caller-supplied classification rule.
pub fn calculate_with_matcher(
    target_dough_weight: f64,
    hydration_pct: f64,
    salt_pct: f64,
    steps: &[Step],
    ingredients: &[Ingredient],
    well_known: &WellKnownSteps,
    matcher: &dyn StepMatcher,
) -> FormulaResult {
    let totals = match derive_totals(target_dough_weight, hydration_pct, salt_pct) {
        Ok(totals) => totals,
        Err(err) => return FormulaResult::rejected(err.into()),
    };
    tracing::debug!(
        flour = totals.flour,
        water = totals.water,
        salt = totals.salt,
        "derived overall totals"
    );

    let catalog = Catalog::new(ingredients);

    // classify once up front; order defines the sequence even when the
    // caller hands the list unsorted
    let (mut classified, mut warnings) = classify_steps(steps, well_known, matcher);
    classified.sort_by_key(|(step, _)| (step.order, step.id));

    let preferments = resolve_preferments(totals.flour, &classified, &catalog);
    warnings.extend(preferments.warnings.iter().cloned());

    let mix_step = classified
        .iter()
        .find(|(_, class)| *class == Classification::MainDoughMix)
        .map(|(step, _)| *step);

    let main_dough = resolve_main_dough(&totals, &preferments.consumed, mix_step, &catalog);

    let achieved = AchievedPercentages {
        hydration: totals.water / totals.flour * 100.0,
        salt: totals.salt / totals.flour * 100.0,
        prefermented_flour: preferments.consumed.contribution,
    };

    let reconciled = reconcile(target_dough_weight, &totals, preferments.summaries, main_dough);
    warnings.extend(reconciled.warnings.iter().cloned());

    let breakdown = build_breakdown(
        &classified,
        &reconciled.preferments,
        &reconciled.main_dough,
        mix_step.map(|step| step.id),
        &catalog,
    );

    FormulaResult {
        totals: reconciled.totals,
        preferments: reconciled.preferments,
        main_dough: reconciled.main_dough,
        grand_total: reconciled.grand_total,
        achieved,
        warnings,
        breakdown,
    }
}
