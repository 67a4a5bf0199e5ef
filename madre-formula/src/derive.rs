//! Overall flour/water/salt derivation
//!
//! For target weight W, hydration fraction h and salt fraction s:
//! W = flour + water + salt = flour × (1 + h + s), so flour = W / (1 + h + s).

use madre_core::{ParamError, Totals};

/// Derive the recipe's total flour, water and salt from the overall targets.
///
/// Percentages arrive whole-number scale (65 means 65%). This is the only
/// validation gate that aborts a calculation; everything downstream degrades
/// to warnings instead.
pub fn derive_totals(
    target_weight: f64,
    hydration_pct: f64,
    salt_pct: f64,
) -> Result<Totals, ParamError> {
    if !target_weight.is_finite() || target_weight <= 0.0 {
        return Err(ParamError::InvalidWeight(target_weight));
    }
    if !hydration_pct.is_finite() || hydration_pct < 0.0 {
        return Err(ParamError::InvalidHydration(hydration_pct));
    }
    if !salt_pct.is_finite() || salt_pct < 0.0 {
        return Err(ParamError::InvalidSalt(salt_pct));
    }

    let h = hydration_pct / 100.0;
    let s = salt_pct / 100.0;
    let flour = target_weight / (1.0 + h + s);
    if !flour.is_finite() || flour <= 0.0 {
        return Err(ParamError::DegenerateFlour(flour));
    }

    Ok(Totals { flour, water: flour * h, salt: flour * s })
}
