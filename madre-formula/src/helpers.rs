//! Common formula utilities

use madre_core::{Catalog, StageIngredient};

/// Round a mass to whole grams, clamped to non-negative
pub fn round_grams(mass: f64) -> f64 {
    mass.max(0.0).round()
}

/// Round a mass to one decimal place, clamped to non-negative
///
/// Display precision for salt, and for water after residual absorption.
pub fn round_tenth(mass: f64) -> f64 {
    (mass.max(0.0) * 10.0).round() / 10.0
}

/// Case-insensitive substring match
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Whether a stage entry counts toward the step's flour bill
///
/// Flour-type entries are not wet and not named "salt". The entry's own wet
/// flag wins when the caller mirrored it; otherwise the catalog decides. An
/// id the catalog doesn't know is still treated as flour unless marked wet,
/// so a half-edited recipe degrades instead of dropping mass.
pub fn is_flour_entry(entry: &StageIngredient, catalog: &Catalog) -> bool {
    let ingredient = catalog.find(entry.ingredient_id);
    let wet = entry.wet.or(ingredient.map(|i| i.wet)).unwrap_or(false);
    if wet {
        return false;
    }
    match ingredient {
        Some(i) => !Catalog::is_salt(&i.name),
        None => true,
    }
}

/// The flour-type entries of a step, in declaration order
pub fn flour_entries<'a>(
    entries: &'a [StageIngredient],
    catalog: &Catalog,
) -> Vec<&'a StageIngredient> {
    entries.iter().filter(|e| is_flour_entry(e, catalog)).collect()
}
