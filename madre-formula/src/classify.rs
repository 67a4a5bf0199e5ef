//! Step classification
//!
//! Step taxonomies are open-ended and user-editable, so classification is a
//! tolerant, case-insensitive match rather than a closed enum on the input.
//! Every step is classified exactly once, up front; later components only
//! consume the resolved tag.

use madre_core::{FormulaError, Step, WellKnownSteps};

use crate::helpers::contains_ci;

/// Resolved role of a step within the formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Builds a preferment (levain, poolish, biga)
    Preferment,
    /// Mixes the final dough
    MainDoughMix,
    /// Timing or handling only; contributes no new mass
    Other,
}

/// Pluggable matching rule from step to classification
pub trait StepMatcher {
    fn classify(&self, step: &Step, well_known: &WellKnownSteps) -> Classification;

    /// Whether the step matched more than one rule
    fn is_ambiguous(&self, _step: &Step, _well_known: &WellKnownSteps) -> bool {
        false
    }
}

/// Substring and well-known-id rules
///
/// "levain"/"preferment" in the name or declared type, or a well-known
/// preferment-build id, wins over "Mixing"/"mix". Anything else is Other.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMatcher;

impl DefaultMatcher {
    fn matches_preferment(step: &Step, well_known: &WellKnownSteps) -> bool {
        if well_known.is_preferment_id(step.id) {
            return true;
        }
        let in_name = contains_ci(&step.name, "levain") || contains_ci(&step.name, "preferment");
        let in_kind = step
            .kind
            .as_deref()
            .map(|k| contains_ci(k, "levain") || contains_ci(k, "preferment"))
            .unwrap_or(false);
        in_name || in_kind
    }

    fn matches_mix(step: &Step, well_known: &WellKnownSteps) -> bool {
        if well_known.is_mix_id(step.id) {
            return true;
        }
        let kind_is_mixing = step
            .kind
            .as_deref()
            .map(|k| k.trim().eq_ignore_ascii_case("mixing"))
            .unwrap_or(false);
        kind_is_mixing || contains_ci(&step.name, "mix")
    }
}

impl StepMatcher for DefaultMatcher {
    fn classify(&self, step: &Step, well_known: &WellKnownSteps) -> Classification {
        if Self::matches_preferment(step, well_known) {
            Classification::Preferment
        } else if Self::matches_mix(step, well_known) {
            Classification::MainDoughMix
        } else {
            Classification::Other
        }
    }

    fn is_ambiguous(&self, step: &Step, well_known: &WellKnownSteps) -> bool {
        Self::matches_preferment(step, well_known) && Self::matches_mix(step, well_known)
    }
}

/// Classify every step once, collecting ambiguity warnings
pub fn classify_steps<'a>(
    steps: &'a [Step],
    well_known: &WellKnownSteps,
    matcher: &dyn StepMatcher,
) -> (Vec<(&'a Step, Classification)>, Vec<FormulaError>) {
    let mut warnings = Vec::new();
    let classified = steps
        .iter()
        .map(|step| {
            if matcher.is_ambiguous(step, well_known) {
                tracing::warn!(step = %step.name, "step matches both preferment and mix rules");
                warnings.push(FormulaError::ambiguous_step(&step.name).with_step_id(step.id));
            }
            (step, matcher.classify(step, well_known))
        })
        .collect();
    (classified, warnings)
}
