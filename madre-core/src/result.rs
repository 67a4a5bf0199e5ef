//! Formula results
//!
//! The engine's sole output: resolved masses in grams, achieved baker's
//! percentages, accumulated warnings, and a per-step breakdown for display.
//! A result is recomputed fully on every invocation and has no lifecycle of
//! its own.

use serde::{Deserialize, Serialize};

use crate::{FormulaError, Severity};

/// Overall flour/water/salt masses for the whole recipe, in grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub flour: f64,
    pub water: f64,
    pub salt: f64,
}

/// One flour line within a resolved preferment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlourMass {
    pub ingredient_id: i64,
    pub name: String,
    /// Grams
    pub mass: f64,
}

/// A resolved preferment stage, in step order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefermentSummary {
    pub step_id: i64,
    pub name: String,
    /// Declared step type, passed through for display
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Share of the recipe's total flour, percent
    pub contribution: f64,
    /// Grams of flour in this preferment
    pub flour: f64,
    /// Grams of water in this preferment
    pub water: f64,
    /// Flour + water
    pub total: f64,
    /// Per-flour breakdown of `flour`
    pub flours: Vec<FlourMass>,
}

/// One flour line added directly at mix time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainDoughFlour {
    pub ingredient_id: i64,
    pub name: String,
    /// Grams
    pub mass: f64,
    /// Share of the main-dough flour, percent
    pub percentage: f64,
}

/// Flour, water and salt added directly to the main dough
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainDoughAddition {
    pub flours: Vec<MainDoughFlour>,
    /// Grams of water added at mix time
    pub water: f64,
    /// Grams of salt (salt is never allocated to preferments)
    pub salt: f64,
}

/// Baker's percentages recomputed from the resolved masses
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AchievedPercentages {
    pub hydration: f64,
    pub salt: f64,
    /// Percent of the recipe's flour held by preferments
    pub prefermented_flour: f64,
}

/// Display row within a step breakdown
///
/// Synthetic water and salt rows carry no ingredient id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient_id: Option<i64>,
    pub name: String,
    /// Grams; zero when the step's entries were never resolved to masses
    pub mass: f64,
}

impl BreakdownRow {
    pub fn ingredient(ingredient_id: i64, name: impl Into<String>, mass: f64) -> Self {
        Self { ingredient_id: Some(ingredient_id), name: name.into(), mass }
    }

    pub fn synthetic(name: impl Into<String>, mass: f64) -> Self {
        Self { ingredient_id: None, name: name.into(), mass }
    }
}

/// Per-step ingredient table, keyed by step identity for the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepBreakdown {
    pub step_id: i64,
    pub order: i32,
    pub step_name: String,
    pub rows: Vec<BreakdownRow>,
}

/// The complete output of one calculation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormulaResult {
    /// Rounded overall masses
    pub totals: Totals,
    /// Resolved preferments, in step order
    pub preferments: Vec<PrefermentSummary>,
    /// What gets added directly at mix time
    pub main_dough: MainDoughAddition,
    /// Sum of all rounded components, reconciled against the target
    pub grand_total: f64,
    pub achieved: AchievedPercentages,
    /// Non-fatal degradations, or the single fatal error
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<FormulaError>,
    /// Per-step display table
    pub breakdown: Vec<StepBreakdown>,
}

impl FormulaResult {
    /// All-zero result for the fatal validation path
    pub fn rejected(error: FormulaError) -> Self {
        Self { warnings: vec![error], ..Default::default() }
    }

    /// Whether the result is unusable for display of masses
    pub fn has_fatal(&self) -> bool {
        self.warnings.iter().any(FormulaError::is_fatal)
    }

    /// Warnings rendered as human-readable strings
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(|w| w.to_string()).collect()
    }

    /// Warnings of at least the given severity
    pub fn warnings_at_least(&self, severity: Severity) -> impl Iterator<Item = &FormulaError> {
        let rank = |s: Severity| match s {
            Severity::Warning => 0u8,
            Severity::Error => 1,
            Severity::Fatal => 2,
        };
        let min = rank(severity);
        self.warnings.iter().filter(move |w| rank(w.severity) >= min)
    }
}
