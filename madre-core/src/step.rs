//! Recipe steps as supplied by the surrounding application
//!
//! Steps arrive from user-edited forms or templates and are consumed
//! read-only for one calculation pass. Percentages are whole-number scale
//! (65 means 65%).

use serde::{Deserialize, Serialize};

/// One ingredient line within a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageIngredient {
    /// Reference into the ingredient catalog
    pub ingredient_id: i64,
    /// Baker's percentage relative to the step's own flour subtotal
    pub percentage: f64,
    /// Mirrors the catalog's wet flag when the caller already resolved it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wet: Option<bool>,
}

impl StageIngredient {
    pub fn new(ingredient_id: i64, percentage: f64) -> Self {
        Self { ingredient_id, percentage, wet: None }
    }

    pub fn wet(ingredient_id: i64, percentage: f64) -> Self {
        Self { ingredient_id, percentage, wet: Some(true) }
    }
}

/// An ordered recipe stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub id: i64,
    /// Defines the sequence of the recipe
    pub order: i32,
    pub name: String,
    /// Declared step type, free-form (e.g. "Levain", "Mixing", "Rest")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Preferment only: share of the recipe's total flour, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contribution: Option<f64>,
    /// Preferment only: internal water-to-flour ratio, percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_hydration: Option<f64>,
    #[serde(default)]
    pub ingredients: Vec<StageIngredient>,
}

impl Step {
    pub fn new(id: i64, order: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            order,
            name: name.into(),
            kind: None,
            contribution: None,
            target_hydration: None,
            ingredients: Vec::new(),
        }
    }

    /// Builder: set the declared step type
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Builder: set preferment contribution and internal hydration
    pub fn with_preferment(mut self, contribution: f64, target_hydration: f64) -> Self {
        self.contribution = Some(contribution);
        self.target_hydration = Some(target_hydration);
        self
    }

    /// Builder: add an ingredient line
    pub fn with_ingredient(mut self, entry: StageIngredient) -> Self {
        self.ingredients.push(entry);
        self
    }
}

/// Well-known step ids supplied by the caller
///
/// A validated configuration struct with named optional fields, consulted
/// when a step's name and type are inconclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WellKnownSteps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levain_build: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poolish_build: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biga_build: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mix_final_dough: Option<i64>,
}

impl WellKnownSteps {
    /// Whether this id is one of the known preferment-build steps
    pub fn is_preferment_id(&self, id: i64) -> bool {
        [self.levain_build, self.poolish_build, self.biga_build]
            .iter()
            .any(|known| *known == Some(id))
    }

    /// Whether this id is the known final-dough mix step
    pub fn is_mix_id(&self, id: i64) -> bool {
        self.mix_final_dough == Some(id)
    }
}
