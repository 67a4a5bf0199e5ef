//! Structured errors for formula calculation
//!
//! Errors never crash the engine. They are values that accumulate on the
//! result's warning list and carry enough context for the caller to render
//! a useful message next to the affected step.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_RECIPE_PARAMETERS: &str = "INVALID_RECIPE_PARAMETERS";
    pub const MISSING_PREFERMENT_PARAMETERS: &str = "MISSING_PREFERMENT_PARAMETERS";
    pub const EMPTY_FLOUR_BILL: &str = "EMPTY_FLOUR_BILL";
    pub const NO_FLOUR_IN_MIX_STEP: &str = "NO_FLOUR_IN_MIX_STEP";
    pub const NO_DEFAULT_FLOUR: &str = "NO_DEFAULT_FLOUR";
    pub const MISSING_MIX_STEP: &str = "MISSING_MIX_STEP";
    pub const UNABSORBED_RESIDUAL: &str = "UNABSORBED_RESIDUAL";
    pub const AMBIGUOUS_STEP: &str = "AMBIGUOUS_STEP";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Calculation continued with a degraded result
    Warning,
    /// The affected step contributes nothing; the rest of the result stands
    Error,
    /// The whole result is unusable for display of masses
    Fatal,
}

/// Context about which step an error occurred in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Step name where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,

    /// Step id where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_id: Option<i64>,

    /// Propagation notes
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
}

/// Structured calculation error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ErrorContext>,

    /// Severity level
    pub severity: Severity,
}

impl FormulaError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            context: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set step context
    pub fn in_step(mut self, step: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.step = Some(step.into());
        self
    }

    /// Builder: set step id context
    pub fn with_step_id(mut self, id: i64) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.step_id = Some(id);
        self
    }

    /// Builder: add propagation note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        let ctx = self.context.get_or_insert_with(ErrorContext::default);
        ctx.notes.push(note.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Whether this error invalidates the whole calculation
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    // ========== Common Error Constructors ==========

    pub fn invalid_parameters(details: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_RECIPE_PARAMETERS,
            format!("Invalid recipe parameters: {}", details.into()),
        )
        .with_suggestion("Check dough weight, hydration and salt percentages")
        .with_severity(Severity::Fatal)
    }

    pub fn missing_preferment_parameters(step: &str) -> Self {
        Self::new(
            codes::MISSING_PREFERMENT_PARAMETERS,
            format!("Preferment '{}' is missing contribution or hydration", step),
        )
        .with_suggestion("Set both a contribution % and a target hydration % on the step")
        .in_step(step)
    }

    pub fn empty_flour_bill(step: &str) -> Self {
        Self::new(
            codes::EMPTY_FLOUR_BILL,
            format!("Step '{}' has no flour percentages to apportion", step),
        )
        .with_suggestion("Give at least one flour ingredient a non-zero percentage")
        .in_step(step)
    }

    pub fn no_flour_in_mix_step(step: &str) -> Self {
        Self::new(
            codes::NO_FLOUR_IN_MIX_STEP,
            format!("Mix step '{}' declares no flour ingredients", step),
        )
        .with_suggestion("Add the flours you mix, or accept the default flour")
        .in_step(step)
        .with_severity(Severity::Warning)
    }

    pub fn no_default_flour() -> Self {
        Self::new(
            codes::NO_DEFAULT_FLOUR,
            "No flour-like ingredient available to receive the remaining flour mass",
        )
        .with_suggestion("Add a dry ingredient named like 'flour' to the ingredient list")
    }

    pub fn missing_mix_step() -> Self {
        Self::new(
            codes::MISSING_MIX_STEP,
            "No main-dough mix step found; remaining flour assigned to the default flour",
        )
        .with_suggestion("Add a step named 'Mix' (or typed Mixing) for the final dough")
        .with_severity(Severity::Warning)
    }

    pub fn unabsorbed_residual(residual: f64) -> Self {
        Self::new(
            codes::UNABSORBED_RESIDUAL,
            format!(
                "Computed total differs from the target weight by {:.1} g",
                residual
            ),
        )
        .with_suggestion("Check preferment contributions against the target dough weight")
        .with_severity(Severity::Warning)
    }

    pub fn ambiguous_step(step: &str) -> Self {
        Self::new(
            codes::AMBIGUOUS_STEP,
            format!("Step '{}' matches both preferment and mix rules; treated as preferment", step),
        )
        .with_suggestion("Rename the step or set an explicit step type")
        .in_step(step)
        .with_severity(Severity::Warning)
    }
}

impl std::fmt::Display for FormulaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for FormulaError {}

/// Error type for overall recipe parameters
///
/// These are the only conditions that abort a calculation outright.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("dough weight must be a positive number, got {0}")]
    InvalidWeight(f64),

    #[error("hydration must be a finite non-negative percentage, got {0}")]
    InvalidHydration(f64),

    #[error("salt must be a finite non-negative percentage, got {0}")]
    InvalidSalt(f64),

    #[error("derived total flour is not a positive number ({0})")]
    DegenerateFlour(f64),
}

impl From<ParamError> for FormulaError {
    fn from(err: ParamError) -> Self {
        Self::invalid_parameters(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let err = FormulaError::empty_flour_bill("Levain");
        assert_eq!(err.code, codes::EMPTY_FLOUR_BILL);
        assert_eq!(err.severity, Severity::Error);
    }

    #[test]
    fn test_error_with_context() {
        let err = FormulaError::missing_preferment_parameters("Levain").with_step_id(3);
        let ctx = err.context.unwrap();
        assert_eq!(ctx.step, Some("Levain".to_string()));
        assert_eq!(ctx.step_id, Some(3));
    }

    #[test]
    fn test_error_with_note() {
        let err = FormulaError::no_default_flour().with_note("while resolving main dough");
        let ctx = err.context.unwrap();
        assert_eq!(ctx.notes.len(), 1);
    }

    #[test]
    fn test_error_display() {
        let err = FormulaError::invalid_parameters("dough weight must be a positive number, got 0");
        let display = format!("{}", err);
        assert!(display.contains("INVALID_RECIPE_PARAMETERS"));
        assert!(display.contains("suggestion"));
    }

    #[test]
    fn test_param_error_is_fatal() {
        let err: FormulaError = ParamError::InvalidWeight(-5.0).into();
        assert!(err.is_fatal());
        assert_eq!(err.code, codes::INVALID_RECIPE_PARAMETERS);
        assert!(err.message.contains("-5"));
    }

    #[test]
    fn test_warning_severities() {
        assert_eq!(FormulaError::missing_mix_step().severity, Severity::Warning);
        assert_eq!(FormulaError::no_flour_in_mix_step("Mix").severity, Severity::Warning);
        assert_eq!(FormulaError::unabsorbed_residual(31.0).severity, Severity::Warning);
        assert_eq!(FormulaError::no_default_flour().severity, Severity::Error);
    }
}
