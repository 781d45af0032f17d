//! Field-presence and format checks over accumulated step data.
//!
//! Pure helpers for step bodies; a step decides whether a failed check is
//! worth an error or just a gate.

use crate::context::StepData;
use regex::Regex;

/// The result of running a set of validation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// `true` when no rule produced an error.
    pub valid: bool,
    /// One entry per failed rule, in rule order.
    pub errors: Vec<String>,
}

impl Validation {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Checks that every named field is present in `data`.
///
/// # Examples
///
/// ```
/// use kumiko::validate::validate_required;
/// use kumiko::StepData;
///
/// let data: StepData<String> = [("name", "skill".to_string())].into_iter().collect();
///
/// let result = validate_required(&data, &["name", "description"]);
/// assert!(!result.valid);
/// assert_eq!(result.errors, vec!["description is required".to_string()]);
/// ```
pub fn validate_required<T>(data: &StepData<T>, required: &[&str]) -> Validation {
    let errors = required
        .iter()
        .filter(|field| !data.contains_key(field))
        .map(|field| format!("{field} is required"))
        .collect();
    Validation::from_errors(errors)
}

/// Checks present string fields against format patterns.
///
/// Absent fields are skipped; pair with [`validate_required`] when a field
/// must also exist.
pub fn validate_patterns<T: AsRef<str>>(data: &StepData<T>, rules: &[(&str, Regex)]) -> Validation {
    let errors = rules
        .iter()
        .filter_map(|(field, pattern)| {
            let value = data.get(field)?;
            if pattern.is_match(value.as_ref()) {
                None
            } else {
                Some(format!("{field} format invalid"))
            }
        })
        .collect();
    Validation::from_errors(errors)
}

/// Runs per-field validator closures over present fields.
///
/// A validator returns `Some(message)` to reject the value. Absent fields
/// are skipped.
pub fn validate_custom<T>(
    data: &StepData<T>,
    rules: &[(&str, &dyn Fn(&T) -> Option<String>)],
) -> Validation {
    let errors = rules
        .iter()
        .filter_map(|(field, validator)| {
            let value = data.get(field)?;
            validator(value).map(|message| format!("{field}: {message}"))
        })
        .collect();
    Validation::from_errors(errors)
}
