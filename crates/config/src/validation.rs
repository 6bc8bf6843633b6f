//! Checks shared by the config sections

pub use crate::error::ValidationError;

/// One `[section]` of the config file
pub trait ConfigSection: Default {
    /// Reports every invalid value in the section
    fn validate(&self) -> Result<(), Vec<ValidationError>>;

    /// Applies the values set in `other`, a higher layer, on top of this one
    fn merge(&mut self, other: Self);
}

/// Common validators for config values
pub struct Validator;

impl Validator {
    /// Validates that a string is not empty
    pub fn not_empty(value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, "must not be empty"))
        } else {
            Ok(())
        }
    }

    /// Validates an optional string: absent is fine, present must not be empty
    pub fn not_empty_if_set(value: Option<&str>, field: &str) -> Result<(), ValidationError> {
        match value {
            Some(value) => Self::not_empty(value, field),
            None => Ok(()),
        }
    }

    /// Validates that at most one of a set of mutually exclusive options is set
    pub fn at_most_one(options: &[(&str, bool)], field: &str) -> Result<(), ValidationError> {
        let set: Vec<&str> = options
            .iter()
            .filter(|(_, is_set)| *is_set)
            .map(|(name, _)| *name)
            .collect();

        if set.len() > 1 {
            Err(ValidationError::with_value(
                field,
                "only one option allowed",
                set.join(", "),
            ))
        } else {
            Ok(())
        }
    }

    /// Collects multiple validation results into a single result
    pub fn collect_errors(
        results: Vec<Result<(), ValidationError>>,
    ) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = results.into_iter().filter_map(|r| r.err()).collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
