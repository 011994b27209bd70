//! Field-level validation with aggregated, human-readable errors.
//!
//! Used to check caller-supplied parameters before any work starts. Every
//! failing field is reported, not just the first one.
//!
//! # Example
//!
//! ```
//! use charbeam::validation::*;
//!
//! struct Paging {
//!     page: i64,
//!     format: String,
//! }
//!
//! impl Validate for Paging {
//!     fn validate(&self) -> ValidationResult {
//!         combine_validations(vec![
//!             validators::positive("page", self.page),
//!             validators::one_of("format", &self.format, &["csv", "json"]),
//!         ])
//!     }
//! }
//!
//! let bad = Paging { page: 0, format: "xml".into() };
//! let errors = bad.validate().unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for validation operations.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Trait for types that can be validated.
pub trait Validate {
    /// Validate this instance and return a list of errors if invalid.
    fn validate(&self) -> ValidationResult;
}

/// A single validation error with context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The field that failed validation (optional)
    pub field: Option<String>,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error with just a message.
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Create a validation error for a specific field.
    pub fn field<S: Into<String>, M: Into<String>>(field: S, message: M) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref field) = self.field {
            write!(f, "[{}] {}", field, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// All errors from one failed validation, as a single `std::error::Error`.
///
/// Serializes as `{"errors": ["[field] message", ...]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Whether any error is attached to `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field.as_deref() == Some(field))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid parameters: {}", format_errors(&self.0))
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire {
            errors: Vec<String>,
        }
        Wire {
            errors: self.0.iter().map(ToString::to_string).collect(),
        }
        .serialize(serializer)
    }
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validation helper for common patterns.
pub mod validators {
    use super::{ValidationError, ValidationResult};

    /// Validate that a string is one of `allowed`.
    pub fn one_of(field: &str, value: &str, allowed: &[&str]) -> ValidationResult {
        if allowed.contains(&value) {
            Ok(())
        } else {
            Err(vec![ValidationError::field(
                field,
                format!("must be one of [{}], got '{}'", allowed.join(" "), value),
            )])
        }
    }

    /// Validate that a number is zero or greater.
    pub fn non_negative(field: &str, value: i64) -> ValidationResult {
        if value >= 0 {
            Ok(())
        } else {
            Err(vec![ValidationError::field(
                field,
                format!("must be 0 or greater, got {}", value),
            )])
        }
    }

    /// Validate that a number is strictly greater than zero.
    pub fn positive(field: &str, value: i64) -> ValidationResult {
        if value > 0 {
            Ok(())
        } else {
            Err(vec![ValidationError::field(
                field,
                format!("must be greater than 0, got {}", value),
            )])
        }
    }
}

/// Combine multiple validation results.
pub fn combine_validations(results: Vec<ValidationResult>) -> ValidationResult {
    let mut all_errors = Vec::new();
    for result in results {
        if let Err(mut errors) = result {
            all_errors.append(&mut errors);
        }
    }
    if all_errors.is_empty() {
        Ok(())
    } else {
        Err(all_errors)
    }
}
