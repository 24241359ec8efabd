//! Input validation for lead forms

pub mod rules;
pub mod schema;

pub use schema::{Check, Constraint, FieldRule, FormSchema};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The first constraint a submission violated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for FieldError {}

/// Trimmed values of a form that passed its schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedForm {
    values: HashMap<&'static str, String>,
}

impl ValidatedForm {
    pub(crate) fn insert(&mut self, field: &'static str, value: String) {
        self.values.insert(field, value);
    }

    /// Empty string for blank or undeclared fields.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// `None` when the field is blank.
    pub fn optional(&self, field: &str) -> Option<&str> {
        Some(self.get(field)).filter(|value| !value.is_empty())
    }
}
