//! Declarative, ordered form schemas

use super::rules::{
    validate_date, validate_email, validate_in_list, validate_max_length, validate_min_length,
    validate_url,
};
use super::{FieldError, ValidatedForm};
use crate::forms::SubmissionForm;
use validator::ValidationError;

#[derive(Debug, Clone)]
pub enum Check {
    MinLength(usize),
    MaxLength(usize),
    Email,
    Url,
    Date,
    OneOf(&'static [&'static str]),
}

impl Check {
    fn run(&self, value: &str) -> Result<(), ValidationError> {
        match self {
            Check::MinLength(min) => validate_min_length(value, *min),
            Check::MaxLength(max) => validate_max_length(value, *max),
            Check::Email => validate_email(value),
            Check::Url => validate_url(value),
            Check::Date => validate_date(value),
            Check::OneOf(allowed) => validate_in_list(value, allowed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Constraint {
    pub check: Check,
    pub message: &'static str,
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub constraints: Vec<Constraint>,
}

impl FieldRule {
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            constraints: Vec::new(),
        }
    }

    /// Optional fields skip every constraint when blank.
    pub fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            constraints: Vec::new(),
        }
    }

    pub fn min_length(self, min: usize, message: &'static str) -> Self {
        self.check(Check::MinLength(min), message)
    }

    pub fn max_length(self, max: usize, message: &'static str) -> Self {
        self.check(Check::MaxLength(max), message)
    }

    pub fn email(self, message: &'static str) -> Self {
        self.check(Check::Email, message)
    }

    pub fn url(self, message: &'static str) -> Self {
        self.check(Check::Url, message)
    }

    pub fn date(self, message: &'static str) -> Self {
        self.check(Check::Date, message)
    }

    pub fn one_of(self, allowed: &'static [&'static str], message: &'static str) -> Self {
        self.check(Check::OneOf(allowed), message)
    }

    fn check(mut self, check: Check, message: &'static str) -> Self {
        self.constraints.push(Constraint { check, message });
        self
    }

    fn validate(&self, value: &str) -> Result<(), FieldError> {
        if value.is_empty() && !self.required {
            return Ok(());
        }

        for constraint in &self.constraints {
            if constraint.check.run(value).is_err() {
                return Err(FieldError::new(self.name, constraint.message));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FormSchema {
    fields: Vec<FieldRule>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldRule>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldRule] {
        &self.fields
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|rule| rule.name).collect()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|rule| rule.required).map(|rule| rule.name)
    }

    /// Checks fields in declaration order and stops at the first violation.
    /// Values are trimmed before any check, so whitespace-only input counts
    /// as empty.
    pub fn validate(&self, form: &SubmissionForm) -> Result<ValidatedForm, FieldError> {
        let mut validated = ValidatedForm::default();

        for rule in &self.fields {
            let value = form.get(rule.name).trim();
            rule.validate(value)?;
            validated.insert(rule.name, value.to_string());
        }

        Ok(validated)
    }
}
