//! Lead form definitions: field schema, message template and toast copy

pub mod contact;
pub mod project_request;

pub use project_request::{ProjectType, PROJECT_TYPES};

use crate::error::AppError;
use crate::notifications::ToastCopy;
use crate::validation::{FormSchema, ValidatedForm};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Raw field values as typed by the user, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionForm {
    fields: HashMap<String, String>,
}

impl SubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Missing fields read as empty.
    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn merge(&mut self, edits: SubmissionForm) {
        self.fields.extend(edits.fields);
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    pub fn is_blank(&self, field: &str) -> bool {
        self.get(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.values().all(String::is_empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    Contact,
    ProjectRequest,
}

impl FormKind {
    pub const ALL: [FormKind; 2] = [FormKind::Contact, FormKind::ProjectRequest];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::ProjectRequest => "project-request",
        }
    }

    pub fn definition(&self) -> &'static FormDefinition {
        match self {
            FormKind::Contact => &CONTACT_FORM,
            FormKind::ProjectRequest => &PROJECT_REQUEST_FORM,
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "contact" => Ok(FormKind::Contact),
            "project-request" => Ok(FormKind::ProjectRequest),
            other => Err(AppError::UnknownForm(other.to_string())),
        }
    }
}

/// Everything that differs between lead forms. The submission workflow is
/// generic over this.
pub struct FormDefinition {
    pub kind: FormKind,
    pub schema: FormSchema,
    pub template: fn(&ValidatedForm) -> String,
    pub delivered: ToastCopy,
    pub failed: ToastCopy,
}

impl FormDefinition {
    pub fn render(&self, form: &ValidatedForm) -> String {
        (self.template)(form)
    }
}

impl std::fmt::Debug for FormDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormDefinition")
            .field("kind", &self.kind)
            .field("fields", &self.schema.field_names())
            .finish()
    }
}

lazy_static! {
    pub static ref CONTACT_FORM: FormDefinition = contact::definition();
    pub static ref PROJECT_REQUEST_FORM: FormDefinition = project_request::definition();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_kind_round_trip() {
        for kind in FormKind::ALL {
            assert_eq!(kind.as_str().parse::<FormKind>().unwrap(), kind);
            assert_eq!(kind.definition().kind, kind);
        }
        assert!("newsletter".parse::<FormKind>().is_err());
    }

    #[test]
    fn test_form_kind_serde_names() {
        let json = serde_json::to_string(&FormKind::ProjectRequest).unwrap();
        assert_eq!(json, "\"project-request\"");
    }

    #[test]
    fn test_submission_form_merge_and_clear() {
        let mut form = SubmissionForm::from_pairs([("name", "Ann"), ("email", "")]);
        form.merge(SubmissionForm::from_pairs([("email", "ann@example.com")]));

        assert_eq!(form.get("name"), "Ann");
        assert_eq!(form.get("email"), "ann@example.com");
        assert_eq!(form.get("missing"), "");
        assert!(!form.is_empty());

        form.clear();
        assert!(form.is_empty());
        assert!(form.is_blank("name"));
    }
}
