//! Project request form

use super::{FormDefinition, FormKind};
use crate::notifications::ToastCopy;
use crate::validation::{FieldRule, FormSchema, ValidatedForm};
use lazy_static::lazy_static;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectType {
    pub value: &'static str,
    pub label: &'static str,
}

pub const PROJECT_TYPES: [ProjectType; 8] = [
    ProjectType { value: "react", label: "React Application" },
    ProjectType { value: "ml", label: "Machine Learning" },
    ProjectType { value: "dl", label: "Deep Learning" },
    ProjectType { value: "fullstack", label: "Full-Stack Development" },
    ProjectType { value: "api", label: "API Development" },
    ProjectType { value: "dashboard", label: "Dashboard Development" },
    ProjectType { value: "automation", label: "Automation Tools" },
    ProjectType { value: "other", label: "Other" },
];

lazy_static! {
    static ref PROJECT_TYPE_VALUES: Vec<&'static str> =
        PROJECT_TYPES.iter().map(|t| t.value).collect();
}

/// Display label for a project type value, falling back to the raw value.
pub fn project_type_label(value: &str) -> &str {
    PROJECT_TYPES
        .iter()
        .find(|t| t.value == value)
        .map(|t| t.label)
        .unwrap_or(value)
}

pub fn schema() -> FormSchema {
    FormSchema::new(vec![
        FieldRule::required("fullName")
            .min_length(1, "Name is required")
            .max_length(100, "Name too long"),
        FieldRule::required("email")
            .email("Invalid email")
            .max_length(255, "Email too long"),
        FieldRule::optional("phone").max_length(20, "Phone too long"),
        FieldRule::required("projectType")
            .one_of(PROJECT_TYPE_VALUES.as_slice(), "Select a project type"),
        FieldRule::optional("deadline").date("Invalid date"),
        FieldRule::required("description")
            .min_length(10, "Description too short")
            .max_length(2000, "Description too long"),
        FieldRule::optional("referenceLink")
            .url("Invalid URL")
            .max_length(500, "Reference link too long"),
    ])
}

pub fn render(form: &ValidatedForm) -> String {
    format!(
        "🚀 NEW PROJECT REQUEST\n\n\
         👤 Name: {}\n\
         📧 Email: {}\n\
         📱 Phone: {}\n\
         🛠 Project Type: {}\n\
         ⏳ Deadline: {}\n\
         🔗 Reference Link: {}\n\
         📝 Description: {}",
        form.get("fullName"),
        form.get("email"),
        form.optional("phone").unwrap_or("Not provided"),
        project_type_label(form.get("projectType")),
        form.optional("deadline").unwrap_or("Not specified"),
        form.optional("referenceLink").unwrap_or("Not provided"),
        form.get("description"),
    )
}

pub fn definition() -> FormDefinition {
    FormDefinition {
        kind: FormKind::ProjectRequest,
        schema: schema(),
        template: render,
        delivered: ToastCopy::new("Request Submitted!", "We'll get back to you within 24-48 hours."),
        failed: ToastCopy::new("Submission Failed", "Please try again or contact us directly."),
    }
}
