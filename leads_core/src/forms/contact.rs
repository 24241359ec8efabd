//! General contact message form

use super::{FormDefinition, FormKind};
use crate::notifications::ToastCopy;
use crate::validation::{FieldRule, FormSchema, ValidatedForm};

pub fn schema() -> FormSchema {
    FormSchema::new(vec![
        FieldRule::required("name")
            .min_length(1, "Name is required")
            .max_length(100, "Name too long"),
        FieldRule::required("email")
            .email("Invalid email")
            .max_length(255, "Email too long"),
        FieldRule::required("subject")
            .min_length(1, "Subject is required")
            .max_length(200, "Subject too long"),
        FieldRule::required("message")
            .min_length(10, "Message too short")
            .max_length(1000, "Message too long"),
    ])
}

pub fn render(form: &ValidatedForm) -> String {
    format!(
        "📩 NEW CONTACT MESSAGE\n\n👤 Name: {}\n📧 Email: {}\n📌 Subject: {}\n📝 Message: {}",
        form.get("name"),
        form.get("email"),
        form.get("subject"),
        form.get("message"),
    )
}

pub fn definition() -> FormDefinition {
    FormDefinition {
        kind: FormKind::Contact,
        schema: schema(),
        template: render,
        delivered: ToastCopy::new("Message Sent!", "We'll get back to you within 24 hours."),
        failed: ToastCopy::new("Failed to Send", "Please try again."),
    }
}
