//! Request and response models

use crate::forms::SubmissionForm;
use crate::notifications::Toast;
use crate::submission::{Outcome, SessionView};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    /// `contact` or `project-request`.
    pub form: String,
}

/// Field edits and the honeypot value, as the browser form holds them.
#[derive(Debug, Default, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub fields: Option<SubmissionForm>,
    /// Hidden honeypot input.
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub outcome: Outcome,
    pub toast: Toast,
    pub session: SessionView,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// A rejection that still carries a payload for the client to render.
    pub fn rejected(data: T, message: String) -> Self {
        Self {
            success: false,
            data: Some(data),
            message: Some(message),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormKind;

    #[test]
    fn test_form_input_accepts_partial_bodies() {
        let input: FormInput = serde_json::from_str(r#"{"fields": {"name": "Ann"}}"#).unwrap();
        assert_eq!(input.fields.unwrap().get("name"), "Ann");
        assert!(input.website.is_none());

        let input: FormInput = serde_json::from_str(r#"{"website": "http://spam"}"#).unwrap();
        assert!(input.fields.is_none());
        assert_eq!(input.website.as_deref(), Some("http://spam"));
    }

    #[test]
    fn test_open_session_request() {
        let request: OpenSessionRequest = serde_json::from_str(r#"{"form": "project-request"}"#).unwrap();
        assert_eq!(request.form.parse::<FormKind>().unwrap(), FormKind::ProjectRequest);

        let request: OpenSessionRequest = serde_json::from_str(r#"{"form": "newsletter"}"#).unwrap();
        assert!(request.form.parse::<FormKind>().is_err());
    }
}
