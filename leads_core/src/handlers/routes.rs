//! Route table for the lead intake API

use crate::{
    forms::{FormKind, PROJECT_TYPES},
    handlers::{health::handle_health, metrics::handle_metrics, sessions::*},
    models::request::ApiResponse,
    AppState,
};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use tracing::debug;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_root))
        .route("/health", get(handle_health))
        .route("/api/forms", get(handle_list_forms))
        .route("/api/sessions", post(handle_open_session))
        .route(
            "/api/sessions/:id",
            get(handle_get_session).delete(handle_close_session),
        )
        .route("/api/sessions/:id/fields", patch(handle_edit_fields))
        .route("/api/sessions/:id/submit", post(handle_submit))
        .route("/api/sessions/:id/reset", post(handle_reset))
        .route("/api/metrics", get(handle_metrics))
}

async fn handle_root(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "app": state.app_name,
        "version": state.version,
        "endpoints": {
            "health": "/health",
            "forms": "/api/forms",
            "sessions": "/api/sessions",
            "session": "/api/sessions/{id}",
            "fields": "/api/sessions/{id}/fields",
            "submit": "/api/sessions/{id}/submit",
            "reset": "/api/sessions/{id}/reset",
            "metrics": "/api/metrics"
        }
    })))
}

async fn handle_list_forms() -> impl IntoResponse {
    debug!("GET /api/forms");

    let forms: Vec<serde_json::Value> = FormKind::ALL
        .iter()
        .map(|kind| {
            let schema = &kind.definition().schema;
            serde_json::json!({
                "kind": kind,
                "fields": schema.field_names(),
                "required": schema.required_fields().collect::<Vec<_>>(),
            })
        })
        .collect();

    Json(ApiResponse::success(serde_json::json!({
        "forms": forms,
        "project_types": PROJECT_TYPES,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        delivery::{DeliveryError, Notifier},
        create_app,
    };
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[derive(Default)]
    struct StubNotifier {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for StubNotifier {
        async fn deliver(&self, text: &str) -> Result<(), DeliveryError> {
            self.sent.lock().push(text.to_string());
            Ok(())
        }
    }

    fn test_app() -> (axum::Router, Arc<StubNotifier>) {
        let notifier = Arc::new(StubNotifier::default());
        let state = AppState::with_notifier(&AppConfig::default(), notifier.clone());
        (create_app(state), notifier)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let (app, _) = test_app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["app"], "Lead Intake Service");
        assert_eq!(json["data"]["endpoints"]["forms"], "/api/forms");
    }

    #[tokio::test]
    async fn test_list_forms() {
        let (app, _) = test_app();
        let response = app
            .oneshot(Request::builder().uri("/api/forms").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let forms = json["data"]["forms"].as_array().unwrap();
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0]["kind"], "contact");
        assert_eq!(forms[1]["kind"], "project-request");
        assert!(!forms[1]["required"]
            .as_array()
            .unwrap()
            .iter()
            .any(|field| field == "phone"));
        assert_eq!(json["data"]["project_types"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_unknown_form_is_bad_request() {
        let (app, _) = test_app();
        let response = app
            .oneshot(json_request(
                "POST",
                "/api/sessions",
                serde_json::json!({"form": "newsletter"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_session_is_not_found() {
        let (app, _) = test_app();
        let uri = format!("/api/sessions/{}/submit", uuid::Uuid::new_v4());
        let response = app
            .oneshot(json_request("POST", &uri, serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_contact_submission_is_delivered() {
        let (app, notifier) = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/sessions",
                serde_json::json!({"form": "contact"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        let id = json["data"]["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/sessions/{}/submit", id),
                serde_json::json!({
                    "fields": {
                        "name": "Ann",
                        "email": "ann@example.com",
                        "subject": "Hello",
                        "message": "I would like a quote."
                    }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["outcome"]["kind"], "delivered");
        assert_eq!(json["data"]["toast"]["title"], "Message Sent!");
        assert_eq!(json["data"]["session"]["status"], "submitted");
        assert_eq!(notifier.sent.lock().len(), 1);

        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/api/sessions/{}/submit", id),
                serde_json::json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key("retry-after"));
    }

    #[tokio::test]
    async fn test_close_session() {
        let (app, _) = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/sessions",
                serde_json::json!({"form": "project-request"}),
            ))
            .await
            .unwrap();
        let json = body_json(response).await;
        let uri = format!("/api/sessions/{}", json["data"]["id"].as_str().unwrap());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(&uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
