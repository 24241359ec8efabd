//! Request tracing layer

use axum::{body::Body, Router};
use http::{Request, Response};
use std::time::Duration;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{info_span, Span};

/// Wraps every route in a per-request span and logs the response at a level
/// matching its status class.
pub fn with_request_tracing<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<Body>| {
                info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    version = ?request.version(),
                )
            })
            .on_request(|request: &Request<Body>, _span: &Span| {
                tracing::debug!(
                    "started processing {} {}",
                    request.method(),
                    request.uri().path()
                );
            })
            .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                let status = response.status();
                let latency_ms = latency.as_millis();

                if status.is_success() {
                    tracing::info!(
                        status = status.as_u16(),
                        latency_ms = latency_ms,
                        "request completed successfully"
                    );
                } else if status.is_client_error() {
                    tracing::warn!(
                        status = status.as_u16(),
                        latency_ms = latency_ms,
                        "client error response"
                    );
                } else {
                    tracing::error!(
                        status = status.as_u16(),
                        latency_ms = latency_ms,
                        "server error response"
                    );
                }
            })
            .on_failure(
                |error: ServerErrorsFailureClass, latency: Duration, _span: &Span| {
                    tracing::error!(
                        latency_ms = latency.as_millis(),
                        error = ?error,
                        "request failed"
                    );
                },
            ),
    )
}
