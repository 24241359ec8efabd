//! Form session handlers: open, edit, submit, reset, close

use crate::{
    error::{AppError, Result},
    forms::FormKind,
    models::request::{ApiResponse, FormInput, OpenSessionRequest, SubmitResponse},
    submission::{FormSession, Outcome},
    AppState,
};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

fn find_session(state: &AppState, id: &Uuid) -> Result<Arc<FormSession>> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))
}

fn apply_input(session: &FormSession, input: FormInput) {
    if let Some(fields) = input.fields {
        session.edit(fields);
    }
    if let Some(honeypot) = input.website {
        session.set_honeypot(&honeypot);
    }
}

/// An empty body means "submit what is already stored". Anything else must
/// parse as a [`FormInput`].
fn parse_submit_body(body: &[u8]) -> Result<FormInput> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(FormInput::default());
    }
    Ok(serde_json::from_slice(body)?)
}

fn outcome_status(outcome: &Outcome) -> StatusCode {
    match outcome {
        Outcome::Delivered => StatusCode::OK,
        Outcome::ValidationRejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        Outcome::CooldownRejected { .. } => StatusCode::TOO_MANY_REQUESTS,
        Outcome::SpamRejected => StatusCode::BAD_REQUEST,
        Outcome::DeliveryFailed => StatusCode::BAD_GATEWAY,
    }
}

pub async fn handle_open_session(
    State(state): State<AppState>,
    Json(request): Json<OpenSessionRequest>,
) -> Result<impl IntoResponse> {
    let kind: FormKind = request.form.parse()?;
    let session = state.sessions.create(kind);
    info!(session_id = %session.id(), form = %kind, "POST /api/sessions");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(session.view()))))
}

pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let session = find_session(&state, &id)?;
    Ok(Json(ApiResponse::success(session.view())))
}

pub async fn handle_edit_fields(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<FormInput>,
) -> Result<impl IntoResponse> {
    let session = find_session(&state, &id)?;
    apply_input(&session, input);
    Ok(Json(ApiResponse::success(session.view())))
}

pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Response> {
    let session = find_session(&state, &id)?;
    let input = parse_submit_body(&body)?;

    let Some(report) = session
        .submit_with(input.fields, input.website, &*state.notifier)
        .await
    else {
        state.metrics.record_ignored();
        warn!(session_id = %id, "Submit ignored: delivery already in flight");
        return Ok((
            StatusCode::CONFLICT,
            Json(ApiResponse::<()>::error(
                "A submission is already in progress".to_string(),
            )),
        )
            .into_response());
    };

    state.metrics.record(session.kind(), &report.outcome);

    let status = outcome_status(&report.outcome);
    let retry_after = match report.outcome {
        Outcome::CooldownRejected { seconds_remaining } => Some(seconds_remaining),
        _ => None,
    };

    let body = SubmitResponse {
        outcome: report.outcome.clone(),
        toast: report.toast.clone(),
        session: session.view(),
    };
    let body = if report.outcome == Outcome::Delivered {
        ApiResponse::success(body)
    } else {
        ApiResponse::rejected(body, report.toast.description.clone())
    };

    let mut response = (status, Json(body)).into_response();
    if let Some(seconds) = retry_after {
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from(seconds));
    }

    Ok(response)
}

pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let session = find_session(&state, &id)?;
    session.reset();
    Ok(Json(ApiResponse::success(session.view())))
}

pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    if !state.sessions.remove(&id) {
        return Err(AppError::NotFound(format!("Session {} not found", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
