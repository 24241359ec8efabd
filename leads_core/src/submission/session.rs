//! Per-form session state: fields, honeypot, cooldown and the in-flight latch

use super::{workflow, Cooldown, Outcome};
use crate::delivery::Notifier;
use crate::forms::{FormDefinition, FormKind, SubmissionForm};
use crate::notifications::Toast;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Editing,
    Submitted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub outcome: Outcome,
    pub toast: Toast,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub form: FormKind,
    pub status: SessionStatus,
    pub fields: SubmissionForm,
    pub cooldown_remaining: u64,
    pub in_flight: bool,
    pub can_submit: bool,
    pub created_at: DateTime<Utc>,
}

struct SessionState {
    fields: SubmissionForm,
    honeypot: String,
    status: SessionStatus,
    last_activity: Instant,
}

impl SessionState {
    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    fn clear(&mut self) {
        self.fields.clear();
        self.honeypot.clear();
    }
}

/// Releases the in-flight latch when dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct FormSession {
    id: Uuid,
    definition: &'static FormDefinition,
    state: Mutex<SessionState>,
    cooldown: Cooldown,
    in_flight: AtomicBool,
    created_at: DateTime<Utc>,
}

impl FormSession {
    pub fn new(kind: FormKind, cooldown_seconds: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            definition: kind.definition(),
            state: Mutex::new(SessionState {
                fields: SubmissionForm::new(),
                honeypot: String::new(),
                status: SessionStatus::Editing,
                last_activity: Instant::now(),
            }),
            cooldown: Cooldown::new(cooldown_seconds),
            in_flight: AtomicBool::new(false),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> FormKind {
        self.definition.kind
    }

    pub fn status(&self) -> SessionStatus {
        self.state.lock().status
    }

    pub fn fields(&self) -> SubmissionForm {
        self.state.lock().fields.clone()
    }

    pub fn cooldown_remaining(&self) -> u64 {
        self.cooldown.remaining()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Merges field edits into the session.
    pub fn edit(&self, edits: SubmissionForm) {
        let mut state = self.state.lock();
        state.fields.merge(edits);
        state.touch();
    }

    pub fn set_field(&self, field: &str, value: &str) {
        let mut state = self.state.lock();
        state.fields.set(field, value);
        state.touch();
    }

    pub fn set_honeypot(&self, value: &str) {
        let mut state = self.state.lock();
        state.honeypot = value.to_string();
        state.touch();
    }

    /// Mirrors the enabled state of a submit button: nothing in flight, no
    /// cooldown, and every required field has some input.
    pub fn can_submit(&self) -> bool {
        if self.is_in_flight() || self.cooldown.is_active() {
            return false;
        }

        let state = self.state.lock();
        self.definition
            .schema
            .required_fields()
            .all(|field| !state.fields.is_blank(field))
    }

    /// "Submit another": back to an empty form. The cooldown keeps running.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.clear();
        state.status = SessionStatus::Editing;
        state.touch();
    }

    pub fn idle_for(&self) -> Duration {
        self.state.lock().last_activity.elapsed()
    }

    /// Stops background work owned by this session.
    pub fn close(&self) {
        self.cooldown.cancel();
    }

    /// Runs the workflow on the current fields.
    ///
    /// Returns `None` without doing anything when another submission on this
    /// session is still waiting on delivery.
    pub async fn submit(&self, notifier: &dyn Notifier) -> Option<SubmissionReport> {
        self.submit_with(None, None, notifier).await
    }

    /// Applies `edits` and `honeypot`, then runs the workflow.
    ///
    /// The input is only written once the in-flight latch is held, so an
    /// ignored submit leaves the session untouched.
    pub async fn submit_with(
        &self,
        edits: Option<SubmissionForm>,
        honeypot: Option<String>,
        notifier: &dyn Notifier,
    ) -> Option<SubmissionReport> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            debug!(session_id = %self.id, "Ignoring submit while a delivery is in flight");
            return None;
        };

        let (fields, honeypot) = {
            let mut state = self.state.lock();
            if let Some(edits) = edits {
                state.fields.merge(edits);
            }
            if let Some(honeypot) = honeypot {
                state.honeypot = honeypot;
            }
            state.touch();
            (state.fields.clone(), state.honeypot.clone())
        };

        let outcome = workflow::submit(
            self.definition,
            &fields,
            &honeypot,
            self.cooldown.remaining(),
            notifier,
        )
        .await;

        if outcome.reached_delivery() {
            self.cooldown.restart();
        }

        if outcome == Outcome::Delivered {
            let mut state = self.state.lock();
            state.clear();
            state.status = SessionStatus::Submitted;
        }

        let toast = Toast::for_outcome(&outcome, self.definition);
        Some(SubmissionReport { outcome, toast })
    }

    pub fn view(&self) -> SessionView {
        let (status, fields) = {
            let state = self.state.lock();
            (state.status, state.fields.clone())
        };

        SessionView {
            id: self.id,
            form: self.kind(),
            status,
            fields,
            cooldown_remaining: self.cooldown_remaining(),
            in_flight: self.is_in_flight(),
            can_submit: self.can_submit(),
            created_at: self.created_at,
        }
    }
}

impl std::fmt::Debug for FormSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormSession")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("cooldown", &self.cooldown)
            .field("in_flight", &self.is_in_flight())
            .finish()
    }
}
