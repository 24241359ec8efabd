//! Submission outcome counters

use crate::forms::FormKind;
use crate::submission::Outcome;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

#[derive(Clone)]
pub struct SubmissionMetrics {
    pub delivered: Arc<AtomicU64>,
    pub delivery_failed: Arc<AtomicU64>,
    pub validation_rejected: Arc<AtomicU64>,
    pub spam_rejected: Arc<AtomicU64>,
    pub cooldown_rejected: Arc<AtomicU64>,
    pub ignored_in_flight: Arc<AtomicU64>,
    pub attempts_by_form: Arc<RwLock<HashMap<String, u64>>>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_attempts: u64,
    pub delivered: u64,
    pub delivery_failed: u64,
    pub validation_rejected: u64,
    pub spam_rejected: u64,
    pub cooldown_rejected: u64,
    pub ignored_in_flight: u64,
    pub attempts_by_form: HashMap<String, u64>,
    pub delivery_success_rate: f64,
    pub uptime_seconds: i64,
}

impl SubmissionMetrics {
    pub fn new() -> Self {
        Self {
            delivered: Arc::new(AtomicU64::new(0)),
            delivery_failed: Arc::new(AtomicU64::new(0)),
            validation_rejected: Arc::new(AtomicU64::new(0)),
            spam_rejected: Arc::new(AtomicU64::new(0)),
            cooldown_rejected: Arc::new(AtomicU64::new(0)),
            ignored_in_flight: Arc::new(AtomicU64::new(0)),
            attempts_by_form: Arc::new(RwLock::new(HashMap::new())),
            start_time: Utc::now(),
        }
    }

    pub fn record(&self, form: FormKind, outcome: &Outcome) {
        let counter = match outcome {
            Outcome::Delivered => &self.delivered,
            Outcome::DeliveryFailed => &self.delivery_failed,
            Outcome::ValidationRejected { .. } => &self.validation_rejected,
            Outcome::SpamRejected => &self.spam_rejected,
            Outcome::CooldownRejected { .. } => &self.cooldown_rejected,
        };
        counter.fetch_add(1, Ordering::Relaxed);

        let mut forms = self.attempts_by_form.write();
        *forms.entry(form.as_str().to_string()).or_insert(0) += 1;
    }

    pub fn record_ignored(&self) {
        self.ignored_in_flight.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        let delivered = self.delivered.load(Ordering::Relaxed);
        let delivery_failed = self.delivery_failed.load(Ordering::Relaxed);
        let validation_rejected = self.validation_rejected.load(Ordering::Relaxed);
        let spam_rejected = self.spam_rejected.load(Ordering::Relaxed);
        let cooldown_rejected = self.cooldown_rejected.load(Ordering::Relaxed);

        let deliveries = delivered + delivery_failed;
        let uptime = Utc::now().signed_duration_since(self.start_time);

        MetricsSnapshot {
            total_attempts: deliveries + validation_rejected + spam_rejected + cooldown_rejected,
            delivered,
            delivery_failed,
            validation_rejected,
            spam_rejected,
            cooldown_rejected,
            ignored_in_flight: self.ignored_in_flight.load(Ordering::Relaxed),
            attempts_by_form: self.attempts_by_form.read().clone(),
            delivery_success_rate: if deliveries > 0 {
                (delivered as f64 / deliveries as f64) * 100.0
            } else {
                0.0
            },
            uptime_seconds: uptime.num_seconds().max(0),
        }
    }
}

impl Default for SubmissionMetrics {
    fn default() -> Self {
        Self::new()
    }
}
