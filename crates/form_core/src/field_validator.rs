//! Debounced live validation for the fields that get continuous feedback
//! (`name`, `email`, `keyExpiry`). Each field keeps its own cancelable
//! timer; a fired timer sends exactly one request carrying the final value.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{sync::Mutex, task::JoinHandle};
use tracing::warn;

use shared::domain::FieldId;
use shared::protocol::ValidationOutcome;

use crate::surface::{FieldState, FormSurface};
use crate::transport::ValidationTransport;

/// Quiet period after the last edit before a validation request is sent.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

pub struct FieldValidator {
    transport: Arc<dyn ValidationTransport>,
    surface: Arc<dyn FormSurface>,
    quiet_period: Duration,
    timers: Mutex<HashMap<FieldId, JoinHandle<()>>>,
}

impl FieldValidator {
    pub fn new(
        transport: Arc<dyn ValidationTransport>,
        surface: Arc<dyn FormSurface>,
    ) -> Arc<Self> {
        Self::with_quiet_period(transport, surface, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(
        transport: Arc<dyn ValidationTransport>,
        surface: Arc<dyn FormSurface>,
        quiet_period: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            transport,
            surface,
            quiet_period,
            timers: Mutex::new(HashMap::new()),
        })
    }

    /// Cancels any pending timer for `field` and schedules a new one. Timers
    /// for different fields are independent.
    pub async fn validate_field(self: &Arc<Self>, field: FieldId, raw_value: String) {
        // Cancel-then-reschedule under one lock so no window exists where
        // two timers for the same field are live.
        let mut timers = self.timers.lock().await;
        if let Some(pending) = timers.remove(&field) {
            pending.abort();
        }

        let validator = Arc::clone(self);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(validator.quiet_period).await;
            validator.run_validation(field, &raw_value).await;
        });
        timers.insert(field, handle);
    }

    async fn run_validation(&self, field: FieldId, raw_value: &str) {
        match self.transport.validate(field, raw_value).await {
            Ok(reply) => self.apply_outcome(ValidationOutcome::new(field, reply)),
            // A failed live-validation round never blocks submission; the
            // submit path re-validates every required field synchronously.
            Err(err) => warn!(
                field = field.wire_name(),
                error = %err,
                "live validation request failed; outcome dropped"
            ),
        }
    }

    /// Outcomes are applied in arrival order. A response superseded by a
    /// newer edit can still land afterwards and overwrite the marker;
    /// requests carry no cancellation token, so this stays last-write-wins.
    fn apply_outcome(&self, outcome: ValidationOutcome) {
        let state = match (&outcome.message, outcome.valid) {
            (Some(message), false) => FieldState::Error(message.clone()),
            _ if !self.surface.field_value(outcome.field).trim().is_empty() => FieldState::Success,
            _ => FieldState::Neutral,
        };
        self.surface.apply_field_state(outcome.field, state);
    }
}

#[cfg(test)]
#[path = "tests/field_validator_tests.rs"]
mod tests;
