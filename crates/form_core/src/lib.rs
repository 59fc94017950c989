//! Client-side controller core for the key-generation form: a debounced
//! live-validation pipeline, the one-submission-at-a-time generation state
//! machine, and the modal dialog stack. The embedding layer owns the
//! document; this crate owns the interaction rules.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, LazyLock,
};

use regex::Regex;
use tokio::sync::Mutex;
use tracing::{info, warn};

use shared::domain::{EncryptionStrength, FieldId};
use shared::error::{FieldError, MSG_EXPIRY_RANGE, MSG_INVALID_EMAIL, MSG_INVALID_STRENGTH};
use shared::protocol::{ArtifactDescriptor, FormSnapshot};

pub mod field_validator;
pub mod modal;
pub mod render;
pub mod surface;
pub mod transport;

pub use field_validator::FieldValidator;
pub use modal::ModalStack;

use crate::render::build_download_entries;
use crate::surface::{FieldState, FormSurface};
use crate::transport::GenerationTransport;

pub const KEY_EXPIRY_MAX_DAYS: i64 = 3650;

const NAVIGATION_WARNING: &str =
    "Key generation is in progress. Are you sure you want to leave?";
const GENERATION_FAILED_FALLBACK: &str = "Key generation failed";

/// Local `local@domain` check with a TLD of at least two letters. The same
/// pattern the validation endpoint applies.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@([A-Za-z0-9.-]+\.[A-Za-z]{2,})$")
        .expect("email pattern compiles")
});

/// Raw form values as read off the document at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    /// Raw value of the strength selector.
    pub encryption_strength: String,
    /// Raw value of the expiry input.
    pub key_expiry: String,
    pub generate_ssh_key: bool,
    pub password: Option<String>,
}

/// Lifecycle of the single in-flight submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Owned by the controller from submit until settlement. Its existence is
/// the re-entrancy guard: at most one session exists at any time, and no
/// session means the machine is idle.
#[derive(Debug)]
struct GenerationSession {
    phase: SessionPhase,
}

impl GenerationSession {
    fn new() -> Self {
        Self {
            phase: SessionPhase::Validating,
        }
    }
}

/// Settled result of a generation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success {
        message: String,
        key_id: Option<String>,
        files: Vec<ArtifactDescriptor>,
    },
    Failure {
        error: String,
    },
}

/// What a submit event amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight; the event was dropped without
    /// any I/O.
    Ignored,
    /// Local validation failed; field markers were applied and no request
    /// was sent.
    Rejected(Vec<FieldError>),
    /// A request was sent and the machine settled back to idle.
    Completed(GenerationResult),
}

pub struct GenerationController {
    transport: Arc<dyn GenerationTransport>,
    surface: Arc<dyn FormSurface>,
    session: Mutex<Option<GenerationSession>>,
    is_generating: AtomicBool,
}

impl GenerationController {
    pub fn new(transport: Arc<dyn GenerationTransport>, surface: Arc<dyn FormSurface>) -> Self {
        Self {
            transport,
            surface,
            session: Mutex::new(None),
            is_generating: AtomicBool::new(false),
        }
    }

    /// Runs the submit lifecycle: re-entrancy gate, synchronous validation,
    /// one generation request, rendering, and guaranteed settlement.
    /// Whatever branch exits, the form controls are re-enabled and the
    /// session cleared before this returns.
    pub async fn submit(&self, input: FormInput) -> SubmitOutcome {
        {
            let mut session = self.session.lock().await;
            if session.is_some() {
                info!("submit ignored: a generation request is already in flight");
                return SubmitOutcome::Ignored;
            }
            *session = Some(GenerationSession::new());
        }

        self.surface.hide_outcome_panels();

        let snapshot = match validate_input(&input) {
            Ok(snapshot) => snapshot,
            Err(errors) => {
                for error in &errors {
                    self.surface
                        .apply_field_state(error.field, FieldState::Error(error.message.clone()));
                }
                // Hard gate: settle back to idle without network I/O.
                self.session.lock().await.take();
                return SubmitOutcome::Rejected(errors);
            }
        };

        self.set_phase(SessionPhase::Submitting).await;
        self.is_generating.store(true, Ordering::SeqCst);
        self.surface.set_controls_enabled(false);
        info!(
            strength = snapshot.encryption_strength.bits(),
            expiry_days = snapshot.key_expiry,
            ssh = snapshot.generate_ssh_key,
            "submitting generation request"
        );

        let result = match self.transport.generate(&snapshot).await {
            Ok(body) if body.success => GenerationResult::Success {
                message: body.message.unwrap_or_default(),
                key_id: body.key_id,
                files: body.files,
            },
            Ok(body) => GenerationResult::Failure {
                error: body
                    .error
                    .unwrap_or_else(|| GENERATION_FAILED_FALLBACK.to_string()),
            },
            Err(err) => {
                warn!(error = %err, "generation request failed");
                GenerationResult::Failure {
                    error: err.to_string(),
                }
            }
        };

        match &result {
            GenerationResult::Success { message, files, .. } => {
                self.set_phase(SessionPhase::Succeeded).await;
                let entries = build_download_entries(files);
                self.surface.show_results(message, &entries);
                info!(files = files.len(), "key generation succeeded");
            }
            GenerationResult::Failure { error } => {
                self.set_phase(SessionPhase::Failed).await;
                self.surface.show_error(error);
            }
        }

        // Guaranteed settlement: every path out of Submitting runs this
        // before returning, whichever branch produced the result.
        self.surface.set_controls_enabled(true);
        self.is_generating.store(false, Ordering::SeqCst);
        self.session.lock().await.take();

        SubmitOutcome::Completed(result)
    }

    /// Programmatic reset-to-defaults: hides both panels, clears every
    /// visual marker, restores the default strength, and scrolls to top.
    pub fn reset_form(&self) {
        self.surface.hide_outcome_panels();
        for field in FieldId::ALL {
            self.surface.apply_field_state(field, FieldState::Neutral);
        }
        self.surface.reset_inputs(EncryptionStrength::default());
        self.surface.scroll_to_top();
    }

    pub fn is_generating(&self) -> bool {
        self.is_generating.load(Ordering::SeqCst)
    }

    /// Navigation guard: the warning the embedding should surface for a
    /// page-hide signal while a request is in flight.
    pub fn before_unload(&self) -> Option<&'static str> {
        self.is_generating().then_some(NAVIGATION_WARNING)
    }

    /// Phase of the current session, if one exists.
    pub async fn session_phase(&self) -> Option<SessionPhase> {
        self.session.lock().await.as_ref().map(|s| s.phase)
    }

    async fn set_phase(&self, phase: SessionPhase) {
        if let Some(session) = self.session.lock().await.as_mut() {
            session.phase = phase;
        }
    }
}

/// Synchronous validation over the full required-field set. Returns the
/// snapshot only when every check passes; otherwise the accumulated
/// field-scoped errors.
fn validate_input(input: &FormInput) -> Result<FormSnapshot, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = input.name.trim();
    if name.is_empty() {
        errors.push(FieldError::required(FieldId::Name));
    }

    let email = input.email.trim();
    if email.is_empty() {
        errors.push(FieldError::required(FieldId::Email));
    } else if !EMAIL_PATTERN.is_match(email) {
        errors.push(FieldError::new(FieldId::Email, MSG_INVALID_EMAIL));
    }

    let strength_raw = input.encryption_strength.trim();
    let strength = if strength_raw.is_empty() {
        errors.push(FieldError::required(FieldId::EncryptionStrength));
        None
    } else {
        match EncryptionStrength::parse_select_value(strength_raw) {
            Some(strength) => Some(strength),
            None => {
                errors.push(FieldError::new(
                    FieldId::EncryptionStrength,
                    MSG_INVALID_STRENGTH,
                ));
                None
            }
        }
    };

    let expiry_raw = input.key_expiry.trim();
    let key_expiry = if expiry_raw.is_empty() {
        errors.push(FieldError::required(FieldId::KeyExpiry));
        None
    } else {
        match expiry_raw.parse::<i64>() {
            Ok(days) if (0..=KEY_EXPIRY_MAX_DAYS).contains(&days) => Some(days as u32),
            _ => {
                errors.push(FieldError::new(FieldId::KeyExpiry, MSG_EXPIRY_RANGE));
                None
            }
        }
    };

    match (strength, key_expiry) {
        (Some(encryption_strength), Some(key_expiry)) if errors.is_empty() => Ok(FormSnapshot {
            name: name.to_string(),
            email: email.to_string(),
            encryption_strength,
            key_expiry,
            generate_ssh_key: input.generate_ssh_key,
            // Absence and an empty passphrase are equivalent.
            password: input.password.clone().filter(|p| !p.is_empty()),
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
