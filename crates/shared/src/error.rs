use thiserror::Error;

use crate::domain::FieldId;

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MSG_EXPIRY_RANGE: &str = "Key expiry must be between 0 and 3650 days";
pub const MSG_INVALID_STRENGTH: &str = "Encryption strength must be 2048, 3072, or 4096 bits";
pub const MSG_NAME_TOO_LONG: &str = "Name must not exceed 50 characters";
pub const MSG_NAME_PATTERN: &str = "Name can only contain letters, numbers, and spaces";

/// A field-scoped validation error. Fully recoverable by corrected input;
/// blocks submission but never the page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: FieldId,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: FieldId) -> Self {
        Self::new(field, MSG_REQUIRED)
    }
}
