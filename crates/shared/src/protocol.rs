use serde::{Deserialize, Serialize};

use crate::domain::{ArtifactKind, EncryptionStrength, FieldId};

/// Immutable record of the form captured at submission time. All required
/// fields are validated before one of these is constructed; it doubles as
/// the JSON body of the generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub encryption_strength: EncryptionStrength,
    pub key_expiry: u32,
    pub generate_ssh_key: bool,
    /// `None` and an empty passphrase are equivalent; the snapshot carries
    /// `None` for both so the wire body is an explicit `null`.
    pub password: Option<String>,
}

/// Body of a field-validation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReply {
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// A validation reply paired with the field it was requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub field: FieldId,
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationOutcome {
    pub fn new(field: FieldId, reply: ValidationReply) -> Self {
        Self {
            field,
            valid: reply.valid,
            message: reply.message,
        }
    }
}

/// One generated downloadable credential file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDescriptor {
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    pub filename: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
    pub download_url: String,
}

/// Body of a generation response. `success: false` bodies carry `error`;
/// successful ones carry `message`, an optional server-side key id, and the
/// artifact list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub key_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub files: Vec<ArtifactDescriptor>,
}
