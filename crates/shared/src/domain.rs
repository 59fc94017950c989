use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A form field participating in validation. Wire names are the camelCase
/// identifiers the validation endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    Name,
    Email,
    EncryptionStrength,
    KeyExpiry,
    Password,
}

impl FieldId {
    pub const ALL: [FieldId; 5] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::EncryptionStrength,
        FieldId::KeyExpiry,
        FieldId::Password,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::EncryptionStrength => "encryptionStrength",
            FieldId::KeyExpiry => "keyExpiry",
            FieldId::Password => "password",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported encryption strength: {0} bits")]
pub struct InvalidEncryptionStrength(pub u32);

/// RSA key sizes offered by the strength selector. Serialized as the plain
/// bit count on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum EncryptionStrength {
    Rsa2048,
    Rsa3072,
    #[default]
    Rsa4096,
}

impl EncryptionStrength {
    pub fn bits(self) -> u32 {
        match self {
            EncryptionStrength::Rsa2048 => 2048,
            EncryptionStrength::Rsa3072 => 3072,
            EncryptionStrength::Rsa4096 => 4096,
        }
    }

    /// Parses the raw value of the strength selector.
    pub fn parse_select_value(raw: &str) -> Option<Self> {
        raw.trim()
            .parse::<u32>()
            .ok()
            .and_then(|bits| Self::try_from(bits).ok())
    }
}

impl TryFrom<u32> for EncryptionStrength {
    type Error = InvalidEncryptionStrength;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            2048 => Ok(EncryptionStrength::Rsa2048),
            3072 => Ok(EncryptionStrength::Rsa3072),
            4096 => Ok(EncryptionStrength::Rsa4096),
            other => Err(InvalidEncryptionStrength(other)),
        }
    }
}

impl From<EncryptionStrength> for u32 {
    fn from(strength: EncryptionStrength) -> Self {
        strength.bits()
    }
}

/// Kind of a generated downloadable credential file. Unrecognized wire
/// values collapse into `Unknown` so new server-side artifact types render
/// with the generic fallback instead of failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    PgpPublic,
    PgpPrivate,
    SshPublic,
    SshPrivate,
    #[serde(other)]
    Unknown,
}

/// Opaque handle to an element of the rendering surface. The core never
/// dereferences these; it only hands them back to the surface for focus and
/// hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Name of a registered dialog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModalId(pub String);

impl ModalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl From<&str> for ModalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
