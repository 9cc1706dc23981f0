use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated code tied to a fixed destination URL.
///
/// Created once by the issuer, never mutated or deleted afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCode {
    pub id: String,
    pub code: String,
    pub destination_url: String,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Input for creating a code record. Identifier and timestamp are stamped
/// by the persistence layer.
#[derive(Debug, Clone)]
pub struct NewQrCode {
    pub code: String,
    pub destination_url: String,
    pub is_active: bool,
}

/// Input for creating a registration row.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub qr_code_id: Option<String>,
    pub name: String,
    pub phone: String,
    pub ip_address: Option<String>,
}

/// A registration joined with its issuing code, as read by the registry.
///
/// `code` and `destination_url` are absent when the visitor registered
/// without scanning a code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub registered_at: DateTime<Utc>,
    pub code: Option<String>,
    pub destination_url: Option<String>,
}
