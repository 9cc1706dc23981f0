//! API 类型定义

use serde::{Deserialize, Serialize};

use crate::services::IssuedCode;
use crate::storage::{QrCode, RegistrationRow};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CodeResponse {
    pub id: String,
    pub code: String,
    pub destination_url: String,
    pub created_at: String,
    pub is_active: bool,
}

impl From<QrCode> for CodeResponse {
    fn from(record: QrCode) -> Self {
        Self {
            id: record.id,
            code: record.code,
            destination_url: record.destination_url,
            created_at: record.created_at.to_rfc3339(),
            is_active: record.is_active,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct IssueResponse {
    #[serde(flatten)]
    pub record: CodeResponse,
    pub registration_url: String,
    pub image_url: String,
}

impl From<IssuedCode> for IssueResponse {
    fn from(issued: IssuedCode) -> Self {
        let image_url = format!("/api/codes/{}/image.png", issued.record.code);
        Self {
            record: CodeResponse::from(issued.record),
            registration_url: issued.registration_url,
            image_url,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct PostRegistration {
    pub code: Option<String>,
    pub name: String,
    pub phone: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegistrationOutcome {
    pub destination_url: String,
    pub code: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RegistrationItem {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub registered_at: String,
    pub code: Option<String>,
    pub destination_url: Option<String>,
}

impl From<RegistrationRow> for RegistrationItem {
    fn from(row: RegistrationRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            phone: row.phone,
            registered_at: row.registered_at.to_rfc3339(),
            code: row.code,
            destination_url: row.destination_url,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct ExportQuery {
    /// Filter term applied before export, same semantics as the page filter.
    pub q: Option<String>,
}
