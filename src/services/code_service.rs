use std::sync::Arc;

use tracing::info;

use crate::errors::Result;
use crate::storage::{NewQrCode, QrCode, Storage};
use crate::utils::generate_code;

/// Result of a successful issue: the stored record plus the shareable URL
/// the QR image encodes.
#[derive(Debug, Clone)]
pub struct IssuedCode {
    pub record: QrCode,
    pub registration_url: String,
}

/// Issues codes and validates them on scan.
pub struct CodeService {
    storage: Arc<dyn Storage>,
    public_base_url: String,
    destination_url: String,
    code_suffix_length: usize,
}

impl CodeService {
    pub fn new(
        storage: Arc<dyn Storage>,
        public_base_url: String,
        destination_url: String,
        code_suffix_length: usize,
    ) -> Self {
        Self {
            storage,
            public_base_url,
            destination_url,
            code_suffix_length,
        }
    }

    /// Create a new code record and derive its shareable registration URL.
    ///
    /// Every call creates a distinct record, there is no idempotence. On
    /// backend failure nothing is retained and the caller may simply retry.
    pub async fn issue(&self) -> Result<IssuedCode> {
        let code = generate_code(self.code_suffix_length);

        let record = self
            .storage
            .insert_code(NewQrCode {
                code,
                destination_url: self.destination_url.clone(),
                is_active: true,
            })
            .await?;

        let registration_url = self.registration_url(&record.code);
        info!(
            "Issued code {} -> {}",
            record.code, record.destination_url
        );

        Ok(IssuedCode {
            record,
            registration_url,
        })
    }

    /// Exact-match lookup of an active code.
    pub async fn validate(&self, code: &str) -> Result<Option<QrCode>> {
        self.storage.find_active_code(code).await
    }

    /// The URL a scanned code leads to.
    pub fn registration_url(&self, code: &str) -> String {
        format!(
            "{}/register/{}",
            self.public_base_url.trim_end_matches('/'),
            code
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::storage::{NewRegistration, RegistrationRow};

    /// In-memory storage stub recording inserted codes.
    struct MemoryStorage {
        codes: Mutex<Vec<QrCode>>,
    }

    impl MemoryStorage {
        fn new() -> Self {
            Self {
                codes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Storage for MemoryStorage {
        async fn insert_code(&self, code: NewQrCode) -> crate::errors::Result<QrCode> {
            let record = QrCode {
                id: Uuid::new_v4().to_string(),
                code: code.code,
                destination_url: code.destination_url,
                created_at: Utc::now(),
                is_active: code.is_active,
            };
            self.codes.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn find_active_code(&self, code: &str) -> crate::errors::Result<Option<QrCode>> {
            Ok(self
                .codes
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.code == code && c.is_active)
                .cloned())
        }

        async fn insert_registration(
            &self,
            _registration: NewRegistration,
        ) -> crate::errors::Result<()> {
            Ok(())
        }

        async fn list_registrations(&self) -> crate::errors::Result<Vec<RegistrationRow>> {
            Ok(Vec::new())
        }

        async fn backend_name(&self) -> String {
            "memory".to_string()
        }
    }

    fn service(base_url: &str) -> CodeService {
        CodeService::new(
            Arc::new(MemoryStorage::new()),
            base_url.to_string(),
            "https://example.com/".to_string(),
            7,
        )
    }

    #[tokio::test]
    async fn test_issue_embeds_exact_code_in_url() {
        let service = service("https://go.example.com");
        let issued = service.issue().await.unwrap();
        assert_eq!(
            issued.registration_url,
            format!("https://go.example.com/register/{}", issued.record.code)
        );
        assert!(issued.record.is_active);
        assert_eq!(issued.record.destination_url, "https://example.com/");
    }

    #[tokio::test]
    async fn test_issue_twice_creates_distinct_records() {
        let service = service("https://go.example.com");
        let first = service.issue().await.unwrap();
        let second = service.issue().await.unwrap();
        assert_ne!(first.record.id, second.record.id);
        assert_ne!(first.record.code, second.record.code);
    }

    #[tokio::test]
    async fn test_validate_roundtrip() {
        let service = service("https://go.example.com");
        let issued = service.issue().await.unwrap();
        let found = service.validate(&issued.record.code).await.unwrap();
        assert_eq!(found, Some(issued.record));
        assert!(service.validate("qr_0_missing").await.unwrap().is_none());
    }

    #[test]
    fn test_registration_url_trims_trailing_slash() {
        let service = service("https://go.example.com/");
        assert_eq!(
            service.registration_url("abc"),
            "https://go.example.com/register/abc"
        );
    }
}
