use std::sync::Arc;

use crate::errors::{Result, ScangateError};

pub mod backends;
pub mod models;

pub use models::{NewQrCode, NewRegistration, QrCode, RegistrationRow};

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Insert a code record, returning the stored record with its identifier.
    async fn insert_code(&self, code: NewQrCode) -> Result<QrCode>;

    /// Exact-match lookup of an active code. `Ok(None)` means not found,
    /// `Err` means the backend failed.
    async fn find_active_code(&self, code: &str) -> Result<Option<QrCode>>;

    /// Insert a registration row.
    async fn insert_registration(&self, registration: NewRegistration) -> Result<()>;

    /// All registrations, newest first, joined with their issuing code.
    async fn list_registrations(&self) -> Result<Vec<RegistrationRow>>;

    async fn backend_name(&self) -> String;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create() -> Result<Arc<dyn Storage>> {
        let config = crate::config::get_config();
        let backend = &config.database.backend;

        match backend.as_str() {
            "sqlite" | "mysql" | "postgres" | "mariadb" => {
                let storage =
                    backends::sea_orm::SeaOrmStorage::new(&config.database.url, backend).await?;
                Ok(Arc::new(storage) as Arc<dyn Storage>)
            }
            _ => Err(ScangateError::configuration(format!(
                "Unknown database backend: {}. Supported: sqlite, mysql, postgres, mariadb",
                backend
            ))),
        }
    }
}
