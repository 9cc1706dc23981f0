use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::{Result, ScangateError};
use crate::storage::{NewQrCode, NewRegistration, QrCode, RegistrationRow, Storage};

use migration::{Migrator, MigratorTrait, entities::qr_code, entities::registration};

#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(ScangateError::configuration("database URL is not set"));
        }

        let db = if backend_name == "sqlite" {
            Self::connect_sqlite(database_url).await?
        } else {
            Self::connect_generic(database_url, backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name: backend_name.to_string(),
        };

        storage.run_migrations().await?;

        warn!("{} storage initialized", storage.backend_name.to_uppercase());
        Ok(storage)
    }

    /// 连接 SQLite 数据库（带自动创建和性能优化）
    async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::SqlitePool;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                ScangateError::configuration(format!("Failed to parse SQLite URL: {}", e))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePool::connect_with(opt).await.map_err(|e| {
            ScangateError::database_connection(format!("Failed to connect to SQLite: {}", e))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 连接通用数据库（MySQL/PostgreSQL）
    async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(20)
            .min_connections(2)
            .connect_timeout(std::time::Duration::from_secs(8))
            .acquire_timeout(std::time::Duration::from_secs(8))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            ScangateError::database_connection(format!(
                "Failed to connect to {}: {}",
                backend_name.to_uppercase(),
                e
            ))
        })
    }

    async fn run_migrations(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| ScangateError::database_operation(format!("Migration failed: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    fn model_to_qr_code(model: qr_code::Model) -> QrCode {
        QrCode {
            id: model.id,
            code: model.code,
            destination_url: model.destination_url,
            created_at: model.created_at,
            is_active: model.is_active,
        }
    }
}

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn insert_code(&self, code: NewQrCode) -> Result<QrCode> {
        use sea_orm::ActiveValue::Set;

        let record = QrCode {
            id: Uuid::new_v4().to_string(),
            code: code.code,
            destination_url: code.destination_url,
            created_at: Utc::now(),
            is_active: code.is_active,
        };

        let active_model = qr_code::ActiveModel {
            id: Set(record.id.clone()),
            code: Set(record.code.clone()),
            destination_url: Set(record.destination_url.clone()),
            created_at: Set(record.created_at),
            is_active: Set(record.is_active),
        };

        active_model.insert(&self.db).await.map_err(|e| {
            ScangateError::database_operation(format!("Failed to insert code: {}", e))
        })?;

        info!("Code created: {}", record.code);
        Ok(record)
    }

    async fn find_active_code(&self, code: &str) -> Result<Option<QrCode>> {
        let model = qr_code::Entity::find()
            .filter(qr_code::Column::Code.eq(code))
            .filter(qr_code::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| {
                ScangateError::database_operation(format!("Failed to query code: {}", e))
            })?;

        Ok(model.map(Self::model_to_qr_code))
    }

    async fn insert_registration(&self, new: NewRegistration) -> Result<()> {
        use sea_orm::ActiveValue::Set;

        let active_model = registration::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            qr_code_id: Set(new.qr_code_id),
            name: Set(new.name),
            phone: Set(new.phone),
            registered_at: Set(Utc::now()),
            ip_address: Set(new.ip_address),
        };

        active_model.insert(&self.db).await.map_err(|e| {
            ScangateError::database_operation(format!("Failed to insert registration: {}", e))
        })?;

        Ok(())
    }

    async fn list_registrations(&self) -> Result<Vec<RegistrationRow>> {
        let rows = registration::Entity::find()
            .find_also_related(qr_code::Entity)
            .order_by_desc(registration::Column::RegisteredAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                ScangateError::database_operation(format!("Failed to load registrations: {}", e))
            })?;

        let rows = rows
            .into_iter()
            .map(|(reg, code)| RegistrationRow {
                id: reg.id,
                name: reg.name,
                phone: reg.phone,
                registered_at: reg.registered_at,
                code: code.as_ref().map(|c| c.code.clone()),
                destination_url: code.map(|c| c.destination_url),
            })
            .collect::<Vec<_>>();

        info!("Loaded {} registrations", rows.len());
        Ok(rows)
    }

    async fn backend_name(&self) -> String {
        self.backend_name.clone()
    }
}
