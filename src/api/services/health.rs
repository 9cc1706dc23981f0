use actix_web::{Responder, web};
use std::sync::Arc;

use crate::api::helpers::success_response;
use crate::storage::Storage;

/// Recorded once at startup for uptime reporting.
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        start_time: web::Data<AppStartTime>,
        storage: web::Data<Arc<dyn Storage>>,
    ) -> impl Responder {
        let uptime = chrono::Utc::now() - start_time.start_datetime;

        success_response(serde_json::json!({
            "status": "ok",
            "uptime_seconds": uptime.num_seconds(),
            "backend": storage.backend_name().await,
        }))
    }
}
