use actix_web::middleware::Next;
use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
};
use tracing::{debug, info};

use crate::config::get_config;

pub struct AuthGuard;

impl AuthGuard {
    /// Registry API bearer-token guard.
    ///
    /// An empty configured token leaves the registry open, matching the
    /// public admin screen this service started from.
    pub async fn registry_auth(
        req: ServiceRequest,
        next: Next<BoxBody>,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        let admin_token = &get_config().app.admin_token;

        if admin_token.is_empty() {
            return next.call(req).await;
        }

        if req.method() == Method::OPTIONS {
            return Ok(req.into_response(HttpResponse::NoContent().finish()));
        }

        if let Some(auth_header) = req.headers().get("Authorization") {
            if let Some(auth_bytes) = auth_header.as_bytes().strip_prefix(b"Bearer ") {
                if auth_bytes == admin_token.as_bytes() {
                    debug!("Registry API authentication succeeded");
                    return next.call(req).await;
                }
            }
        }

        info!("Registry API authentication failed: token mismatch or missing header");
        Ok(req.into_response(
            HttpResponse::Unauthorized()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(serde_json::json!({
                    "code": super::ErrorCode::Unauthorized as i32,
                    "message": "Unauthorized: invalid or missing token",
                    "data": null,
                })),
        ))
    }
}
