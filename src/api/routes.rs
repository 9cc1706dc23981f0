//! API 路由配置

use actix_web::middleware::from_fn;
use actix_web::web;

use super::middleware::AuthGuard;
use super::services::codes::CodeApi;
use super::services::health::HealthService;
use super::services::pages::PageService;
use super::services::registrations::{RegistrationApi, RegistryApi};

/// Code issuer routes `/codes`
///
/// - POST /codes - issue a new code
/// - GET /codes/{code} - validate a code (active only)
/// - GET /codes/{code}/image.png - 400x400 PNG download
pub fn codes_routes() -> actix_web::Scope {
    web::scope("/codes")
        .route("", web::post().to(CodeApi::post_code))
        // image route must be before /{code}
        .route("/{code}/image.png", web::get().to(CodeApi::get_code_image))
        .route("/{code}", web::get().to(CodeApi::get_code))
        .route("/{code}", web::head().to(CodeApi::get_code))
}

/// Intake routes `/registrations` (public)
pub fn registrations_routes() -> actix_web::Scope {
    web::scope("/registrations").route("", web::post().to(RegistrationApi::post_registration))
}

/// Registry viewer routes `/registry` (token-guarded when configured)
///
/// - GET /registry - full joined list, newest first
/// - GET /registry/export?q= - filtered CSV download
pub fn registry_routes() -> impl actix_web::dev::HttpServiceFactory {
    web::scope("/registry")
        .wrap(from_fn(AuthGuard::registry_auth))
        .route("", web::get().to(RegistryApi::get_all_registrations))
        .route("", web::head().to(RegistryApi::get_all_registrations))
        .route("/export", web::get().to(RegistryApi::export_registrations))
}

/// API 路由，组合所有子模块
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .service(codes_routes())
        .service(registrations_routes())
        .service(registry_routes())
}

/// Screen and health routes registered at the application root.
pub fn root_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(PageService::issuer))
        .route("/register/{code}", web::get().to(PageService::register))
        .route("/admin", web::get().to(PageService::admin))
        .route("/health", web::get().to(HealthService::health_check))
        .route("/health", web::head().to(HealthService::health_check));
}
