use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{error, info};

use crate::api::error_code::ErrorCode;
use crate::api::helpers::{error_from_scangate, error_response, json_response};
use crate::api::types::{CodeResponse, IssueResponse};
use crate::services::{CodeService, qr};

pub struct CodeApi;

impl CodeApi {
    /// Issue a new code. Every call creates a distinct record.
    pub async fn post_code(service: web::Data<Arc<CodeService>>) -> impl Responder {
        match service.issue().await {
            Ok(issued) => {
                info!("Issuer API: code created - {}", issued.record.code);
                json_response(
                    StatusCode::CREATED,
                    ErrorCode::Success,
                    "OK",
                    Some(IssueResponse::from(issued)),
                )
            }
            Err(e) => {
                error!("Issuer API: failed to issue code: {}", e);
                error_from_scangate(&e)
            }
        }
    }

    /// Look up an active code by its exact token.
    pub async fn get_code(
        code: web::Path<String>,
        service: web::Data<Arc<CodeService>>,
    ) -> impl Responder {
        match service.validate(&code).await {
            Ok(Some(record)) => {
                json_response(
                    StatusCode::OK,
                    ErrorCode::Success,
                    "OK",
                    Some(CodeResponse::from(record)),
                )
            }
            Ok(None) => {
                info!("Issuer API: code not found - {}", code);
                error_response(StatusCode::NOT_FOUND, ErrorCode::CodeNotFound, "Code not found")
            }
            Err(e) => {
                error!("Issuer API: code lookup failed - {}: {}", code, e);
                error_from_scangate(&e)
            }
        }
    }

    /// Serve the code's QR symbol as a fixed 400x400 PNG attachment.
    pub async fn get_code_image(
        code: web::Path<String>,
        service: web::Data<Arc<CodeService>>,
    ) -> impl Responder {
        let record = match service.validate(&code).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                return error_response(
                    StatusCode::NOT_FOUND,
                    ErrorCode::CodeNotFound,
                    "Code not found",
                );
            }
            Err(e) => {
                error!("Issuer API: code lookup failed - {}: {}", code, e);
                return error_from_scangate(&e);
            }
        };

        let registration_url = service.registration_url(&record.code);
        match qr::render_png(&registration_url) {
            Ok(bytes) => HttpResponse::Ok()
                .content_type("image/png")
                .insert_header((
                    "Content-Disposition",
                    format!(
                        "attachment; filename=\"{}\"",
                        qr::image_filename(&record.code)
                    ),
                ))
                .body(bytes),
            Err(e) => {
                error!("Issuer API: failed to render image - {}: {}", code, e);
                error_from_scangate(&e)
            }
        }
    }
}
