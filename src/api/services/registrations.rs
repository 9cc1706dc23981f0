use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::api::error_code::ErrorCode;
use crate::api::helpers::{error_from_scangate, json_response, success_response};
use crate::api::types::{ExportQuery, PostRegistration, RegistrationItem, RegistrationOutcome};
use crate::errors::ScangateError;
use crate::services::{RegistrationService, SubmitForm};
use crate::utils::ip::extract_client_ip;

pub struct RegistrationApi;

impl RegistrationApi {
    /// Store one intake submission.
    ///
    /// Empty or whitespace-only fields are rejected before any storage
    /// call; backend failures keep the submitted values client-side for a
    /// manual retry.
    pub async fn post_registration(
        req: HttpRequest,
        form: web::Json<PostRegistration>,
        service: web::Data<Arc<RegistrationService>>,
    ) -> impl Responder {
        let ip_address = extract_client_ip(&req);
        let form = form.into_inner();

        match service
            .submit(
                SubmitForm {
                    code: form.code,
                    name: form.name,
                    phone: form.phone,
                },
                ip_address,
            )
            .await
        {
            Ok(outcome) => {
                info!(
                    "Intake API: registration stored, redirecting to {}",
                    outcome.destination_url
                );
                json_response(
                    StatusCode::CREATED,
                    ErrorCode::Success,
                    "OK",
                    Some(RegistrationOutcome {
                        destination_url: outcome.destination_url,
                        code: outcome.linked_code,
                    }),
                )
            }
            Err(e @ ScangateError::Validation(_)) => {
                debug!("Intake API: submission rejected: {}", e);
                error_from_scangate(&e)
            }
            Err(e) => {
                error!("Intake API: failed to store registration: {}", e);
                error_from_scangate(&e)
            }
        }
    }
}

pub struct RegistryApi;

impl RegistryApi {
    /// Full registration list, newest first, joined with issuing codes.
    pub async fn get_all_registrations(
        service: web::Data<Arc<RegistrationService>>,
    ) -> impl Responder {
        match service.list().await {
            Ok(rows) => {
                let items: Vec<RegistrationItem> =
                    rows.into_iter().map(RegistrationItem::from).collect();
                success_response(items)
            }
            Err(e) => {
                error!("Registry API: failed to load registrations: {}", e);
                error_from_scangate(&e)
            }
        }
    }

    /// Export the filtered registration set as a quoted CSV attachment.
    pub async fn export_registrations(
        query: web::Query<ExportQuery>,
        service: web::Data<Arc<RegistrationService>>,
    ) -> impl Responder {
        let term = query.q.as_deref().unwrap_or("");

        let rows = match service.list().await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Registry API: export failed to load registrations: {}", e);
                return error_from_scangate(&e);
            }
        };

        let filtered = RegistrationService::filter(&rows, term);
        info!(
            "Registry API: exporting {} of {} registrations",
            filtered.len(),
            rows.len()
        );

        match RegistrationService::export_csv(&filtered) {
            Ok(bytes) => HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!(
                        "attachment; filename=\"{}\"",
                        RegistrationService::export_filename()
                    ),
                ))
                .body(bytes),
            Err(e) => {
                error!("Registry API: CSV generation failed: {}", e);
                error_from_scangate(&e)
            }
        }
    }
}
