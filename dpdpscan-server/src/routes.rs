//! HTTP handlers for dpdpscan server.

use std::sync::Arc;

use actix_web::{HttpResponse, Responder, get, post, web};
use log::info;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use dpdpscan_core::{DEFAULT_HOST, RepoRef, ScanError, ScanReport, analyze};

use crate::acquire::{RawHost, acquire};
use crate::openapi::ApiDoc;

#[derive(Clone)]
/// Shared application state for handlers.
pub struct AppState {
    /// Raw-content host used for acquisition.
    pub raw_host: Arc<dyn RawHost + Send + Sync>,
}

/// Request payload for a repository scan.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScanRequest {
    /// Public repository URL to scan.
    pub repo_url: String,
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Liveness payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "ok".
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    ),
    tag = "health"
)]
#[get("/api/health")]
/// Liveness probe.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/scan",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Scan completed", body = ScanReport),
        (status = 400, description = "Invalid URL or repository unreachable", body = ErrorResponse)
    ),
    tag = "scan"
)]
#[post("/api/scan")]
/// Scan a public repository for DPDP compliance heuristics.
pub async fn scan(state: web::Data<AppState>, payload: web::Json<ScanRequest>) -> impl Responder {
    let repo = match RepoRef::parse(&payload.repo_url, DEFAULT_HOST) {
        Ok(repo) => repo,
        Err(err) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                message: err.to_string(),
            });
        }
    };

    info!("scanning {}/{}", repo.owner, repo.repo);

    // Acquisition uses a blocking client; keep it off the async runtime.
    let raw_host = state.raw_host.clone();
    let owner = repo.owner.clone();
    let name = repo.repo.clone();
    let blob = match web::block(move || acquire(raw_host.as_ref(), &owner, &name)).await {
        Ok(blob) => blob,
        Err(err) => {
            return HttpResponse::InternalServerError().json(ErrorResponse {
                message: format!("acquisition task failed: {err}"),
            });
        }
    };

    if blob.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            message: ScanError::AcquisitionFailed.to_string(),
        });
    }

    HttpResponse::Ok().json(analyze(&repo, &blob))
}

#[utoipa::path(
    get,
    path = "/openapi.json",
    responses(
        (status = 200, description = "OpenAPI document")
    ),
    tag = "meta"
)]
#[get("/api/openapi.json")]
/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}
