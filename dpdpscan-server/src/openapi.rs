//! OpenAPI specification for dpdpscan server.

use utoipa::OpenApi;

use dpdpscan_core::{ScanReport, Severity, Violation};

use crate::routes::{ErrorResponse, HealthResponse, ScanRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::scan,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            ScanRequest,
            ScanReport,
            Violation,
            Severity,
            HealthResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "scan", description = "Repository compliance scans"),
        (name = "health", description = "Liveness"),
        (name = "meta", description = "API metadata")
    )
)]
/// OpenAPI specification for the dpdpscan server.
pub struct ApiDoc;
