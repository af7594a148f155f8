//! # API REST
//!
//! REST API implementation for the symptom analysis service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - Mapping of analysis outcomes to status codes and JSON bodies
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `api-shared` for wire types and the CORS policy, and `symptom-core` for the
//! analysis itself.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{cors, AnalyzeReq, AnalyzeRes, ErrorRes, HealthRes, HealthService};
use symptom_core::constants::{
    PAYMENT_REQUIRED_MESSAGE, RATE_LIMITED_MESSAGE, UPSTREAM_FAILURE_MESSAGE,
};
use symptom_core::{AnalysisOutcome, SymptomAnalyzer, UpstreamError};

/// Default listen address for the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<SymptomAnalyzer>,
}

impl AppState {
    pub fn new(analyzer: SymptomAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, analyze_symptoms),
    components(schemas(
        HealthRes,
        AnalyzeReq,
        AnalyzeRes,
        ErrorRes,
        symptom_core::AnalysisResult,
        symptom_core::Condition,
        symptom_core::Severity,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with CORS and Swagger UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", post(analyze_symptoms))
        .route("/analyze-symptoms", post(analyze_symptoms))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors::allow_headers_layer())
        .layer(cors::cors_layer())
        .with_state(state)
}

/// Bind `addr` and serve the router until the process is stopped.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Symptom analysis REST API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// HTTP rendering of a terminal analysis outcome.
pub struct OutcomeResponse(pub AnalysisOutcome);

impl IntoResponse for OutcomeResponse {
    fn into_response(self) -> Response {
        match self.0 {
            AnalysisOutcome::Done(analysis) => {
                (StatusCode::OK, Json(AnalyzeRes { analysis })).into_response()
            }
            AnalysisOutcome::Rejected(e) => {
                (StatusCode::BAD_REQUEST, Json(ErrorRes::new(e.to_string()))).into_response()
            }
            AnalysisOutcome::UpstreamFailed(e) => {
                let (status, message) = match e {
                    UpstreamError::RateLimited(_) => {
                        (StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED_MESSAGE)
                    }
                    UpstreamError::PaymentRequired(_) => {
                        (StatusCode::PAYMENT_REQUIRED, PAYMENT_REQUIRED_MESSAGE)
                    }
                    UpstreamError::Unavailable { .. } | UpstreamError::Malformed(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_MESSAGE)
                    }
                };
                (status, Json(ErrorRes::new(message))).into_response()
            }
            AnalysisOutcome::Faulted(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorRes::new(message))).into_response()
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/analyze-symptoms",
    request_body = AnalyzeReq,
    responses(
        (status = 200, description = "Analysis produced", body = AnalyzeRes),
        (status = 400, description = "Symptoms missing or blank", body = ErrorRes),
        (status = 402, description = "Completion service requires payment", body = ErrorRes),
        (status = 413, description = "Request body too large", body = ErrorRes),
        (status = 429, description = "Completion service rate limited", body = ErrorRes),
        (status = 500, description = "Unexpected fault", body = ErrorRes)
    )
)]
/// Analyse a free-text symptom description.
///
/// The body is read as raw bytes so that a missing or blank `symptoms` field maps to
/// `400` while a body that is not JSON at all maps to `500`. A body that cannot be
/// read (for example one over the size limit) keeps its status with a JSON error.
#[axum::debug_handler]
async fn analyze_symptoms(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match body {
        Ok(body) => OutcomeResponse(state.analyzer.run(&body).await).into_response(),
        Err(rejection) => {
            tracing::warn!(status = %rejection.status(), error = %rejection, "unreadable request body");
            (rejection.status(), Json(ErrorRes::new(rejection.body_text()))).into_response()
        }
    }
}
