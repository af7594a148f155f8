//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging (with OpenAPI/Swagger UI at `/swagger-ui`). The
//! workspace's main `symptom-run` binary serves the same router for production.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, DEFAULT_REST_ADDR};
use symptom_core::{CoreConfig, SymptomAnalyzer};

/// Main entry point for the symptom analysis REST API server
///
/// # Environment Variables
/// - `SYMPTOM_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `AI_GATEWAY_API_KEY`, `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY`: required
/// - See `symptom_core::config` for optional settings
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - required configuration is missing or invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("symptom_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SYMPTOM_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let cfg = CoreConfig::from_env()?;
    tracing::info!(config = ?cfg, "loaded configuration");
    let analyzer = SymptomAnalyzer::from_config(&cfg)?;

    api_rest::serve(&addr, AppState::new(analyzer)).await
}
