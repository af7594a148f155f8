use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, DEFAULT_REST_ADDR};
use symptom_core::{CoreConfig, SymptomAnalyzer};

/// Main entry point for the symptom analysis service
///
/// Resolves configuration once, refuses to start if anything required is missing, then
/// serves the REST API (analysis endpoint, health check, Swagger UI).
///
/// # Environment Variables
/// - `SYMPTOM_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `AI_GATEWAY_API_KEY`: completion service credential (required)
/// - `AI_GATEWAY_URL`, `AI_GATEWAY_MODEL`, `AI_GATEWAY_TIMEOUT_SECS`: completion settings
/// - `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY`: audit store connection (required)
/// - `AUDIT_TABLE`, `AUDIT_MAX_ATTEMPTS`, `AUDIT_TIMEOUT_SECS`: audit settings
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symptom_run=info".parse()?)
                .add_directive("symptom_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr =
        std::env::var("SYMPTOM_REST_ADDR").unwrap_or_else(|_| DEFAULT_REST_ADDR.into());

    let cfg = CoreConfig::from_env().map_err(|e| {
        tracing::error!("refusing to start: {}", e);
        e
    })?;
    let analyzer = SymptomAnalyzer::from_config(&cfg)?;

    tracing::info!("++ Starting symptom analysis REST on {}", rest_addr);
    api_rest::serve(&rest_addr, AppState::new(analyzer)).await
}
