use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use sonicforge::controllers::generate::GenerateController;
use sonicforge::domain::generation::{GenerationService, ModelKey};
use sonicforge::infrastructure::config::{Config, LogFormat};
use sonicforge::infrastructure::http::start_http_server;
use sonicforge::infrastructure::repositories::{GenerationRepository, HfInferenceRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting SonicForge on {}:{}",
        config.host,
        config.port
    );

    if config.hf_api_token.is_none() {
        tracing::warn!(
            "HF_API_TOKEN not set. Requests to HuggingFace-hosted models will be unauthenticated and may be rejected."
        );
    }

    // Shared HTTP client for all upstream model APIs
    let upstream_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()?;

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate one generation repository per configured model
    tracing::info!("Instantiating model backends...");
    let mut backends: HashMap<ModelKey, Arc<dyn GenerationRepository>> = HashMap::new();
    for (model, endpoint) in config.model_endpoints() {
        tracing::info!(model = %model, endpoint = %endpoint, "Model backend configured");
        backends.insert(
            model,
            Arc::new(HfInferenceRepository::new(
                upstream_client.clone(),
                endpoint,
                config.hf_api_token.clone(),
            )),
        );
    }

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let generation_service = Arc::new(GenerationService::new(
        backends,
        config.generation_cache_enabled,
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let generate_controller = Arc::new(GenerateController::new(generation_service));

    // Start HTTP server with all routes
    start_http_server(Arc::new(config), generate_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "sonicforge=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "sonicforge=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
