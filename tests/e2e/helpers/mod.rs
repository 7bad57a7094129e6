use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sonicforge::controllers::generate::GenerateController;
use sonicforge::domain::generation::{GenerationService, ModelKey};
use sonicforge::infrastructure::config::{Config, Environment, LogFormat};
use sonicforge::infrastructure::http::build_router;
use sonicforge::infrastructure::repositories::{GenerationRepository, HfInferenceRepository};
use tokio::net::TcpListener;

pub mod api_client;
pub mod upstream;

use api_client::TestClient;
use upstream::{spawn_stub_upstream, StubUpstream};

pub struct TestContext {
    pub client: TestClient,
    pub base_url: String,
    pub upstream: StubUpstream,
}

pub async fn spawn_app() -> TestContext {
    spawn_app_with_cache(false).await
}

/// Spawn the real application on an ephemeral port, with musicgen pointed at
/// the healthy stub endpoint and riffusion at the always-busy one. suno, udio
/// and the self-hosted models stay unconfigured.
pub async fn spawn_app_with_cache(cache_enabled: bool) -> TestContext {
    let upstream = spawn_stub_upstream().await;

    let config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
        static_dir: "static".to_string(),
        hf_api_token: Some("test-hf-token".to_string()),
        musicgen_url: Some(format!("{}/ok", upstream.base_url)),
        riffusion_url: Some(format!("{}/busy", upstream.base_url)),
        suno_url: None,
        udio_url: None,
        ace_step_url: None,
        yue_url: None,
        upstream_timeout_secs: 5,
        generation_cache_enabled: cache_enabled,
    };

    let app = build_app(&config);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestContext {
        client: TestClient::new(&base_url),
        base_url,
        upstream,
    }
}

/// Mirror of the wiring in `main.rs`, minus the listener.
fn build_app(config: &Config) -> Router {
    let upstream_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.upstream_timeout_secs))
        .build()
        .expect("Failed to build upstream client");

    let mut backends: HashMap<ModelKey, Arc<dyn GenerationRepository>> = HashMap::new();
    for (model, endpoint) in config.model_endpoints() {
        backends.insert(
            model,
            Arc::new(HfInferenceRepository::new(
                upstream_client.clone(),
                endpoint,
                config.hf_api_token.clone(),
            )),
        );
    }

    let generation_service = Arc::new(GenerationService::new(
        backends,
        config.generation_cache_enabled,
    ));
    let generate_controller = Arc::new(GenerateController::new(generation_service));

    build_router(config, generate_controller)
}
