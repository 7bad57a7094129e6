use crate::domain::generation::ModelKey;
use serde::Deserialize;
use std::env;

const MUSICGEN_DEFAULT_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/musicgen-small";
const RIFFUSION_DEFAULT_URL: &str =
    "https://api-inference.huggingface.co/models/riffusion/riffusion-model-v1";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    pub static_dir: String,
    // Upstream model APIs
    pub hf_api_token: Option<String>,
    pub musicgen_url: Option<String>,
    pub riffusion_url: Option<String>,
    pub suno_url: Option<String>,
    pub udio_url: Option<String>,
    pub ace_step_url: Option<String>,
    pub yue_url: Option<String>,
    pub upstream_timeout_secs: u64,
    // Generation cache
    pub generation_cache_enabled: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            hf_api_token: env::var("HF_API_TOKEN").ok(),
            musicgen_url: Some(
                env::var("MUSICGEN_URL").unwrap_or_else(|_| MUSICGEN_DEFAULT_URL.to_string()),
            ),
            riffusion_url: Some(
                env::var("RIFFUSION_URL").unwrap_or_else(|_| RIFFUSION_DEFAULT_URL.to_string()),
            ),
            // Hosted services and self-hosted models have no sensible default
            // endpoint; they stay unconfigured until a URL is provided.
            suno_url: env::var("SUNO_URL").ok(),
            udio_url: env::var("UDIO_URL").ok(),
            ace_step_url: env::var("ACE_STEP_URL").ok(),
            yue_url: env::var("YUE_URL").ok(),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
            generation_cache_enabled: env::var("GENERATION_CACHE_ENABLED")
                .unwrap_or_else(|_| "false".to_string())
                .parse::<String>()
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(false),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Model keys with a configured upstream endpoint, in declaration order.
    pub fn model_endpoints(&self) -> Vec<(ModelKey, String)> {
        let urls = [
            (ModelKey::MusicGen, &self.musicgen_url),
            (ModelKey::Riffusion, &self.riffusion_url),
            (ModelKey::Suno, &self.suno_url),
            (ModelKey::Udio, &self.udio_url),
            (ModelKey::AceStep, &self.ace_step_url),
            (ModelKey::Yue, &self.yue_url),
        ];

        urls.into_iter()
            .filter_map(|(key, url)| url.as_ref().map(|u| (key, u.clone())))
            .collect()
    }
}
