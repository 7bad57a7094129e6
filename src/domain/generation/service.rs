use super::error::GenerationServiceError;
use super::format::AudioFormat;
use super::model::ModelKey;
use crate::infrastructure::repositories::GenerationRepository;
use async_trait::async_trait;
use moka::future::Cache;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub audio_data: Vec<u8>,
    pub model: ModelKey,
    pub format: AudioFormat,
}

pub struct GenerationService {
    backends: HashMap<ModelKey, Arc<dyn GenerationRepository>>,
    cache: Option<Cache<String, Vec<u8>>>,
}

impl GenerationService {
    pub fn new(
        backends: HashMap<ModelKey, Arc<dyn GenerationRepository>>,
        cache_enabled: bool,
    ) -> Self {
        // Repeated identical submissions are common while users tweak prompts;
        // entries idle out so the cache never outlives a session by much.
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(50)
                    .time_to_idle(Duration::from_secs(30 * 60))
                    .build(),
            )
        } else {
            None
        };

        Self { backends, cache }
    }

    /// Models that have a usable upstream endpoint.
    pub fn configured_models(&self) -> Vec<ModelKey> {
        ModelKey::ALL
            .into_iter()
            .filter(|key| self.backends.contains_key(key))
            .collect()
    }
}

#[async_trait]
pub trait GenerationServiceApi: Send + Sync {
    /// Generate an audio track from a text prompt.
    ///
    /// This operation:
    /// - Validates the prompt before any I/O
    /// - Resolves the model key to its configured backend
    /// - Calls the upstream inference API (or serves from cache)
    ///
    /// The returned audio bytes are opaque; the requested format only drives
    /// the response content type and download extension.
    async fn generate(
        &self,
        prompt: &str,
        model: ModelKey,
        format: AudioFormat,
    ) -> Result<GenerationResult, GenerationServiceError>;
}

#[async_trait]
impl GenerationServiceApi for GenerationService {
    async fn generate(
        &self,
        prompt: &str,
        model: ModelKey,
        format: AudioFormat,
    ) -> Result<GenerationResult, GenerationServiceError> {
        // 1. Fail fast on an empty prompt, before any network activity
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerationServiceError::EmptyPrompt);
        }

        tracing::info!(
            model = %model,
            format = %format,
            prompt_length = prompt.len(),
            "Generation request"
        );

        // 2. Resolve the backend for the requested model
        let backend = self
            .backends
            .get(&model)
            .ok_or(GenerationServiceError::NotConfigured(model))?;

        // 3. Check cache (if enabled)
        let cache_key = format!("{}:{}", model, prompt);
        if let Some(cache) = &self.cache {
            if let Some(audio_data) = cache.get(&cache_key).await {
                tracing::info!(
                    model = %model,
                    audio_size = audio_data.len(),
                    "Generation cache hit"
                );
                return Ok(GenerationResult {
                    audio_data,
                    model,
                    format,
                });
            }
        }

        // 4. Call the upstream model API
        let start_time = std::time::Instant::now();
        let audio_data = backend
            .generate(prompt)
            .await
            .map_err(|message| GenerationServiceError::Upstream { model, message })?;

        tracing::info!(
            model = %model,
            latency_ms = start_time.elapsed().as_millis(),
            audio_size_bytes = audio_data.len(),
            "Generation completed"
        );

        // 5. Cache the raw audio for identical re-submissions
        if let Some(cache) = &self.cache {
            cache.insert(cache_key, audio_data.clone()).await;
        }

        Ok(GenerationResult {
            audio_data,
            model,
            format,
        })
    }
}
