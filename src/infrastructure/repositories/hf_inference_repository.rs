use super::generation_repository::GenerationRepository;
use async_trait::async_trait;
use serde::Serialize;

/// Request payload for the HuggingFace Inference API and compatible
/// self-hosted model servers.
#[derive(Debug, Serialize)]
struct InferencePayload<'a> {
    inputs: &'a str,
}

/// HuggingFace-style HTTP implementation of the generation repository.
/// Also covers self-hosted endpoints that accept the same `{"inputs": ...}`
/// payload and answer with raw audio bytes.
pub struct HfInferenceRepository {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HfInferenceRepository {
    pub fn new(client: reqwest::Client, endpoint: String, api_token: Option<String>) -> Self {
        Self {
            client,
            endpoint,
            api_token,
        }
    }
}

#[async_trait]
impl GenerationRepository for HfInferenceRepository {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, String> {
        tracing::info!(
            endpoint = %self.endpoint,
            prompt_length = prompt.len(),
            "Calling inference API"
        );

        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&InferencePayload { inputs: prompt });

        if let Some(token) = &self.api_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(
                error = %e,
                endpoint = %self.endpoint,
                "Inference API call failed"
            );
            if e.is_timeout() {
                "inference request timed out".to_string()
            } else {
                format!("connection failed: {}", e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status.as_u16(),
                endpoint = %self.endpoint,
                body = %body,
                "Inference API returned an error"
            );
            return Err(format!("HTTP {}: {}", status.as_u16(), body));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| format!("failed to read audio body: {}", e))?
            .to_vec();

        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Inference audio received successfully"
        );

        Ok(audio_bytes)
    }
}
