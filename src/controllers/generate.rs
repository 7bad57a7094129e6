use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::generation::{AudioFormat, GenerationService, GenerationServiceApi, ModelKey},
    error::{AppError, AppResult},
};

/// Request for POST /generate
///
/// All fields arrive as strings from the frontend selectors; `format`
/// defaults to mp3 when absent.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub format: Option<String>,
}

pub struct GenerateController {
    generation_service: Arc<GenerationService>,
}

impl GenerateController {
    pub fn new(generation_service: Arc<GenerationService>) -> Self {
        Self { generation_service }
    }

    pub fn configured_models(&self) -> Vec<ModelKey> {
        self.generation_service.configured_models()
    }

    /// POST /generate - Turn a text prompt into a downloadable audio track
    pub async fn generate(
        State(controller): State<Arc<GenerateController>>,
        Json(request): Json<GenerateRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        // Validate input. Prompt emptiness is re-checked by the service; the
        // missing-field case produces the same user-facing message.
        let prompt = request.prompt.unwrap_or_default();
        let model = request
            .model
            .filter(|m| !m.is_empty())
            .ok_or_else(|| AppError::BadRequest("Missing prompt or model selection".to_string()))?;

        let model: ModelKey = model
            .parse()
            .map_err(|_| AppError::NotFound(format!("Model {} is not configured.", model)))?;

        let format = request.format.unwrap_or_else(|| "mp3".to_string());
        let format: AudioFormat = format
            .parse()
            .map_err(|_| AppError::BadRequest(format!("Unsupported output format: {}", format)))?;

        // Generate audio using the service
        let result = controller
            .generation_service
            .generate(&prompt, model, format)
            .await
            .map_err(AppError::from)?;

        // Build headers: the payload is opaque, so content type and download
        // name come from the requested format, not from sniffing the bytes
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, result.format.content_type().parse().unwrap());
        headers.insert(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"generated_song.{}\"",
                result.format.extension()
            )
            .parse()
            .unwrap(),
        );
        headers.insert("X-Model", result.model.as_str().parse().unwrap());

        Ok((StatusCode::OK, headers, Body::from(result.audio_data)))
    }
}
